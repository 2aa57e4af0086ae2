use es_runtime::{Context, Encoding, ErrorKind, Value};

#[test]
fn astral_text_lengths_and_sizes() {
    let mut ctx = Context::new();
    let s = ctx.create_string_from_compact(b"str: \xed\xa0\x81\xed\xb0\x80").unwrap();
    assert_eq!(ctx.string_length(s, Encoding::Compact).unwrap(), 7);
    assert_eq!(ctx.string_length(s, Encoding::External).unwrap(), 6);
    assert_eq!(ctx.string_size(s, Encoding::Compact).unwrap(), 11);
    assert_eq!(ctx.string_size(s, Encoding::External).unwrap(), 9);

    let mut buf = [0u8; 16];
    let n = ctx.string_to_buffer(s, &mut buf, Encoding::External).unwrap();
    assert_eq!(&buf[..n], "str: \u{10400}".as_bytes());
}

#[test]
fn single_digit_into_one_byte_buffer() {
    let mut ctx = Context::new();
    let s = ctx.create_string("3");
    let mut buf = [0u8; 1];
    let n = ctx.substring_to_buffer(s, 0, 1, &mut buf, Encoding::External).unwrap();
    assert_eq!(n, 1);
    assert_eq!(&buf, b"3");
}

#[test]
fn ascii_ranges_truncate_and_clamp() {
    let mut ctx = Context::new();
    let s = ctx.create_string("an ascii string");
    assert_eq!(ctx.string_size(s, Encoding::Compact).unwrap(), 15);

    let mut buf = [0u8; 32];
    let n = ctx.substring_to_buffer(s, 3, 8, &mut buf, Encoding::Compact).unwrap();
    assert_eq!(&buf[..n], b"ascii");

    let mut small = [0u8; 5];
    let n = ctx.substring_to_buffer(s, 0, 11, &mut small, Encoding::Compact).unwrap();
    assert_eq!(n, 5);
    assert_eq!(&small, b"an as");

    let n = ctx.substring_to_buffer(s, 16, 21, &mut buf, Encoding::External).unwrap();
    assert_eq!(n, 0);
}

#[test]
fn truncation_never_splits_a_code_point() {
    let mut ctx = Context::new();
    let s = ctx.create_string("a\u{e9}\u{10400}");
    let mut buf = [0u8; 5];
    // 'a' + 2 byte e-acute fit, the 4 byte astral character does not.
    let n = ctx.string_to_buffer(s, &mut buf, Encoding::External).unwrap();
    assert_eq!(n, 3);
    let mut buf = [0u8; 8];
    // Compact needs six bytes for the pair.
    let n = ctx.string_to_buffer(s, &mut buf, Encoding::Compact).unwrap();
    assert_eq!(n, 3);
}

#[test]
fn external_encoding_input_is_decoded() {
    let mut ctx = Context::new();
    let s = ctx.create_string_from_external("\u{1F600}!".as_bytes()).unwrap();
    assert_eq!(ctx.string_length(s, Encoding::Compact).unwrap(), 3);
    assert_eq!(ctx.string_length(s, Encoding::External).unwrap(), 2);
    assert_eq!(ctx.string_to_text(s).unwrap().to_string_lossy(), "\u{1F600}!");
}

#[test]
fn rejected_bytes_become_type_errors() {
    let mut ctx = Context::new();
    let err = ctx.create_string_from_external(b"\xc0\xaf").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    let obj = ctx.error_object(&err);
    let name = ctx.get_property(obj, "name").unwrap();
    assert_eq!(ctx.string_to_text(name).unwrap().to_string_lossy(), "TypeError");
}

#[test]
fn strict_equality_compares_code_units() {
    let mut ctx = Context::new();
    let a = ctx.create_string("same");
    let b = ctx.create_string_from_compact(b"same").unwrap();
    let c = ctx.create_string("Same");
    assert!(ctx.strict_equals(a, b));
    assert!(!ctx.strict_equals(a, c));
    assert!(ctx.strict_equals(Value::Null, Value::Null));
    assert!(!ctx.strict_equals(Value::Null, Value::Undefined));
}
