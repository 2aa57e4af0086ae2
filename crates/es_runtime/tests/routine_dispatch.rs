use es_runtime::{BuiltinId, Context, EngineError, ErrorKind, Value};

fn method(ctx: &mut Context, id: BuiltinId, name: &str) -> Value {
    let holder = ctx.builtin(id).unwrap();
    ctx.get_property(holder, name).unwrap()
}

fn text(ctx: &Context, v: Value) -> String {
    ctx.string_to_text(v).unwrap().to_string_lossy()
}

#[test]
fn fixed_arity_pads_with_undefined() {
    let mut ctx = Context::new();
    let is_nan = method(&mut ctx, BuiltinId::Global, "isNaN");
    assert_eq!(ctx.call(is_nan, Value::Undefined, &[]).unwrap(), Value::Bool(true));
    let extra = [Value::Number(1.0), Value::Undefined, Value::Undefined];
    assert_eq!(ctx.call(is_nan, Value::Undefined, &extra).unwrap(), Value::Bool(false));
}

#[test]
fn variadic_constructor_sees_missing_arguments() {
    let mut ctx = Context::new();
    let number = ctx.builtin(BuiltinId::Number).unwrap();
    assert_eq!(ctx.call(number, Value::Undefined, &[]).unwrap(), Value::Number(0.0));
    let Value::Number(n) = ctx.call(number, Value::Undefined, &[Value::Undefined]).unwrap() else {
        panic!("expected a number");
    };
    assert!(n.is_nan());
}

#[test]
fn construct_only_routines_reject_calls() {
    let mut ctx = Context::new();
    let buffer = ctx.builtin(BuiltinId::ArrayBuffer).unwrap();
    let err = ctx.call(buffer, Value::Undefined, &[Value::Number(8.0)]).unwrap_err();
    assert_eq!(err, EngineError::type_error("ArrayBuffer cannot be directly called"));

    let abs = method(&mut ctx, BuiltinId::Math, "abs");
    let err = ctx.construct(abs, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(err.message().contains("not a constructor"));

    let symbol = ctx.builtin(BuiltinId::Symbol).unwrap();
    assert!(ctx.construct(symbol, &[]).is_err());
}

#[test]
fn unsupported_routines_are_bound_but_report_type_errors() {
    let mut ctx = Context::new();
    let parse = method(&mut ctx, BuiltinId::Json, "parse");
    let err = ctx.call(parse, Value::Undefined, &[]).unwrap_err();
    assert_eq!(err.message(), "JSON.parse is not supported by this engine core");
    let date = ctx.builtin(BuiltinId::Date).unwrap();
    assert!(ctx.construct(date, &[]).is_err());
}

#[test]
fn string_methods() {
    let mut ctx = Context::new();
    let s = ctx.create_string("  Hello, world  ");
    let trim = ctx.get_property(s, "trim").unwrap();
    let trimmed = ctx.call(trim, s, &[]).unwrap();
    assert_eq!(text(&ctx, trimmed), "Hello, world");

    let index_of = ctx.get_property(s, "indexOf").unwrap();
    let needle = ctx.create_string("world");
    assert_eq!(ctx.call(index_of, trimmed, &[needle]).unwrap(), Value::Number(7.0));

    let substring = ctx.get_property(s, "substring").unwrap();
    let part = ctx.call(substring, trimmed, &[Value::Number(5.0), Value::Number(0.0)]).unwrap();
    assert_eq!(text(&ctx, part), "Hello");

    let char_code_at = ctx.get_property(s, "charCodeAt").unwrap();
    assert_eq!(ctx.call(char_code_at, trimmed, &[]).unwrap(), Value::Number(72.0));

    let from_char_code = method(&mut ctx, BuiltinId::String, "fromCharCode");
    let hi = ctx.call(from_char_code, Value::Undefined, &[Value::Number(104.0), Value::Number(105.0)]).unwrap();
    assert_eq!(text(&ctx, hi), "hi");
}

#[test]
fn array_methods() {
    let mut ctx = Context::new();
    let array = ctx.builtin(BuiltinId::Array).unwrap();
    let list = ctx
        .construct(array, &[Value::Number(1.0), Value::Number(2.0)])
        .unwrap();
    let push = ctx.get_property(list, "push").unwrap();
    assert_eq!(ctx.call(push, list, &[Value::Number(3.5)]).unwrap(), Value::Number(3.0));
    let join = ctx.get_property(list, "join").unwrap();
    let dash = ctx.create_string("-");
    let joined = ctx.call(join, list, &[dash]).unwrap();
    assert_eq!(text(&ctx, joined), "1-2-3.5");
    let pop = ctx.get_property(list, "pop").unwrap();
    assert_eq!(ctx.call(pop, list, &[]).unwrap(), Value::Number(3.5));

    let sized = ctx.construct(array, &[Value::Number(4.0)]).unwrap();
    assert_eq!(ctx.get_property(sized, "length").unwrap(), Value::Number(4.0));
    let is_array = method(&mut ctx, BuiltinId::Array, "isArray");
    assert_eq!(ctx.call(is_array, Value::Undefined, &[sized]).unwrap(), Value::Bool(true));
}

#[test]
fn function_call_and_apply_forward_this() {
    let mut ctx = Context::new();
    let to_string = method(&mut ctx, BuiltinId::ObjectPrototype, "toString");
    let call = ctx.get_property(to_string, "call").unwrap();
    let array = ctx.create_array(&[]);
    let tag = ctx.call(call, to_string, &[array]).unwrap();
    assert_eq!(text(&ctx, tag), "[object Array]");

    let max = method(&mut ctx, BuiltinId::Math, "max");
    let apply = ctx.get_property(max, "apply").unwrap();
    let args = ctx.create_array(&[Value::Number(3.0), Value::Number(9.0), Value::Number(4.0)]);
    assert_eq!(ctx.call(apply, max, &[Value::Null, args]).unwrap(), Value::Number(9.0));
}

#[test]
fn to_string_tag_is_used() {
    let mut ctx = Context::new();
    let to_string = method(&mut ctx, BuiltinId::ObjectPrototype, "toString");
    let math = ctx.builtin(BuiltinId::Math).unwrap();
    let tag = ctx.call(to_string, math, &[]).unwrap();
    assert_eq!(text(&ctx, tag), "[object Math]");
    let tag = ctx.call(to_string, Value::Null, &[]).unwrap();
    assert_eq!(text(&ctx, tag), "[object Null]");
}

#[test]
fn error_constructors_build_error_objects() {
    let mut ctx = Context::new();
    let type_error = ctx.builtin(BuiltinId::TypeError).unwrap();
    let message = ctx.create_string("bad input");
    let err = ctx.construct(type_error, &[message]).unwrap();
    let to_string = ctx.get_property(err, "toString").unwrap();
    let rendered = ctx.call(to_string, err, &[]).unwrap();
    assert_eq!(text(&ctx, rendered), "TypeError: bad input");

    let plain = ctx.call(type_error, Value::Undefined, &[]).unwrap();
    let rendered = ctx.call(to_string, plain, &[]).unwrap();
    assert_eq!(text(&ctx, rendered), "TypeError");
}

#[test]
fn typed_arrays_over_buffers() {
    let mut ctx = Context::new();
    let buffer_ctor = ctx.builtin(BuiltinId::ArrayBuffer).unwrap();
    let buffer = ctx.construct(buffer_ctor, &[Value::Number(8.0)]).unwrap();
    let u8s = ctx.builtin(BuiltinId::Uint8Array).unwrap();
    let bytes = ctx.construct(u8s, &[buffer]).unwrap();
    let u16s = ctx.builtin(BuiltinId::Uint16Array).unwrap();
    let halves = ctx.construct(u16s, &[buffer, Value::Number(2.0), Value::Number(2.0)]).unwrap();

    assert_eq!(ctx.get_property(bytes, "length").unwrap(), Value::Number(8.0));
    assert_eq!(ctx.get_property(halves, "length").unwrap(), Value::Number(2.0));
    ctx.set_property(halves, "0", Value::Number(0x0102 as f64)).unwrap();
    assert_eq!(ctx.get_property(bytes, "2").unwrap(), Value::Number(2.0));
    assert_eq!(ctx.get_property(bytes, "3").unwrap(), Value::Number(1.0));
    assert_eq!(ctx.get_property(bytes, "8").unwrap(), Value::Undefined);

    let err = ctx.construct(u16s, &[buffer, Value::Number(1.0)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);

    let is_view = method(&mut ctx, BuiltinId::ArrayBuffer, "isView");
    assert_eq!(ctx.call(is_view, Value::Undefined, &[bytes]).unwrap(), Value::Bool(true));
    assert_eq!(ctx.call(is_view, Value::Undefined, &[buffer]).unwrap(), Value::Bool(false));

    let bpe = ctx.get_property(halves, "BYTES_PER_ELEMENT").unwrap();
    assert_eq!(bpe, Value::Number(2.0));
}

#[test]
fn symbols() {
    let mut ctx = Context::new();
    let symbol = ctx.builtin(BuiltinId::Symbol).unwrap();
    let desc = ctx.create_string("tag");
    let sym = ctx.call(symbol, Value::Undefined, &[desc]).unwrap();
    let to_string = ctx.get_property(sym, "toString").unwrap();
    let rendered = ctx.call(to_string, sym, &[]).unwrap();
    assert_eq!(text(&ctx, rendered), "Symbol(tag)");

    let symbol_for = ctx.get_property(symbol, "for").unwrap();
    let a = ctx.call(symbol_for, Value::Undefined, &[desc]).unwrap();
    let b = ctx.call(symbol_for, Value::Undefined, &[desc]).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, sym);
    let key_for = ctx.get_property(symbol, "keyFor").unwrap();
    let key = ctx.call(key_for, Value::Undefined, &[a]).unwrap();
    assert_eq!(text(&ctx, key), "tag");
    assert_eq!(ctx.call(key_for, Value::Undefined, &[sym]).unwrap(), Value::Undefined);

    let iterator = ctx.get_property(symbol, "iterator").unwrap();
    assert!(matches!(iterator, Value::Symbol(_)));
}

#[test]
fn number_formatting_and_parsing() {
    let mut ctx = Context::new();
    let n = Value::Number(255.0);
    let to_string = ctx.get_property(n, "toString").unwrap();
    let hex = ctx.call(to_string, n, &[Value::Number(16.0)]).unwrap();
    assert_eq!(text(&ctx, hex), "ff");
    let err = ctx.call(to_string, n, &[Value::Number(1.0)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);

    let parse_float = method(&mut ctx, BuiltinId::Global, "parseFloat");
    let input = ctx.create_string("  2.5e2 apples");
    assert_eq!(ctx.call(parse_float, Value::Undefined, &[input]).unwrap(), Value::Number(250.0));

    let is_integer = method(&mut ctx, BuiltinId::Number, "isInteger");
    assert_eq!(ctx.call(is_integer, Value::Undefined, &[Value::Number(4.0)]).unwrap(), Value::Bool(true));
}
