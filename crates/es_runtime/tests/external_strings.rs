use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use es_runtime::{BuiltinId, Context, Encoding, GcPressure, ReleaseCallback, Value};

static HELLO: [u8; 5] = *b"Hello";

fn hello_ptr() -> NonNull<u8> {
    NonNull::new(HELLO.as_ptr() as *mut u8).unwrap()
}

fn counting(calls: &Rc<Cell<u32>>) -> ReleaseCallback {
    let calls = calls.clone();
    Box::new(move |ptr| {
        assert_eq!(ptr, hello_ptr());
        calls.set(calls.get() + 1);
    })
}

#[test]
fn callback_fires_once_after_collection() {
    let calls = Rc::new(Cell::new(0));
    let mut ctx = Context::new();
    let s = unsafe { ctx.create_string_external(hello_ptr(), HELLO.len(), Some(counting(&calls))) }.unwrap();
    assert_eq!(ctx.string_size(s, Encoding::External).unwrap(), 5);

    ctx.gc(GcPressure::High);
    assert_eq!(calls.get(), 0, "released while still rooted");

    ctx.release(s);
    let report = ctx.gc(GcPressure::High);
    assert_eq!(report.external_released, 1);
    assert_eq!(calls.get(), 1);

    ctx.gc(GcPressure::High);
    assert_eq!(calls.get(), 1);
    drop(ctx);
    assert_eq!(calls.get(), 1);
}

#[test]
fn reachable_through_an_object_is_kept() {
    let calls = Rc::new(Cell::new(0));
    let mut ctx = Context::new();
    let holder = ctx.create_object();
    let s = unsafe { ctx.create_string_external(hello_ptr(), HELLO.len(), Some(counting(&calls))) }.unwrap();
    ctx.set_property(holder, "greeting", s).unwrap();
    ctx.release(s);

    ctx.gc(GcPressure::High);
    assert_eq!(calls.get(), 0);
    let again = ctx.get_property(holder, "greeting").unwrap();
    assert_eq!(ctx.string_to_text(again).unwrap().to_string_lossy(), "Hello");
    ctx.release(again);

    ctx.delete_property(holder, "greeting").unwrap();
    ctx.gc(GcPressure::Low);
    assert_eq!(calls.get(), 1);
}

#[test]
fn shared_pointer_waits_for_every_wrapper() {
    let calls = Rc::new(Cell::new(0));
    let mut ctx = Context::new();
    let a = unsafe { ctx.create_string_external(hello_ptr(), 5, Some(counting(&calls))) }.unwrap();
    let b = unsafe { ctx.create_string_external(hello_ptr(), 5, None) }.unwrap();
    assert!(ctx.strict_equals(a, b));

    ctx.release(a);
    ctx.gc(GcPressure::High);
    assert_eq!(calls.get(), 0);

    ctx.release(b);
    ctx.gc(GcPressure::High);
    assert_eq!(calls.get(), 1);
}

#[test]
fn context_teardown_releases_live_buffers() {
    let calls = Rc::new(Cell::new(0));
    {
        let mut ctx = Context::new();
        let _s = unsafe { ctx.create_string_external(hello_ptr(), 5, Some(counting(&calls))) }.unwrap();
        assert_eq!(calls.get(), 0);
    }
    assert_eq!(calls.get(), 1);
}

#[test]
fn derived_strings_do_not_borrow_the_buffer() {
    let mut ctx = Context::new();
    let s = ctx.create_string_boxed(b"borrowed bytes".to_vec().into_boxed_slice()).unwrap();
    let text = ctx.string_to_text(s).unwrap();
    assert!(!text.is_external());
    ctx.release(s);
    ctx.gc(GcPressure::High);
    assert_eq!(text.to_string_lossy(), "borrowed bytes");
}

#[test]
fn invalid_external_bytes_keep_ownership_with_caller() {
    static BAD: [u8; 4] = *b"\xf0\x9f\x98\x80";
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let mut ctx = Context::new();
    let ptr = NonNull::new(BAD.as_ptr() as *mut u8).unwrap();
    let callback: ReleaseCallback = Box::new(move |_| seen.set(seen.get() + 1));
    assert!(unsafe { ctx.create_string_external(ptr, BAD.len(), Some(callback)) }.is_err());
    drop(ctx);
    assert_eq!(calls.get(), 0);
}

#[test]
fn values_derived_by_routines_own_their_bytes() {
    let calls = Rc::new(Cell::new(0));
    let mut ctx = Context::new();
    let s = unsafe { ctx.create_string_external(hello_ptr(), HELLO.len(), Some(counting(&calls))) }.unwrap();

    let string = ctx.builtin(BuiltinId::String).unwrap();
    let converted = ctx.call(string, Value::Undefined, &[s]).unwrap();
    let wrapper = ctx.construct(string, &[s]).unwrap();
    let concat = ctx.get_property(s, "concat").unwrap();
    let joined = ctx.call(concat, s, &[]).unwrap();
    let error = ctx.builtin(BuiltinId::Error).unwrap();
    let err = ctx.construct(error, &[s]).unwrap();

    ctx.release(s);
    ctx.gc(GcPressure::High);
    assert_eq!(calls.get(), 1);

    let text = |ctx: &Context, v: Value| ctx.string_to_text(v).unwrap().to_string_lossy();
    assert_eq!(text(&ctx, converted), "Hello");
    assert_eq!(text(&ctx, joined), "Hello");
    let message = ctx.get_property(err, "message").unwrap();
    assert_eq!(text(&ctx, message), "Hello");
    let to_string = ctx.get_property(wrapper, "toString").unwrap();
    let unwrapped = ctx.call(to_string, wrapper, &[]).unwrap();
    assert_eq!(text(&ctx, unwrapped), "Hello");

    for v in [converted, wrapper, joined, err, message, unwrapped] {
        ctx.release(v);
    }
    ctx.gc(GcPressure::High);
    assert_eq!(calls.get(), 1);
}

#[test]
fn static_text_passed_through_string_is_reclaimed_once() {
    let mut ctx = Context::new();
    let s = ctx.create_string_static(b"static text").unwrap();
    let string = ctx.builtin(BuiltinId::String).unwrap();
    let copy = ctx.call(string, Value::Undefined, &[s]).unwrap();
    ctx.release(s);
    ctx.release(copy);
    let report = ctx.gc(GcPressure::High);
    assert_eq!(report.external_released, 1);
}
