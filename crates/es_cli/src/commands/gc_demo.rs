use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use es_runtime::{Context, Encoding, GcPressure, ReleaseCallback};
use serde_json::json;

use crate::args::CliArgs;
use crate::commands::{engine_error, print_json, print_line, usage_error};

static DEMO_TEXT: &[u8] = b"external demo text";

pub(crate) fn run(args: &CliArgs, ctx: &mut Context) {
    if !args.positional.is_empty() {
        usage_error("gc-demo takes no arguments");
    }
    let released = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&released);
    let callback: ReleaseCallback = Box::new(move |_: NonNull<u8>| counter.set(counter.get() + 1));

    let ptr = NonNull::from(DEMO_TEXT).cast::<u8>();
    // SAFETY: the buffer is static and never written.
    let s = unsafe { ctx.create_string_external(ptr, DEMO_TEXT.len(), Some(callback)) }
        .unwrap_or_else(|e| engine_error(e));
    let length = ctx
        .string_length(s, Encoding::Compact)
        .unwrap_or_else(|e| engine_error(e));
    let before = released.get();
    ctx.release(s);
    let report = ctx.gc(GcPressure::High);
    tracing::debug!(%report, "forced collection");

    if args.json_out {
        print_json(json!({
            "length": length,
            "callbacks_before_gc": before,
            "callbacks": released.get(),
            "freed": report.freed,
            "external_released": report.external_released,
            "live": report.live,
        }));
    } else {
        print_line(&format!("wrapped\t{length} code units"));
        print_line(&format!("callbacks before gc\t{before}"));
        print_line(&format!("callbacks\t{}", released.get()));
        print_line(&report.to_string());
    }
}
