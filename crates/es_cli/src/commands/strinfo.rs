use es_runtime::{Context, Encoding};
use serde_json::json;

use crate::args::CliArgs;
use crate::commands::{engine_error, print_json, print_line, usage_error};

pub(crate) fn run(args: &CliArgs, ctx: &mut Context) {
    if args.positional.len() != 1 {
        usage_error("Missing <text>");
    }
    let s = ctx.create_string(&args.positional[0]);
    let measure = |enc: Encoding| -> (usize, usize) {
        match (ctx.string_length(s, enc), ctx.string_size(s, enc)) {
            (Ok(length), Ok(size)) => (length, size),
            (Err(e), _) | (_, Err(e)) => engine_error(e),
        }
    };
    let (compact_length, compact_size) = measure(Encoding::Compact);
    let (external_length, external_size) = measure(Encoding::External);

    if args.json_out {
        print_json(json!({
            "length": { "compact": compact_length, "external": external_length },
            "size": { "compact": compact_size, "external": external_size },
            "ascii": compact_length == compact_size,
        }));
    } else {
        print_line(&format!("length\tcompact={compact_length}\texternal={external_length}"));
        print_line(&format!("size\tcompact={compact_size}\texternal={external_size}"));
    }
    ctx.release(s);
}
