use es_runtime::{Context, Encoding};
use serde_json::json;

use crate::args::CliArgs;
use crate::commands::{encoding_name, engine_error, print_json, print_line, usage_error};

pub(crate) fn run(args: &CliArgs, ctx: &mut Context) {
    let (text, rest) = match args.positional.as_slice() {
        [text, rest @ ..] if rest.len() == 3 || rest.len() == 4 => (text, rest),
        _ => usage_error("Missing <text> <start> <end> <capacity> [external]"),
    };
    let start = number(&rest[0], "<start>");
    let end = number(&rest[1], "<end>");
    let capacity = number(&rest[2], "<capacity>");
    let encoding = match rest.get(3).map(String::as_str) {
        None | Some("compact") => Encoding::Compact,
        Some("external") => Encoding::External,
        Some(other) => usage_error(&format!("Unknown encoding: {other}")),
    };

    let s = ctx.create_string(text);
    // More than the whole string is never written.
    let size = ctx.string_size(s, encoding).unwrap_or_else(|e| engine_error(e));
    let mut buf = vec![0u8; capacity.min(size)];
    let written = ctx
        .substring_to_buffer(s, start, end, &mut buf, encoding)
        .unwrap_or_else(|e| engine_error(e));
    let bytes = &buf[..written];

    if args.json_out {
        print_json(json!({
            "encoding": encoding_name(encoding),
            "written": written,
            "bytes": bytes,
        }));
    } else {
        let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
        print_line(&format!("written\t{written}"));
        print_line(&format!("bytes\t{}", hex.join(" ")));
    }
    ctx.release(s);
}

fn number(arg: &str, what: &str) -> usize {
    arg.parse()
        .unwrap_or_else(|_| usage_error(&format!("Invalid {what}: {arg}")))
}
