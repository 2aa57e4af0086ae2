use std::io::Write;

use es_runtime::{EngineError, Encoding};

pub(crate) mod builtins;
pub(crate) mod gc_demo;
pub(crate) mod strinfo;
pub(crate) mod substr;

pub(crate) fn print_json(obj: serde_json::Value) {
    print_line(&obj.to_string());
}

pub(crate) fn print_line(line: &str) {
    let mut out = std::io::stdout().lock();
    if let Err(e) = writeln!(out, "{line}") {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("stdout error: {e}");
        std::process::exit(2);
    }
}

/// Reports a usage problem and exits with status 2.
pub(crate) fn usage_error(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(2);
}

/// Reports an engine error the way a script would see it and exits with status 1.
pub(crate) fn engine_error(err: EngineError) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}

pub(crate) fn encoding_name(encoding: Encoding) -> &'static str {
    match encoding {
        Encoding::Compact => "compact",
        Encoding::External => "external",
    }
}
