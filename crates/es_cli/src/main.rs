mod args;
mod commands;

use es_runtime::{Context, ContextConfig};
use tracing_subscriber::EnvFilter;

use crate::args::{parse_args, usage};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            if e != usage() {
                eprintln!("{}", usage());
            }
            std::process::exit(2);
        }
    };
    init_logging(args.verbose);

    let config = ContextConfig::default().with_features(args.features);
    let mut ctx = Context::with_config(config);
    tracing::debug!(features = ?args.features.names(), "context created");

    match args.cmd.as_str() {
        "strinfo" => commands::strinfo::run(&args, &mut ctx),
        "substr" => commands::substr::run(&args, &mut ctx),
        "builtins" => commands::builtins::run(&args, &mut ctx),
        "gc-demo" => commands::gc_demo::run(&args, &mut ctx),
        _ => {
            eprintln!("Unknown command: {}", args.cmd);
            eprintln!("{}", usage());
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("es_runtime=debug,es_core=debug,es_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("es_runtime=warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
