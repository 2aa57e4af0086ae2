use es_runtime::{BuiltinId, Context};
use serde_json::json;

use crate::args::CliArgs;
use crate::commands::{engine_error, print_json, print_line, usage_error};

pub(crate) fn run(args: &CliArgs, ctx: &mut Context) {
    let id = match args.positional.as_slice() {
        [] => BuiltinId::Global,
        [name] => BuiltinId::from_name(name)
            .unwrap_or_else(|| usage_error(&format!("Unknown built-in: {name}"))),
        _ => usage_error("Too many arguments"),
    };
    let Some(object) = ctx.builtin(id) else {
        eprintln!("{} is not enabled", id.name());
        std::process::exit(1);
    };
    let keys: Vec<String> = ctx
        .own_keys(object)
        .unwrap_or_else(|e| engine_error(e))
        .iter()
        .map(ToString::to_string)
        .collect();
    let realized: Vec<&str> = ctx.realization_order().iter().map(|id| id.name()).collect();

    if args.json_out {
        print_json(json!({
            "builtin": id.name(),
            "keys": keys,
            "realized": realized,
        }));
    } else {
        for key in &keys {
            print_line(key);
        }
        print_line(&format!("realized\t{}", realized.join(", ")));
    }
}
