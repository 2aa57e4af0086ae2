use es_runtime::FeatureSet;

pub(crate) struct CliArgs {
    pub cmd: String,
    pub verbose: bool,
    pub json_out: bool,
    pub features: FeatureSet,
    pub positional: Vec<String>,
}

pub(crate) fn usage() -> &'static str {
    "Usage: es <strinfo|substr|builtins|gc-demo> [verbose] [json] [features=<list>] <args>"
}

pub(crate) fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut argv = argv.into_iter();
    let cmd = argv.next().ok_or_else(|| usage().to_string())?;

    let mut verbose = false;
    let mut json_out = false;
    let mut features = FeatureSet::default();
    let mut positional: Vec<String> = Vec::new();

    for a in argv {
        if a.starts_with("--") {
            return Err(format!("Unknown option: {a}"));
        }
        if a == "verbose" {
            verbose = true;
        } else if a == "json" {
            json_out = true;
        } else if let Some(list) = a.strip_prefix("features=") {
            features = FeatureSet::parse_list(list).map_err(|e| e.to_string())?;
        } else {
            positional.push(a);
        }
    }

    Ok(CliArgs {
        cmd,
        verbose,
        json_out,
        features,
        positional,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn switches_are_pulled_out_of_positionals() {
        let args = parse(&["strinfo", "json", "abc", "verbose"]).unwrap();
        assert_eq!(args.cmd, "strinfo");
        assert!(args.json_out && args.verbose);
        assert_eq!(args.positional, ["abc"]);
    }

    #[test]
    fn feature_list() {
        let args = parse(&["builtins", "features=-math"]).unwrap();
        assert!(!args.features.contains(FeatureSet::MATH));
        assert!(args.features.contains(FeatureSet::JSON));
        assert!(parse(&["builtins", "features=nope"]).is_err());
    }

    #[test]
    fn dashed_options_are_rejected() {
        assert_eq!(parse(&["strinfo", "--json"]).err().as_deref(), Some("Unknown option: --json"));
        assert!(parse(&[]).is_err());
    }
}
