//! Context configuration.

bitflags::bitflags! {
    /// Optional built-in families. Fixed when the context is created.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FeatureSet: u32 {
        const ARRAY = 1 << 0;
        const STRING = 1 << 1;
        const BOOLEAN = 1 << 2;
        const NUMBER = 1 << 3;
        const DATE = 1 << 4;
        const REGEXP = 1 << 5;
        /// The native error subtypes. `Error` itself is always present.
        const ERRORS = 1 << 6;
        const MATH = 1 << 7;
        const JSON = 1 << 8;
        const TYPEDARRAY = 1 << 9;
        const PROMISE = 1 << 10;
        const MAP = 1 << 11;
        const SYMBOL = 1 << 12;
        /// Legacy `escape` and `unescape`.
        const ANNEXB = 1 << 13;
        const FLOAT64_ARRAY = 1 << 14;
    }
}

const NAMES: &[(&str, FeatureSet)] = &[
    ("array", FeatureSet::ARRAY),
    ("string", FeatureSet::STRING),
    ("boolean", FeatureSet::BOOLEAN),
    ("number", FeatureSet::NUMBER),
    ("date", FeatureSet::DATE),
    ("regexp", FeatureSet::REGEXP),
    ("errors", FeatureSet::ERRORS),
    ("math", FeatureSet::MATH),
    ("json", FeatureSet::JSON),
    ("typedarray", FeatureSet::TYPEDARRAY),
    ("promise", FeatureSet::PROMISE),
    ("map", FeatureSet::MAP),
    ("symbol", FeatureSet::SYMBOL),
    ("annexb", FeatureSet::ANNEXB),
    ("float64array", FeatureSet::FLOAT64_ARRAY),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature `{0}`")]
pub struct UnknownFeature(pub String);

impl FeatureSet {
    /// Looks up one family by its lowercase name.
    pub fn from_family_name(name: &str) -> Option<FeatureSet> {
        NAMES.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
    }

    /// Parses a comma separated list such as `array,math` or `-json,-date`.
    ///
    /// `all` and `none` reset the set. A list whose first item is an exclusion starts
    /// from every family; any other list starts from none.
    pub fn parse_list(list: &str) -> Result<FeatureSet, UnknownFeature> {
        let items: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let mut set = match items.first() {
            Some(first) if first.starts_with('-') => FeatureSet::all(),
            _ => FeatureSet::empty(),
        };
        for item in items {
            match item {
                "all" => set = FeatureSet::all(),
                "none" => set = FeatureSet::empty(),
                _ => {
                    let (remove, name) = match item.strip_prefix('-') {
                        Some(rest) => (true, rest),
                        None => (false, item.strip_prefix('+').unwrap_or(item)),
                    };
                    let flag =
                        FeatureSet::from_family_name(name).ok_or_else(|| UnknownFeature(name.to_string()))?;
                    set.set(flag, !remove);
                }
            }
        }
        Ok(set)
    }

    /// Lowercase names of the families in the set.
    pub fn names(self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(_, f)| self.contains(*f))
            .map(|(n, _)| *n)
            .collect()
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        FeatureSet::all()
    }
}

/// Engine context options.
#[derive(Clone, Copy, Debug)]
pub struct ContextConfig {
    pub features: FeatureSet,
    /// Allocations between implicit collections.
    pub gc_object_threshold: usize,
    /// Estimated heap bytes that trigger an implicit collection.
    pub gc_byte_threshold: usize,
}

impl ContextConfig {
    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn with_gc_object_threshold(mut self, n: usize) -> Self {
        self.gc_object_threshold = n.max(1);
        self
    }

    pub fn with_gc_byte_threshold(mut self, n: usize) -> Self {
        self.gc_byte_threshold = n.max(1);
        self
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            features: FeatureSet::default(),
            gc_object_threshold: 32 * 1024,
            gc_byte_threshold: 4 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusion_list_starts_empty() {
        let set = FeatureSet::parse_list("array, math").unwrap();
        assert_eq!(set, FeatureSet::ARRAY | FeatureSet::MATH);
    }

    #[test]
    fn exclusion_list_starts_full() {
        let set = FeatureSet::parse_list("-json,-date").unwrap();
        assert!(!set.contains(FeatureSet::JSON));
        assert!(!set.contains(FeatureSet::DATE));
        assert!(set.contains(FeatureSet::TYPEDARRAY));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = FeatureSet::parse_list("array,bogus").unwrap_err();
        assert_eq!(err, UnknownFeature("bogus".into()));
    }

    #[test]
    fn family_names_are_lowercase() {
        assert_eq!(FeatureSet::from_family_name("float64array"), Some(FeatureSet::FLOAT64_ARRAY));
        assert_eq!(FeatureSet::from_family_name("MATH"), None);
        // The generated flag lookup still takes the constant name.
        assert_eq!(FeatureSet::from_name("MATH"), Some(FeatureSet::MATH));
    }

    #[test]
    fn names_round_trip() {
        let set = FeatureSet::SYMBOL | FeatureSet::ANNEXB;
        assert_eq!(set.names(), vec!["symbol", "annexb"]);
        assert_eq!(FeatureSet::parse_list(&set.names().join(",")).unwrap(), set);
    }
}
