//! Declarative property entries of the built-in objects.

use crate::config::FeatureSet;
use crate::core::object::{Attributes, PropertyKey};
use crate::core::value::WellKnownSymbol;

use super::ids::BuiltinId;
use super::routines::RoutineId;

/// Argument count a routine expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Missing arguments are padded with `undefined`, extra ones are dropped.
    Fixed(u8),
    /// The routine sees the argument list as given.
    Variadic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimpleValue {
    Undefined,
    Null,
    Bool(bool),
    Symbol(WellKnownSymbol),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryKey {
    Name(&'static str),
    Symbol(WellKnownSymbol),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryValue {
    Simple(SimpleValue),
    Number(f64),
    Object(BuiltinId),
    /// String constant, e.g. the value of `@@toStringTag` or an error prototype's `name`.
    String(&'static str),
    Routine { routine: RoutineId, arity: Arity, length: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyEntry {
    pub key: EntryKey,
    pub value: EntryValue,
    pub attrs: Attributes,
    /// Families that must all be enabled for the entry to exist.
    pub requires: FeatureSet,
}

impl PropertyEntry {
    const fn new(key: EntryKey, value: EntryValue, attrs: Attributes) -> Self {
        Self {
            key,
            value,
            attrs,
            requires: FeatureSet::empty(),
        }
    }

    pub const fn simple(name: &'static str, value: SimpleValue, attrs: Attributes) -> Self {
        Self::new(EntryKey::Name(name), EntryValue::Simple(value), attrs)
    }

    pub const fn number(name: &'static str, value: f64, attrs: Attributes) -> Self {
        Self::new(EntryKey::Name(name), EntryValue::Number(value), attrs)
    }

    pub const fn object(name: &'static str, id: BuiltinId, attrs: Attributes) -> Self {
        Self::new(EntryKey::Name(name), EntryValue::Object(id), attrs)
    }

    pub const fn string(name: &'static str, value: &'static str, attrs: Attributes) -> Self {
        Self::new(EntryKey::Name(name), EntryValue::String(value), attrs)
    }

    pub const fn tagged_string(symbol: WellKnownSymbol, value: &'static str, attrs: Attributes) -> Self {
        Self::new(EntryKey::Symbol(symbol), EntryValue::String(value), attrs)
    }

    /// Routine expecting exactly `n` arguments, with `length` equal to `n`.
    pub const fn fixed(name: &'static str, routine: RoutineId, n: u8) -> Self {
        Self::routine(name, routine, Arity::Fixed(n), n)
    }

    pub const fn variadic(name: &'static str, routine: RoutineId, length: u8) -> Self {
        Self::routine(name, routine, Arity::Variadic, length)
    }

    pub const fn routine(name: &'static str, routine: RoutineId, arity: Arity, length: u8) -> Self {
        Self::new(
            EntryKey::Name(name),
            EntryValue::Routine { routine, arity, length },
            Attributes::CONFIGURABLE_WRITABLE,
        )
    }

    pub const fn requires(mut self, features: FeatureSet) -> Self {
        self.requires = self.requires.union(features);
        self
    }

    /// Explicit requirements plus the ones implied by the entry itself: symbol keys and
    /// values need symbols, and a reference needs its target to exist.
    pub fn effective_requires(&self) -> FeatureSet {
        let mut set = self.requires;
        if matches!(self.key, EntryKey::Symbol(_))
            || matches!(self.value, EntryValue::Simple(SimpleValue::Symbol(_)))
        {
            set |= FeatureSet::SYMBOL;
        }
        if let EntryValue::Object(target) = self.value {
            set |= target.requires();
        }
        set
    }

    pub fn is_enabled(&self, features: FeatureSet) -> bool {
        features.contains(self.effective_requires())
    }

    pub fn property_key(&self) -> PropertyKey {
        match self.key {
            EntryKey::Name(name) => PropertyKey::name(name),
            EntryKey::Symbol(sym) => PropertyKey::from(sym),
        }
    }
}

/// Entries that exist under `features`, in table order.
pub fn filter_table(
    entries: &'static [PropertyEntry],
    features: FeatureSet,
) -> Box<[&'static PropertyEntry]> {
    let out: Box<[&'static PropertyEntry]> =
        entries.iter().filter(|e| e.is_enabled(features)).collect();
    debug_assert!(
        out.iter()
            .enumerate()
            .all(|(i, a)| out[..i].iter().all(|b| a.key != b.key)),
        "duplicate key in built-in table"
    );
    out
}
