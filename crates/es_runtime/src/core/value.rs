//! Engine value representation.

use std::fmt;

use super::heap::ObjectId;

/// Identifies a symbol. Well-known symbols occupy the first ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownSymbol {
    HasInstance,
    IsConcatSpreadable,
    Iterator,
    Match,
    Replace,
    Search,
    Species,
    Split,
    ToPrimitive,
    ToStringTag,
    Unscopables,
}

impl WellKnownSymbol {
    pub const ALL: [WellKnownSymbol; 11] = [
        WellKnownSymbol::HasInstance,
        WellKnownSymbol::IsConcatSpreadable,
        WellKnownSymbol::Iterator,
        WellKnownSymbol::Match,
        WellKnownSymbol::Replace,
        WellKnownSymbol::Search,
        WellKnownSymbol::Species,
        WellKnownSymbol::Split,
        WellKnownSymbol::ToPrimitive,
        WellKnownSymbol::ToStringTag,
        WellKnownSymbol::Unscopables,
    ];

    pub const fn id(self) -> SymbolId {
        SymbolId(self as u32)
    }

    /// Property name on the `Symbol` constructor, e.g. `iterator`.
    pub const fn name(self) -> &'static str {
        match self {
            WellKnownSymbol::HasInstance => "hasInstance",
            WellKnownSymbol::IsConcatSpreadable => "isConcatSpreadable",
            WellKnownSymbol::Iterator => "iterator",
            WellKnownSymbol::Match => "match",
            WellKnownSymbol::Replace => "replace",
            WellKnownSymbol::Search => "search",
            WellKnownSymbol::Species => "species",
            WellKnownSymbol::Split => "split",
            WellKnownSymbol::ToPrimitive => "toPrimitive",
            WellKnownSymbol::ToStringTag => "toStringTag",
            WellKnownSymbol::Unscopables => "unscopables",
        }
    }

    /// Symbol description, e.g. `Symbol.iterator`.
    pub fn description(self) -> String {
        format!("Symbol.{}", self.name())
    }
}

/// A value as seen by the embedder and by native routines.
///
/// Strings and objects are handles into the context heap; they stay valid while rooted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(ObjectId),
    Object(ObjectId),
    Symbol(SymbolId),
}

impl Value {
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    #[inline]
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Heap slot referenced by this value, if any.
    #[inline]
    pub fn heap_id(&self) -> Option<ObjectId> {
        match self {
            Value::String(id) | Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Symbol(_) => "symbol",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(id) => write!(f, "<string #{}>", id.0),
            Value::Object(id) => write!(f, "<object #{}>", id.0),
            Value::Symbol(s) => write!(f, "<symbol #{}>", s.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_ids_follow_declaration_order() {
        for (i, sym) in WellKnownSymbol::ALL.iter().enumerate() {
            assert_eq!(sym.id(), SymbolId(i as u32));
        }
        assert_eq!(WellKnownSymbol::ToStringTag.description(), "Symbol.toStringTag");
    }

    #[test]
    fn only_strings_and_objects_live_on_the_heap() {
        assert_eq!(Value::String(ObjectId(3)).heap_id(), Some(ObjectId(3)));
        assert_eq!(Value::Symbol(SymbolId(1)).heap_id(), None);
        assert_eq!(Value::Number(1.0).heap_id(), None);
    }
}
