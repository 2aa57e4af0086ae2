//! Objects and their properties.

use std::fmt;

use ahash::RandomState;
use es_core::Text;
use indexmap::IndexMap;

use super::heap::ObjectId;
use super::value::{SymbolId, Value, WellKnownSymbol};
use crate::builtins::{BuiltinId, RoutineBinding, TypedArrayKind};
use crate::errors::ErrorKind;

bitflags::bitflags! {
    /// Property attribute triple.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attributes: u8 {
        const WRITABLE = 1 << 0;
        const ENUMERABLE = 1 << 1;
        const CONFIGURABLE = 1 << 2;
    }
}

impl Attributes {
    /// Not writable, not enumerable, not configurable.
    pub const FIXED: Attributes = Attributes::empty();
    pub const CONFIGURABLE_WRITABLE: Attributes =
        Attributes::CONFIGURABLE.union(Attributes::WRITABLE);
    /// Attributes of a property created by plain assignment.
    pub const DATA: Attributes = Attributes::all();
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Name(Text),
    Symbol(SymbolId),
}

impl PropertyKey {
    pub fn name(s: &str) -> Self {
        PropertyKey::Name(Text::from_str(s))
    }

    pub fn as_name(&self) -> Option<&Text> {
        match self {
            PropertyKey::Name(t) => Some(t),
            PropertyKey::Symbol(_) => None,
        }
    }

    /// Canonical array index (`0` .. `2^32 - 2`) named by this key.
    pub fn array_index(&self) -> Option<u32> {
        let PropertyKey::Name(t) = self else {
            return None;
        };
        let bytes = t.as_bytes();
        if bytes.is_empty() || bytes.len() > 10 || (bytes.len() > 1 && bytes[0] == b'0') {
            return None;
        }
        let mut n: u64 = 0;
        for &b in bytes {
            if !b.is_ascii_digit() {
                return None;
            }
            n = n * 10 + (b - b'0') as u64;
        }
        if n >= u32::MAX as u64 {
            return None;
        }
        Some(n as u32)
    }

    pub fn is_name(&self, s: &str) -> bool {
        matches!(self, PropertyKey::Name(t) if t.as_bytes() == s.as_bytes())
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::name(s)
    }
}

impl From<Text> for PropertyKey {
    fn from(t: Text) -> Self {
        PropertyKey::Name(t.to_owned_text())
    }
}

impl From<SymbolId> for PropertyKey {
    fn from(s: SymbolId) -> Self {
        PropertyKey::Symbol(s)
    }
}

impl From<WellKnownSymbol> for PropertyKey {
    fn from(s: WellKnownSymbol) -> Self {
        PropertyKey::Symbol(s.id())
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Name(t) => write!(f, "{t}"),
            PropertyKey::Symbol(s) => match WellKnownSymbol::ALL.get(s.0 as usize) {
                Some(wk) => write!(f, "[{}]", wk.description()),
                None => write!(f, "[Symbol #{}]", s.0),
            },
        }
    }
}

/// Property storage. Everything but `Value` is materialized on first read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot {
    Value(Value),
    /// Reference to another built-in object.
    Builtin(BuiltinId),
    /// Native function with its declared `length`.
    Routine { binding: RoutineBinding, length: u8 },
    String(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Property {
    pub slot: Slot,
    pub attrs: Attributes,
}

impl Property {
    pub fn writable(&self) -> bool {
        self.attrs.contains(Attributes::WRITABLE)
    }

    pub fn enumerable(&self) -> bool {
        self.attrs.contains(Attributes::ENUMERABLE)
    }

    pub fn configurable(&self) -> bool {
        self.attrs.contains(Attributes::CONFIGURABLE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypedArrayView {
    pub kind: TypedArrayKind,
    pub buffer: ObjectId,
    pub byte_offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Ordinary,
    /// A non-callable built-in such as a prototype object, `Math` or the global object.
    Builtin(BuiltinId),
    Function(RoutineBinding),
    Array(Vec<Value>),
    Error(ErrorKind),
    ArrayBuffer(Vec<u8>),
    TypedArray(TypedArrayView),
    /// Wrapper object of a primitive value.
    Primitive(Value),
}

pub type PropertyMap = IndexMap<PropertyKey, Property, RandomState>;

pub struct JsObject {
    pub proto: Option<ObjectId>,
    pub kind: ObjectKind,
    pub extensible: bool,
    pub props: PropertyMap,
}

impl JsObject {
    pub fn new(proto: Option<ObjectId>, kind: ObjectKind) -> Self {
        Self {
            proto,
            kind,
            extensible: true,
            props: PropertyMap::default(),
        }
    }

    pub fn with_capacity(proto: Option<ObjectId>, kind: ObjectKind, n: usize) -> Self {
        Self {
            proto,
            kind,
            extensible: true,
            props: PropertyMap::with_capacity_and_hasher(n, RandomState::new()),
        }
    }

    /// Adds or replaces an own property, keeping the position of a replaced key.
    pub fn define(&mut self, key: PropertyKey, slot: Slot, attrs: Attributes) {
        self.props.insert(key, Property { slot, attrs });
    }

    pub fn define_value(&mut self, key: impl Into<PropertyKey>, value: Value, attrs: Attributes) {
        self.define(key.into(), Slot::Value(value), attrs);
    }

    pub fn own(&self, key: &PropertyKey) -> Option<&Property> {
        self.props.get(key)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function(_))
    }

    pub fn binding(&self) -> Option<RoutineBinding> {
        match self.kind {
            ObjectKind::Function(b) => Some(b),
            _ => None,
        }
    }

    /// Tag used by `Object.prototype.toString` when no `@@toStringTag` is present.
    pub fn class_name(&self) -> &'static str {
        match &self.kind {
            ObjectKind::Array(_) => "Array",
            ObjectKind::Function(_) => "Function",
            ObjectKind::Error(_) => "Error",
            ObjectKind::Primitive(Value::Bool(_)) => "Boolean",
            ObjectKind::Primitive(Value::Number(_)) => "Number",
            ObjectKind::Primitive(Value::String(_)) => "String",
            ObjectKind::Builtin(BuiltinId::ArrayPrototype) => "Array",
            ObjectKind::Builtin(BuiltinId::StringPrototype) => "String",
            ObjectKind::Builtin(BuiltinId::BooleanPrototype) => "Boolean",
            ObjectKind::Builtin(BuiltinId::NumberPrototype) => "Number",
            ObjectKind::Builtin(BuiltinId::ErrorPrototype) => "Error",
            _ => "Object",
        }
    }

    /// Heap handles held by this object.
    pub(crate) fn trace(&self, out: &mut Vec<ObjectId>) {
        if let Some(p) = self.proto {
            out.push(p);
        }
        for prop in self.props.values() {
            if let Slot::Value(v) = prop.slot {
                if let Some(id) = v.heap_id() {
                    out.push(id);
                }
            }
        }
        match &self.kind {
            ObjectKind::Array(items) => out.extend(items.iter().filter_map(Value::heap_id)),
            ObjectKind::TypedArray(view) => out.push(view.buffer),
            ObjectKind::Primitive(v) => out.extend(v.heap_id()),
            _ => {}
        }
    }

    pub(crate) fn size(&self) -> usize {
        let props = self.props.capacity()
            * (std::mem::size_of::<PropertyKey>() + std::mem::size_of::<Property>() + 16);
        let extra = match &self.kind {
            ObjectKind::Array(items) => items.capacity() * std::mem::size_of::<Value>(),
            ObjectKind::ArrayBuffer(bytes) => bytes.capacity(),
            _ => 0,
        };
        std::mem::size_of::<JsObject>() + props + extra
    }
}
