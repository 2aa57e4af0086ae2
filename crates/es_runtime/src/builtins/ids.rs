//! Built-in object identifiers and their static shape.

use crate::config::FeatureSet;
use crate::errors::ErrorKind;

use super::descriptor::Arity;
use super::routines::{RoutineBinding, RoutineId};

/// Closed set of built-in objects. Declaration order is the registry slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinId {
    Global,
    ObjectPrototype,
    Object,
    FunctionPrototype,
    Function,
    ArrayPrototype,
    Array,
    StringPrototype,
    String,
    BooleanPrototype,
    Boolean,
    NumberPrototype,
    Number,
    DatePrototype,
    Date,
    RegExpPrototype,
    RegExp,
    ErrorPrototype,
    Error,
    EvalErrorPrototype,
    EvalError,
    RangeErrorPrototype,
    RangeError,
    ReferenceErrorPrototype,
    ReferenceError,
    SyntaxErrorPrototype,
    SyntaxError,
    TypeErrorPrototype,
    TypeError,
    UriErrorPrototype,
    UriError,
    Math,
    Json,
    ArrayBufferPrototype,
    ArrayBuffer,
    TypedArrayPrototype,
    TypedArray,
    Int8ArrayPrototype,
    Int8Array,
    Uint8ArrayPrototype,
    Uint8Array,
    Uint8ClampedArrayPrototype,
    Uint8ClampedArray,
    Int16ArrayPrototype,
    Int16Array,
    Uint16ArrayPrototype,
    Uint16Array,
    Int32ArrayPrototype,
    Int32Array,
    Uint32ArrayPrototype,
    Uint32Array,
    Float32ArrayPrototype,
    Float32Array,
    Float64ArrayPrototype,
    Float64Array,
    PromisePrototype,
    Promise,
    MapPrototype,
    Map,
    SymbolPrototype,
    Symbol,
}

/// Static description of one built-in.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinInfo {
    pub id: BuiltinId,
    pub name: &'static str,
    /// `[[Prototype]]` of the realized object.
    pub proto: Option<BuiltinId>,
    pub requires: FeatureSet,
    /// Call and construct behaviour of constructor objects.
    pub constructor: Option<RoutineBinding>,
}

const fn object(id: BuiltinId, name: &'static str, proto: BuiltinId, requires: FeatureSet) -> BuiltinInfo {
    BuiltinInfo {
        id,
        name,
        proto: Some(proto),
        requires,
        constructor: None,
    }
}

const fn ctor(
    id: BuiltinId,
    name: &'static str,
    proto: BuiltinId,
    requires: FeatureSet,
    routine: RoutineId,
    arity: Arity,
) -> BuiltinInfo {
    BuiltinInfo {
        id,
        name,
        proto: Some(proto),
        requires,
        constructor: Some(RoutineBinding { routine, arity }),
    }
}

use BuiltinId as B;
use FeatureSet as F;

const NONE: FeatureSet = FeatureSet::empty();
const TA: FeatureSet = FeatureSet::TYPEDARRAY;
const TA64: FeatureSet = FeatureSet::TYPEDARRAY.union(FeatureSet::FLOAT64_ARRAY);

const fn error_ctor(id: BuiltinId, name: &'static str, kind: ErrorKind) -> BuiltinInfo {
    let (proto, requires) = match kind {
        ErrorKind::Error => (B::FunctionPrototype, NONE),
        _ => (B::Error, F::ERRORS),
    };
    ctor(id, name, proto, requires, RoutineId::ErrorConstructor(kind), Arity::Fixed(1))
}

const fn typed_ctor(id: BuiltinId, name: &'static str, kind: TypedArrayKind) -> BuiltinInfo {
    let requires = match kind {
        TypedArrayKind::Float64 => TA64,
        _ => TA,
    };
    ctor(id, name, B::TypedArray, requires, RoutineId::TypedArrayConstructor(kind), Arity::Fixed(3))
}

const fn typed_proto(id: BuiltinId, name: &'static str, kind: TypedArrayKind) -> BuiltinInfo {
    let requires = match kind {
        TypedArrayKind::Float64 => TA64,
        _ => TA,
    };
    object(id, name, B::TypedArrayPrototype, requires)
}

static INFO: [BuiltinInfo; BuiltinId::COUNT] = [
    BuiltinInfo { id: B::Global, name: "global", proto: Some(B::ObjectPrototype), requires: NONE, constructor: None },
    BuiltinInfo { id: B::ObjectPrototype, name: "Object.prototype", proto: None, requires: NONE, constructor: None },
    ctor(B::Object, "Object", B::FunctionPrototype, NONE, RoutineId::ObjectConstructor, Arity::Fixed(1)),
    object(B::FunctionPrototype, "Function.prototype", B::ObjectPrototype, NONE),
    ctor(B::Function, "Function", B::FunctionPrototype, NONE, RoutineId::UnsupportedConstructor("Function"), Arity::Variadic),
    object(B::ArrayPrototype, "Array.prototype", B::ObjectPrototype, F::ARRAY),
    ctor(B::Array, "Array", B::FunctionPrototype, F::ARRAY, RoutineId::ArrayConstructor, Arity::Variadic),
    object(B::StringPrototype, "String.prototype", B::ObjectPrototype, F::STRING),
    ctor(B::String, "String", B::FunctionPrototype, F::STRING, RoutineId::StringConstructor, Arity::Variadic),
    object(B::BooleanPrototype, "Boolean.prototype", B::ObjectPrototype, F::BOOLEAN),
    ctor(B::Boolean, "Boolean", B::FunctionPrototype, F::BOOLEAN, RoutineId::BooleanConstructor, Arity::Fixed(1)),
    object(B::NumberPrototype, "Number.prototype", B::ObjectPrototype, F::NUMBER),
    ctor(B::Number, "Number", B::FunctionPrototype, F::NUMBER, RoutineId::NumberConstructor, Arity::Variadic),
    object(B::DatePrototype, "Date.prototype", B::ObjectPrototype, F::DATE),
    ctor(B::Date, "Date", B::FunctionPrototype, F::DATE, RoutineId::UnsupportedConstructor("Date"), Arity::Variadic),
    object(B::RegExpPrototype, "RegExp.prototype", B::ObjectPrototype, F::REGEXP),
    ctor(B::RegExp, "RegExp", B::FunctionPrototype, F::REGEXP, RoutineId::UnsupportedConstructor("RegExp"), Arity::Fixed(2)),
    object(B::ErrorPrototype, "Error.prototype", B::ObjectPrototype, NONE),
    error_ctor(B::Error, "Error", ErrorKind::Error),
    object(B::EvalErrorPrototype, "EvalError.prototype", B::ErrorPrototype, F::ERRORS),
    error_ctor(B::EvalError, "EvalError", ErrorKind::Eval),
    object(B::RangeErrorPrototype, "RangeError.prototype", B::ErrorPrototype, F::ERRORS),
    error_ctor(B::RangeError, "RangeError", ErrorKind::Range),
    object(B::ReferenceErrorPrototype, "ReferenceError.prototype", B::ErrorPrototype, F::ERRORS),
    error_ctor(B::ReferenceError, "ReferenceError", ErrorKind::Reference),
    object(B::SyntaxErrorPrototype, "SyntaxError.prototype", B::ErrorPrototype, F::ERRORS),
    error_ctor(B::SyntaxError, "SyntaxError", ErrorKind::Syntax),
    object(B::TypeErrorPrototype, "TypeError.prototype", B::ErrorPrototype, F::ERRORS),
    error_ctor(B::TypeError, "TypeError", ErrorKind::Type),
    object(B::UriErrorPrototype, "URIError.prototype", B::ErrorPrototype, F::ERRORS),
    error_ctor(B::UriError, "URIError", ErrorKind::Uri),
    object(B::Math, "Math", B::ObjectPrototype, F::MATH),
    object(B::Json, "JSON", B::ObjectPrototype, F::JSON),
    object(B::ArrayBufferPrototype, "ArrayBuffer.prototype", B::ObjectPrototype, TA),
    ctor(B::ArrayBuffer, "ArrayBuffer", B::FunctionPrototype, TA, RoutineId::ArrayBufferConstructor, Arity::Fixed(1)),
    object(B::TypedArrayPrototype, "%TypedArray%.prototype", B::ObjectPrototype, TA),
    ctor(B::TypedArray, "%TypedArray%", B::FunctionPrototype, TA, RoutineId::TypedArrayAbstract, Arity::Variadic),
    typed_proto(B::Int8ArrayPrototype, "Int8Array.prototype", TypedArrayKind::Int8),
    typed_ctor(B::Int8Array, "Int8Array", TypedArrayKind::Int8),
    typed_proto(B::Uint8ArrayPrototype, "Uint8Array.prototype", TypedArrayKind::Uint8),
    typed_ctor(B::Uint8Array, "Uint8Array", TypedArrayKind::Uint8),
    typed_proto(B::Uint8ClampedArrayPrototype, "Uint8ClampedArray.prototype", TypedArrayKind::Uint8Clamped),
    typed_ctor(B::Uint8ClampedArray, "Uint8ClampedArray", TypedArrayKind::Uint8Clamped),
    typed_proto(B::Int16ArrayPrototype, "Int16Array.prototype", TypedArrayKind::Int16),
    typed_ctor(B::Int16Array, "Int16Array", TypedArrayKind::Int16),
    typed_proto(B::Uint16ArrayPrototype, "Uint16Array.prototype", TypedArrayKind::Uint16),
    typed_ctor(B::Uint16Array, "Uint16Array", TypedArrayKind::Uint16),
    typed_proto(B::Int32ArrayPrototype, "Int32Array.prototype", TypedArrayKind::Int32),
    typed_ctor(B::Int32Array, "Int32Array", TypedArrayKind::Int32),
    typed_proto(B::Uint32ArrayPrototype, "Uint32Array.prototype", TypedArrayKind::Uint32),
    typed_ctor(B::Uint32Array, "Uint32Array", TypedArrayKind::Uint32),
    typed_proto(B::Float32ArrayPrototype, "Float32Array.prototype", TypedArrayKind::Float32),
    typed_ctor(B::Float32Array, "Float32Array", TypedArrayKind::Float32),
    typed_proto(B::Float64ArrayPrototype, "Float64Array.prototype", TypedArrayKind::Float64),
    typed_ctor(B::Float64Array, "Float64Array", TypedArrayKind::Float64),
    object(B::PromisePrototype, "Promise.prototype", B::ObjectPrototype, F::PROMISE),
    ctor(B::Promise, "Promise", B::FunctionPrototype, F::PROMISE, RoutineId::UnsupportedConstructor("Promise"), Arity::Fixed(1)),
    object(B::MapPrototype, "Map.prototype", B::ObjectPrototype, F::MAP),
    ctor(B::Map, "Map", B::FunctionPrototype, F::MAP, RoutineId::UnsupportedConstructor("Map"), Arity::Variadic),
    object(B::SymbolPrototype, "Symbol.prototype", B::ObjectPrototype, F::SYMBOL),
    ctor(B::Symbol, "Symbol", B::FunctionPrototype, F::SYMBOL, RoutineId::SymbolConstructor, Arity::Fixed(1)),
];

impl BuiltinId {
    pub const COUNT: usize = BuiltinId::Symbol as usize + 1;

    pub fn all() -> impl Iterator<Item = BuiltinId> {
        INFO.iter().map(|i| i.id)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static BuiltinInfo {
        &INFO[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn proto(self) -> Option<BuiltinId> {
        self.info().proto
    }

    pub fn requires(self) -> FeatureSet {
        self.info().requires
    }

    pub fn constructor(self) -> Option<RoutineBinding> {
        self.info().constructor
    }

    pub fn from_name(name: &str) -> Option<BuiltinId> {
        INFO.iter().find(|i| i.name == name).map(|i| i.id)
    }

    pub const fn error_constructor(kind: ErrorKind) -> BuiltinId {
        match kind {
            ErrorKind::Error => B::Error,
            ErrorKind::Eval => B::EvalError,
            ErrorKind::Range => B::RangeError,
            ErrorKind::Reference => B::ReferenceError,
            ErrorKind::Syntax => B::SyntaxError,
            ErrorKind::Type => B::TypeError,
            ErrorKind::Uri => B::UriError,
        }
    }

    pub const fn error_prototype(kind: ErrorKind) -> BuiltinId {
        match kind {
            ErrorKind::Error => B::ErrorPrototype,
            ErrorKind::Eval => B::EvalErrorPrototype,
            ErrorKind::Range => B::RangeErrorPrototype,
            ErrorKind::Reference => B::ReferenceErrorPrototype,
            ErrorKind::Syntax => B::SyntaxErrorPrototype,
            ErrorKind::Type => B::TypeErrorPrototype,
            ErrorKind::Uri => B::UriErrorPrototype,
        }
    }

    /// Element kind of a concrete typed-array constructor or prototype.
    pub fn typed_array_kind(self) -> Option<TypedArrayKind> {
        TypedArrayKind::ALL
            .into_iter()
            .find(|k| k.constructor() == self || k.prototype() == self)
    }
}

/// Element types of the concrete typed-array constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl TypedArrayKind {
    pub const ALL: [TypedArrayKind; 9] = [
        TypedArrayKind::Int8,
        TypedArrayKind::Uint8,
        TypedArrayKind::Uint8Clamped,
        TypedArrayKind::Int16,
        TypedArrayKind::Uint16,
        TypedArrayKind::Int32,
        TypedArrayKind::Uint32,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
        }
    }

    pub const fn bytes_per_element(self) -> usize {
        match self {
            TypedArrayKind::Int8 | TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped => 1,
            TypedArrayKind::Int16 | TypedArrayKind::Uint16 => 2,
            TypedArrayKind::Int32 | TypedArrayKind::Uint32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Float64 => 8,
        }
    }

    pub const fn constructor(self) -> BuiltinId {
        match self {
            TypedArrayKind::Int8 => B::Int8Array,
            TypedArrayKind::Uint8 => B::Uint8Array,
            TypedArrayKind::Uint8Clamped => B::Uint8ClampedArray,
            TypedArrayKind::Int16 => B::Int16Array,
            TypedArrayKind::Uint16 => B::Uint16Array,
            TypedArrayKind::Int32 => B::Int32Array,
            TypedArrayKind::Uint32 => B::Uint32Array,
            TypedArrayKind::Float32 => B::Float32Array,
            TypedArrayKind::Float64 => B::Float64Array,
        }
    }

    pub const fn prototype(self) -> BuiltinId {
        match self {
            TypedArrayKind::Int8 => B::Int8ArrayPrototype,
            TypedArrayKind::Uint8 => B::Uint8ArrayPrototype,
            TypedArrayKind::Uint8Clamped => B::Uint8ClampedArrayPrototype,
            TypedArrayKind::Int16 => B::Int16ArrayPrototype,
            TypedArrayKind::Uint16 => B::Uint16ArrayPrototype,
            TypedArrayKind::Int32 => B::Int32ArrayPrototype,
            TypedArrayKind::Uint32 => B::Uint32ArrayPrototype,
            TypedArrayKind::Float32 => B::Float32ArrayPrototype,
            TypedArrayKind::Float64 => B::Float64ArrayPrototype,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_is_indexed_by_declaration_order() {
        for (i, info) in INFO.iter().enumerate() {
            assert_eq!(info.id.index(), i, "{}", info.name);
        }
    }

    #[test]
    fn prototype_links_form_a_dag() {
        for id in BuiltinId::all() {
            let mut seen = vec![id];
            let mut cur = id.proto();
            while let Some(p) = cur {
                assert!(!seen.contains(&p), "{} reaches itself", id.name());
                seen.push(p);
                cur = p.proto();
            }
            if id != BuiltinId::ObjectPrototype {
                assert_eq!(seen.last(), Some(&BuiltinId::ObjectPrototype));
            }
        }
    }

    #[test]
    fn dependencies_are_at_least_as_gated() {
        for id in BuiltinId::all() {
            if let Some(p) = id.proto() {
                assert!(id.requires().contains(p.requires()), "{} outlives {}", id.name(), p.name());
            }
        }
    }

    #[test]
    fn typed_array_kinds_map_both_ways() {
        for kind in TypedArrayKind::ALL {
            assert_eq!(kind.constructor().typed_array_kind(), Some(kind));
            assert_eq!(kind.prototype().typed_array_kind(), Some(kind));
            assert_eq!(kind.constructor().name(), kind.name());
        }
        assert_eq!(BuiltinId::TypedArray.typed_array_kind(), None);
    }
}
