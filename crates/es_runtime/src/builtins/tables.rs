//! Property tables of every built-in object.

use crate::config::FeatureSet;
use crate::core::object::Attributes;
use crate::core::value::WellKnownSymbol as Sym;
use crate::errors::ErrorKind;

use super::descriptor::{Arity, PropertyEntry as E, SimpleValue};
use super::ids::{BuiltinId as B, TypedArrayKind};
use super::routines::RoutineId as R;

const FIXED: Attributes = Attributes::FIXED;
const CW: Attributes = Attributes::CONFIGURABLE_WRITABLE;
const C: Attributes = Attributes::CONFIGURABLE;

/// Table of `id`, unfiltered.
pub fn table(id: B) -> &'static [E] {
    match id {
        B::Global => &GLOBAL,
        B::ObjectPrototype => &OBJECT_PROTOTYPE,
        B::Object => &OBJECT,
        B::FunctionPrototype => &FUNCTION_PROTOTYPE,
        B::Function => &FUNCTION,
        B::ArrayPrototype => &ARRAY_PROTOTYPE,
        B::Array => &ARRAY,
        B::StringPrototype => &STRING_PROTOTYPE,
        B::String => &STRING,
        B::BooleanPrototype => &BOOLEAN_PROTOTYPE,
        B::Boolean => &BOOLEAN,
        B::NumberPrototype => &NUMBER_PROTOTYPE,
        B::Number => &NUMBER,
        B::DatePrototype => &DATE_PROTOTYPE,
        B::Date => &DATE,
        B::RegExpPrototype => &REGEXP_PROTOTYPE,
        B::RegExp => &REGEXP,
        B::ErrorPrototype => &ERROR_PROTOTYPE,
        B::Error => &ERROR,
        B::EvalErrorPrototype => &ERROR_SUBTYPE_PROTOTYPES[0],
        B::RangeErrorPrototype => &ERROR_SUBTYPE_PROTOTYPES[1],
        B::ReferenceErrorPrototype => &ERROR_SUBTYPE_PROTOTYPES[2],
        B::SyntaxErrorPrototype => &ERROR_SUBTYPE_PROTOTYPES[3],
        B::TypeErrorPrototype => &ERROR_SUBTYPE_PROTOTYPES[4],
        B::UriErrorPrototype => &ERROR_SUBTYPE_PROTOTYPES[5],
        B::EvalError => &ERROR_SUBTYPES[0],
        B::RangeError => &ERROR_SUBTYPES[1],
        B::ReferenceError => &ERROR_SUBTYPES[2],
        B::SyntaxError => &ERROR_SUBTYPES[3],
        B::TypeError => &ERROR_SUBTYPES[4],
        B::UriError => &ERROR_SUBTYPES[5],
        B::Math => &MATH,
        B::Json => &JSON,
        B::ArrayBufferPrototype => &ARRAY_BUFFER_PROTOTYPE,
        B::ArrayBuffer => &ARRAY_BUFFER,
        B::TypedArrayPrototype => &TYPED_ARRAY_PROTOTYPE,
        B::TypedArray => &TYPED_ARRAY,
        B::PromisePrototype => &PROMISE_PROTOTYPE,
        B::Promise => &PROMISE,
        B::MapPrototype => &MAP_PROTOTYPE,
        B::Map => &MAP,
        B::SymbolPrototype => &SYMBOL_PROTOTYPE,
        B::Symbol => &SYMBOL,
        _ => match id.typed_array_kind() {
            Some(kind) if id == kind.constructor() => &TYPED_ARRAY_CONSTRUCTORS[kind as usize],
            Some(kind) => &TYPED_ARRAY_PROTOTYPES[kind as usize],
            None => &[],
        },
    }
}

static GLOBAL: [E; 44] = [
    E::simple("undefined", SimpleValue::Undefined, FIXED),
    E::number("NaN", f64::NAN, FIXED),
    E::number("Infinity", f64::INFINITY, FIXED),
    E::object("Object", B::Object, CW),
    E::object("Function", B::Function, CW),
    E::object("Array", B::Array, CW),
    E::object("String", B::String, CW),
    E::object("Boolean", B::Boolean, CW),
    E::object("Number", B::Number, CW),
    E::object("Date", B::Date, CW),
    E::object("RegExp", B::RegExp, CW),
    E::object("Error", B::Error, CW),
    E::object("EvalError", B::EvalError, CW),
    E::object("RangeError", B::RangeError, CW),
    E::object("ReferenceError", B::ReferenceError, CW),
    E::object("SyntaxError", B::SyntaxError, CW),
    E::object("TypeError", B::TypeError, CW),
    E::object("URIError", B::UriError, CW),
    E::object("Math", B::Math, CW),
    E::object("JSON", B::Json, CW),
    E::object("ArrayBuffer", B::ArrayBuffer, CW),
    E::object("Int8Array", B::Int8Array, CW),
    E::object("Uint8Array", B::Uint8Array, CW),
    E::object("Int16Array", B::Int16Array, CW),
    E::object("Uint16Array", B::Uint16Array, CW),
    E::object("Int32Array", B::Int32Array, CW),
    E::object("Uint32Array", B::Uint32Array, CW),
    E::object("Float32Array", B::Float32Array, CW),
    E::object("Float64Array", B::Float64Array, CW),
    E::object("Uint8ClampedArray", B::Uint8ClampedArray, CW),
    E::object("Promise", B::Promise, CW),
    E::object("Map", B::Map, CW),
    E::object("Symbol", B::Symbol, CW),
    E::fixed("eval", R::Unsupported("eval"), 1),
    E::fixed("parseFloat", R::GlobalParseFloat, 1),
    E::fixed("isNaN", R::GlobalIsNaN, 1),
    E::fixed("isFinite", R::GlobalIsFinite, 1),
    E::fixed("decodeURI", R::Unsupported("decodeURI"), 1),
    E::fixed("decodeURIComponent", R::Unsupported("decodeURIComponent"), 1),
    E::fixed("encodeURI", R::Unsupported("encodeURI"), 1),
    E::fixed("encodeURIComponent", R::Unsupported("encodeURIComponent"), 1),
    E::fixed("parseInt", R::GlobalParseInt, 2),
    E::fixed("escape", R::Unsupported("escape"), 1).requires(FeatureSet::ANNEXB),
    E::fixed("unescape", R::Unsupported("unescape"), 1).requires(FeatureSet::ANNEXB),
];

static OBJECT_PROTOTYPE: [E; 4] = [
    E::object("constructor", B::Object, CW),
    E::fixed("toString", R::ObjectProtoToString, 0),
    E::fixed("valueOf", R::ObjectProtoValueOf, 0),
    E::fixed("hasOwnProperty", R::ObjectProtoHasOwnProperty, 1),
];

static OBJECT: [E; 4] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::ObjectPrototype, FIXED),
    E::fixed("getPrototypeOf", R::ObjectGetPrototypeOf, 1),
    E::fixed("keys", R::ObjectKeys, 1),
];

static FUNCTION_PROTOTYPE: [E; 4] = [
    E::number("length", 0.0, FIXED),
    E::object("constructor", B::Function, CW),
    E::variadic("call", R::FunctionProtoCall, 1),
    E::fixed("apply", R::FunctionProtoApply, 2),
];

static FUNCTION: [E; 2] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::FunctionPrototype, FIXED),
];

static ARRAY_PROTOTYPE: [E; 4] = [
    E::object("constructor", B::Array, CW),
    E::variadic("push", R::ArrayProtoPush, 1),
    E::fixed("pop", R::ArrayProtoPop, 0),
    E::fixed("join", R::ArrayProtoJoin, 1),
];

static ARRAY: [E; 3] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::ArrayPrototype, FIXED),
    E::fixed("isArray", R::ArrayIsArray, 1),
];

static STRING_PROTOTYPE: [E; 9] = [
    E::object("constructor", B::String, CW),
    E::fixed("toString", R::StringProtoToString, 0),
    E::fixed("valueOf", R::StringProtoToString, 0),
    E::fixed("charAt", R::StringProtoCharAt, 1),
    E::fixed("charCodeAt", R::StringProtoCharCodeAt, 1),
    E::variadic("concat", R::StringProtoConcat, 1),
    E::routine("indexOf", R::StringProtoIndexOf, Arity::Fixed(2), 1),
    E::fixed("substring", R::StringProtoSubstring, 2),
    E::fixed("trim", R::StringProtoTrim, 0),
];

static STRING: [E; 3] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::StringPrototype, FIXED),
    E::variadic("fromCharCode", R::StringFromCharCode, 1),
];

static BOOLEAN_PROTOTYPE: [E; 3] = [
    E::object("constructor", B::Boolean, CW),
    E::fixed("toString", R::BooleanProtoToString, 0),
    E::fixed("valueOf", R::BooleanProtoValueOf, 0),
];

static BOOLEAN: [E; 2] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::BooleanPrototype, FIXED),
];

static NUMBER_PROTOTYPE: [E; 3] = [
    E::object("constructor", B::Number, CW),
    E::fixed("toString", R::NumberProtoToString, 1),
    E::fixed("valueOf", R::NumberProtoValueOf, 0),
];

static NUMBER: [E; 13] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::NumberPrototype, FIXED),
    E::number("MAX_VALUE", f64::MAX, FIXED),
    E::number("MIN_VALUE", 5e-324, FIXED),
    E::number("NaN", f64::NAN, FIXED),
    E::number("POSITIVE_INFINITY", f64::INFINITY, FIXED),
    E::number("NEGATIVE_INFINITY", f64::NEG_INFINITY, FIXED),
    E::number("EPSILON", f64::EPSILON, FIXED),
    E::number("MAX_SAFE_INTEGER", 9007199254740991.0, FIXED),
    E::number("MIN_SAFE_INTEGER", -9007199254740991.0, FIXED),
    E::fixed("isInteger", R::NumberIsInteger, 1),
    E::fixed("isNaN", R::NumberIsNaN, 1),
    E::fixed("isFinite", R::NumberIsFinite, 1),
];

static DATE_PROTOTYPE: [E; 4] = [
    E::object("constructor", B::Date, CW),
    E::fixed("toString", R::Unsupported("Date.prototype.toString"), 0),
    E::fixed("valueOf", R::Unsupported("Date.prototype.valueOf"), 0),
    E::fixed("getTime", R::Unsupported("Date.prototype.getTime"), 0),
];

static DATE: [E; 5] = [
    E::number("length", 7.0, FIXED),
    E::object("prototype", B::DatePrototype, FIXED),
    E::fixed("now", R::Unsupported("Date.now"), 0),
    E::fixed("parse", R::Unsupported("Date.parse"), 1),
    E::variadic("UTC", R::Unsupported("Date.UTC"), 7),
];

static REGEXP_PROTOTYPE: [E; 4] = [
    E::object("constructor", B::RegExp, CW),
    E::fixed("exec", R::Unsupported("RegExp.prototype.exec"), 1),
    E::fixed("test", R::Unsupported("RegExp.prototype.test"), 1),
    E::fixed("toString", R::Unsupported("RegExp.prototype.toString"), 0),
];

static REGEXP: [E; 2] = [
    E::number("length", 2.0, FIXED),
    E::object("prototype", B::RegExpPrototype, FIXED),
];

static ERROR_PROTOTYPE: [E; 4] = [
    E::object("constructor", B::Error, CW),
    E::string("name", "Error", CW),
    E::string("message", "", CW),
    E::fixed("toString", R::ErrorProtoToString, 0),
];

static ERROR: [E; 2] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::ErrorPrototype, FIXED),
];

const fn error_subtype_prototype(kind: ErrorKind) -> [E; 3] {
    [
        E::object("constructor", B::error_constructor(kind), CW),
        E::string("name", kind.name(), CW),
        E::string("message", "", CW),
    ]
}

const fn error_subtype(kind: ErrorKind) -> [E; 2] {
    [
        E::number("length", 1.0, FIXED),
        E::object("prototype", B::error_prototype(kind), FIXED),
    ]
}

static ERROR_SUBTYPE_PROTOTYPES: [[E; 3]; 6] = [
    error_subtype_prototype(ErrorKind::Eval),
    error_subtype_prototype(ErrorKind::Range),
    error_subtype_prototype(ErrorKind::Reference),
    error_subtype_prototype(ErrorKind::Syntax),
    error_subtype_prototype(ErrorKind::Type),
    error_subtype_prototype(ErrorKind::Uri),
];

static ERROR_SUBTYPES: [[E; 2]; 6] = [
    error_subtype(ErrorKind::Eval),
    error_subtype(ErrorKind::Range),
    error_subtype(ErrorKind::Reference),
    error_subtype(ErrorKind::Syntax),
    error_subtype(ErrorKind::Type),
    error_subtype(ErrorKind::Uri),
];

static MATH: [E; 17] = [
    E::number("E", std::f64::consts::E, FIXED),
    E::number("LN10", std::f64::consts::LN_10, FIXED),
    E::number("LN2", std::f64::consts::LN_2, FIXED),
    E::number("LOG10E", std::f64::consts::LOG10_E, FIXED),
    E::number("LOG2E", std::f64::consts::LOG2_E, FIXED),
    E::number("PI", std::f64::consts::PI, FIXED),
    E::number("SQRT1_2", std::f64::consts::FRAC_1_SQRT_2, FIXED),
    E::number("SQRT2", std::f64::consts::SQRT_2, FIXED),
    E::tagged_string(Sym::ToStringTag, "Math", C),
    E::fixed("abs", R::MathAbs, 1),
    E::fixed("ceil", R::MathCeil, 1),
    E::fixed("floor", R::MathFloor, 1),
    E::variadic("max", R::MathMax, 2),
    E::variadic("min", R::MathMin, 2),
    E::fixed("pow", R::MathPow, 2),
    E::fixed("round", R::MathRound, 1),
    E::fixed("sqrt", R::MathSqrt, 1),
];

static JSON: [E; 3] = [
    E::tagged_string(Sym::ToStringTag, "JSON", C),
    E::fixed("parse", R::Unsupported("JSON.parse"), 2),
    E::fixed("stringify", R::Unsupported("JSON.stringify"), 3),
];

static ARRAY_BUFFER_PROTOTYPE: [E; 2] = [
    E::object("constructor", B::ArrayBuffer, CW),
    E::tagged_string(Sym::ToStringTag, "ArrayBuffer", C),
];

static ARRAY_BUFFER: [E; 3] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::ArrayBufferPrototype, FIXED),
    E::fixed("isView", R::ArrayBufferIsView, 1),
];

static TYPED_ARRAY_PROTOTYPE: [E; 1] = [E::object("constructor", B::TypedArray, CW)];

static TYPED_ARRAY: [E; 4] = [
    E::number("length", 0.0, FIXED),
    E::object("prototype", B::TypedArrayPrototype, FIXED),
    E::variadic("from", R::Unsupported("TypedArray.from"), 1),
    E::variadic("of", R::Unsupported("TypedArray.of"), 0),
];

const fn typed_array_constructor(kind: TypedArrayKind) -> [E; 3] {
    [
        E::number("BYTES_PER_ELEMENT", kind.bytes_per_element() as f64, FIXED),
        E::object("prototype", kind.prototype(), FIXED),
        E::number("length", 3.0, FIXED),
    ]
}

const fn typed_array_prototype(kind: TypedArrayKind) -> [E; 2] {
    [
        E::number("BYTES_PER_ELEMENT", kind.bytes_per_element() as f64, FIXED),
        E::object("constructor", kind.constructor(), CW),
    ]
}

static TYPED_ARRAY_CONSTRUCTORS: [[E; 3]; 9] = [
    typed_array_constructor(TypedArrayKind::Int8),
    typed_array_constructor(TypedArrayKind::Uint8),
    typed_array_constructor(TypedArrayKind::Uint8Clamped),
    typed_array_constructor(TypedArrayKind::Int16),
    typed_array_constructor(TypedArrayKind::Uint16),
    typed_array_constructor(TypedArrayKind::Int32),
    typed_array_constructor(TypedArrayKind::Uint32),
    typed_array_constructor(TypedArrayKind::Float32),
    typed_array_constructor(TypedArrayKind::Float64),
];

static TYPED_ARRAY_PROTOTYPES: [[E; 2]; 9] = [
    typed_array_prototype(TypedArrayKind::Int8),
    typed_array_prototype(TypedArrayKind::Uint8),
    typed_array_prototype(TypedArrayKind::Uint8Clamped),
    typed_array_prototype(TypedArrayKind::Int16),
    typed_array_prototype(TypedArrayKind::Uint16),
    typed_array_prototype(TypedArrayKind::Int32),
    typed_array_prototype(TypedArrayKind::Uint32),
    typed_array_prototype(TypedArrayKind::Float32),
    typed_array_prototype(TypedArrayKind::Float64),
];

static PROMISE_PROTOTYPE: [E; 4] = [
    E::object("constructor", B::Promise, CW),
    E::fixed("then", R::Unsupported("Promise.prototype.then"), 2),
    E::fixed("catch", R::Unsupported("Promise.prototype.catch"), 1),
    E::tagged_string(Sym::ToStringTag, "Promise", C),
];

static PROMISE: [E; 6] = [
    E::number("length", 1.0, FIXED),
    E::object("prototype", B::PromisePrototype, FIXED),
    E::fixed("resolve", R::Unsupported("Promise.resolve"), 1),
    E::fixed("reject", R::Unsupported("Promise.reject"), 1),
    E::fixed("all", R::Unsupported("Promise.all"), 1),
    E::fixed("race", R::Unsupported("Promise.race"), 1),
];

static MAP_PROTOTYPE: [E; 7] = [
    E::object("constructor", B::Map, CW),
    E::fixed("get", R::Unsupported("Map.prototype.get"), 1),
    E::fixed("set", R::Unsupported("Map.prototype.set"), 2),
    E::fixed("has", R::Unsupported("Map.prototype.has"), 1),
    E::fixed("delete", R::Unsupported("Map.prototype.delete"), 1),
    E::fixed("clear", R::Unsupported("Map.prototype.clear"), 0),
    E::tagged_string(Sym::ToStringTag, "Map", C),
];

static MAP: [E; 2] = [
    E::number("length", 0.0, FIXED),
    E::object("prototype", B::MapPrototype, FIXED),
];

static SYMBOL_PROTOTYPE: [E; 4] = [
    E::object("constructor", B::Symbol, CW),
    E::fixed("toString", R::SymbolProtoToString, 0),
    E::fixed("valueOf", R::SymbolProtoValueOf, 0),
    E::tagged_string(Sym::ToStringTag, "Symbol", C),
];

static SYMBOL: [E; 15] = [
    E::number("length", 0.0, FIXED),
    E::object("prototype", B::SymbolPrototype, FIXED),
    E::simple("hasInstance", SimpleValue::Symbol(Sym::HasInstance), FIXED),
    E::simple("isConcatSpreadable", SimpleValue::Symbol(Sym::IsConcatSpreadable), FIXED),
    E::simple("iterator", SimpleValue::Symbol(Sym::Iterator), FIXED),
    E::simple("match", SimpleValue::Symbol(Sym::Match), FIXED),
    E::simple("replace", SimpleValue::Symbol(Sym::Replace), FIXED),
    E::simple("search", SimpleValue::Symbol(Sym::Search), FIXED),
    E::simple("species", SimpleValue::Symbol(Sym::Species), FIXED),
    E::simple("split", SimpleValue::Symbol(Sym::Split), FIXED),
    E::simple("toPrimitive", SimpleValue::Symbol(Sym::ToPrimitive), FIXED),
    E::simple("toStringTag", SimpleValue::Symbol(Sym::ToStringTag), FIXED),
    E::simple("unscopables", SimpleValue::Symbol(Sym::Unscopables), FIXED),
    E::fixed("for", R::SymbolFor, 1),
    E::fixed("keyFor", R::SymbolKeyFor, 1),
];
