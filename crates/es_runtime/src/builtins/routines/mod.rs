//! Native routines and their call/construct dispatch.

mod array;
mod error;
mod function;
mod global;
mod math;
mod number;
mod object;
mod string;
mod symbol;
mod typedarray;

use smallvec::SmallVec;

use crate::context::Context;
use crate::core::value::Value;
use crate::errors::{EngineError, ErrorKind};

use super::descriptor::Arity;
use super::ids::TypedArrayKind;

/// Identifies one native routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineId {
    ObjectConstructor,
    ArrayConstructor,
    StringConstructor,
    BooleanConstructor,
    NumberConstructor,
    ErrorConstructor(ErrorKind),
    ArrayBufferConstructor,
    TypedArrayAbstract,
    TypedArrayConstructor(TypedArrayKind),
    SymbolConstructor,

    GlobalIsNaN,
    GlobalIsFinite,
    GlobalParseInt,
    GlobalParseFloat,

    ObjectGetPrototypeOf,
    ObjectKeys,
    ObjectProtoToString,
    ObjectProtoValueOf,
    ObjectProtoHasOwnProperty,

    FunctionProtoCall,
    FunctionProtoApply,

    ArrayIsArray,
    ArrayProtoPush,
    ArrayProtoPop,
    ArrayProtoJoin,

    StringFromCharCode,
    StringProtoToString,
    StringProtoCharAt,
    StringProtoCharCodeAt,
    StringProtoConcat,
    StringProtoIndexOf,
    StringProtoSubstring,
    StringProtoTrim,

    BooleanProtoToString,
    BooleanProtoValueOf,

    NumberIsInteger,
    NumberIsNaN,
    NumberIsFinite,
    NumberProtoToString,
    NumberProtoValueOf,

    MathAbs,
    MathCeil,
    MathFloor,
    MathMax,
    MathMin,
    MathPow,
    MathRound,
    MathSqrt,

    ErrorProtoToString,
    ArrayBufferIsView,

    SymbolFor,
    SymbolKeyFor,
    SymbolProtoToString,
    SymbolProtoValueOf,

    /// Bound and callable, but its semantics live outside this engine core.
    Unsupported(&'static str),
    UnsupportedConstructor(&'static str),
}

/// A routine together with the arity it is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutineBinding {
    pub routine: RoutineId,
    pub arity: Arity,
}

impl RoutineId {
    /// Value of the `name` property of the function object.
    pub fn name(self) -> &'static str {
        use RoutineId::*;
        match self {
            ObjectConstructor => "Object",
            ArrayConstructor => "Array",
            StringConstructor => "String",
            BooleanConstructor => "Boolean",
            NumberConstructor => "Number",
            ErrorConstructor(kind) => kind.name(),
            ArrayBufferConstructor => "ArrayBuffer",
            TypedArrayAbstract => "TypedArray",
            TypedArrayConstructor(kind) => kind.name(),
            SymbolConstructor => "Symbol",
            GlobalIsNaN | NumberIsNaN => "isNaN",
            GlobalIsFinite | NumberIsFinite => "isFinite",
            GlobalParseInt => "parseInt",
            GlobalParseFloat => "parseFloat",
            ObjectGetPrototypeOf => "getPrototypeOf",
            ObjectKeys => "keys",
            ObjectProtoToString
            | StringProtoToString
            | BooleanProtoToString
            | NumberProtoToString
            | ErrorProtoToString
            | SymbolProtoToString => "toString",
            ObjectProtoValueOf | BooleanProtoValueOf | NumberProtoValueOf | SymbolProtoValueOf => {
                "valueOf"
            }
            ObjectProtoHasOwnProperty => "hasOwnProperty",
            FunctionProtoCall => "call",
            FunctionProtoApply => "apply",
            ArrayIsArray => "isArray",
            ArrayProtoPush => "push",
            ArrayProtoPop => "pop",
            ArrayProtoJoin => "join",
            StringFromCharCode => "fromCharCode",
            StringProtoCharAt => "charAt",
            StringProtoCharCodeAt => "charCodeAt",
            StringProtoConcat => "concat",
            StringProtoIndexOf => "indexOf",
            StringProtoSubstring => "substring",
            StringProtoTrim => "trim",
            NumberIsInteger => "isInteger",
            MathAbs => "abs",
            MathCeil => "ceil",
            MathFloor => "floor",
            MathMax => "max",
            MathMin => "min",
            MathPow => "pow",
            MathRound => "round",
            MathSqrt => "sqrt",
            ArrayBufferIsView => "isView",
            SymbolFor => "for",
            SymbolKeyFor => "keyFor",
            Unsupported(name) | UnsupportedConstructor(name) => {
                name.rsplit('.').next().unwrap_or(name)
            }
        }
    }

    /// Whether `new` is accepted at all. Routines without a construct behaviour report
    /// "is not a constructor".
    pub fn is_constructor(self) -> bool {
        use RoutineId::*;
        matches!(
            self,
            ObjectConstructor
                | ArrayConstructor
                | StringConstructor
                | BooleanConstructor
                | NumberConstructor
                | ErrorConstructor(_)
                | ArrayBufferConstructor
                | TypedArrayAbstract
                | TypedArrayConstructor(_)
                | UnsupportedConstructor(_)
        )
    }
}

type Args = SmallVec<[Value; 4]>;

/// Applies the calling convention of `arity` to `args`.
fn adjust(arity: Arity, args: &[Value]) -> Args {
    match arity {
        Arity::Variadic => args.iter().copied().collect(),
        Arity::Fixed(n) => {
            let n = n as usize;
            let mut out: Args = args.iter().take(n).copied().collect();
            out.resize(n, Value::Undefined);
            out
        }
    }
}

fn unsupported(name: &str) -> EngineError {
    EngineError::type_error(format!("{name} is not supported by this engine core"))
}

/// Invokes `binding` as a plain call.
pub(crate) fn call(
    ctx: &mut Context,
    binding: RoutineBinding,
    this: Value,
    args: &[Value],
) -> Result<Value, EngineError> {
    use RoutineId::*;
    let args = adjust(binding.arity, args);
    let args = args.as_slice();
    match binding.routine {
        ObjectConstructor => object::construct(ctx, args),
        ArrayConstructor => array::construct(ctx, args),
        StringConstructor => string::call_constructor(ctx, args),
        BooleanConstructor => Ok(Value::Bool(ctx.to_boolean(args[0]))),
        NumberConstructor => number::call_constructor(ctx, args),
        ErrorConstructor(kind) => error::construct(ctx, kind, args),
        ArrayBufferConstructor | TypedArrayAbstract | TypedArrayConstructor(_) => Err(
            EngineError::type_error(format!("{} cannot be directly called", binding.routine.name())),
        ),
        SymbolConstructor => symbol::call_constructor(ctx, args),

        GlobalIsNaN => global::is_nan(ctx, args),
        GlobalIsFinite => global::is_finite(ctx, args),
        GlobalParseInt => global::parse_int(ctx, args),
        GlobalParseFloat => global::parse_float(ctx, args),

        ObjectGetPrototypeOf => object::get_prototype_of(ctx, args),
        ObjectKeys => object::keys(ctx, args),
        ObjectProtoToString => object::proto_to_string(ctx, this),
        ObjectProtoValueOf => object::proto_value_of(ctx, this),
        ObjectProtoHasOwnProperty => object::proto_has_own_property(ctx, this, args),

        FunctionProtoCall => function::proto_call(ctx, this, args),
        FunctionProtoApply => function::proto_apply(ctx, this, args),

        ArrayIsArray => array::is_array(ctx, args),
        ArrayProtoPush => array::proto_push(ctx, this, args),
        ArrayProtoPop => array::proto_pop(ctx, this),
        ArrayProtoJoin => array::proto_join(ctx, this, args),

        StringFromCharCode => string::from_char_code(ctx, args),
        StringProtoToString => string::proto_to_string(ctx, this),
        StringProtoCharAt => string::proto_char_at(ctx, this, args),
        StringProtoCharCodeAt => string::proto_char_code_at(ctx, this, args),
        StringProtoConcat => string::proto_concat(ctx, this, args),
        StringProtoIndexOf => string::proto_index_of(ctx, this, args),
        StringProtoSubstring => string::proto_substring(ctx, this, args),
        StringProtoTrim => string::proto_trim(ctx, this),

        BooleanProtoToString => number::boolean_proto_to_string(ctx, this),
        BooleanProtoValueOf => number::boolean_proto_value_of(ctx, this),
        NumberIsInteger => Ok(Value::Bool(number::is_integer(args[0]))),
        NumberIsNaN => Ok(Value::Bool(matches!(args[0], Value::Number(n) if n.is_nan()))),
        NumberIsFinite => Ok(Value::Bool(matches!(args[0], Value::Number(n) if n.is_finite()))),
        NumberProtoToString => number::proto_to_string(ctx, this, args),
        NumberProtoValueOf => number::proto_value_of(ctx, this),

        MathAbs => math::unary(ctx, args, f64::abs),
        MathCeil => math::unary(ctx, args, f64::ceil),
        MathFloor => math::unary(ctx, args, f64::floor),
        MathMax => math::max(ctx, args),
        MathMin => math::min(ctx, args),
        MathPow => math::pow(ctx, args),
        MathRound => math::unary(ctx, args, math::round),
        MathSqrt => math::unary(ctx, args, f64::sqrt),

        ErrorProtoToString => error::proto_to_string(ctx, this),
        ArrayBufferIsView => typedarray::is_view(ctx, args),

        SymbolFor => symbol::symbol_for(ctx, args),
        SymbolKeyFor => symbol::key_for(ctx, args),
        SymbolProtoToString => symbol::proto_to_string(ctx, this),
        SymbolProtoValueOf => symbol::proto_value_of(ctx, this),

        Unsupported(name) | UnsupportedConstructor(name) => Err(unsupported(name)),
    }
}

/// Invokes `binding` with `new`.
pub(crate) fn construct(
    ctx: &mut Context,
    binding: RoutineBinding,
    args: &[Value],
) -> Result<Value, EngineError> {
    use RoutineId::*;
    let args = adjust(binding.arity, args);
    let args = args.as_slice();
    match binding.routine {
        ObjectConstructor => object::construct(ctx, args),
        ArrayConstructor => array::construct(ctx, args),
        StringConstructor => string::construct(ctx, args),
        BooleanConstructor => number::boolean_construct(ctx, args),
        NumberConstructor => number::construct(ctx, args),
        ErrorConstructor(kind) => error::construct(ctx, kind, args),
        ArrayBufferConstructor => typedarray::construct_buffer(ctx, args),
        TypedArrayAbstract => Err(EngineError::type_error(crate::errors::messages::ABSTRACT_TYPED_ARRAY)),
        TypedArrayConstructor(kind) => typedarray::construct(ctx, kind, args),
        UnsupportedConstructor(name) => Err(unsupported(name)),
        other => Err(EngineError::type_error(format!("{} is not a constructor", other.name()))),
    }
}
