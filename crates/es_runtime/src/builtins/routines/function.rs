//! `Function.prototype.call` and `apply`.

use smallvec::SmallVec;

use crate::context::Context;
use crate::core::object::ObjectKind;
use crate::core::value::Value;
use crate::errors::{messages, EngineError};

pub(super) fn proto_call(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let receiver = args.first().copied().unwrap_or(Value::Undefined);
    let rest = args.get(1..).unwrap_or(&[]);
    ctx.call_value(this, receiver, rest)
}

pub(super) fn proto_apply(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    if !ctx.is_callable(this) {
        return Err(EngineError::type_error(messages::NOT_A_FUNCTION));
    }
    let list: SmallVec<[Value; 8]> = match args[1] {
        Value::Undefined | Value::Null => SmallVec::new(),
        Value::Object(id) => match &ctx.obj(id)?.kind {
            ObjectKind::Array(items) => items.iter().copied().collect(),
            _ => return Err(EngineError::type_error(messages::NOT_AN_ARRAY)),
        },
        _ => return Err(EngineError::type_error(messages::NOT_AN_OBJECT)),
    };
    ctx.call_value(this, args[0], &list)
}
