//! `Array` and `Array.prototype`.

use es_core::Text;

use crate::context::Context;
use crate::core::heap::ObjectId;
use crate::core::object::ObjectKind;
use crate::core::value::Value;
use crate::errors::{messages, EngineError};

/// `Array(len)` makes an empty array of that length, any other arguments become the
/// elements.
pub(super) fn construct(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    if let [Value::Number(_)] = args {
        let len = ctx.to_array_length(args[0])?;
        return Ok(ctx.new_array(vec![Value::Undefined; len]));
    }
    Ok(ctx.new_array(args.to_vec()))
}

pub(super) fn is_array(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let is_array = match args[0] {
        Value::Object(id) => matches!(ctx.obj(id)?.kind, ObjectKind::Array(_)),
        _ => false,
    };
    Ok(Value::Bool(is_array))
}

fn this_array(ctx: &Context, this: Value) -> Result<ObjectId, EngineError> {
    match this {
        Value::Object(id) if matches!(ctx.obj(id)?.kind, ObjectKind::Array(_)) => Ok(id),
        _ => Err(EngineError::type_error(messages::NOT_AN_ARRAY)),
    }
}

pub(super) fn proto_push(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let id = this_array(ctx, this)?;
    let ObjectKind::Array(items) = &mut ctx.obj_mut(id)?.kind else {
        return Err(EngineError::type_error(messages::NOT_AN_ARRAY));
    };
    items.extend_from_slice(args);
    Ok(Value::Number(items.len() as f64))
}

pub(super) fn proto_pop(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    let id = this_array(ctx, this)?;
    let ObjectKind::Array(items) = &mut ctx.obj_mut(id)?.kind else {
        return Err(EngineError::type_error(messages::NOT_AN_ARRAY));
    };
    Ok(items.pop().unwrap_or(Value::Undefined))
}

pub(super) fn proto_join(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let id = this_array(ctx, this)?;
    let separator = if args[0].is_undefined() {
        Text::from_str(",")
    } else {
        ctx.to_text(args[0])?
    };
    let items = match &ctx.obj(id)?.kind {
        ObjectKind::Array(items) => items.clone(),
        _ => Vec::new(),
    };
    let mut out = Text::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out = Text::concat2(&out, &separator);
        }
        if !item.is_nullish() {
            let part = ctx.to_text(item)?;
            out = Text::concat2(&out, &part);
        }
    }
    Ok(ctx.new_string(out))
}
