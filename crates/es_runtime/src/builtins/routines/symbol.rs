//! `Symbol` and `Symbol.prototype`.

use es_core::Text;

use crate::context::Context;
use crate::core::value::Value;
use crate::errors::EngineError;

pub(super) fn call_constructor(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let description = match args[0] {
        Value::Undefined => None,
        v => Some(ctx.to_text(v)?),
    };
    Ok(Value::Symbol(ctx.new_symbol(description)))
}

pub(super) fn symbol_for(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let key = ctx.to_text(args[0])?;
    Ok(Value::Symbol(ctx.symbol_for(key)))
}

pub(super) fn key_for(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let Value::Symbol(id) = args[0] else {
        return Err(EngineError::type_error("value is not a symbol"));
    };
    match ctx.symbol_key(id).cloned() {
        Some(key) => Ok(ctx.new_string(key)),
        None => Ok(Value::Undefined),
    }
}

fn this_symbol(ctx: &Context, this: Value) -> Result<Value, EngineError> {
    match ctx.this_primitive(this) {
        v @ Value::Symbol(_) => Ok(v),
        _ => Err(EngineError::type_error("value is not a symbol")),
    }
}

pub(super) fn proto_to_string(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    let symbol = this_symbol(ctx, this)?;
    let text: Text = ctx.to_display_text(symbol)?;
    Ok(ctx.new_string(text))
}

pub(super) fn proto_value_of(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    this_symbol(ctx, this)
}
