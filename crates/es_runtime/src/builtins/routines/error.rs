//! Native error constructors and `Error.prototype.toString`.

use es_core::Text;

use crate::context::Context;
use crate::core::object::{Attributes, PropertyKey};
use crate::core::value::Value;
use crate::errors::{messages, EngineError, ErrorKind};

/// Calling and constructing behave the same.
pub(super) fn construct(ctx: &mut Context, kind: ErrorKind, args: &[Value]) -> Result<Value, EngineError> {
    let message = match args[0] {
        Value::Undefined => None,
        v => Some(ctx.to_text(v)?),
    };
    let error = ctx.new_error(kind, None);
    if let (Some(message), Some(id)) = (message, error.as_object()) {
        let message = ctx.new_string(message);
        ctx.obj_mut(id)?
            .define_value("message", message, Attributes::CONFIGURABLE_WRITABLE);
    }
    Ok(error)
}

pub(super) fn proto_to_string(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    if this.as_object().is_none() {
        return Err(EngineError::type_error(messages::NOT_AN_OBJECT));
    }
    let name = match ctx.get(this, &PropertyKey::name("name"))? {
        Value::Undefined => Text::from_str("Error"),
        v => ctx.to_text(v)?,
    };
    let message = match ctx.get(this, &PropertyKey::name("message"))? {
        Value::Undefined => Text::new(),
        v => ctx.to_text(v)?,
    };
    let text = if name.is_empty() {
        message
    } else if message.is_empty() {
        name
    } else {
        Text::concat2(&Text::concat2(&name, &Text::from_str(": ")), &message)
    };
    Ok(ctx.new_string(text))
}
