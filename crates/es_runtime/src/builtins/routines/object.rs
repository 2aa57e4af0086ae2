//! `Object` and `Object.prototype`.

use es_core::Text;

use crate::context::Context;
use crate::core::object::{JsObject, ObjectKind, PropertyKey};
use crate::core::value::{Value, WellKnownSymbol};
use crate::errors::EngineError;
use crate::builtins::BuiltinId;

pub(super) fn construct(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    if args[0].is_nullish() {
        let proto = ctx.prototype_or_object(BuiltinId::ObjectPrototype);
        return Ok(Value::Object(ctx.alloc_object(JsObject::new(proto, ObjectKind::Ordinary))));
    }
    Ok(Value::Object(ctx.to_object(args[0])?))
}

pub(super) fn get_prototype_of(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let id = ctx.to_object(args[0])?;
    Ok(ctx.obj(id)?.proto.map_or(Value::Null, Value::Object))
}

pub(super) fn keys(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let id = ctx.to_object(args[0])?;
    let keys = ctx.own_property_keys(id, true)?;
    let items = keys
        .into_iter()
        .filter_map(|key| match key {
            PropertyKey::Name(text) => Some(ctx.new_string(text)),
            PropertyKey::Symbol(_) => None,
        })
        .collect();
    Ok(ctx.new_array(items))
}

pub(super) fn proto_to_string(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    let tag = match this {
        Value::Undefined => "Undefined".to_string(),
        Value::Null => "Null".to_string(),
        _ => {
            let id = ctx.to_object(this)?;
            let tag = ctx.get(Value::Object(id), &PropertyKey::from(WellKnownSymbol::ToStringTag))?;
            match tag {
                Value::String(s) => ctx.text(s)?.to_string_lossy(),
                _ => ctx.obj(id)?.class_name().to_string(),
            }
        }
    };
    Ok(ctx.new_string(Text::from_str(&format!("[object {tag}]"))))
}

pub(super) fn proto_value_of(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    Ok(Value::Object(ctx.to_object(this)?))
}

pub(super) fn proto_has_own_property(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let key = ctx.to_property_key(args[0])?;
    let id = ctx.to_object(this)?;
    Ok(Value::Bool(ctx.has_own(id, &key)?))
}
