//! `Number`, `Boolean` and their prototypes.

use es_core::Text;

use crate::builtins::BuiltinId;
use crate::context::Context;
use crate::context::convert::number_to_string;
use crate::core::object::{JsObject, ObjectKind};
use crate::core::value::Value;
use crate::errors::{messages, EngineError};

pub(super) fn call_constructor(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    match args.first() {
        None => Ok(Value::Number(0.0)),
        Some(&v) => Ok(Value::Number(ctx.to_number(v)?)),
    }
}

pub(super) fn construct(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let n = call_constructor(ctx, args)?;
    Ok(wrap(ctx, BuiltinId::NumberPrototype, n))
}

pub(super) fn boolean_construct(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let b = Value::Bool(ctx.to_boolean(args[0]));
    Ok(wrap(ctx, BuiltinId::BooleanPrototype, b))
}

fn wrap(ctx: &mut Context, proto: BuiltinId, value: Value) -> Value {
    let proto = ctx.prototype_or_object(proto);
    Value::Object(ctx.alloc_object(JsObject::new(proto, ObjectKind::Primitive(value))))
}

fn this_bool(ctx: &Context, this: Value) -> Result<bool, EngineError> {
    match ctx.this_primitive(this) {
        Value::Bool(b) => Ok(b),
        _ => Err(EngineError::type_error("value is not a boolean")),
    }
}

fn this_number(ctx: &Context, this: Value) -> Result<f64, EngineError> {
    match ctx.this_primitive(this) {
        Value::Number(n) => Ok(n),
        _ => Err(EngineError::type_error("value is not a number")),
    }
}

pub(super) fn boolean_proto_to_string(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    let b = this_bool(ctx, this)?;
    Ok(ctx.intern(if b { "true" } else { "false" }))
}

pub(super) fn boolean_proto_value_of(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    Ok(Value::Bool(this_bool(ctx, this)?))
}

pub(super) fn is_integer(value: Value) -> bool {
    matches!(value, Value::Number(n) if n.is_finite() && n.trunc() == n)
}

pub(super) fn proto_to_string(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let n = this_number(ctx, this)?;
    let radix = if args[0].is_undefined() {
        10.0
    } else {
        ctx.to_integer(args[0])?
    };
    if !(2.0..=36.0).contains(&radix) {
        return Err(EngineError::range_error(messages::INVALID_RADIX));
    }
    let s = if radix == 10.0 {
        number_to_string(n)
    } else {
        to_radix_string(n, radix as u32)
    };
    Ok(ctx.new_string(Text::from_str(&s)))
}

pub(super) fn proto_value_of(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    Ok(Value::Number(this_number(ctx, this)?))
}

/// Digits of `n` in `radix`. The fraction is cut after 52 digits.
fn to_radix_string(n: f64, radix: u32) -> String {
    if !n.is_finite() {
        return number_to_string(n);
    }
    let digit = |d: u32| char::from_digit(d, radix).unwrap_or('0');
    let mut int = n.abs().trunc();
    let mut frac = n.abs() - int;

    let mut int_digits = Vec::new();
    if int == 0.0 {
        int_digits.push('0');
    }
    while int >= 1.0 {
        let d = (int % radix as f64) as u32;
        int_digits.push(digit(d));
        int = (int / radix as f64).trunc();
    }
    let mut out = String::with_capacity(int_digits.len() + 8);
    if n < 0.0 {
        out.push('-');
    }
    out.extend(int_digits.iter().rev());
    if frac > 0.0 {
        out.push('.');
        for _ in 0..52 {
            frac *= radix as f64;
            let d = frac.trunc();
            out.push(digit(d as u32));
            frac -= d;
            if frac == 0.0 {
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radix_strings() {
        assert_eq!(to_radix_string(255.0, 16), "ff");
        assert_eq!(to_radix_string(-5.0, 2), "-101");
        assert_eq!(to_radix_string(0.5, 2), "0.1");
        assert_eq!(to_radix_string(0.0, 36), "0");
    }

    #[test]
    fn integers() {
        assert!(is_integer(Value::Number(3.0)));
        assert!(!is_integer(Value::Number(3.5)));
        assert!(!is_integer(Value::Number(f64::INFINITY)));
        assert!(!is_integer(Value::Bool(true)));
    }
}
