//! `String` and `String.prototype`.

use es_core::Text;

use crate::builtins::BuiltinId;
use crate::context::Context;
use crate::context::convert::is_whitespace;
use crate::core::object::{JsObject, ObjectKind};
use crate::core::value::Value;
use crate::errors::{messages, EngineError};

pub(super) fn call_constructor(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let text = match args.first() {
        None => Text::new(),
        Some(&v) => ctx.to_display_text(v)?,
    };
    Ok(ctx.new_string(text))
}

pub(super) fn construct(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let text = match args.first() {
        None => Text::new(),
        Some(&v) => ctx.to_text(v)?,
    };
    let value = ctx.new_string(text);
    let proto = ctx.prototype_or_object(BuiltinId::StringPrototype);
    Ok(Value::Object(ctx.alloc_object(JsObject::new(proto, ObjectKind::Primitive(value)))))
}

pub(super) fn from_char_code(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let mut units = Vec::with_capacity(args.len());
    for &arg in args {
        let n = ctx.to_number(arg)?;
        units.push(to_uint16(n));
    }
    Ok(ctx.new_string(Text::from_units(&units)))
}

fn to_uint16(n: f64) -> u16 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(65536.0) as u16
}

/// `this` of `toString`/`valueOf`: a string or a `String` wrapper.
pub(super) fn proto_to_string(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    match ctx.this_primitive(this) {
        v @ Value::String(_) => Ok(v),
        _ => Err(EngineError::type_error(messages::NOT_A_STRING)),
    }
}

/// `this` coerced to text, as the generic string methods do.
fn this_text(ctx: &mut Context, this: Value) -> Result<Text, EngineError> {
    if this.is_nullish() {
        return Err(EngineError::type_error(messages::NULL_OR_UNDEFINED));
    }
    ctx.to_text(this)
}

pub(super) fn proto_char_at(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let text = this_text(ctx, this)?;
    let pos = ctx.to_integer(args[0])?;
    let unit = if pos < 0.0 { None } else { text.code_unit_at(pos as usize) };
    let result = match unit {
        Some(u) => Text::from_units(&[u]),
        None => Text::new(),
    };
    Ok(ctx.new_string(result))
}

pub(super) fn proto_char_code_at(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let text = this_text(ctx, this)?;
    let pos = ctx.to_integer(args[0])?;
    let unit = if pos < 0.0 { None } else { text.code_unit_at(pos as usize) };
    Ok(Value::Number(unit.map_or(f64::NAN, f64::from)))
}

pub(super) fn proto_concat(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let mut text = this_text(ctx, this)?;
    for &arg in args {
        let part = ctx.to_text(arg)?;
        text = Text::concat2(&text, &part);
    }
    Ok(ctx.new_string(text))
}

pub(super) fn proto_index_of(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let text = this_text(ctx, this)?;
    let search = ctx.to_text(args[0])?;
    let len = text.length_in_code_units();
    let start = ctx.to_integer(args[1])?.clamp(0.0, len as f64) as usize;
    let haystack: Vec<u16> = text.units().collect();
    let needle: Vec<u16> = search.units().collect();
    Ok(Value::Number(index_of(&haystack, &needle, start).map_or(-1.0, |i| i as f64)))
}

fn index_of(haystack: &[u16], needle: &[u16], start: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(start.min(haystack.len()));
    }
    if needle.len() > haystack.len() {
        return None;
    }
    (start..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

pub(super) fn proto_substring(ctx: &mut Context, this: Value, args: &[Value]) -> Result<Value, EngineError> {
    let text = this_text(ctx, this)?;
    let len = text.length_in_code_units() as f64;
    let start = ctx.to_integer(args[0])?.clamp(0.0, len);
    let end = if args[1].is_undefined() {
        len
    } else {
        ctx.to_integer(args[1])?.clamp(0.0, len)
    };
    let (from, to) = if start <= end { (start, end) } else { (end, start) };
    Ok(ctx.new_string(text.substring(from as usize, to as usize)))
}

pub(super) fn proto_trim(ctx: &mut Context, this: Value) -> Result<Value, EngineError> {
    let text = this_text(ctx, this)?;
    let units: Vec<u16> = text.units().collect();
    let is_space = |u: &u16| char::from_u32(*u as u32).is_some_and(is_whitespace);
    let start = units.iter().position(|u| !is_space(u)).unwrap_or(units.len());
    let end = units.iter().rposition(|u| !is_space(u)).map_or(start, |i| i + 1);
    Ok(ctx.new_string(text.substring(start, end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_search() {
        let hay: Vec<u16> = "abcabc".encode_utf16().collect();
        let needle: Vec<u16> = "ca".encode_utf16().collect();
        assert_eq!(index_of(&hay, &needle, 0), Some(2));
        assert_eq!(index_of(&hay, &needle, 3), None);
        assert_eq!(index_of(&hay, &[], 4), Some(4));
        assert_eq!(index_of(&hay, &[], 9), Some(6));
    }

    #[test]
    fn char_codes_wrap_to_sixteen_bits() {
        assert_eq!(to_uint16(65.9), 65);
        assert_eq!(to_uint16(65536.0 + 66.0), 66);
        assert_eq!(to_uint16(-1.0), 0xffff);
        assert_eq!(to_uint16(f64::NAN), 0);
    }
}
