//! Type conversions used by the routines.

use es_core::Text;

use super::Context;
use crate::builtins::BuiltinId;
use crate::core::heap::ObjectId;
use crate::core::object::{JsObject, ObjectKind, PropertyKey};
use crate::core::value::Value;
use crate::errors::{messages, EngineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hint {
    String,
    Number,
}

impl Context {
    pub(crate) fn to_text(&mut self, value: Value) -> Result<Text, EngineError> {
        Ok(match value {
            Value::Undefined => Text::from_str("undefined"),
            Value::Null => Text::from_str("null"),
            Value::Bool(true) => Text::from_str("true"),
            Value::Bool(false) => Text::from_str("false"),
            Value::Number(n) => Text::from_str(&number_to_string(n)),
            Value::String(id) => self.text(id)?,
            Value::Symbol(_) => return Err(EngineError::type_error(messages::SYMBOL_TO_STRING)),
            Value::Object(_) => {
                let primitive = self.to_primitive(value, Hint::String)?;
                return self.to_text(primitive);
            }
        })
    }

    /// Like `to_text`, but symbols render as `Symbol(description)`.
    pub(crate) fn to_display_text(&mut self, value: Value) -> Result<Text, EngineError> {
        match value {
            Value::Symbol(id) => {
                let description = self
                    .symbol_description(id)
                    .map(Text::to_string_lossy)
                    .unwrap_or_default();
                Ok(Text::from_str(&format!("Symbol({description})")))
            }
            _ => self.to_text(value),
        }
    }

    pub(crate) fn to_number(&mut self, value: Value) -> Result<f64, EngineError> {
        Ok(match value {
            Value::Undefined => f64::NAN,
            Value::Null | Value::Bool(false) => 0.0,
            Value::Bool(true) => 1.0,
            Value::Number(n) => n,
            Value::String(id) => string_to_number(&self.text(id)?.to_string_lossy()),
            Value::Symbol(_) => return Err(EngineError::type_error(messages::SYMBOL_TO_NUMBER)),
            Value::Object(_) => {
                let primitive = self.to_primitive(value, Hint::Number)?;
                return self.to_number(primitive);
            }
        })
    }

    /// ToIntegerOrInfinity.
    pub(crate) fn to_integer(&mut self, value: Value) -> Result<f64, EngineError> {
        let n = self.to_number(value)?;
        if n.is_nan() {
            return Ok(0.0);
        }
        Ok(n.trunc() + 0.0)
    }

    pub(crate) fn to_boolean(&self, value: Value) -> bool {
        match value {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n != 0.0 && !n.is_nan(),
            Value::String(id) => self.heap.text(id).is_some_and(|t| !t.is_empty()),
            Value::Symbol(_) | Value::Object(_) => true,
        }
    }

    /// The object itself, or a new wrapper object for a primitive.
    pub(crate) fn to_object(&mut self, value: Value) -> Result<ObjectId, EngineError> {
        let proto = match value {
            Value::Undefined | Value::Null => return Err(EngineError::type_error(messages::NULL_OR_UNDEFINED)),
            Value::Object(id) => return Ok(id),
            Value::Bool(_) => BuiltinId::BooleanPrototype,
            Value::Number(_) => BuiltinId::NumberPrototype,
            Value::String(_) => BuiltinId::StringPrototype,
            Value::Symbol(_) => BuiltinId::SymbolPrototype,
        };
        let proto = self.prototype_or_object(proto);
        Ok(self.alloc_object(JsObject::new(proto, ObjectKind::Primitive(value))))
    }

    pub(crate) fn to_property_key(&mut self, value: Value) -> Result<PropertyKey, EngineError> {
        match value {
            Value::Symbol(id) => Ok(PropertyKey::Symbol(id)),
            Value::String(id) => Ok(PropertyKey::from(self.text(id)?)),
            _ => {
                let text = self.to_text(value)?;
                Ok(PropertyKey::from(text))
            }
        }
    }

    /// OrdinaryToPrimitive: tries `toString` and `valueOf` in hint order.
    pub(crate) fn to_primitive(&mut self, value: Value, hint: Hint) -> Result<Value, EngineError> {
        if value.as_object().is_none() {
            return Ok(value);
        }
        let order = match hint {
            Hint::String => ["toString", "valueOf"],
            Hint::Number => ["valueOf", "toString"],
        };
        for name in order {
            let method = self.get(value, &PropertyKey::name(name))?;
            if self.is_callable(method) {
                let result = self.call_value(method, value, &[])?;
                if result.as_object().is_none() {
                    return Ok(result);
                }
            }
        }
        Err(EngineError::type_error("cannot convert object to primitive value"))
    }

    pub(crate) fn is_callable(&self, value: Value) -> bool {
        value
            .as_object()
            .and_then(|id| self.heap.object(id))
            .is_some_and(JsObject::is_callable)
    }

    /// The primitive behind `this` for the `valueOf` family: `this` itself or the value
    /// wrapped by a wrapper object.
    pub(crate) fn this_primitive(&self, this: Value) -> Value {
        match this {
            Value::Object(id) => match self.heap.object(id).map(|o| &o.kind) {
                Some(ObjectKind::Primitive(v)) => *v,
                _ => this,
            },
            _ => this,
        }
    }
}

/// Number::toString with radix 10.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n == 0.0 {
        return "0".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        let mut buf = itoa::Buffer::new();
        return buf.format(n as i64).to_string();
    }

    // Shortest round-trip digits, then laid out the way scripts print numbers.
    let mut buf = ryu::Buffer::new();
    let shortest = buf.format_finite(n.abs());
    let (mantissa, exponent) = match shortest.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (shortest, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits: String = int_part.chars().chain(frac_part.chars()).collect();
    let mut point = int_part.len() as i32 + exponent;
    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading);
    point -= leading as i32;
    let trimmed = digits.trim_end_matches('0').len();
    digits.truncate(trimmed);

    let k = digits.len() as i32;
    let mut out = String::with_capacity(k as usize + 8);
    if n < 0.0 {
        out.push('-');
    }
    if k <= point && point <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', (point - k) as usize));
    } else if 0 < point && point <= 21 {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-point) as usize));
        out.push_str(&digits);
    } else {
        let e = point - 1;
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        let mut ebuf = itoa::Buffer::new();
        out.push_str(ebuf.format(e.abs()));
    }
    out
}

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, '\u{9}' | '\u{a}' | '\u{b}' | '\u{c}' | '\u{d}' | ' ' | '\u{a0}' | '\u{feff}')
        || c == '\u{2028}'
        || c == '\u{2029}'
        || (c.is_whitespace() && !c.is_ascii())
}

/// StringToNumber.
pub(crate) fn string_to_number(s: &str) -> f64 {
    let s = s.trim_matches(is_whitespace);
    if s.is_empty() {
        return 0.0;
    }
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        let mut n = 0.0;
        for c in digits.chars() {
            match c.to_digit(radix) {
                Some(d) => n = n * radix as f64 + d as f64,
                None => return f64::NAN,
            }
        }
        return n;
    }
    let (sign, unsigned) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if decimal_prefix_len(unsigned) != unsigned.len() {
        return f64::NAN;
    }
    unsigned.parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

/// Length of the longest prefix of `s` that is an unsigned decimal literal.
pub(crate) fn decimal_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();
    let int = digits(0);
    let mut end = int;
    let mut frac = 0;
    if bytes.get(end) == Some(&b'.') {
        frac = digits(end + 1);
        if int > 0 || frac > 0 {
            end += 1 + frac;
        }
    }
    if int == 0 && frac == 0 {
        return 0;
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let n = digits(exp);
        if n > 0 {
            end = exp + n;
        }
    }
    end
}
