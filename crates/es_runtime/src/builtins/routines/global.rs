//! Functions of the global object.

use crate::context::Context;
use crate::context::convert::{decimal_prefix_len, is_whitespace};
use crate::core::value::Value;
use crate::errors::EngineError;

pub(super) fn is_nan(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    Ok(Value::Bool(ctx.to_number(args[0])?.is_nan()))
}

pub(super) fn is_finite(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    Ok(Value::Bool(ctx.to_number(args[0])?.is_finite()))
}

pub(super) fn parse_float(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let text = ctx.to_text(args[0])?.to_string_lossy();
    Ok(Value::Number(parse_float_prefix(&text)))
}

pub(super) fn parse_int(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let text = ctx.to_text(args[0])?.to_string_lossy();
    let radix = if args[1].is_undefined() {
        0
    } else {
        ctx.to_integer(args[1])? as i64
    };
    Ok(Value::Number(parse_int_prefix(&text, radix)))
}

fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start_matches(is_whitespace);
    let (sign, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }
    let len = decimal_prefix_len(unsigned);
    if len == 0 {
        return f64::NAN;
    }
    unsigned[..len].parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

fn parse_int_prefix(s: &str, radix: i64) -> f64 {
    let s = s.trim_start_matches(is_whitespace);
    let (sign, mut digits) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let mut radix = radix;
    let mut strip_prefix = true;
    if radix != 0 {
        if !(2..=36).contains(&radix) {
            return f64::NAN;
        }
        strip_prefix = radix == 16;
    } else {
        radix = 10;
    }
    if strip_prefix && (digits.starts_with("0x") || digits.starts_with("0X")) {
        digits = &digits[2..];
        radix = 16;
    }
    let radix = radix as u32;
    let mut n = 0.0;
    let mut any = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        n = n * radix as f64 + d as f64;
        any = true;
    }
    if !any {
        return f64::NAN;
    }
    sign * n
}
