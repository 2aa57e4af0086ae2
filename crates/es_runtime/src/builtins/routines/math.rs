//! `Math` functions.

use crate::context::Context;
use crate::core::value::Value;
use crate::errors::EngineError;

pub(super) fn unary(ctx: &mut Context, args: &[Value], f: fn(f64) -> f64) -> Result<Value, EngineError> {
    Ok(Value::Number(f(ctx.to_number(args[0])?)))
}

pub(super) fn pow(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let base = ctx.to_number(args[0])?;
    let exponent = ctx.to_number(args[1])?;
    // 1 ** NaN and (+-1) ** (+-Infinity) are NaN here, unlike `powf`.
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return Ok(Value::Number(f64::NAN));
    }
    Ok(Value::Number(base.powf(exponent)))
}

pub(super) fn max(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    fold(ctx, args, f64::NEG_INFINITY, |acc, n| {
        if n > acc || (n == 0.0 && acc == 0.0 && acc.is_sign_negative()) { n } else { acc }
    })
}

pub(super) fn min(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    fold(ctx, args, f64::INFINITY, |acc, n| {
        if n < acc || (n == 0.0 && acc == 0.0 && n.is_sign_negative()) { n } else { acc }
    })
}

fn fold(ctx: &mut Context, args: &[Value], init: f64, pick: fn(f64, f64) -> f64) -> Result<Value, EngineError> {
    let mut acc = init;
    let mut nan = false;
    for &arg in args {
        let n = ctx.to_number(arg)?;
        if n.is_nan() {
            nan = true;
        } else {
            acc = pick(acc, n);
        }
    }
    Ok(Value::Number(if nan { f64::NAN } else { acc }))
}

/// Rounds half up, keeping the sign of zero.
pub(super) fn round(n: f64) -> f64 {
    if !n.is_finite() || n.fract() == 0.0 {
        return n;
    }
    if n < 0.0 && n >= -0.5 {
        return -0.0;
    }
    (n + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_goes_up_at_half() {
        assert_eq!(round(2.5), 3.0);
        assert_eq!(round(-2.5), -2.0);
        assert_eq!(round(-0.4), 0.0);
        assert!(round(-0.4).is_sign_negative());
        assert_eq!(round(7.0), 7.0);
    }

    #[test]
    fn min_max_over_arguments() {
        let mut ctx = Context::new();
        let args = [Value::Number(3.0), Value::Number(-1.0), Value::Bool(true)];
        assert_eq!(max(&mut ctx, &args).unwrap(), Value::Number(3.0));
        assert_eq!(min(&mut ctx, &args).unwrap(), Value::Number(-1.0));
        assert_eq!(max(&mut ctx, &[]).unwrap(), Value::Number(f64::NEG_INFINITY));
        let Value::Number(n) = min(&mut ctx, &[Value::Undefined]).unwrap() else {
            panic!("expected a number");
        };
        assert!(n.is_nan());
    }
}
