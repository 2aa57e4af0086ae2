//! `ArrayBuffer` and the typed array constructors.

use crate::builtins::{BuiltinId, TypedArrayKind};
use crate::context::Context;
use crate::core::heap::ObjectId;
use crate::core::object::{JsObject, ObjectKind, TypedArrayView};
use crate::core::value::Value;
use crate::errors::{messages, EngineError};

/// Largest buffer a script may allocate.
const MAX_BUFFER_BYTES: usize = 1 << 30;

pub(super) fn is_view(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let view = match args[0] {
        Value::Object(id) => matches!(ctx.obj(id)?.kind, ObjectKind::TypedArray(_)),
        _ => false,
    };
    Ok(Value::Bool(view))
}

pub(super) fn construct_buffer(ctx: &mut Context, args: &[Value]) -> Result<Value, EngineError> {
    let len = ctx.to_integer(args[0])?;
    if len < 0.0 || len > MAX_BUFFER_BYTES as f64 {
        return Err(EngineError::range_error(messages::INVALID_BUFFER_LENGTH));
    }
    Ok(Value::Object(new_buffer(ctx, len as usize)))
}

fn new_buffer(ctx: &mut Context, len: usize) -> ObjectId {
    let proto = ctx.prototype_or_object(BuiltinId::ArrayBufferPrototype);
    ctx.alloc_object(JsObject::new(proto, ObjectKind::ArrayBuffer(vec![0; len])))
}

/// `new XArray(length)`, `new XArray(array)` or `new XArray(buffer, offset, length)`.
pub(super) fn construct(ctx: &mut Context, kind: TypedArrayKind, args: &[Value]) -> Result<Value, EngineError> {
    let size = kind.bytes_per_element();
    let source = match args[0] {
        Value::Object(id) => match &ctx.obj(id)?.kind {
            ObjectKind::ArrayBuffer(bytes) => Source::Buffer(id, bytes.len()),
            ObjectKind::Array(items) => Source::Items(items.clone()),
            _ => Source::Length(0),
        },
        Value::Undefined => Source::Length(0),
        v => {
            let n = ctx.to_integer(v)?;
            if n < 0.0 || n * size as f64 > MAX_BUFFER_BYTES as f64 {
                return Err(EngineError::range_error(messages::INVALID_ARRAY_LENGTH));
            }
            Source::Length(n as usize)
        }
    };

    let view = match source {
        Source::Length(length) => TypedArrayView {
            kind,
            buffer: new_buffer(ctx, length * size),
            byte_offset: 0,
            length,
        },
        Source::Items(items) => {
            let view = TypedArrayView {
                kind,
                buffer: new_buffer(ctx, items.len() * size),
                byte_offset: 0,
                length: items.len(),
            };
            for (i, item) in items.into_iter().enumerate() {
                let n = ctx.to_number(item)?;
                ctx.typed_array_set(view, i, n)?;
            }
            view
        }
        Source::Buffer(buffer, buffer_len) => {
            let offset = ctx.to_integer(args[1])?;
            if offset < 0.0 || offset as usize % size != 0 || offset > buffer_len as f64 {
                return Err(EngineError::range_error(messages::INVALID_OFFSET));
            }
            let byte_offset = offset as usize;
            let length = if args[2].is_undefined() {
                if (buffer_len - byte_offset) % size != 0 {
                    return Err(EngineError::range_error(messages::INVALID_ARRAY_LENGTH));
                }
                (buffer_len - byte_offset) / size
            } else {
                let n = ctx.to_integer(args[2])?;
                if n < 0.0 || byte_offset as f64 + n * size as f64 > buffer_len as f64 {
                    return Err(EngineError::range_error(messages::INVALID_ARRAY_LENGTH));
                }
                n as usize
            };
            TypedArrayView {
                kind,
                buffer,
                byte_offset,
                length,
            }
        }
    };
    let proto = ctx.prototype_or_object(kind.prototype());
    Ok(Value::Object(ctx.alloc_object(JsObject::new(proto, ObjectKind::TypedArray(view)))))
}

enum Source {
    Length(usize),
    Items(Vec<Value>),
    Buffer(ObjectId, usize),
}

impl Context {
    /// Element `index` of `view`; `undefined` out of bounds.
    pub(crate) fn typed_array_get(&self, view: TypedArrayView, index: usize) -> Result<Value, EngineError> {
        if index >= view.length {
            return Ok(Value::Undefined);
        }
        let ObjectKind::ArrayBuffer(bytes) = &self.obj(view.buffer)?.kind else {
            return Ok(Value::Undefined);
        };
        let size = view.kind.bytes_per_element();
        let at = view.byte_offset + index * size;
        Ok(bytes
            .get(at..at + size)
            .map_or(Value::Undefined, |raw| Value::Number(decode(view.kind, raw))))
    }

    /// Stores `n` at `index`; writes out of bounds are dropped.
    pub(crate) fn typed_array_set(&mut self, view: TypedArrayView, index: usize, n: f64) -> Result<(), EngineError> {
        if index >= view.length {
            return Ok(());
        }
        let ObjectKind::ArrayBuffer(bytes) = &mut self.obj_mut(view.buffer)?.kind else {
            return Ok(());
        };
        let size = view.kind.bytes_per_element();
        let at = view.byte_offset + index * size;
        if let Some(raw) = bytes.get_mut(at..at + size) {
            encode(view.kind, n, raw);
        }
        Ok(())
    }
}

/// ToUint32 bit pattern: truncation modulo 2^32.
fn modular_bits(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(4_294_967_296.0) as u32
}

fn encode(kind: TypedArrayKind, n: f64, out: &mut [u8]) {
    let bits = modular_bits(n);
    match kind {
        TypedArrayKind::Int8 | TypedArrayKind::Uint8 => out[0] = bits as u8,
        TypedArrayKind::Uint8Clamped => {
            out[0] = if n.is_nan() { 0 } else { n.clamp(0.0, 255.0).round_ties_even() as u8 };
        }
        TypedArrayKind::Int16 | TypedArrayKind::Uint16 => {
            out.copy_from_slice(&(bits as u16).to_le_bytes());
        }
        TypedArrayKind::Int32 | TypedArrayKind::Uint32 => out.copy_from_slice(&bits.to_le_bytes()),
        TypedArrayKind::Float32 => out.copy_from_slice(&(n as f32).to_le_bytes()),
        TypedArrayKind::Float64 => out.copy_from_slice(&n.to_le_bytes()),
    }
}

fn decode(kind: TypedArrayKind, raw: &[u8]) -> f64 {
    let mut b8 = [0u8; 8];
    b8[..raw.len()].copy_from_slice(raw);
    match kind {
        TypedArrayKind::Int8 => raw[0] as i8 as f64,
        TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped => raw[0] as f64,
        TypedArrayKind::Int16 => i16::from_le_bytes([b8[0], b8[1]]) as f64,
        TypedArrayKind::Uint16 => u16::from_le_bytes([b8[0], b8[1]]) as f64,
        TypedArrayKind::Int32 => i32::from_le_bytes([b8[0], b8[1], b8[2], b8[3]]) as f64,
        TypedArrayKind::Uint32 => u32::from_le_bytes([b8[0], b8[1], b8[2], b8[3]]) as f64,
        TypedArrayKind::Float32 => f32::from_le_bytes([b8[0], b8[1], b8[2], b8[3]]) as f64,
        TypedArrayKind::Float64 => f64::from_le_bytes(b8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(kind: TypedArrayKind, n: f64) -> f64 {
        let mut raw = vec![0u8; kind.bytes_per_element()];
        encode(kind, n, &mut raw);
        decode(kind, &raw)
    }

    #[test]
    fn element_conversions() {
        assert_eq!(store(TypedArrayKind::Int8, 200.0), -56.0);
        assert_eq!(store(TypedArrayKind::Uint8, -1.0), 255.0);
        assert_eq!(store(TypedArrayKind::Uint8Clamped, 300.0), 255.0);
        assert_eq!(store(TypedArrayKind::Uint8Clamped, 2.5), 2.0);
        assert_eq!(store(TypedArrayKind::Int16, 40000.0), -25536.0);
        assert_eq!(store(TypedArrayKind::Uint32, -1.0), 4294967295.0);
        assert_eq!(store(TypedArrayKind::Int32, f64::NAN), 0.0);
        assert_eq!(store(TypedArrayKind::Float32, 0.5), 0.5);
        assert_eq!(store(TypedArrayKind::Float64, 0.1), 0.1);
    }
}
