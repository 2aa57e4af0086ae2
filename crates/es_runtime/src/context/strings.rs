//! String values: creation from the three byte sources, queries and extraction.

use std::ptr::NonNull;

use es_core::{Encoding, ReleaseCallback, Text};

use super::Context;
use crate::core::heap::{ManagedObject, ObjectId};
use crate::core::value::Value;
use crate::errors::{messages, EngineError};

impl Context {
    /// A string from Rust text.
    pub fn create_string(&mut self, s: &str) -> Value {
        self.maybe_gc();
        let v = self.new_string(Text::from_str(s));
        self.root(v)
    }

    /// A string copied from bytes in the compact encoding.
    pub fn create_string_from_compact(&mut self, bytes: &[u8]) -> Result<Value, EngineError> {
        self.maybe_gc();
        let text = Text::from_compact(bytes)?;
        let v = self.new_string(text);
        Ok(self.root(v))
    }

    /// A string decoded from bytes in the external encoding.
    pub fn create_string_from_external(&mut self, bytes: &[u8]) -> Result<Value, EngineError> {
        self.maybe_gc();
        let text = Text::from_external(bytes)?;
        let v = self.new_string(text);
        Ok(self.root(v))
    }

    /// A string over a caller-owned compact buffer, without copying it.
    ///
    /// `callback` runs once, after the last string over `ptr` has been collected, or when
    /// the context is dropped.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` bytes and the bytes must stay unchanged
    /// until `callback` has run. Without a callback they must outlive the context.
    pub unsafe fn create_string_external(
        &mut self,
        ptr: NonNull<u8>,
        len: usize,
        callback: Option<ReleaseCallback>,
    ) -> Result<Value, EngineError> {
        self.maybe_gc();
        // SAFETY: forwarded from the caller.
        let text = unsafe { self.externals.wrap(ptr, len, callback) }?;
        let v = self.new_external_string(text);
        Ok(self.root(v))
    }

    pub fn create_string_static(&mut self, bytes: &'static [u8]) -> Result<Value, EngineError> {
        self.maybe_gc();
        let text = self.externals.wrap_static(bytes)?;
        let v = self.new_external_string(text);
        Ok(self.root(v))
    }

    /// A string over `bytes`, which the context frees once the string is collected.
    pub fn create_string_boxed(&mut self, bytes: Box<[u8]>) -> Result<Value, EngineError> {
        self.maybe_gc();
        let text = self.externals.wrap_boxed(bytes)?;
        let v = self.new_external_string(text);
        Ok(self.root(v))
    }

    /// Code units for [`Encoding::Compact`], code points for [`Encoding::External`].
    pub fn string_length(&self, value: Value, encoding: Encoding) -> Result<usize, EngineError> {
        Ok(self.text_ref(value)?.length(encoding))
    }

    pub fn string_size(&self, value: Value, encoding: Encoding) -> Result<usize, EngineError> {
        Ok(self.text_ref(value)?.size(encoding))
    }

    /// Copies code units `[start, end)` into `buf`. Returns the number of bytes written;
    /// a sequence that does not fit is left out entirely.
    pub fn substring_to_buffer(
        &self,
        value: Value,
        start: usize,
        end: usize,
        buf: &mut [u8],
        encoding: Encoding,
    ) -> Result<usize, EngineError> {
        Ok(self
            .text_ref(value)?
            .copy_range_to_buffer(start, end, buf, encoding))
    }

    pub fn string_to_buffer(&self, value: Value, buf: &mut [u8], encoding: Encoding) -> Result<usize, EngineError> {
        Ok(self.text_ref(value)?.copy_all_to_buffer(buf, encoding))
    }

    /// An owned copy of the string. Never borrows an external buffer.
    pub fn string_to_text(&self, value: Value) -> Result<Text, EngineError> {
        Ok(self.text_ref(value)?.to_owned_text())
    }

    /// `===`.
    pub fn strict_equals(&self, a: Value, b: Value) -> bool {
        match (a, b) {
            (Value::String(x), Value::String(y)) => match (self.heap.text(x), self.heap.text(y)) {
                (Some(x), Some(y)) => x.strict_equals(y),
                _ => x == y,
            },
            (Value::Number(x), Value::Number(y)) => x == y,
            _ => a == b,
        }
    }

    fn text_ref(&self, value: Value) -> Result<&Text, EngineError> {
        match value {
            Value::String(id) => self
                .heap
                .text(id)
                .ok_or_else(|| EngineError::type_error(messages::STALE_HANDLE)),
            _ => Err(EngineError::type_error(messages::NOT_A_STRING)),
        }
    }

    /// Owned copy of the string stored at `id`. External buffers are copied, so the
    /// result stays valid after the backing buffer is released.
    pub(crate) fn text(&self, id: ObjectId) -> Result<Text, EngineError> {
        self.heap
            .text(id)
            .map(Text::to_owned_text)
            .ok_or_else(|| EngineError::type_error(messages::STALE_HANDLE))
    }

    /// Stores `text` as a new string. An external text is copied: only the wrapper
    /// registered for it may hold its handle.
    pub(crate) fn new_string(&mut self, text: Text) -> Value {
        let text = if text.is_external() { text.to_owned_text() } else { text };
        Value::String(self.heap.alloc(ManagedObject::Str(text)))
    }

    /// Stores a freshly registered external text without copying it.
    fn new_external_string(&mut self, text: Text) -> Value {
        Value::String(self.heap.alloc(ManagedObject::Str(text)))
    }

    /// A string value for `s`, shared with earlier requests for the same text while the
    /// intern cache holds it.
    pub(crate) fn intern(&mut self, s: &str) -> Value {
        let text = Text::from_str(s);
        if let Some(&id) = self.interned.get(&text) {
            if self.heap.is_live(id) {
                return Value::String(id);
            }
        }
        let id = self.heap.alloc(ManagedObject::Str(text.clone()));
        self.interned.insert(text, id);
        Value::String(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn astral_lengths_and_sizes() {
        let mut ctx = Context::new();
        let s = ctx.create_string("str: \u{10400}");
        assert_eq!(ctx.string_length(s, Encoding::Compact).unwrap(), 7);
        assert_eq!(ctx.string_length(s, Encoding::External).unwrap(), 6);
        assert_eq!(ctx.string_size(s, Encoding::Compact).unwrap(), 11);
        assert_eq!(ctx.string_size(s, Encoding::External).unwrap(), 9);
    }

    #[test]
    fn non_strings_are_type_errors() {
        let ctx = Context::new();
        let err = ctx.string_length(Value::Number(1.0), Encoding::Compact).unwrap_err();
        assert_eq!(err.message(), messages::NOT_A_STRING);
    }

    #[test]
    fn equal_texts_from_different_sources() {
        let mut ctx = Context::new();
        let a = ctx.create_string("caf\u{e9}");
        let b = ctx.create_string_from_external("caf\u{e9}".as_bytes()).unwrap();
        let c = ctx.create_string_static(b"caf\xc3\xa9").unwrap();
        assert!(ctx.strict_equals(a, b));
        assert!(ctx.strict_equals(b, c));
        assert!(!ctx.strict_equals(a, Value::Number(0.0)));
        assert!(!ctx.strict_equals(Value::Number(f64::NAN), Value::Number(f64::NAN)));
    }

    #[test]
    fn interned_strings_are_shared() {
        let mut ctx = Context::new();
        let a = ctx.intern("prototype");
        let b = ctx.intern("prototype");
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_compact_bytes_are_rejected() {
        let mut ctx = Context::new();
        let err = ctx.create_string_from_compact(b"\xf0\x90\x90\x80").unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Type);
    }
}
