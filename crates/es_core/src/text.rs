//! Immutable text values stored in the compact encoding.
//!
//! Short texts live inline, longer ones share an `Rc<[u8]>`, and externally backed texts
//! borrow a caller-owned buffer that the [`ExternalTextRegistry`] releases when the
//! wrapping value is reclaimed.
//!
//! Stored bytes are always canonical compact bytes: input from the external encoding is
//! converted on the way in and compact input is validated, so two texts hold the same
//! bytes exactly when they hold the same code units.
//!
//! [`ExternalTextRegistry`]: crate::external::ExternalTextRegistry

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;
use std::rc::Rc;

use crate::codec::{self, CompactUnits, Encoding};
use crate::error::EncodingError;
use crate::external::ExternalHandle;

const INLINE_CAP: usize = 22;

/// Borrowed view of a caller-owned buffer.
pub struct ExternalSlice {
    ptr: NonNull<u8>,
    len: usize,
    handle: ExternalHandle,
}

impl ExternalSlice {
    fn as_bytes(&self) -> &[u8] {
        // SAFETY: `Text::external` requires `ptr` to stay valid for `len` bytes until the
        // registry releases the buffer, which happens after the last wrapper is reclaimed.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

#[derive(Clone)]
pub enum Text {
    Inline { len: u8, units: u8, buf: [u8; INLINE_CAP] },
    Heap { data: Rc<[u8]>, units: usize },
    External { data: Rc<ExternalSlice>, units: usize },
}

impl Text {
    pub fn new() -> Self {
        Self::Inline {
            len: 0,
            units: 0,
            buf: [0u8; INLINE_CAP],
        }
    }

    /// Builds a text from compact bytes already known to be well formed.
    fn from_parts(bytes: &[u8], units: usize) -> Self {
        if bytes.len() <= INLINE_CAP {
            let mut buf = [0u8; INLINE_CAP];
            buf[..bytes.len()].copy_from_slice(bytes);
            return Self::Inline {
                len: bytes.len() as u8,
                units: units as u8,
                buf,
            };
        }
        Self::Heap {
            data: Rc::from(bytes),
            units,
        }
    }

    pub fn from_str(s: &str) -> Self {
        let bytes = codec::encode_compact_str(s);
        let units = codec::unit_count(&bytes);
        Self::from_parts(&bytes, units)
    }

    /// Copies compact bytes without re-encoding them.
    pub fn from_compact(bytes: &[u8]) -> Result<Self, EncodingError> {
        let units = codec::validate_compact(bytes)?;
        Ok(Self::from_parts(bytes, units))
    }

    /// Decodes external bytes into owned compact storage.
    pub fn from_external(bytes: &[u8]) -> Result<Self, EncodingError> {
        let compact = codec::encode_compact(bytes)?;
        let units = codec::unit_count(&compact);
        Ok(Self::from_parts(&compact, units))
    }

    /// Builds a text from UTF-16 code units; unpaired surrogates are kept.
    pub fn from_units(units: &[u16]) -> Self {
        let mut bytes = Vec::with_capacity(units.len());
        for &unit in units {
            codec::push_compact_unit(&mut bytes, unit);
        }
        Self::from_parts(&bytes, units.len())
    }

    /// Wraps caller-owned compact bytes without copying them.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` bytes holding well formed compact text,
    /// and must stay valid and unmodified until the registry entry for `handle` is
    /// released.
    pub(crate) unsafe fn external(
        ptr: NonNull<u8>,
        len: usize,
        units: usize,
        handle: ExternalHandle,
    ) -> Self {
        Self::External {
            data: Rc::new(ExternalSlice { ptr, len, handle }),
            units,
        }
    }

    /// Compact bytes of the text.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Text::Inline { len, buf, .. } => &buf[..*len as usize],
            Text::Heap { data, .. } => &data[..],
            Text::External { data, .. } => data.as_bytes(),
        }
    }

    /// Size in bytes in the compact encoding.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            Text::Inline { len, .. } => *len as usize,
            Text::Heap { data, .. } => data.len(),
            Text::External { data, .. } => data.len,
        }
    }

    /// Length in UTF-16 code units, cached at construction.
    pub fn length_in_code_units(&self) -> usize {
        match self {
            Text::Inline { units, .. } => *units as usize,
            Text::Heap { units, .. } | Text::External { units, .. } => *units,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size_in_bytes() == 0
    }

    /// Every non-ASCII unit takes at least two compact bytes.
    #[inline]
    pub fn is_ascii(&self) -> bool {
        self.size_in_bytes() == self.length_in_code_units()
    }

    pub fn size(&self, encoding: Encoding) -> usize {
        match encoding {
            Encoding::Compact => self.size_in_bytes(),
            Encoding::External if self.is_ascii() => self.size_in_bytes(),
            Encoding::External => codec::external_size(self.as_bytes()),
        }
    }

    /// Code units for the compact encoding, code points for the external one.
    pub fn length(&self, encoding: Encoding) -> usize {
        match encoding {
            Encoding::Compact => self.length_in_code_units(),
            Encoding::External if self.is_ascii() => self.length_in_code_units(),
            Encoding::External => codec::external_length(self.as_bytes()),
        }
    }

    pub fn units(&self) -> CompactUnits<'_> {
        CompactUnits::new(self.as_bytes())
    }

    /// Byte offset of code unit `index`, clamped to the end of the text.
    fn byte_offset(&self, index: usize) -> usize {
        if self.is_ascii() {
            return index.min(self.size_in_bytes());
        }
        let mut it = self.units();
        for _ in 0..index {
            if it.next().is_none() {
                break;
            }
        }
        it.offset()
    }

    pub fn code_unit_at(&self, index: usize) -> Option<u16> {
        if index >= self.length_in_code_units() {
            return None;
        }
        if self.is_ascii() {
            return Some(self.as_bytes()[index] as u16);
        }
        self.units().nth(index)
    }

    /// Code units `[start, end)`, clamped. May split a surrogate pair.
    pub fn substring(&self, start: usize, end: usize) -> Text {
        let end = end.min(self.length_in_code_units());
        if start >= end {
            return Text::new();
        }
        let from = self.byte_offset(start);
        let to = self.byte_offset(end);
        Self::from_parts(&self.as_bytes()[from..to], end - start)
    }

    pub fn concat2(a: &Text, b: &Text) -> Text {
        let total = a.size_in_bytes() + b.size_in_bytes();
        let units = a.length_in_code_units() + b.length_in_code_units();
        if total <= INLINE_CAP {
            let mut buf = [0u8; INLINE_CAP];
            let al = a.size_in_bytes();
            buf[..al].copy_from_slice(a.as_bytes());
            buf[al..total].copy_from_slice(b.as_bytes());
            return Text::Inline {
                len: total as u8,
                units: units as u8,
                buf,
            };
        }
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(a.as_bytes());
        out.extend_from_slice(b.as_bytes());
        Text::Heap {
            data: Rc::from(out),
            units,
        }
    }

    /// Copies code units `[start_unit, end_unit)` into `dest`, re-encoded as `encoding`.
    ///
    /// The range is clamped to the text. Nothing is written when the clamped range is
    /// empty. A sequence that would not fit entirely in `dest` is not written, and
    /// copying stops there. The two halves of a surrogate pair inside the range are one
    /// sequence in either encoding: six bytes compact, four bytes external. A half
    /// whose partner lies outside the range is a lone three byte sequence.
    pub fn copy_range_to_buffer(
        &self,
        start_unit: usize,
        end_unit: usize,
        dest: &mut [u8],
        encoding: Encoding,
    ) -> usize {
        let end_unit = end_unit.min(self.length_in_code_units());
        if start_unit >= end_unit {
            return 0;
        }
        let bytes = self.as_bytes();
        if self.is_ascii() {
            let n = (end_unit - start_unit).min(dest.len());
            dest[..n].copy_from_slice(&bytes[start_unit..start_unit + n]);
            return n;
        }

        let mut offset = self.byte_offset(start_unit);
        let mut index = start_unit;
        let mut written = 0;
        while index < end_unit {
            let Some((unit, width)) = codec::decode_unit_at(bytes, offset) else {
                break;
            };
            if codec::is_high_surrogate(unit) && index + 1 < end_unit {
                if let Some((next, next_width)) = codec::decode_unit_at(bytes, offset + width) {
                    if codec::is_low_surrogate(next) {
                        let pair = width + next_width;
                        let need = match encoding {
                            Encoding::Compact => pair,
                            Encoding::External => codec::MAX_EXTERNAL_SEQUENCE_SIZE,
                        };
                        if written + need > dest.len() {
                            break;
                        }
                        match encoding {
                            Encoding::Compact => {
                                dest[written..written + pair]
                                    .copy_from_slice(&bytes[offset..offset + pair]);
                            }
                            Encoding::External => {
                                let mut seq = [0u8; codec::MAX_EXTERNAL_SEQUENCE_SIZE];
                                codec::write_external_astral(
                                    codec::combine_surrogates(unit, next),
                                    &mut seq,
                                );
                                dest[written..written + need].copy_from_slice(&seq);
                            }
                        }
                        written += need;
                        offset += pair;
                        index += 2;
                        continue;
                    }
                }
            }
            // A single unit has the same bytes in both encodings.
            if written + width > dest.len() {
                break;
            }
            dest[written..written + width].copy_from_slice(&bytes[offset..offset + width]);
            written += width;
            offset += width;
            index += 1;
        }
        written
    }

    /// Copies the whole text into `dest` under the same truncation rule.
    pub fn copy_all_to_buffer(&self, dest: &mut [u8], encoding: Encoding) -> usize {
        self.copy_range_to_buffer(0, self.length_in_code_units(), dest, encoding)
    }

    /// The text in the external encoding.
    pub fn to_external_bytes(&self) -> Vec<u8> {
        if self.is_ascii() {
            return self.as_bytes().to_vec();
        }
        codec::encode_external(self.as_bytes())
    }

    /// Same code units, unpaired surrogates included. Matches the engine's `===`.
    pub fn strict_equals(&self, other: &Text) -> bool {
        if let (Text::External { data: a, .. }, Text::External { data: b, .. }) = (self, other) {
            if a.ptr == b.ptr && a.len == b.len {
                return true;
            }
        }
        self.length_in_code_units() == other.length_in_code_units()
            && self.as_bytes() == other.as_bytes()
    }

    /// Rust string with unpaired surrogates replaced by U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        if self.is_ascii() {
            return self.as_bytes().iter().map(|&b| b as char).collect();
        }
        let units: Vec<u16> = self.units().collect();
        String::from_utf16_lossy(&units)
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Text::External { .. })
    }

    pub fn external_handle(&self) -> Option<ExternalHandle> {
        match self {
            Text::External { data, .. } => Some(data.handle),
            _ => None,
        }
    }

    /// A copy that owns its bytes; external texts are copied out of their buffer.
    pub fn to_owned_text(&self) -> Text {
        match self {
            Text::External { units, .. } => Self::from_parts(self.as_bytes(), *units),
            _ => self.clone(),
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl Eq for Text {}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::from_str(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::from_str(&value)
    }
}
