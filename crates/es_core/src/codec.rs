//! Conversions between the compact internal encoding and the external encoding.
//!
//! The compact encoding is CESU-8: ASCII-compatible, every UTF-16 code unit takes one
//! to three bytes, and a code point above U+FFFF is stored as its two surrogate halves,
//! three bytes each. The external encoding is UTF-8 with one tolerated divergence: a
//! surrogate that is not part of a valid pair is written as a three byte sequence, the
//! same bytes the compact encoding uses for it.
//!
//! Functions here are pure. The decoders never read past the slice they are given and
//! stop at the first malformed sequence.

use crate::error::EncodingError;

/// Largest number of bytes one code unit occupies in the compact encoding.
pub const MAX_COMPACT_UNIT_SIZE: usize = 3;
/// Largest number of bytes one code point occupies in the external encoding.
pub const MAX_EXTERNAL_SEQUENCE_SIZE: usize = 4;

const HIGH_SURROGATE_START: u16 = 0xD800;
const LOW_SURROGATE_START: u16 = 0xDC00;
const SURROGATE_END: u16 = 0xDFFF;
const SUPPLEMENTARY_START: u32 = 0x10000;
const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Byte encoding used at an API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// CESU-8, the engine's own representation.
    Compact,
    /// UTF-8 compatible; astral code points use one four byte sequence.
    External,
}

#[inline]
pub fn is_high_surrogate(unit: u16) -> bool {
    (HIGH_SURROGATE_START..LOW_SURROGATE_START).contains(&unit)
}

#[inline]
pub fn is_low_surrogate(unit: u16) -> bool {
    (LOW_SURROGATE_START..=SURROGATE_END).contains(&unit)
}

#[inline]
pub fn combine_surrogates(high: u16, low: u16) -> u32 {
    SUPPLEMENTARY_START
        + (((high - HIGH_SURROGATE_START) as u32) << 10)
        + (low - LOW_SURROGATE_START) as u32
}

/// Splits an astral code point into its (high, low) surrogate halves.
#[inline]
pub fn split_code_point(cp: u32) -> (u16, u16) {
    debug_assert!((SUPPLEMENTARY_START..=MAX_CODE_POINT).contains(&cp));
    let v = cp - SUPPLEMENTARY_START;
    (
        HIGH_SURROGATE_START + (v >> 10) as u16,
        LOW_SURROGATE_START + (v & 0x3FF) as u16,
    )
}

/// Number of compact bytes a single code unit encodes to.
#[inline]
pub fn compact_unit_size(unit: u16) -> usize {
    if unit < 0x80 {
        1
    } else if unit < 0x800 {
        2
    } else {
        3
    }
}

/// Decodes one sequence starting at `offset`.
///
/// Four byte sequences are only accepted when `allow_four` is set, which is the one
/// difference between reading compact and reading external bytes.
fn decode_at(bytes: &[u8], offset: usize, allow_four: bool) -> Result<(u32, usize), EncodingError> {
    let Some(&lead) = bytes.get(offset) else {
        return Err(EncodingError::Truncated { offset });
    };
    let (width, init, min) = match lead {
        0x00..=0x7F => return Ok((lead as u32, 1)),
        0xC0..=0xDF => (2, (lead & 0x1F) as u32, 0x80),
        0xE0..=0xEF => (3, (lead & 0x0F) as u32, 0x800),
        0xF0..=0xF7 if allow_four => (4, (lead & 0x07) as u32, SUPPLEMENTARY_START),
        0xF0..=0xF7 => return Err(EncodingError::FourByteSequence { offset }),
        _ => return Err(EncodingError::InvalidLead { offset, byte: lead }),
    };
    if offset + width > bytes.len() {
        return Err(EncodingError::Truncated { offset });
    }
    let mut cp = init;
    for i in 1..width {
        let b = bytes[offset + i];
        if b & 0xC0 != 0x80 {
            return Err(EncodingError::InvalidContinuation { offset: offset + i });
        }
        cp = (cp << 6) | (b & 0x3F) as u32;
    }
    if cp < min {
        return Err(EncodingError::Overlong { offset });
    }
    if cp > MAX_CODE_POINT {
        return Err(EncodingError::OutOfRange { offset });
    }
    Ok((cp, width))
}

/// Decodes the compact code unit at `offset`, returning it with its byte width.
pub fn decode_unit_at(bytes: &[u8], offset: usize) -> Option<(u16, usize)> {
    decode_at(bytes, offset, false)
        .ok()
        .map(|(cp, width)| (cp as u16, width))
}

/// Decodes the code point at `offset` of compact bytes.
///
/// A high surrogate immediately followed by a low surrogate yields the combined astral
/// code point and a width of six. An unpaired surrogate is returned as is.
pub fn decode_code_point_at(bytes: &[u8], offset: usize) -> Option<(u32, usize)> {
    let (unit, width) = decode_unit_at(bytes, offset)?;
    if is_high_surrogate(unit) {
        if let Some((next, next_width)) = decode_unit_at(bytes, offset + width) {
            if is_low_surrogate(next) {
                return Some((combine_surrogates(unit, next), width + next_width));
            }
        }
    }
    Some((unit as u32, width))
}

/// Checks that `bytes` is well formed compact text and returns its code unit count.
pub fn validate_compact(bytes: &[u8]) -> Result<usize, EncodingError> {
    let mut offset = 0;
    let mut units = 0;
    while offset < bytes.len() {
        let (_, width) = decode_at(bytes, offset, false)?;
        offset += width;
        units += 1;
    }
    Ok(units)
}

/// Counts code units of compact bytes that are already known to be well formed.
///
/// Every compact unit has exactly one byte that is not a continuation byte.
#[inline]
pub fn unit_count(compact: &[u8]) -> usize {
    compact.iter().filter(|&&b| b & 0xC0 != 0x80).count()
}

/// Iterator over the code units of compact bytes.
#[derive(Clone)]
pub struct CompactUnits<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> CompactUnits<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Byte offset of the next unit.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for CompactUnits<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        let (unit, width) = decode_unit_at(self.bytes, self.offset)?;
        self.offset += width;
        Some(unit)
    }
}

/// Walks compact bytes one external sequence at a time: a valid surrogate pair is one
/// step, everything else is one unit per step. Yields `(code point, compact width)`.
struct Steps<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl Iterator for Steps<'_> {
    type Item = (u32, usize);

    fn next(&mut self) -> Option<(u32, usize)> {
        let step = decode_code_point_at(self.bytes, self.offset)?;
        self.offset += step.1;
        Some(step)
    }
}

fn steps(bytes: &[u8]) -> Steps<'_> {
    Steps { bytes, offset: 0 }
}

/// Number of bytes a code point decoded from compact text takes in external form.
#[inline]
fn external_width(cp: u32, compact_width: usize) -> usize {
    if cp >= SUPPLEMENTARY_START { 4 } else { compact_width }
}

/// Byte size the same text occupies in the external encoding.
pub fn external_size(compact: &[u8]) -> usize {
    steps(compact).map(|(cp, width)| external_width(cp, width)).sum()
}

/// Length of the text in the external encoding: code points, a valid pair counting once.
pub fn external_length(compact: &[u8]) -> usize {
    steps(compact).count()
}

/// Writes one code unit in compact form, returning the number of bytes used.
pub fn write_compact_unit(unit: u16, out: &mut [u8; MAX_COMPACT_UNIT_SIZE]) -> usize {
    let u = unit as u32;
    match compact_unit_size(unit) {
        1 => {
            out[0] = u as u8;
            1
        }
        2 => {
            out[0] = 0xC0 | (u >> 6) as u8;
            out[1] = 0x80 | (u & 0x3F) as u8;
            2
        }
        _ => {
            out[0] = 0xE0 | (u >> 12) as u8;
            out[1] = 0x80 | ((u >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (u & 0x3F) as u8;
            3
        }
    }
}

/// Appends one code unit in compact form.
pub fn push_compact_unit(out: &mut Vec<u8>, unit: u16) {
    let mut buf = [0u8; MAX_COMPACT_UNIT_SIZE];
    let n = write_compact_unit(unit, &mut buf);
    out.extend_from_slice(&buf[..n]);
}

/// Writes an astral code point as a four byte external sequence.
pub fn write_external_astral(cp: u32, out: &mut [u8; MAX_EXTERNAL_SEQUENCE_SIZE]) {
    debug_assert!(cp >= SUPPLEMENTARY_START);
    out[0] = 0xF0 | (cp >> 18) as u8;
    out[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
    out[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
    out[3] = 0x80 | (cp & 0x3F) as u8;
}

/// Converts compact bytes to the external encoding.
pub fn encode_external(compact: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(compact.len());
    let mut offset = 0;
    for (cp, width) in steps(compact) {
        if cp >= SUPPLEMENTARY_START {
            let mut buf = [0u8; MAX_EXTERNAL_SEQUENCE_SIZE];
            write_external_astral(cp, &mut buf);
            out.extend_from_slice(&buf);
        } else {
            out.extend_from_slice(&compact[offset..offset + width]);
        }
        offset += width;
    }
    out
}

/// Converts compact bytes to the external encoding into `dest`, writing at most
/// `dest.len()` bytes. A sequence that does not fit completely is left out along with
/// everything after it. Returns the number of bytes written.
pub fn encode_external_into(compact: &[u8], dest: &mut [u8]) -> usize {
    let mut written = 0;
    let mut offset = 0;
    for (cp, width) in steps(compact) {
        let need = external_width(cp, width);
        if written + need > dest.len() {
            break;
        }
        if cp >= SUPPLEMENTARY_START {
            let mut buf = [0u8; MAX_EXTERNAL_SEQUENCE_SIZE];
            write_external_astral(cp, &mut buf);
            dest[written..written + 4].copy_from_slice(&buf);
        } else {
            dest[written..written + width].copy_from_slice(&compact[offset..offset + width]);
        }
        written += need;
        offset += width;
    }
    written
}

/// Converts external bytes to the compact encoding.
///
/// Four byte sequences become surrogate pairs; three byte encoded surrogates are kept.
pub fn encode_compact(external: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(external.len() + external.len() / 2);
    let mut offset = 0;
    while offset < external.len() {
        let (cp, width) = decode_at(external, offset, true)?;
        if cp >= SUPPLEMENTARY_START {
            let (high, low) = split_code_point(cp);
            push_compact_unit(&mut out, high);
            push_compact_unit(&mut out, low);
        } else {
            out.extend_from_slice(&external[offset..offset + width]);
        }
        offset += width;
    }
    Ok(out)
}

/// Converts a Rust string to compact bytes. Cannot fail: `str` is valid UTF-8.
pub fn encode_compact_str(s: &str) -> Vec<u8> {
    if s.is_ascii() {
        return s.as_bytes().to_vec();
    }
    let mut out = Vec::with_capacity(s.len() + s.len() / 2);
    for unit in s.encode_utf16() {
        push_compact_unit(&mut out, unit);
    }
    out
}
