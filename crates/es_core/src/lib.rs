//! Text types shared by the engine runtime.
//!
//! This crate has no dependency on the object model:
//! - `codec` - conversions between the compact and external encodings
//! - `Text` - immutable text value with inline, heap and external storage
//! - `ExternalTextRegistry` - release bookkeeping for caller-owned buffers

pub mod codec;
pub mod error;
pub mod external;
pub mod text;

pub use codec::Encoding;
pub use error::EncodingError;
pub use external::{ExternalHandle, ExternalTextRegistry, ReleaseCallback};
pub use text::Text;
