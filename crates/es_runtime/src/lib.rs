//! Embeddable ECMAScript engine core.
//!
//! The runtime owns the object heap, the lazily realized built-in objects and the
//! routine dispatch that binds native functions to them. Everything an embedder does
//! goes through [`Context`].

#![allow(clippy::collapsible_if)]
#![allow(clippy::new_without_default)]
#![allow(clippy::manual_range_contains)]

pub mod builtins;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;

pub use builtins::{Arity, BuiltinId, RoutineId, TypedArrayKind};
pub use config::{ContextConfig, FeatureSet};
pub use context::{Context, GcReport};
pub use crate::core::heap::{GcPressure, HeapStats, ObjectId};
pub use crate::core::object::{Attributes, PropertyKey};
pub use crate::core::value::{SymbolId, Value, WellKnownSymbol};
pub use errors::{EngineError, ErrorKind};

pub use es_core::{Encoding, EncodingError, ExternalHandle, ReleaseCallback, Text};
