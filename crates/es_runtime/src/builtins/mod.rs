//! Built-in objects: identifiers, descriptor tables, the lazy registry and the native
//! routines bound through it.

pub mod descriptor;
pub mod ids;
pub mod registry;
pub mod routines;
pub mod tables;

pub use descriptor::{Arity, EntryKey, EntryValue, PropertyEntry, SimpleValue};
pub use ids::{BuiltinId, BuiltinInfo, TypedArrayKind};
pub use registry::{BuiltinRegistry, RealizationState};
pub use routines::{RoutineBinding, RoutineId};
