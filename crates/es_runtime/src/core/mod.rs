//! Object model and heap.
//!
//! - `Value` - engine values; strings and objects are heap handles
//! - `JsObject` - prototype link, kind and ordered own properties
//! - `Heap` - slot storage with mark and sweep collection

pub mod heap;
pub mod object;
pub mod value;

pub use heap::{GcPressure, Heap, HeapStats, ManagedObject, ObjectId};
pub use object::{Attributes, JsObject, ObjectKind, Property, PropertyKey, Slot};
pub use value::{SymbolId, Value, WellKnownSymbol};
