//! Embedder handles and collection.

use std::fmt;

use super::Context;
use crate::core::heap::{GcPressure, ObjectId};
use crate::core::value::Value;

/// What one collection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GcReport {
    pub pressure: GcPressure,
    pub freed: usize,
    pub external_released: usize,
    pub live: usize,
}

impl fmt::Display for GcReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gc ({:?}): freed {}, external released {}, live {}",
            self.pressure, self.freed, self.external_released, self.live
        )
    }
}

impl Context {
    /// Adds a root for `value`. Every retain needs a matching [`Context::release`].
    pub fn retain(&mut self, value: Value) -> Value {
        self.root(value)
    }

    /// Drops one root of `value`.
    pub fn release(&mut self, value: Value) {
        let Some(id) = value.heap_id() else {
            return;
        };
        match self.roots.get_mut(&id) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.roots.remove(&id);
            }
            None => tracing::warn!(handle = id.0, "released a value that is not rooted"),
        }
    }

    /// Collects everything unreachable from the roots.
    ///
    /// Must not be called from inside a native routine.
    pub fn gc(&mut self, pressure: GcPressure) -> GcReport {
        if pressure == GcPressure::High {
            self.interned.clear();
            self.interned.shrink_to_fit();
        }
        let mut roots: Vec<ObjectId> = self.roots.keys().copied().collect();
        roots.extend(self.registry.realized());
        if pressure == GcPressure::Low {
            roots.extend(self.interned.values().copied());
        }
        self.heap.mark_all(&roots);
        let stats = self.heap.sweep(&mut self.externals, pressure);
        if pressure == GcPressure::Low {
            let heap = &self.heap;
            self.interned.retain(|_, id| heap.is_live(*id));
        }
        let report = GcReport {
            pressure,
            freed: stats.freed,
            external_released: stats.external_released,
            live: stats.live,
        };
        tracing::debug!(
            pressure = ?pressure,
            freed = report.freed,
            external_released = report.external_released,
            live = report.live,
            "collection finished"
        );
        report
    }

    /// Threshold driven collection at an embedder entry point.
    pub(crate) fn maybe_gc(&mut self) {
        if self.native_depth == 0 && self.heap.should_gc() {
            self.gc(GcPressure::Low);
        }
    }

    pub(crate) fn root(&mut self, value: Value) -> Value {
        if let Some(id) = value.heap_id() {
            *self.roots.entry(id).or_insert(0) += 1;
        }
        value
    }

    pub(crate) fn is_rooted(&self, value: Value) -> bool {
        value.heap_id().is_some_and(|id| self.roots.contains_key(&id))
    }
}
