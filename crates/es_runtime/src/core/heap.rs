//! Garbage collected storage for strings and objects.

use std::fmt;

use es_core::{ExternalTextRegistry, Text};

use super::object::JsObject;

/// Handle to a heap slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

pub enum ManagedObject {
    Object(Box<JsObject>),
    Str(Text),
}

impl ManagedObject {
    pub fn size(&self) -> usize {
        let base = std::mem::size_of::<ManagedObject>();
        let deep = match self {
            ManagedObject::Object(o) => o.size(),
            // External bytes are owned by the embedder and not counted.
            ManagedObject::Str(t) if t.is_external() => 32,
            ManagedObject::Str(t) => t.size_in_bytes() + 32,
        };
        base + deep
    }
}

/// How hard a collection pass tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcPressure {
    /// Keeps caches alive; only reclaims what nothing refers to.
    Low,
    /// Drops caches first and shrinks storage; reclaims everything unreachable.
    High,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub freed: usize,
    pub external_released: usize,
    pub live: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    pub objects: usize,
    pub strings: usize,
    pub external_strings: usize,
    pub free_slots: usize,
    pub bytes: usize,
    pub collections: usize,
}

impl fmt::Display for HeapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "=== Heap Stats ===\n\
             Objects:  {:>8}\n\
             Strings:  {:>8} ({} external)\n\
             Free:     {:>8} slots\n\
             Bytes:    {:>8}\n\
             GC runs:  {:>8}",
            self.objects,
            self.strings,
            self.external_strings,
            self.free_slots,
            self.bytes,
            self.collections
        )
    }
}

pub struct Heap {
    objects: Vec<Option<ManagedObject>>,
    free_list: Vec<usize>,
    marks: Vec<u64>,
    alloc_count: usize,
    gc_threshold: usize,
    alloc_bytes: usize,
    gc_threshold_bytes: usize,
    min_threshold: usize,
    min_threshold_bytes: usize,
    collections: usize,
}

impl Heap {
    pub fn new(gc_threshold: usize, gc_threshold_bytes: usize) -> Self {
        Self {
            objects: Vec::with_capacity(256),
            free_list: Vec::new(),
            marks: Vec::new(),
            alloc_count: 0,
            gc_threshold,
            alloc_bytes: 0,
            gc_threshold_bytes,
            min_threshold: gc_threshold,
            min_threshold_bytes: gc_threshold_bytes,
            collections: 0,
        }
    }

    pub fn alloc(&mut self, obj: ManagedObject) -> ObjectId {
        self.alloc_count += 1;
        self.alloc_bytes += obj.size();

        if let Some(id) = self.free_list.pop() {
            self.objects[id] = Some(obj);
            ObjectId(id)
        } else {
            let id = self.objects.len();
            self.objects.push(Some(obj));
            ObjectId(id)
        }
    }

    #[inline]
    pub fn should_gc(&self) -> bool {
        self.alloc_count >= self.gc_threshold || self.alloc_bytes >= self.gc_threshold_bytes
    }

    pub fn get(&self, id: ObjectId) -> Option<&ManagedObject> {
        self.objects.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut ManagedObject> {
        self.objects.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn object(&self, id: ObjectId) -> Option<&JsObject> {
        match self.get(id) {
            Some(ManagedObject::Object(o)) => Some(&**o),
            _ => None,
        }
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut JsObject> {
        match self.get_mut(id) {
            Some(ManagedObject::Object(o)) => Some(&mut **o),
            _ => None,
        }
    }

    pub fn text(&self, id: ObjectId) -> Option<&Text> {
        match self.get(id) {
            Some(ManagedObject::Str(t)) => Some(t),
            _ => None,
        }
    }

    pub fn is_live(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_marked(&self, id: ObjectId) -> bool {
        let word = id.0 >> 6;
        let bit = id.0 & 63;
        self.marks.get(word).is_some_and(|w| (w & (1 << bit)) != 0)
    }

    fn set_mark(&mut self, id: ObjectId) -> bool {
        let word = id.0 >> 6;
        let bit = id.0 & 63;
        if word >= self.marks.len() {
            self.marks.resize(word + 1, 0);
        }
        let w = &mut self.marks[word];
        let mask = 1 << bit;
        if (*w & mask) != 0 {
            return false;
        }
        *w |= mask;
        true
    }

    /// Marks everything reachable from `roots`.
    pub fn mark_all(&mut self, roots: &[ObjectId]) {
        self.marks.clear();
        let mut pending: Vec<ObjectId> = roots.to_vec();
        while let Some(id) = pending.pop() {
            if !self.is_live(id) || !self.set_mark(id) {
                continue;
            }
            if let Some(ManagedObject::Object(obj)) = &self.objects[id.0] {
                obj.trace(&mut pending);
            }
        }
    }

    /// Frees every unmarked slot and adapts the thresholds to the live size.
    ///
    /// Each reclaimed external string is dropped before its handle is reported to
    /// `externals`, so the release callback never runs while this heap still borrows
    /// the buffer.
    pub fn sweep(&mut self, externals: &mut ExternalTextRegistry, pressure: GcPressure) -> SweepStats {
        let mut stats = SweepStats::default();
        let mut live_bytes = 0;
        self.free_list.clear();

        for i in 0..self.objects.len() {
            if self.objects[i].is_none() {
                self.free_list.push(i);
                continue;
            }
            if self.is_marked(ObjectId(i)) {
                if let Some(obj) = &self.objects[i] {
                    live_bytes += obj.size();
                }
                stats.live += 1;
                continue;
            }
            if let Some(obj) = self.objects[i].take() {
                let handle = match &obj {
                    ManagedObject::Str(t) => t.external_handle(),
                    ManagedObject::Object(_) => None,
                };
                drop(obj);
                if let Some(handle) = handle {
                    externals.on_reclaim(handle);
                    stats.external_released += 1;
                }
                stats.freed += 1;
            }
            self.free_list.push(i);
        }

        while self.objects.last().is_some_and(|o| o.is_none()) {
            self.objects.pop();
        }
        let new_len = self.objects.len();
        self.free_list.retain(|&i| i < new_len);
        match pressure {
            GcPressure::High => {
                self.objects.shrink_to_fit();
                self.free_list.shrink_to_fit();
            }
            GcPressure::Low => {
                if self.objects.capacity() > self.objects.len() * 4 && self.objects.capacity() > 4096 {
                    self.objects.shrink_to(self.objects.len() * 2);
                }
            }
        }

        self.marks.clear();
        self.alloc_count = 0;
        self.alloc_bytes = live_bytes;
        self.collections += 1;

        self.gc_threshold = (stats.live * 2).max(self.min_threshold);
        self.gc_threshold_bytes = (live_bytes * 2).max(self.min_threshold_bytes);
        stats
    }

    pub fn stats(&self) -> HeapStats {
        let mut stats = HeapStats {
            free_slots: self.free_list.len(),
            collections: self.collections,
            ..HeapStats::default()
        };
        for obj in self.objects.iter().flatten() {
            stats.bytes += obj.size();
            match obj {
                ManagedObject::Object(_) => stats.objects += 1,
                ManagedObject::Str(t) => {
                    stats.strings += 1;
                    if t.is_external() {
                        stats.external_strings += 1;
                    }
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::{Attributes, ObjectKind};
    use crate::core::value::Value;

    fn heap() -> Heap {
        Heap::new(1024, 1 << 20)
    }

    #[test]
    fn unreachable_slots_are_reused() {
        let mut heap = heap();
        let mut ext = ExternalTextRegistry::new();
        let a = heap.alloc(ManagedObject::Str(Text::from_str("a")));
        let b = heap.alloc(ManagedObject::Str(Text::from_str("b")));
        heap.mark_all(&[b]);
        let stats = heap.sweep(&mut ext, GcPressure::Low);
        assert_eq!(stats.freed, 1);
        assert!(!heap.is_live(a));
        assert!(heap.is_live(b));
        let c = heap.alloc(ManagedObject::Str(Text::from_str("c")));
        assert_eq!(c, a);
    }

    #[test]
    fn marking_follows_properties_and_prototypes() {
        let mut heap = heap();
        let mut ext = ExternalTextRegistry::new();
        let proto = heap.alloc(ManagedObject::Object(Box::new(JsObject::new(None, ObjectKind::Ordinary))));
        let s = heap.alloc(ManagedObject::Str(Text::from_str("held")));
        let mut obj = JsObject::new(Some(proto), ObjectKind::Ordinary);
        obj.define_value("s", Value::String(s), Attributes::DATA);
        let root = heap.alloc(ManagedObject::Object(Box::new(obj)));
        heap.mark_all(&[root]);
        let stats = heap.sweep(&mut ext, GcPressure::High);
        assert_eq!(stats.freed, 0);
        assert_eq!(stats.live, 3);
        assert_eq!(heap.text(s).map(|t| t.to_string()), Some("held".to_string()));
    }

    #[test]
    fn sweeping_external_strings_reports_reclamation() {
        let mut heap = heap();
        let mut ext = ExternalTextRegistry::new();
        let text = ext.wrap_static(b"static bytes").unwrap();
        let id = heap.alloc(ManagedObject::Str(text));
        assert_eq!(heap.stats().external_strings, 1);
        heap.mark_all(&[]);
        let stats = heap.sweep(&mut ext, GcPressure::High);
        assert_eq!(stats.external_released, 1);
        assert!(!heap.is_live(id));
        assert_eq!(ext.live(), 0);
    }

    #[test]
    fn thresholds_never_drop_below_configuration() {
        let mut heap = Heap::new(4, 1 << 20);
        let mut ext = ExternalTextRegistry::new();
        for _ in 0..4 {
            heap.alloc(ManagedObject::Str(Text::from_str("x")));
        }
        assert!(heap.should_gc());
        heap.mark_all(&[]);
        heap.sweep(&mut ext, GcPressure::Low);
        assert!(!heap.should_gc());
        assert_eq!(heap.stats().collections, 1);
    }
}
