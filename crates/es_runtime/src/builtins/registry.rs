//! Lazy realization of built-in objects.

use crate::config::FeatureSet;
use crate::core::heap::{Heap, ManagedObject, ObjectId};
use crate::core::object::{Attributes, JsObject, ObjectKind, PropertyKey, Slot};
use crate::core::value::Value;
use crate::errors;

use super::descriptor::{EntryValue, PropertyEntry, SimpleValue, filter_table};
use super::ids::BuiltinId;
use super::routines::RoutineBinding;
use super::tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealizationState {
    Unrealized,
    /// Only observable while the prototype chain of this built-in is being realized.
    Realizing,
    Realized(ObjectId),
}

/// Realized built-ins of one context, with the tables filtered for its features.
pub struct BuiltinRegistry {
    features: FeatureSet,
    states: Vec<RealizationState>,
    tables: Vec<Box<[&'static PropertyEntry]>>,
    order: Vec<BuiltinId>,
}

impl BuiltinRegistry {
    pub fn new(features: FeatureSet) -> Self {
        let tables = BuiltinId::all()
            .map(|id| {
                if features.contains(id.requires()) {
                    filter_table(tables::table(id), features)
                } else {
                    Box::default()
                }
            })
            .collect();
        Self {
            features,
            states: vec![RealizationState::Unrealized; BuiltinId::COUNT],
            tables,
            order: Vec::new(),
        }
    }

    pub fn features(&self) -> FeatureSet {
        self.features
    }

    pub fn is_enabled(&self, id: BuiltinId) -> bool {
        self.features.contains(id.requires())
    }

    pub fn state(&self, id: BuiltinId) -> RealizationState {
        self.states[id.index()]
    }

    /// Handle of `id` if it has been realized.
    pub fn get(&self, id: BuiltinId) -> Option<ObjectId> {
        match self.states[id.index()] {
            RealizationState::Realized(handle) => Some(handle),
            _ => None,
        }
    }

    /// Entries installed on `id` under this context's features.
    pub fn entries(&self, id: BuiltinId) -> &[&'static PropertyEntry] {
        &self.tables[id.index()]
    }

    /// Built-ins in the order they became realized.
    pub fn realization_order(&self) -> &[BuiltinId] {
        &self.order
    }

    pub fn realized(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.states.iter().filter_map(|s| match s {
            RealizationState::Realized(handle) => Some(*handle),
            _ => None,
        })
    }

    /// Returns the object of `id`, realizing it and its prototype chain first.
    ///
    /// `None` when the family of `id` is disabled. Property entries are installed as
    /// lazy slots, so realizing an object never realizes the objects it refers to.
    pub fn get_or_create(&mut self, heap: &mut Heap, id: BuiltinId) -> Option<ObjectId> {
        if !self.is_enabled(id) {
            return None;
        }
        match self.states[id.index()] {
            RealizationState::Realized(handle) => return Some(handle),
            RealizationState::Realizing => {
                errors::fatal(&format!("built-in {} realized re-entrantly", id.name()))
            }
            RealizationState::Unrealized => {}
        }
        self.states[id.index()] = RealizationState::Realizing;

        let proto = match id.proto() {
            Some(p) => match self.get_or_create(heap, p) {
                Some(handle) => Some(handle),
                None => errors::fatal(&format!("prototype {} of {} is disabled", p.name(), id.name())),
            },
            None => None,
        };

        let entries = &self.tables[id.index()];
        let (kind, extra) = match id.constructor() {
            Some(binding) => (ObjectKind::Function(binding), 1),
            None => (ObjectKind::Builtin(id), 0),
        };
        let mut obj = JsObject::with_capacity(proto, kind, entries.len() + extra);
        if let Some(binding) = id.constructor() {
            obj.define(
                PropertyKey::name("name"),
                Slot::String(binding.routine.name()),
                Attributes::CONFIGURABLE,
            );
        }
        for entry in entries.iter() {
            obj.define(entry.property_key(), initial_slot(entry), entry.attrs);
        }
        let count = obj.props.len();
        let handle = heap.alloc(ManagedObject::Object(Box::new(obj)));

        self.states[id.index()] = RealizationState::Realized(handle);
        self.order.push(id);
        tracing::debug!(
            builtin = id.name(),
            proto = id.proto().map(BuiltinId::name),
            entries = count,
            "realized built-in"
        );
        Some(handle)
    }
}

/// Slot an entry starts out with. Only entries that need no allocation are eager.
fn initial_slot(entry: &PropertyEntry) -> Slot {
    match entry.value {
        EntryValue::Simple(SimpleValue::Undefined) => Slot::Value(Value::Undefined),
        EntryValue::Simple(SimpleValue::Null) => Slot::Value(Value::Null),
        EntryValue::Simple(SimpleValue::Bool(b)) => Slot::Value(Value::Bool(b)),
        EntryValue::Simple(SimpleValue::Symbol(sym)) => Slot::Value(Value::Symbol(sym.id())),
        EntryValue::Number(n) => Slot::Value(Value::Number(n)),
        EntryValue::Object(target) => Slot::Builtin(target),
        EntryValue::String(s) => Slot::String(s),
        EntryValue::Routine { routine, arity, length } => Slot::Routine {
            binding: RoutineBinding { routine, arity },
            length,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap() -> Heap {
        Heap::new(1 << 16, 1 << 24)
    }

    #[test]
    fn prototype_chain_is_realized_first() {
        let mut heap = heap();
        let mut reg = BuiltinRegistry::new(FeatureSet::all());
        let handle = reg.get_or_create(&mut heap, BuiltinId::ArrayPrototype).unwrap();
        assert_eq!(reg.realization_order(), &[BuiltinId::ObjectPrototype, BuiltinId::ArrayPrototype]);
        let proto = heap.object(handle).unwrap().proto;
        assert_eq!(proto, reg.get(BuiltinId::ObjectPrototype));
    }

    #[test]
    fn realization_is_cached() {
        let mut heap = heap();
        let mut reg = BuiltinRegistry::new(FeatureSet::all());
        let a = reg.get_or_create(&mut heap, BuiltinId::Math);
        let b = reg.get_or_create(&mut heap, BuiltinId::Math);
        assert_eq!(a, b);
        assert_eq!(reg.realization_order().len(), 2);
    }

    #[test]
    fn references_are_installed_lazily() {
        let mut heap = heap();
        let mut reg = BuiltinRegistry::new(FeatureSet::all());
        let array = reg.get_or_create(&mut heap, BuiltinId::Array).unwrap();
        let obj = heap.object(array).unwrap();
        let proto = obj.own(&"prototype".into()).unwrap();
        assert_eq!(proto.slot, Slot::Builtin(BuiltinId::ArrayPrototype));
        assert_eq!(reg.state(BuiltinId::ArrayPrototype), RealizationState::Unrealized);
        assert_eq!(obj.props.get_index(0).map(|(k, _)| k.to_string()), Some("name".to_string()));
    }

    #[test]
    fn disabled_families_are_not_realized() {
        let mut heap = heap();
        let mut reg = BuiltinRegistry::new(FeatureSet::all() - FeatureSet::MATH);
        assert_eq!(reg.get_or_create(&mut heap, BuiltinId::Math), None);
        assert!(reg.realization_order().is_empty());
        assert!(reg.entries(BuiltinId::Math).is_empty());
    }

    #[test]
    #[should_panic(expected = "realized re-entrantly")]
    fn re_entrant_realization_is_fatal() {
        let mut heap = heap();
        let mut reg = BuiltinRegistry::new(FeatureSet::all());
        reg.states[BuiltinId::ObjectPrototype.index()] = RealizationState::Realizing;
        reg.get_or_create(&mut heap, BuiltinId::ObjectPrototype);
    }
}
