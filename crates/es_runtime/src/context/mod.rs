//! The engine context: heap, built-in registry and external text bookkeeping for one
//! embedding.
//!
//! Values handed out by the public methods are rooted. The embedder gives them back
//! with [`Context::release`] once it no longer needs them; built-in objects stay alive
//! for the lifetime of the context and need no release.

pub(crate) mod convert;
mod gc;
mod objects;
mod strings;

use ahash::RandomState;
use es_core::{ExternalTextRegistry, Text};
use hashbrown::HashMap;

use crate::builtins::{routines, BuiltinId, BuiltinRegistry};
use crate::config::{ContextConfig, FeatureSet};
use crate::core::heap::{Heap, HeapStats, ManagedObject, ObjectId};
use crate::core::object::{Attributes, JsObject, ObjectKind, PropertyKey};
use crate::core::value::{SymbolId, Value, WellKnownSymbol};
use crate::errors::{self, messages, EngineError, ErrorKind};

pub use gc::GcReport;

pub struct Context {
    config: ContextConfig,
    // Swept external texts report to `externals`, so the heap has to go first.
    pub(crate) heap: Heap,
    pub(crate) registry: BuiltinRegistry,
    pub(crate) externals: ExternalTextRegistry,
    roots: HashMap<ObjectId, u32, RandomState>,
    interned: HashMap<Text, ObjectId, RandomState>,
    /// Descriptions indexed by symbol id.
    symbols: Vec<Option<Text>>,
    symbol_registry: HashMap<Text, SymbolId, RandomState>,
    native_depth: u32,
}

impl Context {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        let symbols = WellKnownSymbol::ALL
            .iter()
            .map(|wk| Some(Text::from_str(&wk.description())))
            .collect();
        Self {
            heap: Heap::new(config.gc_object_threshold, config.gc_byte_threshold),
            registry: BuiltinRegistry::new(config.features),
            externals: ExternalTextRegistry::new(),
            roots: HashMap::default(),
            interned: HashMap::default(),
            symbols,
            symbol_registry: HashMap::default(),
            native_depth: 0,
            config,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn features(&self) -> FeatureSet {
        self.registry.features()
    }

    /// The built-in object `id`, realized on first request. `None` when its family is
    /// disabled.
    pub fn builtin(&mut self, id: BuiltinId) -> Option<Value> {
        self.registry.get_or_create(&mut self.heap, id).map(Value::Object)
    }

    pub fn global_object(&mut self) -> Value {
        match self.builtin(BuiltinId::Global) {
            Some(global) => global,
            None => errors::fatal("global object is not available"),
        }
    }

    /// Built-ins in the order they were realized.
    pub fn realization_order(&self) -> &[BuiltinId] {
        self.registry.realization_order()
    }

    pub fn heap_stats(&self) -> HeapStats {
        self.heap.stats()
    }

    pub fn create_object(&mut self) -> Value {
        self.maybe_gc();
        let proto = self.builtin_object(BuiltinId::ObjectPrototype).ok();
        let id = self.alloc_object(JsObject::new(proto, ObjectKind::Ordinary));
        self.root(Value::Object(id))
    }

    pub fn create_array(&mut self, items: &[Value]) -> Value {
        self.maybe_gc();
        let array = self.new_array(items.to_vec());
        self.root(array)
    }

    /// A new unique symbol.
    pub fn create_symbol(&mut self, description: Option<&str>) -> Value {
        Value::Symbol(self.new_symbol(description.map(Text::from_str)))
    }

    pub fn get_property(&mut self, target: Value, key: impl Into<PropertyKey>) -> Result<Value, EngineError> {
        self.maybe_gc();
        let key = key.into();
        let value = self.get(target, &key)?;
        Ok(self.root(value))
    }

    pub fn set_property(
        &mut self,
        target: Value,
        key: impl Into<PropertyKey>,
        value: Value,
    ) -> Result<(), EngineError> {
        self.maybe_gc();
        let key = key.into();
        self.put(target, key, value)
    }

    /// Removes an own property. `Ok(false)` when the property is not configurable.
    pub fn delete_property(&mut self, target: Value, key: impl Into<PropertyKey>) -> Result<bool, EngineError> {
        let key = key.into();
        self.delete(target, &key)
    }

    /// Every own key of `target`, enumerable or not, in enumeration order.
    pub fn own_keys(&mut self, target: Value) -> Result<Vec<PropertyKey>, EngineError> {
        let id = self.to_object(target)?;
        self.own_property_keys(id, false)
    }

    /// Attributes of an own property, `None` when `target` has no such property.
    pub fn own_property_attributes(
        &mut self,
        target: Value,
        key: impl Into<PropertyKey>,
    ) -> Result<Option<Attributes>, EngineError> {
        let Some(id) = target.as_object() else {
            return Err(EngineError::type_error(messages::NOT_AN_OBJECT));
        };
        let key = key.into();
        Ok(self.obj(id)?.own(&key).map(|p| p.attrs))
    }

    pub fn call(&mut self, function: Value, this: Value, args: &[Value]) -> Result<Value, EngineError> {
        self.maybe_gc();
        self.native_depth += 1;
        let result = self.call_value(function, this, args);
        self.native_depth -= 1;
        result.map(|v| self.root(v))
    }

    pub fn construct(&mut self, constructor: Value, args: &[Value]) -> Result<Value, EngineError> {
        self.maybe_gc();
        self.native_depth += 1;
        let result = self.construct_value(constructor, args);
        self.native_depth -= 1;
        result.map(|v| self.root(v))
    }

    /// Converts `err` into the error object a script would observe.
    pub fn error_object(&mut self, err: &EngineError) -> Value {
        self.maybe_gc();
        let message = err.message();
        let error = self.new_error(err.kind(), Some(&message));
        self.root(error)
    }

    pub(crate) fn call_value(&mut self, function: Value, this: Value, args: &[Value]) -> Result<Value, EngineError> {
        let binding = self.binding_of(function)?;
        routines::call(self, binding, this, args)
    }

    pub(crate) fn construct_value(&mut self, constructor: Value, args: &[Value]) -> Result<Value, EngineError> {
        let binding = self.binding_of(constructor)?;
        if !binding.routine.is_constructor() {
            return Err(EngineError::type_error(format!(
                "{} is not a constructor",
                binding.routine.name()
            )));
        }
        routines::construct(self, binding, args)
    }

    fn binding_of(&self, function: Value) -> Result<routines::RoutineBinding, EngineError> {
        function
            .as_object()
            .and_then(|id| self.heap.object(id))
            .and_then(JsObject::binding)
            .ok_or_else(|| EngineError::type_error(messages::NOT_A_FUNCTION))
    }

    pub(crate) fn obj(&self, id: ObjectId) -> Result<&JsObject, EngineError> {
        self.heap
            .object(id)
            .ok_or_else(|| EngineError::type_error(messages::STALE_HANDLE))
    }

    pub(crate) fn obj_mut(&mut self, id: ObjectId) -> Result<&mut JsObject, EngineError> {
        self.heap
            .object_mut(id)
            .ok_or_else(|| EngineError::type_error(messages::STALE_HANDLE))
    }

    pub(crate) fn alloc_object(&mut self, obj: JsObject) -> ObjectId {
        self.heap.alloc(ManagedObject::Object(Box::new(obj)))
    }

    /// Realizes `id`, failing with a `TypeError` when its family is disabled.
    pub(crate) fn builtin_object(&mut self, id: BuiltinId) -> Result<ObjectId, EngineError> {
        self.registry
            .get_or_create(&mut self.heap, id)
            .ok_or_else(|| EngineError::type_error(format!("{} is not enabled", id.name())))
    }

    /// Prototype for objects created by `id`'s family, falling back to
    /// `Object.prototype` when the family is disabled.
    pub(crate) fn prototype_or_object(&mut self, id: BuiltinId) -> Option<ObjectId> {
        self.registry
            .get_or_create(&mut self.heap, id)
            .or_else(|| self.registry.get_or_create(&mut self.heap, BuiltinId::ObjectPrototype))
    }

    pub(crate) fn new_array(&mut self, items: Vec<Value>) -> Value {
        let proto = self.prototype_or_object(BuiltinId::ArrayPrototype);
        Value::Object(self.alloc_object(JsObject::new(proto, ObjectKind::Array(items))))
    }

    pub(crate) fn new_error(&mut self, kind: ErrorKind, message: Option<&str>) -> Value {
        let proto = self
            .registry
            .get_or_create(&mut self.heap, BuiltinId::error_prototype(kind))
            .or_else(|| self.registry.get_or_create(&mut self.heap, BuiltinId::ErrorPrototype));
        let mut error = JsObject::new(proto, ObjectKind::Error(kind));
        if let Some(message) = message {
            let text = self.new_string(Text::from_str(message));
            error.define_value("message", text, Attributes::CONFIGURABLE_WRITABLE);
        }
        Value::Object(self.alloc_object(error))
    }

    pub(crate) fn new_symbol(&mut self, description: Option<Text>) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(description.map(|d| d.to_owned_text()));
        id
    }

    pub(crate) fn symbol_description(&self, id: SymbolId) -> Option<&Text> {
        self.symbols.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// The registered symbol for `key`, created on first use.
    pub(crate) fn symbol_for(&mut self, key: Text) -> SymbolId {
        let key = key.to_owned_text();
        if let Some(&id) = self.symbol_registry.get(&key) {
            return id;
        }
        let id = self.new_symbol(Some(key.clone()));
        self.symbol_registry.insert(key, id);
        id
    }

    pub(crate) fn symbol_key(&self, id: SymbolId) -> Option<&Text> {
        self.symbol_registry
            .iter()
            .find(|(_, sym)| **sym == id)
            .map(|(key, _)| key)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_realized_on_demand() {
        let mut ctx = Context::new();
        assert!(ctx.realization_order().is_empty());
        ctx.global_object();
        assert_eq!(ctx.realization_order(), &[BuiltinId::ObjectPrototype, BuiltinId::Global]);
    }

    #[test]
    fn disabled_builtin_is_none() {
        let config = ContextConfig::default().with_features(FeatureSet::all() - FeatureSet::MATH);
        let mut ctx = Context::with_config(config);
        assert!(ctx.builtin(BuiltinId::Math).is_none());
        assert!(ctx.builtin(BuiltinId::Json).is_some());
    }

    #[test]
    fn error_object_has_matching_prototype() {
        let mut ctx = Context::new();
        let err = ctx.error_object(&EngineError::range_error("out of range"));
        let proto = ctx.obj(err.as_object().unwrap()).unwrap().proto;
        assert_eq!(proto, ctx.builtin(BuiltinId::RangeErrorPrototype).and_then(|v| v.as_object()));
        let message = ctx.get_property(err, "message").unwrap();
        assert_eq!(ctx.string_to_text(message).unwrap().to_string_lossy(), "out of range");
    }

    #[test]
    fn registered_symbols_are_shared() {
        let mut ctx = Context::new();
        let a = ctx.symbol_for(Text::from_str("app"));
        let b = ctx.symbol_for(Text::from_str("app"));
        assert_eq!(a, b);
        assert_eq!(ctx.symbol_key(a).map(Text::to_string_lossy).as_deref(), Some("app"));
        let fresh = ctx.new_symbol(None);
        assert!(ctx.symbol_key(fresh).is_none());
    }
}
