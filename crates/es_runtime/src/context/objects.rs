//! Property access with prototype lookup, exotic array and string indices, and lazy
//! slot materialization.

use es_core::Text;

use super::Context;
use crate::builtins::{BuiltinId, RoutineBinding};
use crate::core::heap::ObjectId;
use crate::core::object::{Attributes, JsObject, ObjectKind, PropertyKey, Slot};
use crate::core::value::Value;
use crate::errors::{messages, EngineError};

/// Upper bound for array growth through index assignment.
const MAX_DENSE_LENGTH: usize = 1 << 24;

impl Context {
    /// `target[key]`. Primitives look the key up on their prototype.
    pub(crate) fn get(&mut self, target: Value, key: &PropertyKey) -> Result<Value, EngineError> {
        let start = match target {
            Value::Undefined | Value::Null => {
                return Err(EngineError::type_error(format!(
                    "cannot read property '{key}' of {}",
                    target.type_name()
                )));
            }
            Value::Object(id) => id,
            Value::String(id) => {
                let text = self.text(id)?;
                if let Some(v) = self.string_own(&text, key) {
                    return Ok(v);
                }
                match self.prototype_or_object(BuiltinId::StringPrototype) {
                    Some(p) => p,
                    None => return Ok(Value::Undefined),
                }
            }
            Value::Bool(_) | Value::Number(_) | Value::Symbol(_) => {
                let proto = match target {
                    Value::Bool(_) => BuiltinId::BooleanPrototype,
                    Value::Number(_) => BuiltinId::NumberPrototype,
                    _ => BuiltinId::SymbolPrototype,
                };
                match self.prototype_or_object(proto) {
                    Some(p) => p,
                    None => return Ok(Value::Undefined),
                }
            }
        };
        self.lookup(start, key)
    }

    fn lookup(&mut self, start: ObjectId, key: &PropertyKey) -> Result<Value, EngineError> {
        let mut current = Some(start);
        while let Some(id) = current {
            if let Some(v) = self.exotic_get(id, key)? {
                return Ok(v);
            }
            let obj = self.obj(id)?;
            if let Some(prop) = obj.own(key) {
                let slot = prop.slot;
                return self.materialize(id, key, slot);
            }
            current = obj.proto;
        }
        Ok(Value::Undefined)
    }

    /// `length` and index reads that are not backed by property storage.
    fn exotic_get(&mut self, id: ObjectId, key: &PropertyKey) -> Result<Option<Value>, EngineError> {
        let obj = self.obj(id)?;
        match &obj.kind {
            ObjectKind::Array(items) => {
                if key.is_name("length") {
                    return Ok(Some(Value::Number(items.len() as f64)));
                }
                Ok(key
                    .array_index()
                    .and_then(|i| items.get(i as usize).copied()))
            }
            ObjectKind::TypedArray(view) => {
                if key.is_name("length") {
                    return Ok(Some(Value::Number(view.length as f64)));
                }
                let view = *view;
                match key.array_index() {
                    Some(i) => Ok(Some(self.typed_array_get(view, i as usize)?)),
                    None => Ok(None),
                }
            }
            ObjectKind::Primitive(Value::String(s)) => {
                let s = *s;
                let text = self.text(s)?;
                Ok(self.string_own(&text, key))
            }
            _ => Ok(None),
        }
    }

    fn string_own(&mut self, text: &Text, key: &PropertyKey) -> Option<Value> {
        if key.is_name("length") {
            return Some(Value::Number(text.length_in_code_units() as f64));
        }
        let index = key.array_index()? as usize;
        let unit = text.code_unit_at(index)?;
        Some(self.new_string(Text::from_units(&[unit])))
    }

    /// Turns a lazy slot into a value and stores the value back in place.
    pub(crate) fn materialize(
        &mut self,
        holder: ObjectId,
        key: &PropertyKey,
        slot: Slot,
    ) -> Result<Value, EngineError> {
        let value = match slot {
            Slot::Value(v) => return Ok(v),
            Slot::Builtin(id) => Value::Object(self.builtin_object(id)?),
            Slot::String(s) => self.intern(s),
            Slot::Routine { binding, length } => self.new_function(key, binding, length)?,
        };
        tracing::trace!(key = %key, "materialized lazy slot");
        if let Some(prop) = self.obj_mut(holder)?.props.get_mut(key) {
            prop.slot = Slot::Value(value);
        }
        Ok(value)
    }

    fn new_function(
        &mut self,
        key: &PropertyKey,
        binding: RoutineBinding,
        length: u8,
    ) -> Result<Value, EngineError> {
        let proto = self.builtin_object(BuiltinId::FunctionPrototype)?;
        let name = match key {
            PropertyKey::Name(name) => self.new_string(name.clone()),
            PropertyKey::Symbol(_) => self.new_string(Text::from_str(&key.to_string())),
        };
        let mut function = JsObject::with_capacity(Some(proto), ObjectKind::Function(binding), 2);
        function.define_value("length", Value::Number(length as f64), Attributes::CONFIGURABLE);
        function.define_value("name", name, Attributes::CONFIGURABLE);
        Ok(Value::Object(self.alloc_object(function)))
    }

    /// `target[key] = value`.
    pub(crate) fn put(&mut self, target: Value, key: PropertyKey, value: Value) -> Result<(), EngineError> {
        let id = match target {
            Value::Undefined | Value::Null => {
                return Err(EngineError::type_error(format!(
                    "cannot set property '{key}' of {}",
                    target.type_name()
                )));
            }
            Value::Object(id) => id,
            // Assignments to primitives have no lasting effect.
            _ => return Ok(()),
        };
        if self.exotic_put(id, &key, value)? {
            return Ok(());
        }
        let obj = self.obj_mut(id)?;
        if let Some(prop) = obj.props.get_mut(&key) {
            if !prop.writable() {
                return Err(EngineError::type_error(format!("{}: '{key}'", messages::READ_ONLY)));
            }
            prop.slot = Slot::Value(value);
            return Ok(());
        }
        let (proto, extensible) = (obj.proto, obj.extensible);
        if self.inherits_read_only(proto, &key)? {
            return Err(EngineError::type_error(format!("{}: '{key}'", messages::READ_ONLY)));
        }
        if !extensible {
            return Err(EngineError::type_error(messages::NOT_EXTENSIBLE));
        }
        self.obj_mut(id)?.define(key, Slot::Value(value), Attributes::DATA);
        Ok(())
    }

    fn inherits_read_only(&self, mut current: Option<ObjectId>, key: &PropertyKey) -> Result<bool, EngineError> {
        while let Some(id) = current {
            let obj = self.obj(id)?;
            if let Some(prop) = obj.own(key) {
                return Ok(!prop.writable());
            }
            current = obj.proto;
        }
        Ok(false)
    }

    /// Handles writes to array elements, array length and typed array elements.
    /// Returns whether the write was consumed.
    fn exotic_put(&mut self, id: ObjectId, key: &PropertyKey, value: Value) -> Result<bool, EngineError> {
        let typed = match &self.obj(id)?.kind {
            ObjectKind::Array(_) => None,
            ObjectKind::TypedArray(view) => Some(*view),
            _ => return Ok(false),
        };
        if let Some(view) = typed {
            let Some(i) = key.array_index() else {
                return Ok(key.is_name("length"));
            };
            let n = self.to_number(value)?;
            self.typed_array_set(view, i as usize, n)?;
            return Ok(true);
        }
        let new_length = if key.is_name("length") {
            Some(self.to_array_length(value)?)
        } else {
            None
        };
        let index = key.array_index();
        let ObjectKind::Array(items) = &mut self.obj_mut(id)?.kind else {
            return Ok(false);
        };
        if let Some(len) = new_length {
            items.resize(len, Value::Undefined);
            return Ok(true);
        }
        match index {
            Some(i) => {
                let i = i as usize;
                if i >= MAX_DENSE_LENGTH {
                    return Err(EngineError::range_error(messages::INVALID_ARRAY_LENGTH));
                }
                if i >= items.len() {
                    items.resize(i + 1, Value::Undefined);
                }
                items[i] = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn to_array_length(&mut self, value: Value) -> Result<usize, EngineError> {
        let n = self.to_number(value)?;
        if n < 0.0 || n.fract() != 0.0 || n >= MAX_DENSE_LENGTH as f64 {
            return Err(EngineError::range_error(messages::INVALID_ARRAY_LENGTH));
        }
        Ok(n as usize)
    }

    /// `delete target[key]`.
    pub(crate) fn delete(&mut self, target: Value, key: &PropertyKey) -> Result<bool, EngineError> {
        let id = match target {
            Value::Undefined | Value::Null => {
                return Err(EngineError::type_error(messages::NULL_OR_UNDEFINED));
            }
            Value::Object(id) => id,
            Value::String(s) => {
                let text = self.text(s)?;
                let own = key.is_name("length")
                    || key
                        .array_index()
                        .is_some_and(|i| (i as usize) < text.length_in_code_units());
                return Ok(!own);
            }
            _ => return Ok(true),
        };
        let obj = self.obj_mut(id)?;
        match &mut obj.kind {
            ObjectKind::Array(items) => {
                if key.is_name("length") {
                    return Ok(false);
                }
                if let Some(i) = key.array_index() {
                    if let Some(item) = items.get_mut(i as usize) {
                        *item = Value::Undefined;
                    }
                    return Ok(true);
                }
            }
            ObjectKind::TypedArray(view) => {
                if key.is_name("length") || key.array_index().is_some_and(|i| (i as usize) < view.length) {
                    return Ok(false);
                }
            }
            _ => {}
        }
        match obj.props.get(key).map(|p| p.configurable()) {
            None => Ok(true),
            Some(true) => {
                obj.props.shift_remove(key);
                Ok(true)
            }
            Some(false) => Ok(false),
        }
    }

    /// Own keys in enumeration order: element indices first, then properties in
    /// insertion order.
    pub(crate) fn own_property_keys(
        &mut self,
        id: ObjectId,
        enumerable_names_only: bool,
    ) -> Result<Vec<PropertyKey>, EngineError> {
        let elements = match &self.obj(id)?.kind {
            ObjectKind::Array(items) => items.len(),
            ObjectKind::TypedArray(view) => view.length,
            ObjectKind::Primitive(Value::String(s)) => {
                let s = *s;
                self.text(s)?.length_in_code_units()
            }
            _ => 0,
        };
        let obj = self.obj(id)?;
        let mut keys = Vec::with_capacity(elements + obj.props.len());
        let mut buf = itoa::Buffer::new();
        keys.extend((0..elements).map(|i| PropertyKey::name(buf.format(i))));
        if !enumerable_names_only && matches!(obj.kind, ObjectKind::Array(_)) {
            keys.push(PropertyKey::name("length"));
        }
        keys.extend(
            obj.props
                .iter()
                .filter(|(k, p)| !enumerable_names_only || (p.enumerable() && k.as_name().is_some()))
                .map(|(k, _)| k.clone()),
        );
        Ok(keys)
    }

    pub(crate) fn has_own(&mut self, id: ObjectId, key: &PropertyKey) -> Result<bool, EngineError> {
        if self.exotic_get(id, key)?.is_some() {
            return Ok(true);
        }
        Ok(self.obj(id)?.own(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn lazy_routine_is_materialized_once() {
        let mut ctx = Context::new();
        let math = ctx.builtin(BuiltinId::Math).unwrap();
        let abs = ctx.get(math, &"abs".into()).unwrap();
        let again = ctx.get(math, &"abs".into()).unwrap();
        assert_eq!(abs, again);
        let id = math.as_object().unwrap();
        assert!(matches!(ctx.obj(id).unwrap().own(&"abs".into()).unwrap().slot, Slot::Value(_)));
        let length = ctx.get(abs, &"length".into()).unwrap();
        assert_eq!(length, Value::Number(1.0));
    }

    #[test]
    fn read_only_properties_reject_writes() {
        let mut ctx = Context::new();
        let number = ctx.builtin(BuiltinId::Number).unwrap();
        let err = ctx.put(number, "MAX_SAFE_INTEGER".into(), Value::Number(1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        // Inherited read-only data properties block creation on the receiver too.
        let obj = ctx.create_object();
        ctx.obj_mut(obj.as_object().unwrap()).unwrap().proto = number.as_object();
        assert!(ctx.put(obj, "MAX_SAFE_INTEGER".into(), Value::Number(1.0)).is_err());
    }

    #[test]
    fn array_length_tracks_index_writes() {
        let mut ctx = Context::new();
        let array = ctx.create_array(&[]);
        ctx.put(array, "3".into(), Value::Bool(true)).unwrap();
        assert_eq!(ctx.get(array, &"length".into()).unwrap(), Value::Number(4.0));
        ctx.put(array, "length".into(), Value::Number(1.0)).unwrap();
        assert_eq!(ctx.get(array, &"3".into()).unwrap(), Value::Undefined);
        let err = ctx.put(array, "length".into(), Value::Number(-1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn delete_honours_configurable() {
        let mut ctx = Context::new();
        let math = ctx.builtin(BuiltinId::Math).unwrap();
        assert!(!ctx.delete(math, &"PI".into()).unwrap());
        assert!(ctx.delete(math, &"abs".into()).unwrap());
        assert_eq!(ctx.get(math, &"abs".into()).unwrap(), Value::Undefined);
        assert!(ctx.delete(math, &"missing".into()).unwrap());
    }

    #[test]
    fn string_indices_and_length() {
        let mut ctx = Context::new();
        let s = ctx.create_string("abc");
        assert_eq!(ctx.get(s, &"length".into()).unwrap(), Value::Number(3.0));
        let b = ctx.get(s, &"1".into()).unwrap();
        assert_eq!(ctx.string_to_text(b).unwrap().to_string_lossy(), "b");
        assert_eq!(ctx.get(s, &"7".into()).unwrap(), Value::Undefined);
    }
}
