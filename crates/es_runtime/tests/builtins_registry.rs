use es_runtime::builtins::{BuiltinRegistry, RealizationState};
use es_runtime::core::Heap;
use es_runtime::{Attributes, BuiltinId, Context, FeatureSet, PropertyKey, Value, WellKnownSymbol};

#[test]
fn array_prototype_realizes_object_prototype_first() {
    let mut heap = Heap::new(1024, 1 << 20);
    let mut registry = BuiltinRegistry::new(FeatureSet::all());
    assert_eq!(registry.state(BuiltinId::ObjectPrototype), RealizationState::Unrealized);

    let handle = registry.get_or_create(&mut heap, BuiltinId::ArrayPrototype).unwrap();
    assert_eq!(registry.state(BuiltinId::ArrayPrototype), RealizationState::Realized(handle));
    assert_eq!(
        registry.realization_order(),
        &[BuiltinId::ObjectPrototype, BuiltinId::ArrayPrototype]
    );
    assert!(matches!(
        registry.state(BuiltinId::ObjectPrototype),
        RealizationState::Realized(_)
    ));
}

#[test]
fn constructor_and_prototype_refer_to_each_other() {
    let mut ctx = Context::new();
    let array = ctx.builtin(BuiltinId::Array).unwrap();
    let proto = ctx.get_property(array, "prototype").unwrap();
    assert_eq!(Some(proto), ctx.builtin(BuiltinId::ArrayPrototype));
    let back = ctx.get_property(proto, "constructor").unwrap();
    assert_eq!(back, array);
}

#[test]
fn error_subtypes_chain_to_error() {
    let mut ctx = Context::new();
    let range = ctx.builtin(BuiltinId::RangeError).unwrap();
    let object = ctx.builtin(BuiltinId::Object).unwrap();
    let proto_of = ctx.get_property(object, "getPrototypeOf").unwrap();
    let parent = ctx.call(proto_of, Value::Undefined, &[range]).unwrap();
    assert_eq!(Some(parent), ctx.builtin(BuiltinId::Error));

    let range_proto = ctx.builtin(BuiltinId::RangeErrorPrototype).unwrap();
    let parent = ctx.call(proto_of, Value::Undefined, &[range_proto]).unwrap();
    assert_eq!(Some(parent), ctx.builtin(BuiltinId::ErrorPrototype));
}

#[test]
fn global_keys_follow_table_order() {
    let mut ctx = Context::new();
    let global = ctx.global_object();
    let keys: Vec<String> = ctx.own_keys(global).unwrap().iter().map(PropertyKey::to_string).collect();
    assert_eq!(&keys[..3], ["undefined", "NaN", "Infinity"]);
    assert_eq!(keys.last().map(String::as_str), Some("unescape"));
    let object_at = keys.iter().position(|k| k == "Object").unwrap();
    let parse_int_at = keys.iter().position(|k| k == "parseInt").unwrap();
    assert!(object_at < parse_int_at);
}

#[test]
fn attributes_come_from_the_tables() {
    let mut ctx = Context::new();
    let global = ctx.global_object();
    assert_eq!(ctx.own_property_attributes(global, "NaN").unwrap(), Some(Attributes::FIXED));
    assert_eq!(
        ctx.own_property_attributes(global, "Array").unwrap(),
        Some(Attributes::CONFIGURABLE_WRITABLE)
    );
    let json = ctx.builtin(BuiltinId::Json).unwrap();
    assert_eq!(
        ctx.own_property_attributes(json, WellKnownSymbol::ToStringTag).unwrap(),
        Some(Attributes::CONFIGURABLE)
    );
}

#[test]
fn routine_objects_carry_name_and_length() {
    let mut ctx = Context::new();
    let global = ctx.global_object();
    let parse_int = ctx.get_property(global, "parseInt").unwrap();
    let length = ctx.get_property(parse_int, "length").unwrap();
    assert_eq!(length, Value::Number(2.0));
    let name = ctx.get_property(parse_int, "name").unwrap();
    assert_eq!(ctx.string_to_text(name).unwrap().to_string_lossy(), "parseInt");
    assert_eq!(
        ctx.own_property_attributes(parse_int, "name").unwrap(),
        Some(Attributes::CONFIGURABLE)
    );

    let number = ctx.builtin(BuiltinId::Number).unwrap();
    let name = ctx.get_property(number, "name").unwrap();
    assert_eq!(ctx.string_to_text(name).unwrap().to_string_lossy(), "Number");
}

#[test]
fn reading_a_reference_realizes_its_target_only() {
    let mut ctx = Context::new();
    let global = ctx.global_object();
    assert!(!ctx.realization_order().contains(&BuiltinId::Math));
    ctx.get_property(global, "Math").unwrap();
    assert_eq!(ctx.realization_order().last(), Some(&BuiltinId::Math));
    assert!(!ctx.realization_order().contains(&BuiltinId::Json));
}
