mod common;

use common::{Address, Customer, Date, Person, init_tracing, person};
use dtokit_dto::{Dto, DtoError, Map, RecordDescriptor, SchemaRegistry, Value};
use dtokit_schema::FieldDeclaration;
use pretty_assertions::assert_eq;
use serde_json::json;

fn map<const N: usize>(entries: [(&str, Value); N]) -> Map {
    entries.into_iter().collect()
}

fn registry() -> SchemaRegistry {
    init_tracing();
    SchemaRegistry::new()
}

// ── Worked examples ──────────────────────────────────────────────

#[test]
fn person_lifecycle() {
    let registry = registry();
    let mut p = person(&registry);
    assert_eq!(p.to_array(), map([("name", "Alice".into())]));

    p.set("age", Value::Null).unwrap();
    assert_eq!(p.to_array(), map([("name", "Alice".into()), ("age", Value::Null)]));

    p.compact();
    assert_eq!(p.to_array(), map([("name", "Alice".into())]));

    p.unset(["name"]).unwrap();
    assert_eq!(p.to_array(), Map::new());
}

#[test]
fn make_rejects_wrong_type_with_union_message() {
    let registry = registry();
    let err = registry
        .make::<Person, _, _, _>([("age", "thirty")])
        .unwrap_err();
    let err = err.as_dto().unwrap();
    assert!(matches!(err, DtoError::InvalidUnionType { allowed, actual, .. }
        if allowed == &["int", "null"] && actual == "string"));
    assert_eq!(
        err.to_string(),
        "App\\Dto\\Person::$age must be one of these types: int, null; received a value of type string."
    );
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn make_starts_with_every_field_unset() {
    let registry = registry();
    let c = registry
        .make::<Customer, _, _, Value>(std::iter::empty::<(&str, Value)>())
        .unwrap();
    assert!(!c.is_set("active"));
    assert_eq!(c.to_array(), Map::new());
    assert_eq!(
        c.read("active").unwrap_err(),
        DtoError::not_initialized("App\\Dto\\Customer", "active")
    );
}

#[test]
fn make_rejects_undeclared_parameters() {
    let registry = registry();
    let err = registry
        .make::<Person, _, _, _>([("email", "a@example.com")])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Public property $email does not exist in class App\\Dto\\Person."
    );
}

#[test]
fn make_json_applies_object() {
    let registry = registry();
    let schema = registry.schema_for::<Person>().unwrap();
    let json = json!({"name": "Bob", "age": 41});
    let p = Dto::make_json(schema, json.as_object().unwrap().clone()).unwrap();
    assert_eq!(p.read("age").unwrap(), &Value::Int(41));
    assert_eq!(p.to_json(), json);
}

// ── Assignment ───────────────────────────────────────────────────

#[test]
fn set_is_chainable() {
    let registry = registry();
    let mut a = Dto::new(registry.schema_for::<Address>().unwrap());
    a.set("street", "Main St")
        .unwrap()
        .set("city", "Springfield")
        .unwrap();
    assert_eq!(a.read("city").unwrap(), &Value::from("Springfield"));
}

#[test]
fn set_then_read_roundtrips() {
    let registry = registry();
    let mut p = person(&registry);
    p.set("age", 30).unwrap();
    assert_eq!(p.read("age").unwrap(), &Value::Int(30));
    assert_eq!(p.get("age").unwrap(), &Value::Int(30));
}

#[test]
fn failed_assignment_keeps_previous_value() {
    let registry = registry();
    let mut p = person(&registry);
    p.set("age", 30).unwrap();
    let err = p.set("age", 30.5).unwrap_err();
    assert!(err.is_invalid_type());
    assert_eq!(p.read("age").unwrap(), &Value::Int(30));
}

#[test]
fn single_type_message_on_assignment() {
    let registry = registry();
    let mut p = person(&registry);
    let err = p.assign("name", true).unwrap_err();
    assert_eq!(
        err.to_string(),
        "App\\Dto\\Person::$name must be of type string, received a value of type boolean."
    );
}

#[test]
fn set_many_stops_at_first_failure_without_rollback() {
    let registry = registry();
    let mut a = Dto::new(registry.schema_for::<Address>().unwrap());
    let err = a
        .set_many([
            ("street", Value::from("Main St")),
            ("city", Value::Int(5)),
            ("note", Value::from("never applied")),
        ])
        .unwrap_err();
    assert_eq!(err.property(), "city");
    assert!(a.is_set("street"));
    assert!(!a.is_set("city"));
    assert!(!a.is_set("note"));
}

#[test]
fn untyped_fields_accept_anything() {
    let registry = registry();
    let mut a = Dto::new(registry.schema_for::<Address>().unwrap());
    a.set("note", 1).unwrap();
    a.set("note", Value::List(vec![Value::Null])).unwrap();
    a.set("note", Value::object(Date::new("2024-01-01"))).unwrap();
}

#[test]
fn overwrite_keeps_position() {
    let registry = registry();
    let mut a = Dto::new(registry.schema_for::<Address>().unwrap());
    a.set("street", "A").unwrap().set("city", "B").unwrap();
    a.set("street", "C").unwrap();
    assert_eq!(a.to_array().keys().collect::<Vec<_>>(), vec!["street", "city"]);
}

// ── Reads ────────────────────────────────────────────────────────

#[test]
fn unset_field_reads() {
    let registry = registry();
    let p = person(&registry);
    let err = p.read("age").unwrap_err();
    assert_eq!(
        err.to_string(),
        "App\\Dto\\Person::$age must not be accessed before initialization."
    );
    assert!(matches!(p.get("age"), Err(DtoError::PropertyNotInitialized { .. })));
    assert_eq!(p.get_or("age", 18).unwrap(), Value::Int(18));
    assert_eq!(p.get_or("age", Value::Null).unwrap(), Value::Null);
    assert_eq!(p.get_or("name", "x").unwrap(), Value::from("Alice"));
}

#[test]
fn null_is_distinct_from_unset() {
    let registry = registry();
    let mut p = person(&registry);
    p.set("age", Value::Null).unwrap();
    assert!(p.is_set("age"));
    assert_eq!(p.read("age").unwrap(), &Value::Null);
    assert_eq!(p.get_or("age", 18).unwrap(), Value::Null);
}

#[test]
fn undeclared_names_fail_on_every_entry_point() {
    let registry = registry();
    let mut p = person(&registry);
    let expected = DtoError::nonexistent_property("App\\Dto\\Person", "email");

    assert_eq!(p.read("email").unwrap_err(), expected);
    assert_eq!(p.get("email").unwrap_err(), expected);
    assert_eq!(p.get_or("email", 1).unwrap_err(), expected);
    assert_eq!(p.assign("email", "x").unwrap_err(), expected);
    assert_eq!(p.set("email", "x").unwrap_err(), expected);
    assert_eq!(p.set_many([("email", "x")]).unwrap_err(), expected);
    assert_eq!(p.unset(["email"]).unwrap_err(), expected);
    assert_eq!(p.only(["name", "email"]).unwrap_err(), expected);
    assert_eq!(p.except(["email"]).unwrap_err(), expected);
}

// ── Unset / remove ───────────────────────────────────────────────

#[test]
fn unset_is_idempotent() {
    let registry = registry();
    let mut p = person(&registry);
    p.unset(["name"]).unwrap();
    p.unset(["name"]).unwrap();
    assert!(!p.is_set("name"));
    assert!(p.to_array().is_empty());
}

#[test]
fn unset_many_fields() {
    let registry = registry();
    let mut p = person(&registry);
    p.set("age", 3).unwrap();
    p.unset(["name", "age"]).unwrap();
    assert!(p.to_array().is_empty());
}

#[test]
fn remove_is_permissive() {
    let registry = registry();
    let mut p = person(&registry);
    assert_eq!(p.remove("email"), None);
    assert_eq!(p.remove("age"), None);
    assert_eq!(p.remove("name"), Some(Value::from("Alice")));
    assert!(!p.is_set("name"));
}

// ── Projection filters ───────────────────────────────────────────

#[test]
fn only_then_except_keeps_the_difference() {
    let registry = registry();
    let mut p = person(&registry);
    p.set("age", 30).unwrap();
    p.only(["name", "age"]).unwrap().except(["age"]).unwrap();
    assert_eq!(p.to_array(), map([("name", "Alice".into())]));
}

#[test]
fn only_follows_filter_order() {
    let registry = registry();
    let mut a = Dto::new(registry.schema_for::<Address>().unwrap());
    a.set("street", "S").unwrap().set("city", "C").unwrap();
    a.only(["city", "street"]).unwrap();
    assert_eq!(
        a.to_array().keys().collect::<Vec<_>>(),
        vec!["city", "street"]
    );
}

#[test]
fn only_ignores_unset_names() {
    let registry = registry();
    let mut p = person(&registry);
    p.only(["age"]).unwrap();
    assert!(p.to_array().is_empty());
}

#[test]
fn empty_only_disables_the_filter() {
    let registry = registry();
    let mut p = person(&registry);
    p.only(["age"]).unwrap();
    p.only(Vec::<&str>::new()).unwrap();
    assert_eq!(p.to_array(), map([("name", "Alice".into())]));
}

#[test]
fn filters_do_not_touch_data() {
    let registry = registry();
    let mut p = person(&registry);
    p.except(["name"]).unwrap();
    assert!(p.to_array().is_empty());
    assert_eq!(p.read("name").unwrap(), &Value::from("Alice"));
}

#[test]
fn except_may_name_unset_fields() {
    let registry = registry();
    let mut p = person(&registry);
    p.except(["age"]).unwrap();
    assert_eq!(p.to_array(), map([("name", "Alice".into())]));
}

#[test]
fn compact_then_except_compose() {
    let registry = registry();
    let mut a = Dto::new(registry.schema_for::<Address>().unwrap());
    a.set_many([
        ("street", Value::from("S")),
        ("city", Value::Null),
        ("note", Value::from("n")),
    ])
    .unwrap();
    a.compact().except(["note"]).unwrap();
    assert_eq!(a.to_array(), map([("street", "S".into())]));
}

#[test]
fn compact_with_only_null_fields_projects_nothing() {
    let registry = registry();
    let mut a = Dto::new(registry.schema_for::<Address>().unwrap());
    a.set("city", Value::Null).unwrap();
    a.compact();
    assert!(a.to_array().is_empty());
}

#[test]
fn compact_is_a_snapshot() {
    let registry = registry();
    let mut p = person(&registry);
    p.compact();
    p.set("age", 5).unwrap();
    assert_eq!(p.to_array(), map([("name", "Alice".into())]));
}

// ── Nesting ──────────────────────────────────────────────────────

#[test]
fn nested_records_are_projected_recursively() {
    let registry = registry();
    let address = registry
        .make::<Address, _, _, _>([("street", "Main St"), ("city", "Springfield")])
        .unwrap();
    let mut customer = registry
        .make::<Customer, _, _, _>([("name", "Ada")])
        .unwrap();
    customer.set("address", address).unwrap();
    customer
        .set("tags", Value::List(vec!["vip".into()]))
        .unwrap();

    let expected = map([
        ("name", "Ada".into()),
        (
            "address",
            Value::Map(map([
                ("street", "Main St".into()),
                ("city", "Springfield".into()),
            ])),
        ),
        ("tags", Value::List(vec!["vip".into()])),
    ]);
    assert_eq!(customer.to_array(), expected);
}

#[test]
fn nested_record_filters_apply_inside() {
    let registry = registry();
    let mut address = registry
        .make::<Address, _, _, _>([("street", "Main St"), ("city", "Springfield")])
        .unwrap();
    address.except(["city"]).unwrap();
    let mut customer = registry
        .make::<Customer, _, _, _>([("name", "Ada")])
        .unwrap();
    customer.set("address", address).unwrap();
    assert_eq!(
        customer.to_json(),
        json!({"name": "Ada", "address": {"street": "Main St"}})
    );
}

#[test]
fn nested_record_of_wrong_type_is_rejected() {
    let registry = registry();
    let other = person(&registry);
    let mut customer = registry
        .make::<Customer, _, _, _>([("name", "Ada")])
        .unwrap();
    let err = customer.set("address", other).unwrap_err();
    assert_eq!(
        err.to_string(),
        "App\\Dto\\Customer::$address must be one of these types: App\\Dto\\Address, null; \
         received a value of type App\\Dto\\Person."
    );
}

#[test]
fn host_objects_are_kept_opaque() {
    let registry = registry();
    let mut customer = registry
        .make::<Customer, _, _, _>([("name", "Ada")])
        .unwrap();
    let since = Value::object(Date::new("2020-05-01"));
    customer.set("since", since.clone()).unwrap();
    assert_eq!(customer.to_array().get("since"), Some(&since));
    assert_eq!(customer.to_json(), json!({"name": "Ada", "since": "2020-05-01"}));
}

#[test]
fn annotation_types_are_enforced() {
    let registry = registry();
    let mut customer = registry
        .make::<Customer, _, _, _>([("name", "Ada")])
        .unwrap();
    let err = customer.set("since", "2020-05-01").unwrap_err();
    assert_eq!(
        err.to_string(),
        "App\\Dto\\Customer::$since must be one of these types: Carbon\\CarbonImmutable, null; \
         received a value of type string."
    );
}

#[test]
fn native_self_references_accept_the_declaring_record() {
    let registry = registry();
    registry
        .register(
            RecordDescriptor::builder("App\\Tree\\Node")
                .field(FieldDeclaration::string("label"))
                .field(FieldDeclaration::optional("parent", "self"))
                .field(FieldDeclaration::new("children").union(["static", "array"]))
                .build(),
        )
        .unwrap();
    let root = registry.make_named("App\\Tree\\Node", [("label", "root")]).unwrap();
    let mut leaf = registry.make_named("App\\Tree\\Node", [("label", "leaf")]).unwrap();
    leaf.set("parent", root).unwrap();
    assert_eq!(
        leaf.to_json(),
        json!({"label": "leaf", "parent": {"label": "root"}})
    );

    let err = leaf.set("parent", person(&registry)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "App\\Tree\\Node::$parent must be one of these types: App\\Tree\\Node, null; \
         received a value of type App\\Dto\\Person."
    );
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn serialize_emits_projection() {
    let registry = registry();
    let mut p = person(&registry);
    p.set("age", 30).unwrap();
    assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"name":"Alice","age":30}"#);
    p.only(["age"]).unwrap();
    assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"age":30}"#);
}

#[test]
fn introspection() {
    let registry = registry();
    let p = person(&registry);
    assert_eq!(p.record_name(), "App\\Dto\\Person");
    assert_eq!(p.property_names().collect::<Vec<_>>(), vec!["name", "age"]);
    assert!(p.has_property("age"));
    assert!(!p.has_property("email"));
    assert!(format!("{p:?}").contains("App\\\\Dto\\\\Person"));
}
