//! Shared record types for dto tests.

#![allow(dead_code)]

use dtokit_dto::{Dto, RecordDescriptor, RecordType, SchemaRegistry};
use dtokit_schema::FieldDeclaration;
use dtokit_types::{ClassInfo, HostObject};

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `name: string`, `age: int|null`.
pub struct Person;

impl RecordType for Person {
    fn type_name() -> &'static str {
        "App\\Dto\\Person"
    }

    fn describe() -> RecordDescriptor {
        RecordDescriptor::builder(Self::type_name())
            .field(FieldDeclaration::string("name"))
            .field(FieldDeclaration::new("age").union(["int", "null"]))
            .build()
    }
}

/// `street: string`, `city: ?string`, plus an untyped `note`.
pub struct Address;

impl RecordType for Address {
    fn type_name() -> &'static str {
        "App\\Dto\\Address"
    }

    fn describe() -> RecordDescriptor {
        RecordDescriptor::builder(Self::type_name())
            .field(FieldDeclaration::string("street"))
            .field(FieldDeclaration::optional("city", "string"))
            .field(FieldDeclaration::new("note"))
            .build()
    }
}

/// A customer with a nested address, a date and a declared default that
/// must never be applied.
pub struct Customer;

impl RecordType for Customer {
    fn type_name() -> &'static str {
        "App\\Dto\\Customer"
    }

    fn describe() -> RecordDescriptor {
        RecordDescriptor::builder(Self::type_name())
            .import("Carbon", "Carbon\\CarbonImmutable")
            .field(FieldDeclaration::string("name"))
            .field(FieldDeclaration::optional("address", "App\\Dto\\Address"))
            .field(FieldDeclaration::new("since").annotation("/** @var Carbon|null */"))
            .field(FieldDeclaration::bool("active").default_value(true))
            .field(FieldDeclaration::array("tags"))
            .build()
    }
}

/// An opaque host object standing in for a date library type.
#[derive(Debug)]
pub struct Date {
    class: ClassInfo,
    iso: String,
}

impl Date {
    pub fn new(iso: &str) -> Self {
        Self {
            class: ClassInfo::new("Carbon\\CarbonImmutable").implements("DateTimeInterface"),
            iso: iso.to_string(),
        }
    }
}

impl HostObject for Date {
    fn class_info(&self) -> &ClassInfo {
        &self.class
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.iso.clone())
    }
}

pub fn person(registry: &SchemaRegistry) -> Dto {
    registry
        .make::<Person, _, _, _>([("name", "Alice")])
        .unwrap()
}
