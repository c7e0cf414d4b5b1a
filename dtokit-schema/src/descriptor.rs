//! Record type descriptors: what the reflection layer knows about a type.

use crate::{FieldDeclaration, ResolutionContext};
use dtokit_types::ClassInfo;

/// Everything needed to compile a record type's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    pub class: ClassInfo,
    pub context: ResolutionContext,
    pub fields: Vec<FieldDeclaration>,
}

impl RecordDescriptor {
    /// Starts a descriptor for the record type `name`. The namespace used
    /// to resolve annotations defaults to the type's own namespace.
    #[must_use]
    pub fn builder(name: impl AsRef<str>) -> RecordDescriptorBuilder {
        let class = ClassInfo::new(name);
        let context = ResolutionContext::new(class.namespace());
        RecordDescriptorBuilder {
            descriptor: Self {
                class,
                context,
                fields: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.class.name()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Fluent builder for [`RecordDescriptor`].
#[derive(Debug, Clone)]
pub struct RecordDescriptorBuilder {
    descriptor: RecordDescriptor,
}

impl RecordDescriptorBuilder {
    /// Overrides the namespace relative annotation names resolve against.
    #[must_use]
    pub fn namespace(mut self, namespace: impl AsRef<str>) -> Self {
        let imports = self.descriptor.context.imports().clone();
        let mut context = ResolutionContext::new(namespace);
        for (alias, target) in imports {
            context.add_import(alias, target);
        }
        self.descriptor.context = context;
        self
    }

    /// Adds an import alias (`use Carbon\CarbonImmutable as Carbon`).
    #[must_use]
    pub fn import(mut self, alias: impl AsRef<str>, target: impl AsRef<str>) -> Self {
        self.descriptor.context.add_import(alias, target);
        self
    }

    #[must_use]
    pub fn extends(mut self, parent: impl AsRef<str>) -> Self {
        self.descriptor.class = self.descriptor.class.extends(parent);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: impl AsRef<str>) -> Self {
        self.descriptor.class = self.descriptor.class.implements(interface);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDeclaration) -> Self {
        self.descriptor.fields.push(field);
        self
    }

    #[must_use]
    pub fn build(self) -> RecordDescriptor {
        self.descriptor
    }
}

/// A statically known record type.
///
/// ```
/// use dtokit_schema::{FieldDeclaration, RecordDescriptor, RecordType};
///
/// struct Person;
///
/// impl RecordType for Person {
///     fn type_name() -> &'static str {
///         "App\\Dto\\Person"
///     }
///
///     fn describe() -> RecordDescriptor {
///         RecordDescriptor::builder(Self::type_name())
///             .field(FieldDeclaration::string("name"))
///             .field(FieldDeclaration::optional("age", "int"))
///             .build()
///     }
/// }
///
/// assert_eq!(Person::describe().fields.len(), 2);
/// ```
pub trait RecordType {
    /// Fully qualified type name; the cache key for the compiled schema.
    fn type_name() -> &'static str;

    /// Builds the descriptor. Called when a registry first needs the schema.
    fn describe() -> RecordDescriptor;
}
