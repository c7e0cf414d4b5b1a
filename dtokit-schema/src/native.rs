//! Native (declared) field types.

use crate::{ResolutionContext, SchemaError, SchemaResult};
use dtokit_types::TypeName;
use serde::{Deserialize, Serialize};

/// A field's native type: a single named type, optionally nullable, or a
/// union of named types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    Named { name: String, nullable: bool },
    Union(Vec<NativeType>),
}

impl NativeType {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            nullable: false,
        }
    }

    #[must_use]
    pub fn nullable(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            nullable: true,
        }
    }

    /// A union of plain names. `null` members are marked nullable.
    #[must_use]
    pub fn union<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Union(
            members
                .into_iter()
                .map(|member| {
                    let name = member.into();
                    let nullable = name.eq_ignore_ascii_case("null");
                    Self::Named { name, nullable }
                })
                .collect(),
        )
    }

    /// Whether `null` is an accepted value.
    #[must_use]
    pub fn allows_null(&self) -> bool {
        match self {
            Self::Named { nullable, .. } => *nullable,
            Self::Union(members) => members.iter().any(Self::allows_null),
        }
    }

    /// Type names this declaration contributes, in declaration order.
    /// A nullable named type emits its name followed by `null`; a union
    /// concatenates its members' names.
    #[must_use]
    pub fn type_names(&self) -> Vec<TypeName> {
        match self {
            Self::Named { name, nullable } => {
                let mut names = vec![TypeName::new(name)];
                if *nullable {
                    names.push(TypeName::null());
                }
                names
            }
            Self::Union(members) => members.iter().flat_map(Self::type_names).collect(),
        }
    }

    /// Resolves class names against `context`, as a compiler would have done
    /// for types written in source.
    #[must_use]
    pub fn resolved(&self, context: &ResolutionContext) -> Self {
        match self {
            // already qualified; the `\` marks it as a class
            Self::Named { name, nullable } if name.starts_with('\\') => Self::Named {
                name: name.clone(),
                nullable: *nullable,
            },
            Self::Named { name, nullable } => Self::Named {
                name: context.resolve(name),
                nullable: *nullable,
            },
            Self::Union(members) => {
                Self::Union(members.iter().map(|m| m.resolved(context)).collect())
            }
        }
    }

    /// Parses a type expression: `int`, `?int`, `int|string|null`.
    pub fn parse(expression: &str) -> SchemaResult<Self> {
        let invalid = |reason: &str| SchemaError::InvalidTypeExpression {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty type"));
        }
        if trimmed.contains(['(', ')', '&']) {
            return Err(invalid("intersection types are not supported"));
        }

        if !trimmed.contains('|') {
            let (name, nullable) = match trimmed.strip_prefix('?') {
                Some(inner) => (inner.trim(), true),
                None => (trimmed, trimmed.eq_ignore_ascii_case("null")),
            };
            if !is_type_identifier(name) {
                return Err(invalid("not a type name"));
            }
            return Ok(Self::Named {
                name: name.to_string(),
                nullable: nullable || name.eq_ignore_ascii_case("mixed"),
            });
        }

        let mut members = Vec::new();
        for part in trimmed.split('|').map(str::trim) {
            if part.starts_with('?') {
                return Err(invalid("nullable shorthand cannot be combined with a union"));
            }
            if !is_type_identifier(part) {
                return Err(invalid("not a type name"));
            }
            members.push(part);
        }
        Ok(Self::union(members))
    }
}

fn is_type_identifier(name: &str) -> bool {
    let name = name.strip_prefix('\\').unwrap_or(name);
    !name.is_empty()
        && name.split('\\').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
