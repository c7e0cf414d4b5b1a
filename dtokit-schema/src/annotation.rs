//! Parsing of supplementary `@var` annotations into type names.
//!
//! Only type identity is extracted: element types of `T[]`, `array<K, V>`
//! and `list<T>` are dropped and those forms contribute plain `array`.

use crate::ResolutionContext;
use dtokit_types::{TypeName, Value};

/// Extracts the alternative type names declared by `text`.
///
/// `text` may be a doc comment containing an `@var` tag, a bare `@var`
/// tag, or a bare type expression (`int|string|null`). A comment without
/// an `@var` tag declares nothing. Class names are resolved against
/// `context`; `self`, `static` and `$this` name `self_type`.
pub fn parse_annotation(
    text: &str,
    self_type: &str,
    context: &ResolutionContext,
) -> Result<Vec<TypeName>, String> {
    let Some(expression) = type_expression(text) else {
        return Ok(Vec::new());
    };
    let mut names = Vec::new();
    for alternative in split_top_level(expression, '|') {
        collect(alternative, self_type, context, &mut names)?;
    }
    Ok(names)
}

fn type_expression(text: &str) -> Option<&str> {
    if let Some(rest) = var_tag(text) {
        let expression = leading_type(rest.trim_start());
        return (!expression.is_empty()).then_some(expression);
    }
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with("/*") || trimmed.contains('@') {
        return None;
    }
    Some(leading_type(trimmed))
}

/// The text after the first whole `@var` tag. `@variant` or `@var-x` are
/// other tags.
fn var_tag(text: &str) -> Option<&str> {
    text.match_indices("@var").find_map(|(index, tag)| {
        let rest = &text[index + tag.len()..];
        rest.chars()
            .next()
            .is_none_or(char::is_whitespace)
            .then_some(rest)
    })
}

/// The type expression at the start of `s`: everything up to the first
/// whitespace outside brackets, allowing spaces around `|` and after the
/// `:` of a callable signature.
fn leading_type(s: &str) -> &str {
    let mut depth = 0usize;
    let mut end = 0;
    let mut chars = s.char_indices().peekable();
    let mut after_pipe = false;
    while let Some((i, c)) = chars.next() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            '*' if depth == 0 && s[i..].starts_with("*/") => break,
            c if c.is_whitespace() && depth == 0 => {
                if after_pipe {
                    continue;
                }
                let next = s[i..].trim_start().chars().next();
                if next == Some('|') {
                    continue;
                }
                break;
            }
            _ => {}
        }
        after_pipe = c == '|' || c == ':' || (after_pipe && c.is_whitespace());
        end = i + c.len_utf8();
    }
    s[..end].trim_end()
}

fn split_top_level(expression: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in expression.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&expression[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&expression[start..]);
    parts
}

fn collect(
    alternative: &str,
    self_type: &str,
    context: &ResolutionContext,
    names: &mut Vec<TypeName>,
) -> Result<(), String> {
    let alternative = alternative.trim();
    if alternative.is_empty() {
        return Err("empty type alternative".to_string());
    }
    if let Some(inner) = alternative.strip_prefix('?') {
        collect(inner, self_type, context, names)?;
        names.push(TypeName::null());
        return Ok(());
    }
    if alternative.ends_with("[]") {
        names.push(TypeName::new(Value::ARRAY));
        return Ok(());
    }
    if let Some(inner) = alternative
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        for member in split_top_level(inner, '|') {
            collect(member, self_type, context, names)?;
        }
        return Ok(());
    }
    if split_top_level(alternative, '&').len() > 1 {
        return Err(format!("intersection type '{alternative}' cannot be validated"));
    }

    // `array<K, V>`, `array{a: int}` and `callable(int): void` keep only
    // their base name
    let base = alternative
        .split(['<', '{', '('])
        .next()
        .unwrap_or(alternative)
        .trim();
    let name = match base.to_ascii_lowercase().as_str() {
        "self" | "static" | "$this" => TypeName::class(self_type),
        "array" | "list" | "non-empty-array" | "non-empty-list" => TypeName::new(Value::ARRAY),
        "non-empty-string" | "class-string" | "numeric-string" => TypeName::new("string"),
        "positive-int" | "negative-int" | "non-negative-int" | "non-positive-int" => {
            TypeName::new("int")
        }
        "scalar" => {
            names.extend(["bool", "int", "float", "string"].map(TypeName::new));
            return Ok(());
        }
        lower if TypeName::is_builtin(lower) => TypeName::new(lower),
        _ if is_class_reference(base) && base.starts_with('\\') => {
            TypeName::class(context.resolve(base))
        }
        _ if is_class_reference(base) => TypeName::new(context.resolve(base)),
        _ => return Err(format!("'{alternative}' is not a type name")),
    };
    names.push(name);
    Ok(())
}

fn is_class_reference(name: &str) -> bool {
    let name = name.strip_prefix('\\').unwrap_or(name);
    !name.is_empty()
        && name.split('\\').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        })
}
