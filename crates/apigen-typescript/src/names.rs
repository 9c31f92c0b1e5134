use std::collections::HashSet;
use std::sync::LazyLock;

use heck::ToLowerCamelCase;

/// TypeScript reserved words that cannot be used as bare identifiers.
static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
        "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static",
        "implements", "interface", "package", "private", "protected", "public", "await", "async",
    ]
    .into_iter()
    .collect()
});

/// Names the generated method bodies use for their own locals. Parameter
/// identifiers must not collide with these.
static GENERATED_LOCALS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "path",
        "url",
        "search",
        "qs",
        "query",
        "body",
        "headers",
        "options",
        "requestHeaders",
        "response",
        "contentType",
    ]
    .into_iter()
    .collect()
});

/// Sanitize a raw schema name into a TypeScript type name.
///
/// Names that already read like type names (starting uppercase, containing a
/// camel hump, or ending in `DTO`) are kept as spelled, apart from stripping
/// non-word characters. Everything else is rebuilt segment by segment:
/// split on hyphens, underscores and whitespace, uppercase each segment's
/// first letter, leave the rest untouched.
pub fn sanitize_type_name(raw: &str) -> String {
    if starts_uppercase(raw) || has_camel_hump(raw) || raw.ends_with("DTO") {
        return strip_non_word(raw);
    }
    let mut result = String::new();
    for segment in raw.split(|c: char| c == '-' || c == '_' || c.is_whitespace()) {
        result.push_str(&capitalize_first(segment));
    }
    strip_non_word(&result)
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

/// A lowercase letter immediately followed by an uppercase one.
fn has_camel_hump(s: &str) -> bool {
    s.chars()
        .zip(s.chars().skip(1))
        .any(|(a, b)| a.is_lowercase() && b.is_uppercase())
}

fn strip_non_word(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Method name for an operation: camelCase of its operationId.
pub fn method_name(operation_id: &str) -> String {
    operation_id.to_lower_camel_case()
}

/// Turn a parameter name into a valid argument identifier: camelCase across
/// `-`/`.`/space separators, a leading `_` for digits, and an `_` prefix for
/// reserved words and the locals the method bodies declare themselves.
pub fn parameter_ident(name: &str) -> String {
    let mut result = String::new();
    for (i, part) in name.split(['-', '.', ' ']).enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            result.push_str(part);
        } else {
            result.push_str(&capitalize_first(part));
        }
    }
    let mut result: String = result
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if result.is_empty() {
        return "_param".to_string();
    }
    if result.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    if RESERVED_WORDS.contains(result.as_str()) || GENERATED_LOCALS.contains(result.as_str()) {
        result.insert(0, '_');
    }
    result
}

/// Whether a name can appear bare as a property key (`foo:`), or needs quoting.
fn is_bare_key(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for a double-quoted source literal.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property key unless it is a valid bare identifier.
pub fn quote_if_needed(name: &str) -> String {
    if is_bare_key(name) {
        name.to_string()
    } else {
        format!("\"{}\"", escape_string(name))
    }
}

/// Member access on a record: `query.limit`, `query?.limit`, or bracket
/// notation when the key is not a bare identifier.
pub fn member_access(object: &str, property: &str, object_required: bool) -> String {
    match (is_bare_key(property), object_required) {
        (true, true) => format!("{object}.{property}"),
        (true, false) => format!("{object}?.{property}"),
        (false, true) => format!("{object}[\"{}\"]", escape_string(property)),
        (false, false) => format!("{object}?.[\"{}\"]", escape_string(property)),
    }
}

/// Enum member identifier for a textual value: non-word characters become
/// `_`, and a leading digit gets an `_` prefix.
pub fn enum_member_ident(value: &str) -> String {
    let mut ident: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if ident.is_empty() {
        return "_".to_string();
    }
    if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}
