use serde_json::Value;

use crate::ir::ApiSchema;

/// Parse one schema node, and its children recursively, under the given name.
///
/// Child nodes get synthesized names derived from the parent so that every
/// schema a generator might declare carries a usable identifier:
/// properties as `{parent}{CapitalizedKey}`, array items as `{parent}Item`,
/// composition members as `{parent}AllOf{i}` / `OneOf{i}` / `AnyOf{i}`.
pub fn parse_schema(node: &Value, name: &str) -> ApiSchema {
    let mut schema = ApiSchema::named(name);

    // A reference node carries nothing but its target.
    if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
        schema.reference = Some(trailing_segment(reference).to_string());
        return schema;
    }

    match node.get("type") {
        Some(Value::String(keyword)) => schema.schema_type = Some(keyword.clone()),
        // OpenAPI 3.1 spells nullability as a type array: ["string", "null"]
        Some(Value::Array(keywords)) => {
            for keyword in keywords.iter().filter_map(Value::as_str) {
                if keyword == "null" {
                    schema.nullable = true;
                } else if schema.schema_type.is_none() {
                    schema.schema_type = Some(keyword.to_string());
                }
            }
        }
        _ => {}
    }

    schema.format = node.get("format").and_then(Value::as_str).map(String::from);
    // Swagger 2.0 has no nullable keyword; x-nullable is the common vendor spelling.
    if node.get("nullable").and_then(Value::as_bool) == Some(true)
        || node.get("x-nullable").and_then(Value::as_bool) == Some(true)
    {
        schema.nullable = true;
    }
    if let Some(values) = node.get("enum").and_then(Value::as_array) {
        schema.enum_values = values.clone();
    }

    if let Some(properties) = node.get("properties").and_then(Value::as_object) {
        for (key, property) in properties {
            let child_name = format!("{name}{}", capitalize_key(key));
            schema
                .properties
                .insert(key.clone(), parse_schema(property, &child_name));
        }
    }
    if let Some(required) = node.get("required").and_then(Value::as_array) {
        schema.required = required
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect();
    }

    if let Some(items) = node.get("items") {
        if items.is_object() {
            schema.items = Some(Box::new(parse_schema(items, &format!("{name}Item"))));
        }
    }

    schema.all_of = parse_members(node, "allOf", name, "AllOf");
    schema.one_of = parse_members(node, "oneOf", name, "OneOf");
    schema.any_of = parse_members(node, "anyOf", name, "AnyOf");

    schema
}

fn parse_members(node: &Value, key: &str, parent: &str, suffix: &str) -> Vec<ApiSchema> {
    let Some(members) = node.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };
    members
        .iter()
        .enumerate()
        .map(|(i, member)| parse_schema(member, &format!("{parent}{suffix}{i}")))
        .collect()
}

/// `#/components/schemas/Pet` → `Pet`. No validation, no resolution.
fn trailing_segment(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

fn capitalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
