use apigen_core::ir::ApiSchema;

/// Map a scalar schema to its TypeScript type expression.
///
/// This is the resolver's final fallback: anything that reaches it renders
/// inline as a primitive expression, never as a named declaration.
pub fn scalar_type(schema: &ApiSchema) -> String {
    let format = schema.format.as_deref();
    match schema.schema_type.as_deref() {
        Some("integer") | Some("number") => match format {
            Some("int64") => "bigint",
            _ => "number",
        },
        Some("string") => match format {
            Some("binary") | Some("byte") => "Blob",
            // date and date-time stay strings on the wire
            _ => "string",
        },
        Some("boolean") => "boolean",
        Some("array") => "unknown[]",
        _ => "Record<string, unknown>",
    }
    .to_string()
}

/// Whether a type expression is primitive, meaning no named declaration
/// stands behind it. Array suffixes, null unions, and grouping parentheses
/// are peeled off first: `Pet[]` is as non-primitive as `Pet`.
pub fn is_primitive_type(type_expr: &str) -> bool {
    let mut expr = type_expr.trim();
    loop {
        if let Some(stripped) = expr.strip_suffix("[]") {
            expr = stripped.trim_end();
        } else if let Some(stripped) = expr.strip_suffix("| null") {
            expr = stripped.trim_end();
        } else if expr.len() >= 2 && expr.starts_with('(') && expr.ends_with(')') {
            expr = expr[1..expr.len() - 1].trim();
        } else {
            break;
        }
    }
    if expr.starts_with("Record<") || expr.starts_with('"') {
        return true;
    }
    matches!(
        expr,
        "string"
            | "number"
            | "bigint"
            | "boolean"
            | "unknown"
            | "any"
            | "never"
            | "null"
            | "undefined"
            | "void"
            | "object"
            | "Blob"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_core::ir::ApiSchema;

    fn scalar(schema_type: Option<&str>, format: Option<&str>) -> ApiSchema {
        ApiSchema {
            schema_type: schema_type.map(String::from),
            format: format.map(String::from),
            ..ApiSchema::named("x")
        }
    }

    #[test]
    fn test_scalar_table() {
        assert_eq!(scalar_type(&scalar(Some("integer"), None)), "number");
        assert_eq!(scalar_type(&scalar(Some("number"), None)), "number");
        assert_eq!(scalar_type(&scalar(Some("number"), Some("float"))), "number");
        assert_eq!(scalar_type(&scalar(Some("integer"), Some("int64"))), "bigint");
        assert_eq!(scalar_type(&scalar(Some("number"), Some("int64"))), "bigint");
        assert_eq!(scalar_type(&scalar(Some("string"), None)), "string");
        assert_eq!(scalar_type(&scalar(Some("string"), Some("date"))), "string");
        assert_eq!(
            scalar_type(&scalar(Some("string"), Some("date-time"))),
            "string"
        );
        assert_eq!(scalar_type(&scalar(Some("string"), Some("binary"))), "Blob");
        assert_eq!(scalar_type(&scalar(Some("string"), Some("byte"))), "Blob");
        assert_eq!(scalar_type(&scalar(Some("boolean"), None)), "boolean");
        assert_eq!(scalar_type(&scalar(Some("array"), None)), "unknown[]");
        assert_eq!(
            scalar_type(&scalar(Some("object"), None)),
            "Record<string, unknown>"
        );
        assert_eq!(scalar_type(&scalar(None, None)), "Record<string, unknown>");
        assert_eq!(
            scalar_type(&scalar(Some("whatever"), None)),
            "Record<string, unknown>"
        );
    }

    #[test]
    fn test_is_primitive_type() {
        assert!(is_primitive_type("string"));
        assert!(is_primitive_type("unknown[]"));
        assert!(is_primitive_type("string | null"));
        assert!(is_primitive_type("Record<string, unknown>"));
        assert!(is_primitive_type("\"literal\""));
        assert!(is_primitive_type("(string | null)[]"));
        assert!(is_primitive_type("void"));

        assert!(!is_primitive_type("Pet"));
        assert!(!is_primitive_type("Pet[]"));
        assert!(!is_primitive_type("Pet | null"));
        assert!(!is_primitive_type("PetStatus"));
    }
}
