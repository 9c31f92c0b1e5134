//! Schema-to-TypeScript resolution.
//!
//! [`resolve_type`] walks a schema tree, registers any declarations the
//! schema needs into the accumulator, and returns the type expression to
//! use at the point of reference. Resolution order is fixed: references,
//! memoized names, enums, objects, arrays, compositions, scalars. The
//! first matching rule wins and later ones are never consulted.

use apigen_core::ir::ApiSchema;
use minijinja::context;
use serde_json::Value;

use crate::declarations::{Declaration, Declarations};
use crate::emit;
use crate::names::{enum_member_ident, escape_string, quote_if_needed, sanitize_type_name};
use crate::type_mapper::{is_primitive_type, scalar_type};

/// Resolve a schema to the TypeScript type expression naming it, declaring
/// supporting types into `declarations` along the way.
pub fn resolve_type(schema: &ApiSchema, declarations: &mut Declarations) -> String {
    // 1. References pass through verbatim; the target declares itself
    //    when its own definition is resolved.
    if let Some(reference) = &schema.reference {
        return reference.clone();
    }

    let name = sanitize_type_name(&schema.name);

    // 2. The first declaration under a name wins; later shapes that
    //    sanitize to the same name reuse it untouched.
    if declarations.lookup(&name).is_some() {
        return name;
    }

    // 3. Enums: all-textual values become an enum declaration, anything
    //    mixed a literal union alias.
    if !schema.enum_values.is_empty() {
        return resolve_enum(schema, name, declarations);
    }

    // 4. Object-shaped schemas declare an interface, children first.
    if schema.is_object_shaped() {
        return resolve_object(schema, name, declarations);
    }

    // 5. Typed arrays alias their item type.
    if schema.schema_type.as_deref() == Some("array")
        && let Some(items) = &schema.items
    {
        let item_type = resolve_type(items, declarations);
        let source_text = format!("export type {name} = {};", array_of(&item_type));
        push_alias(declarations, name.clone(), source_text, &[item_type]);
        return name;
    }

    // 6. allOf intersects its members.
    if !schema.all_of.is_empty() {
        return resolve_composition(&schema.all_of, name, " & ", declarations);
    }

    // 7. oneOf and anyOf both collapse to the same plain union.
    if !schema.one_of.is_empty() {
        return resolve_composition(&schema.one_of, name, " | ", declarations);
    }
    if !schema.any_of.is_empty() {
        return resolve_composition(&schema.any_of, name, " | ", declarations);
    }

    // 8. Scalars render inline; nothing is declared.
    scalar_type(schema)
}

fn resolve_enum(schema: &ApiSchema, name: String, declarations: &mut Declarations) -> String {
    let textual: Option<Vec<&str>> = schema.enum_values.iter().map(Value::as_str).collect();
    match textual {
        Some(values) => {
            let members: Vec<minijinja::Value> = values
                .iter()
                .map(|value| {
                    context! {
                        ident => enum_member_ident(value),
                        value => format!("\"{}\"", escape_string(value)),
                    }
                })
                .collect();
            let source_text = emit::render_enum(&name, &members);
            declarations.enumerations.push(Declaration {
                name: name.clone(),
                source_text,
                dependency_names: Vec::new(),
            });
        }
        None => {
            let literals: Vec<String> = schema.enum_values.iter().map(json_literal).collect();
            let source_text = format!("export type {name} = {};", literals.join(" | "));
            push_alias(declarations, name.clone(), source_text, &[]);
        }
    }
    name
}

fn resolve_object(schema: &ApiSchema, name: String, declarations: &mut Declarations) -> String {
    let mut fields: Vec<minijinja::Value> = Vec::new();
    let mut referenced: Vec<String> = Vec::new();
    for (key, property) in &schema.properties {
        let resolved = resolve_type(property, declarations);
        referenced.push(resolved.clone());
        let type_expr = if property.nullable {
            format!("{resolved} | null")
        } else {
            resolved
        };
        fields.push(context! {
            name => quote_if_needed(key),
            optional => !schema.is_required(key),
            type_expr => type_expr,
        });
    }
    let source_text = emit::render_interface(&name, &fields);
    declarations.structural.push(Declaration {
        name: name.clone(),
        source_text,
        dependency_names: dependency_names(&referenced),
    });
    name
}

fn resolve_composition(
    members: &[ApiSchema],
    name: String,
    joiner: &str,
    declarations: &mut Declarations,
) -> String {
    let resolved: Vec<String> = members
        .iter()
        .map(|member| resolve_type(member, declarations))
        .collect();
    let source_text = format!("export type {name} = {};", resolved.join(joiner));
    push_alias(declarations, name.clone(), source_text, &resolved);
    name
}

fn push_alias(
    declarations: &mut Declarations,
    name: String,
    source_text: String,
    referenced: &[String],
) {
    declarations.aliases.push(Declaration {
        name,
        source_text,
        dependency_names: dependency_names(referenced),
    });
}

/// Render a JSON value as a TypeScript literal. JSON string escaping is
/// valid TypeScript, so serialization does the work.
fn json_literal(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// `Pet` becomes `Pet[]`; compound expressions are parenthesized first.
fn array_of(item_type: &str) -> String {
    if item_type.contains(' ') {
        format!("({item_type})[]")
    } else {
        format!("{item_type}[]")
    }
}

fn dependency_names(referenced: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for type_expr in referenced {
        if is_primitive_type(type_expr) || names.contains(type_expr) {
            continue;
        }
        names.push(type_expr.clone());
    }
    names
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn scalar(name: &str, schema_type: &str) -> ApiSchema {
        ApiSchema {
            schema_type: Some(schema_type.to_string()),
            ..ApiSchema::named(name)
        }
    }

    fn reference(name: &str) -> ApiSchema {
        ApiSchema {
            reference: Some(name.to_string()),
            ..ApiSchema::default()
        }
    }

    #[test]
    fn test_reference_passes_through_verbatim() {
        let mut declarations = Declarations::new();
        let schema = reference("Pet");
        assert_eq!(resolve_type(&schema, &mut declarations), "Pet");
        assert!(declarations.is_empty());
    }

    #[test]
    fn test_scalar_declares_nothing() {
        let mut declarations = Declarations::new();
        assert_eq!(
            resolve_type(&scalar("limit", "integer"), &mut declarations),
            "number"
        );
        assert!(declarations.is_empty());
    }

    #[test]
    fn test_textual_enum_becomes_enum_declaration() {
        let mut declarations = Declarations::new();
        let schema = ApiSchema {
            enum_values: vec![json!("available"), json!("pending"), json!("sold")],
            ..ApiSchema::named("PetStatus")
        };
        assert_eq!(resolve_type(&schema, &mut declarations), "PetStatus");
        assert_eq!(declarations.enumerations.len(), 1);
        assert_eq!(
            declarations.enumerations[0].source_text,
            "export enum PetStatus {\n  available = \"available\",\n  pending = \"pending\",\n  sold = \"sold\",\n}"
        );
    }

    #[test]
    fn test_mixed_enum_becomes_literal_union() {
        let mut declarations = Declarations::new();
        let schema = ApiSchema {
            enum_values: vec![json!("low"), json!(1), json!(null)],
            ..ApiSchema::named("Level")
        };
        assert_eq!(resolve_type(&schema, &mut declarations), "Level");
        assert!(declarations.enumerations.is_empty());
        assert_eq!(
            declarations.aliases[0].source_text,
            "export type Level = \"low\" | 1 | null;"
        );
    }

    #[test]
    fn test_enum_rule_wins_over_object_shape() {
        let mut declarations = Declarations::new();
        let mut schema = ApiSchema {
            enum_values: vec![json!("a"), json!("b")],
            ..ApiSchema::named("Shape")
        };
        schema
            .properties
            .insert("ignored".to_string(), scalar("ShapeIgnored", "string"));
        resolve_type(&schema, &mut declarations);
        assert_eq!(declarations.enumerations.len(), 1);
        assert!(declarations.structural.is_empty());
    }

    #[test]
    fn test_object_declares_interface_with_markers() {
        let mut declarations = Declarations::new();
        let mut schema = ApiSchema::named("Pet");
        schema
            .properties
            .insert("id".to_string(), scalar("PetId", "integer"));
        schema.properties.insert(
            "tag".to_string(),
            ApiSchema {
                nullable: true,
                ..scalar("PetTag", "string")
            },
        );
        schema.required = vec!["id".to_string()];
        assert_eq!(resolve_type(&schema, &mut declarations), "Pet");
        assert_eq!(
            declarations.structural[0].source_text,
            "export interface Pet {\n  id: number;\n  tag?: string | null;\n}"
        );
    }

    #[test]
    fn test_object_children_declared_before_parent() {
        let mut declarations = Declarations::new();
        let mut schema = ApiSchema::named("Order");
        schema.properties.insert(
            "status".to_string(),
            ApiSchema {
                enum_values: vec![json!("placed"), json!("shipped")],
                ..ApiSchema::named("OrderStatus")
            },
        );
        schema
            .properties
            .insert("owner".to_string(), reference("User"));
        resolve_type(&schema, &mut declarations);
        assert_eq!(declarations.enumerations[0].name, "OrderStatus");
        assert_eq!(declarations.structural[0].name, "Order");
        assert_eq!(
            declarations.structural[0].dependency_names,
            vec!["OrderStatus".to_string(), "User".to_string()]
        );
    }

    #[test]
    fn test_empty_object_keyword_declares_empty_interface() {
        let mut declarations = Declarations::new();
        let schema = scalar("Empty", "object");
        assert_eq!(resolve_type(&schema, &mut declarations), "Empty");
        assert_eq!(
            declarations.structural[0].source_text,
            "export interface Empty {\n}"
        );
    }

    #[test]
    fn test_array_aliases_item_type() {
        let mut declarations = Declarations::new();
        let schema = ApiSchema {
            items: Some(Box::new(reference("Pet"))),
            ..scalar("Pets", "array")
        };
        assert_eq!(resolve_type(&schema, &mut declarations), "Pets");
        assert_eq!(
            declarations.aliases[0].source_text,
            "export type Pets = Pet[];"
        );
        assert_eq!(declarations.aliases[0].dependency_names, vec!["Pet"]);
    }

    #[test]
    fn test_array_of_compound_item_is_parenthesized() {
        let mut declarations = Declarations::new();
        let schema = ApiSchema {
            items: Some(Box::new(ApiSchema::named("BlobsItem"))),
            ..scalar("Blobs", "array")
        };
        resolve_type(&schema, &mut declarations);
        assert_eq!(
            declarations.aliases[0].source_text,
            "export type Blobs = (Record<string, unknown>)[];"
        );
    }

    #[test]
    fn test_all_of_intersects_members() {
        let mut declarations = Declarations::new();
        let schema = ApiSchema {
            all_of: vec![reference("Animal"), reference("Named")],
            ..ApiSchema::named("Dog")
        };
        assert_eq!(resolve_type(&schema, &mut declarations), "Dog");
        assert_eq!(
            declarations.aliases[0].source_text,
            "export type Dog = Animal & Named;"
        );
    }

    #[test]
    fn test_one_of_and_any_of_render_identically() {
        let mut one_of_declarations = Declarations::new();
        let one_of = ApiSchema {
            one_of: vec![reference("Cat"), reference("Dog")],
            ..ApiSchema::named("Choice")
        };
        resolve_type(&one_of, &mut one_of_declarations);

        let mut any_of_declarations = Declarations::new();
        let any_of = ApiSchema {
            any_of: vec![reference("Cat"), reference("Dog")],
            ..ApiSchema::named("Choice")
        };
        resolve_type(&any_of, &mut any_of_declarations);

        assert_eq!(
            one_of_declarations.aliases[0].source_text,
            any_of_declarations.aliases[0].source_text
        );
        assert_eq!(
            one_of_declarations.aliases[0].source_text,
            "export type Choice = Cat | Dog;"
        );
    }

    #[test]
    fn test_first_declaration_under_a_name_wins() {
        let mut declarations = Declarations::new();
        let mut first = ApiSchema::named("user-profile");
        first
            .properties
            .insert("id".to_string(), scalar("UserProfileId", "integer"));
        let mut second = ApiSchema::named("UserProfile");
        second
            .properties
            .insert("email".to_string(), scalar("UserProfileEmail", "string"));

        assert_eq!(resolve_type(&first, &mut declarations), "UserProfile");
        assert_eq!(resolve_type(&second, &mut declarations), "UserProfile");
        assert_eq!(declarations.type_count(), 1);
        assert!(declarations.structural[0].source_text.contains("id"));
        assert!(!declarations.structural[0].source_text.contains("email"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut declarations = Declarations::new();
        let mut schema = ApiSchema::named("Pet");
        schema
            .properties
            .insert("name".to_string(), scalar("PetName", "string"));

        let first = resolve_type(&schema, &mut declarations);
        let second = resolve_type(&schema, &mut declarations);
        assert_eq!(first, second);
        assert_eq!(declarations.type_count(), 1);
    }
}
