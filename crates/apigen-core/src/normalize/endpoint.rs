use indexmap::IndexMap;
use serde_json::Value;

use super::schema::parse_schema;
use crate::ir::{
    ApiEndpoint, ApiParameter, ApiPath, ApiRequestBody, ApiResponse, ApiSchema, HttpMethod,
    ParameterLocation,
};

/// Walk `paths`, probing each path item for operations in method order.
pub fn normalize_paths(root: &Value) -> IndexMap<String, ApiPath> {
    let Some(paths) = root.get("paths").and_then(Value::as_object) else {
        return IndexMap::new();
    };
    paths
        .iter()
        .map(|(path, item)| (path.clone(), normalize_path_item(path, item)))
        .collect()
}

fn normalize_path_item(path: &str, item: &Value) -> ApiPath {
    // Parameters declared on the path item apply to every operation under it.
    let shared_params: Vec<ApiParameter> = item
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| params.iter().filter_map(normalize_parameter).collect())
        .unwrap_or_default();

    let mut endpoints = Vec::new();
    for method in HttpMethod::ALL {
        if let Some(operation) = item.get(method.key()) {
            endpoints.push(normalize_operation(path, method, operation, &shared_params));
        }
    }
    ApiPath { endpoints }
}

fn normalize_operation(
    path: &str,
    method: HttpMethod,
    operation: &Value,
    shared_params: &[ApiParameter],
) -> ApiEndpoint {
    let operation_id = match operation.get("operationId").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => synthesize_operation_id(method, path),
    };

    let mut parameters: Vec<ApiParameter> = operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| params.iter().filter_map(normalize_parameter).collect())
        .unwrap_or_default();
    // Operation-level parameters win over path-level duplicates.
    for shared in shared_params {
        let duplicate = parameters
            .iter()
            .any(|p| p.name == shared.name && p.location == shared.location);
        if !duplicate {
            parameters.push(shared.clone());
        }
    }

    let tags = operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    ApiEndpoint {
        path: path.to_string(),
        method,
        summary: operation
            .get("summary")
            .and_then(Value::as_str)
            .map(String::from),
        description: operation
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        tags,
        parameters,
        request_body: normalize_request_body(operation, &operation_id),
        responses: normalize_responses(operation, &operation_id),
        operation_id,
    }
}

/// `get` + `/pets/{petId}` → `getpetspetId`.
fn synthesize_operation_id(method: HttpMethod, path: &str) -> String {
    let mut id = String::from(method.key());
    id.extend(path.chars().filter(char::is_ascii_alphanumeric));
    id
}

fn normalize_parameter(node: &Value) -> Option<ApiParameter> {
    let name = node.get("name").and_then(Value::as_str)?;
    let keyword = node.get("in").and_then(Value::as_str)?;
    let Some(location) = ParameterLocation::parse(keyword) else {
        // `body` becomes the request body; cookies and form data are dropped.
        if keyword != "body" {
            log::warn!("skipping parameter {name:?} with unsupported location {keyword:?}");
        }
        return None;
    };
    Some(ApiParameter {
        name: name.to_string(),
        location,
        required: node.get("required").and_then(Value::as_bool).unwrap_or(false),
        schema: parameter_schema(node, name),
    })
}

/// OpenAPI 3.x keeps the schema under `schema`; Swagger 2.0 spells
/// type/format/enum/items directly on the parameter node.
fn parameter_schema(node: &Value, name: &str) -> Option<ApiSchema> {
    if let Some(schema) = node.get("schema") {
        return Some(parse_schema(schema, name));
    }
    if node.get("type").is_some() {
        return Some(parse_schema(node, name));
    }
    None
}

fn normalize_request_body(operation: &Value, operation_id: &str) -> Option<ApiRequestBody> {
    let name = format!("{operation_id}Request");

    // OpenAPI 3.x
    if let Some(body) = operation.get("requestBody") {
        let (content_type, schema) = first_content_entry(body.get("content"), &name);
        return Some(ApiRequestBody {
            required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
            content_type: content_type.unwrap_or_else(|| "application/json".to_string()),
            schema,
        });
    }

    // Swagger 2.0: the body is a parameter with `in: body`.
    let params = operation.get("parameters").and_then(Value::as_array)?;
    let body_param = params
        .iter()
        .find(|p| p.get("in").and_then(Value::as_str) == Some("body"))?;
    Some(ApiRequestBody {
        required: body_param
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        content_type: first_array_string(operation.get("consumes"))
            .unwrap_or_else(|| "application/json".to_string()),
        schema: body_param.get("schema").map(|s| parse_schema(s, &name)),
    })
}

fn normalize_responses(operation: &Value, operation_id: &str) -> IndexMap<String, ApiResponse> {
    let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
        return IndexMap::new();
    };
    responses
        .iter()
        .map(|(status, node)| {
            let name = format!("{operation_id}Response{status}");
            let description = node
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let (mut content_type, mut schema) = first_content_entry(node.get("content"), &name);
            if schema.is_none() {
                // Swagger 2.0: the schema sits directly on the response.
                if let Some(direct) = node.get("schema") {
                    schema = Some(parse_schema(direct, &name));
                    content_type = first_array_string(operation.get("produces"))
                        .or_else(|| Some("application/json".to_string()));
                }
            }
            (
                status.clone(),
                ApiResponse {
                    description,
                    content_type,
                    schema,
                },
            )
        })
        .collect()
}

/// First entry of an OpenAPI 3.x `content` map, in insertion order.
fn first_content_entry(
    content: Option<&Value>,
    schema_name: &str,
) -> (Option<String>, Option<ApiSchema>) {
    let Some((content_type, media)) = content
        .and_then(Value::as_object)
        .and_then(|entries| entries.iter().next())
    else {
        return (None, None);
    };
    let schema = media.get("schema").map(|s| parse_schema(s, schema_name));
    (Some(content_type.clone()), schema)
}

fn first_array_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
        .and_then(Value::as_str)
        .map(String::from)
}
