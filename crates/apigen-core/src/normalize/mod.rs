pub mod endpoint;
pub mod schema;

use indexmap::IndexMap;
use serde_json::Value;

use crate::ir::{ApiInfo, ApiSchema, ApiServer, ParsedSpec};

/// Normalize a loose spec tree into the dialect-free IR.
///
/// Never fails: the input is assumed to be syntactically valid JSON shaped
/// approximately like a spec, and every missing or malformed section degrades
/// to a default instead of erroring.
pub fn normalize(root: &Value) -> ParsedSpec {
    let info = normalize_info(root.get("info"));
    let servers = normalize_servers(root);
    let schemas = normalize_schemas(root);
    let paths = endpoint::normalize_paths(root);

    log::debug!(
        "normalized \"{}\": {} paths, {} named schemas",
        info.title,
        paths.len(),
        schemas.len()
    );

    ParsedSpec {
        info,
        servers,
        paths,
        schemas,
    }
}

fn normalize_info(info: Option<&Value>) -> ApiInfo {
    let str_field = |key: &str| info.and_then(|i| i.get(key)).and_then(Value::as_str);
    ApiInfo {
        title: str_field("title").unwrap_or("API").to_string(),
        version: str_field("version").unwrap_or("1.0.0").to_string(),
        description: str_field("description").unwrap_or_default().to_string(),
    }
}

fn normalize_servers(root: &Value) -> Vec<ApiServer> {
    // OpenAPI 3.x: a servers array
    if let Some(servers) = root.get("servers").and_then(Value::as_array) {
        return servers
            .iter()
            .filter_map(|server| {
                let url = server.get("url").and_then(Value::as_str)?;
                Some(ApiServer {
                    url: url.to_string(),
                    description: server
                        .get("description")
                        .and_then(Value::as_str)
                        .map(String::from),
                })
            })
            .collect();
    }

    // Swagger 2.0: synthesize one server from host + basePath + first scheme
    let Some(host) = root.get("host").and_then(Value::as_str) else {
        return Vec::new();
    };
    let scheme = root
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|schemes| schemes.first())
        .and_then(Value::as_str)
        .unwrap_or("https");
    let base_path = root.get("basePath").and_then(Value::as_str).unwrap_or("");
    vec![ApiServer {
        url: format!("{scheme}://{host}{base_path}"),
        description: None,
    }]
}

/// `components.schemas` when present, otherwise `definitions`.
/// Key casing is preserved verbatim.
fn normalize_schemas(root: &Value) -> IndexMap<String, ApiSchema> {
    let named = root
        .get("components")
        .and_then(|components| components.get("schemas"))
        .and_then(Value::as_object)
        .or_else(|| root.get("definitions").and_then(Value::as_object));
    let Some(named) = named else {
        return IndexMap::new();
    };
    named
        .iter()
        .map(|(name, node)| (name.clone(), schema::parse_schema(node, name)))
        .collect()
}
