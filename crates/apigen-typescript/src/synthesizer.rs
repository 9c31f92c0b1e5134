//! Client class synthesis.
//!
//! Endpoints are grouped by tag and each group becomes one `fetch`-based
//! class declaration. An endpoint carrying several tags is replicated into
//! each class in full; untagged endpoints land in `default`.

use apigen_core::ir::{ApiEndpoint, ApiParameter, ParameterLocation, ParsedSpec};
use indexmap::IndexMap;
use minijinja::context;

use crate::declarations::{Declaration, Declarations};
use crate::emit;
use crate::names::{
    capitalize_first, escape_string, member_access, method_name, parameter_ident, quote_if_needed,
    sanitize_type_name,
};
use crate::resolver::resolve_type;
use crate::type_mapper::is_primitive_type;

/// Options threaded through client synthesis.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Overrides the first server URL as the constructor default.
    pub base_url: Option<String>,
    /// Suppresses JSDoc blocks above generated methods.
    pub no_jsdoc: bool,
}

/// Declare one client class per tag group into the accumulator.
pub fn synthesize_clients(
    spec: &ParsedSpec,
    options: &ClientOptions,
    declarations: &mut Declarations,
) {
    let base_url = options
        .base_url
        .clone()
        .or_else(|| spec.servers.first().map(|server| server.url.clone()))
        .unwrap_or_default();
    let base_url_literal = format!("\"{}\"", escape_string(&base_url));

    let mut groups: IndexMap<&str, Vec<&ApiEndpoint>> = IndexMap::new();
    for endpoint in spec.endpoints() {
        if endpoint.tags.is_empty() {
            groups.entry("default").or_default().push(endpoint);
        } else {
            for tag in &endpoint.tags {
                groups.entry(tag.as_str()).or_default().push(endpoint);
            }
        }
    }

    for (tag, endpoints) in &groups {
        let class_name = format!("{}Api", capitalize_first(&sanitize_type_name(tag)));
        let mut dependencies: Vec<String> = Vec::new();
        let methods: Vec<minijinja::Value> = endpoints
            .iter()
            .map(|endpoint| method_context(endpoint, options, &mut dependencies, declarations))
            .collect();
        let source_text = emit::render_client(&class_name, &base_url_literal, &methods);
        log::debug!("client {class_name}: {} methods", methods.len());
        declarations.clients.push(Declaration {
            name: class_name,
            source_text,
            dependency_names: dependencies,
        });
    }
}

/// Build the template context for one method.
///
/// The signature is assembled in a fixed order: path parameters, the query
/// record, the body, the header record, then request options.
fn method_context(
    endpoint: &ApiEndpoint,
    options: &ClientOptions,
    dependencies: &mut Vec<String>,
    declarations: &mut Declarations,
) -> minijinja::Value {
    let mut signature_parts: Vec<String> = Vec::new();

    let path_params: Vec<(&str, String)> = endpoint
        .parameters_in(ParameterLocation::Path)
        .map(|parameter| {
            let type_expr = parameter_type(parameter, declarations);
            track_dependency(dependencies, &type_expr);
            let ident = parameter_ident(&parameter.name);
            signature_parts.push(format!("{ident}: {type_expr}"));
            (parameter.name.as_str(), ident)
        })
        .collect();

    // The query record and body stay in required positions so the trailing
    // records can be optional without tripping TS1016.
    let query_params: Vec<&ApiParameter> =
        endpoint.parameters_in(ParameterLocation::Query).collect();
    if !query_params.is_empty() {
        let fields: Vec<String> = query_params
            .iter()
            .map(|parameter| {
                let type_expr = parameter_type(parameter, declarations);
                track_dependency(dependencies, &type_expr);
                format!(
                    "{}{}: {type_expr}",
                    quote_if_needed(&parameter.name),
                    if parameter.required { "" } else { "?" }
                )
            })
            .collect();
        signature_parts.push(format!("query: {{ {} }}", fields.join("; ")));
    }

    let has_body = endpoint.request_body.is_some();
    if let Some(body) = &endpoint.request_body {
        if let Some(schema) = &body.schema {
            // Declared for consumers; the argument itself stays untyped.
            resolve_type(schema, declarations);
        }
        signature_parts.push("body: unknown".to_string());
    }

    let header_params: Vec<&ApiParameter> =
        endpoint.parameters_in(ParameterLocation::Header).collect();
    if !header_params.is_empty() {
        let fields: Vec<String> = header_params
            .iter()
            .map(|parameter| {
                let type_expr = parameter_type(parameter, declarations);
                track_dependency(dependencies, &type_expr);
                format!("{}?: {type_expr}", quote_if_needed(&parameter.name))
            })
            .collect();
        signature_parts.push(format!("headers?: {{ {} }}", fields.join("; ")));
    }

    signature_parts.push("options?: RequestOptions".to_string());

    // Every response schema is declared; the first 2xx one becomes the
    // return type.
    let mut return_type: Option<String> = None;
    for (status, response) in &endpoint.responses {
        let Some(schema) = &response.schema else { continue };
        let resolved = resolve_type(schema, declarations);
        if return_type.is_none() && status.starts_with('2') {
            return_type = Some(resolved);
        }
    }
    let is_void = return_type.is_none();
    let return_type = return_type.unwrap_or_else(|| "void".to_string());
    if !is_void {
        track_dependency(dependencies, &return_type);
    }

    let mut path_expr = format!("\"{}\"", escape_string(&endpoint.path));
    for (original, ident) in &path_params {
        path_expr.push_str(&format!(
            ".replace(\"{{{}}}\", encodeURIComponent(String({ident})))",
            escape_string(original)
        ));
    }

    let query_sets: Vec<minijinja::Value> = query_params
        .iter()
        .map(|parameter| {
            context! {
                key => format!("\"{}\"", escape_string(&parameter.name)),
                access => member_access("query", &parameter.name, true),
            }
        })
        .collect();

    let header_sets: Vec<minijinja::Value> = header_params
        .iter()
        .map(|parameter| {
            context! {
                key => format!("\"{}\"", escape_string(&parameter.name)),
                access => member_access("headers", &parameter.name, false),
                required => parameter.required,
            }
        })
        .collect();

    let doc = if options.no_jsdoc {
        None
    } else {
        jsdoc_block(endpoint)
    };

    context! {
        name => method_name(&endpoint.operation_id),
        doc => doc,
        signature => signature_parts.join(", "),
        return_type => return_type,
        is_void => is_void,
        path_expr => path_expr,
        has_query => !query_params.is_empty(),
        query_sets => query_sets,
        header_sets => header_sets,
        has_body => has_body,
        http_method => endpoint.method.as_str(),
    }
}

/// Parameters without a schema are strings on the wire.
fn parameter_type(parameter: &ApiParameter, declarations: &mut Declarations) -> String {
    match &parameter.schema {
        Some(schema) => resolve_type(schema, declarations),
        None => "string".to_string(),
    }
}

fn track_dependency(dependencies: &mut Vec<String>, type_expr: &str) {
    if !is_primitive_type(type_expr) && !dependencies.iter().any(|name| name == type_expr) {
        dependencies.push(type_expr.to_string());
    }
}

/// Indented JSDoc block for a method, or `None` when the operation has no
/// summary and no description.
fn jsdoc_block(endpoint: &ApiEndpoint) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();
    if let Some(summary) = &endpoint.summary {
        lines.push(summary);
    }
    if let Some(description) = &endpoint.description {
        lines.push(description);
    }
    if lines.is_empty() {
        return None;
    }
    let mut block = String::from("  /**\n");
    for line in lines.iter().flat_map(|text| text.lines()) {
        block.push_str(&format!("   * {}\n", emit::escape_jsdoc(line)));
    }
    block.push_str("   */");
    Some(block)
}
