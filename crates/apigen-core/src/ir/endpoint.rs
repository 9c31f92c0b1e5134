use std::fmt;

use indexmap::IndexMap;

use super::schema::ApiSchema;

/// All operations declared under one path template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiPath {
    pub endpoints: Vec<ApiEndpoint>,
}

/// One operation: a method on a path.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEndpoint {
    pub path: String,
    pub method: HttpMethod,
    /// Declared `operationId`, or synthesized from method + path.
    pub operation_id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<ApiParameter>,
    pub request_body: Option<ApiRequestBody>,
    /// Status code → response, in document order.
    pub responses: IndexMap<String, ApiResponse>,
}

impl ApiEndpoint {
    /// Parameters with the given location, in declaration order.
    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &ApiParameter> {
        self.parameters.iter().filter(move |p| p.location == location)
    }
}

/// A path, query, or header parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiParameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Option<ApiSchema>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

impl ParameterLocation {
    /// Parse an `in` keyword. Anything else (`cookie`, `formData`, `body`)
    /// is not a client-call parameter and yields `None`.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            _ => None,
        }
    }
}

/// A request body with its first declared content type.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequestBody {
    pub required: bool,
    pub content_type: String,
    pub schema: Option<ApiSchema>,
}

/// A response under one status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub description: String,
    pub content_type: Option<String>,
    pub schema: Option<ApiSchema>,
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Probe order for path items. `trace` is deliberately not probed.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    /// Lowercase key as it appears in a path item.
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }

    /// Uppercase verb for the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
