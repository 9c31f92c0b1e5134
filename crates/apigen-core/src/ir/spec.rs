use indexmap::IndexMap;

use super::endpoint::{ApiEndpoint, ApiPath};
use super::schema::ApiSchema;

/// A dialect-free view of a Swagger 2.0 or OpenAPI 3.x document.
///
/// All mappings preserve the insertion order of the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSpec {
    pub info: ApiInfo,
    pub servers: Vec<ApiServer>,
    pub paths: IndexMap<String, ApiPath>,
    pub schemas: IndexMap<String, ApiSchema>,
}

impl ParsedSpec {
    /// All endpoints in path order, then method probe order.
    pub fn endpoints(&self) -> impl Iterator<Item = &ApiEndpoint> {
        self.paths.values().flat_map(|path| path.endpoints.iter())
    }
}

/// API metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            description: String::new(),
        }
    }
}

/// A server URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiServer {
    pub url: String,
    pub description: Option<String>,
}
