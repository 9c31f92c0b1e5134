use indexmap::IndexMap;
use serde_json::Value;

/// A single recursive schema node.
///
/// Every dialect-specific spelling (Swagger 2.0 inline types, OpenAPI 3.0
/// `nullable`, 3.1 type arrays) is folded into this one shape by the
/// normalizer; generators never see the raw document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiSchema {
    /// Declaration name: the component key, or a synthesized child name.
    pub name: String,
    /// Raw `type` keyword, if any.
    pub schema_type: Option<String>,
    pub format: Option<String>,
    /// `enum` values kept verbatim as JSON values.
    pub enum_values: Vec<Value>,
    pub nullable: bool,
    pub properties: IndexMap<String, ApiSchema>,
    /// Property keys listed as required, verbatim.
    pub required: Vec<String>,
    pub items: Option<Box<ApiSchema>>,
    pub all_of: Vec<ApiSchema>,
    pub one_of: Vec<ApiSchema>,
    pub any_of: Vec<ApiSchema>,
    /// Trailing segment of a `$ref` target, e.g. `#/components/schemas/Pet` → `Pet`.
    pub reference: Option<String>,
}

impl ApiSchema {
    /// An empty schema carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Treated as an object when typed as one or when it declares properties.
    pub fn is_object_shaped(&self) -> bool {
        self.schema_type.as_deref() == Some("object") || !self.properties.is_empty()
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}
