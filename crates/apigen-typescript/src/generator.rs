use apigen_core::ir::ParsedSpec;
use apigen_core::{CodeGenerator, GeneratedFile};
use thiserror::Error;

use crate::declarations::Declarations;
use crate::emit;
use crate::resolver::resolve_type;
use crate::synthesizer::{ClientOptions, synthesize_clients};

#[derive(Debug, Error)]
pub enum TypeScriptError {
    #[error("template render failed: {0}")]
    Render(String),
}

/// Configuration for the TypeScript generator.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptConfig {
    pub base_url: Option<String>,
    pub no_jsdoc: bool,
}

/// TypeScript `fetch` client generator.
pub struct TypeScriptGenerator;

/// Resolve every named schema, then synthesize the client classes, into a
/// fresh accumulator. Schemas declare in document order; endpoint-reachable
/// types that were not declared up front join as they are encountered.
pub fn build_declarations(spec: &ParsedSpec, config: &TypeScriptConfig) -> Declarations {
    let mut declarations = Declarations::new();
    for schema in spec.schemas.values() {
        resolve_type(schema, &mut declarations);
    }
    let options = ClientOptions {
        base_url: config.base_url.clone(),
        no_jsdoc: config.no_jsdoc,
    };
    synthesize_clients(spec, &options, &mut declarations);
    declarations
}

impl CodeGenerator for TypeScriptGenerator {
    type Config = TypeScriptConfig;
    type Error = TypeScriptError;

    fn generate(
        &self,
        spec: &ParsedSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let declarations = build_declarations(spec, config);
        log::debug!(
            "emitting {} type declarations and {} client classes",
            declarations.type_count(),
            declarations.clients.len()
        );
        Ok(vec![GeneratedFile {
            path: "client.ts".to_string(),
            content: emit::render_module(&spec.info, &declarations),
        }])
    }
}
