//! Spec acquisition from local files or HTTP(S) URLs.

use anyhow::{Context, Result};
use apigen_core::ir::ParsedSpec;
use apigen_core::parse;

/// Load and normalize a spec document from a URL or file path.
pub fn load_spec(source: &str) -> Result<ParsedSpec> {
    let document = read_document(source)?;
    let spec = if is_yaml(source) {
        parse::from_yaml(&document)?
    } else {
        parse::from_json(&document)?
    };
    Ok(spec)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// YAML is recognized by extension; everything else parses as JSON.
fn is_yaml(source: &str) -> bool {
    let path = source.split('?').next().unwrap_or(source);
    path.ends_with(".yaml") || path.ends_with(".yml")
}

fn read_document(source: &str) -> Result<String> {
    if is_url(source) {
        log::debug!("fetching spec from {source}");
        let response = reqwest::blocking::get(source)
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("failed to fetch {source}"))?;
        response
            .text()
            .with_context(|| format!("failed to read response body from {source}"))
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
    }
}
