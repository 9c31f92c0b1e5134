use serde_json::Value;

use crate::error::ParseError;
use crate::ir::ParsedSpec;
use crate::normalize;

/// Parse a JSON spec document and normalize it.
pub fn from_json(input: &str) -> Result<ParsedSpec, ParseError> {
    let tree: Value = serde_json::from_str(input)?;
    Ok(normalize::normalize(&tree))
}

/// Parse a YAML spec document and normalize it.
///
/// Scalar mapping keys are stringified so the tree matches its JSON
/// equivalent (YAML spells status codes as integers: `200:`).
pub fn from_yaml(input: &str) -> Result<ParsedSpec, ParseError> {
    let tree: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    Ok(normalize::normalize(&yaml_to_json(tree)))
}

fn yaml_to_json(value: serde_yaml_ng::Value) -> Value {
    use serde_yaml_ng::Value as Yaml;
    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64().map(Value::from).unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::new();
            for (key, val) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    _ => continue,
                };
                object.insert(key, yaml_to_json(val));
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_syntax_error() {
        let result = from_json("{ not json");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_yaml_syntax_error() {
        let result = from_yaml("paths: [unclosed");
        assert!(matches!(result, Err(ParseError::Yaml(_))));
    }

    #[test]
    fn test_yaml_integer_status_keys_are_stringified() {
        let spec = from_yaml(
            r#"
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        200:
          description: ok
"#,
        )
        .expect("should parse YAML");
        let endpoint = &spec.paths["/pets"].endpoints[0];
        assert!(endpoint.responses.contains_key("200"));
    }

    #[test]
    fn test_yaml_and_json_produce_the_same_tree() {
        let json = r#"{ "info": { "title": "Pets", "version": "2.0.0" } }"#;
        let yaml = "info:\n  title: Pets\n  version: 2.0.0\n";
        let parsed_json = from_json(json).expect("should parse JSON");
        let parsed_yaml = from_yaml(yaml).expect("should parse YAML");
        assert_eq!(parsed_json, parsed_yaml);
    }
}
