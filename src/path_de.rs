//! Decoding with the JSON path of the failure in the message.
//!
//! A parser dump can be large and deeply nested; "invalid type: string" alone
//! is not enough to find the offending node.
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(describe)
}

/// Same as [`from_str_with_path`] for a document that is already parsed, e.g.
/// one picked out by a JSON pointer or a jq filter.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, String> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(describe)
}

fn describe<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> String {
    let path = err.path().to_string();
    format!("at JSON path {path} → {}", err.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceUnit;
    use serde_json::json;

    #[test]
    fn reports_path_of_bad_node() {
        let doc = json!({
            "imports": [],
            "declarations": [
                {"kind": "type", "name": "A", "annotations": [
                    {"name": "io.swagger.annotations.Api", "arguments": [{"node": "literal", "kind": "regex", "raw": "x"}]}
                ]}
            ]
        });
        let err = from_value_with_path::<SourceUnit>(doc).unwrap_err();
        assert!(err.starts_with("at JSON path declarations[0]"), "{err}");
        assert!(err.contains("regex"), "{err}");
    }

    #[test]
    fn str_and_value_agree() {
        let src = r#"{"path": "A.java", "imports": ["a.B"]}"#;
        let a: SourceUnit = from_str_with_path(src).unwrap();
        let b: SourceUnit = from_value_with_path(serde_json::from_str(src).unwrap()).unwrap();
        assert_eq!(a.imports, b.imports);
        assert_eq!(a.path, b.path);
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(from_str_with_path::<SourceUnit>("{\"imports\": [").is_err());
    }
}
