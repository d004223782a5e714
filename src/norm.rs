// src/norm.rs
//! Source tree → IR.
//!
//! The one place the "first unnamed argument is `value`" convention lives.
//! Rules never see positional arguments; they only see keyed assignments.
//! Annotation names are checked against Java's dotted-identifier shape here
//! too, so a garbled parser dump fails before any rule runs.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::NormalizeError;
use crate::ir::{Annotation, Assignment, CompilationUnit, Declaration, Node};
use crate::source::{SourceAnnotation, SourceDeclaration, SourceNode, SourceUnit};

/// Key given to a positional argument.
pub const POSITIONAL_KEY: &str = "value";

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").expect("static pattern")
});

/// Build the IR by **consuming** the source unit. `fallback_path` names the
/// unit when the parser did not.
pub fn normalize_unit(unit: SourceUnit, fallback_path: &Path) -> Result<CompilationUnit, NormalizeError> {
    let declarations = unit
        .declarations
        .into_iter()
        .map(normalize_declaration)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CompilationUnit {
        path: unit.path.unwrap_or_else(|| fallback_path.to_path_buf()),
        imports: unit.imports,
        declarations,
        extra: unit.extra,
    })
}

fn normalize_declaration(decl: SourceDeclaration) -> Result<Declaration, NormalizeError> {
    let annotations = decl
        .annotations
        .into_iter()
        .map(normalize_annotation)
        .collect::<Result<Vec<_>, _>>()?;
    let children = decl
        .children
        .into_iter()
        .map(normalize_declaration)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Declaration {
        kind: decl.kind,
        name: decl.name,
        annotations,
        children,
        extra: decl.extra,
    })
}

pub fn normalize_annotation(ann: SourceAnnotation) -> Result<Annotation, NormalizeError> {
    if !QUALIFIED_NAME.is_match(&ann.name) {
        return Err(NormalizeError::InvalidQualifiedName { name: ann.name });
    }
    let mut arguments = Vec::with_capacity(ann.arguments.len());
    let mut seen_positional = false;
    for arg in ann.arguments {
        match arg {
            SourceNode::Assignment { key, value } => {
                arguments.push(Assignment { key, value: Box::new(normalize_node(*value)?) });
            }
            positional => {
                if seen_positional {
                    return Err(NormalizeError::ExtraPositional { annotation: ann.name });
                }
                seen_positional = true;
                arguments.push(Assignment {
                    key: POSITIONAL_KEY.to_string(),
                    value: Box::new(normalize_node(positional)?),
                });
            }
        }
    }
    Ok(Annotation { name: ann.name, arguments })
}

fn normalize_node(node: SourceNode) -> Result<Node, NormalizeError> {
    Ok(match node {
        SourceNode::Annotation(ann) => Node::Annotation(normalize_annotation(ann)?),
        // An assignment outside an argument list is kept as-is; rules reject it.
        SourceNode::Assignment { key, value } => Node::Assignment(Assignment {
            key,
            value: Box::new(normalize_node(*value)?),
        }),
        SourceNode::Identifier { name } => Node::Identifier { name },
        SourceNode::Literal(lit) => Node::Literal(lit),
        SourceNode::ArrayLiteral { elements } => Node::ArrayLiteral {
            elements: elements.into_iter().map(normalize_node).collect::<Result<Vec<_>, _>>()?,
        },
        SourceNode::Empty => Node::Empty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Literal, LiteralKind};
    use serde_json::json;

    fn source_annotation(v: serde_json::Value) -> SourceAnnotation {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn positional_argument_becomes_value() {
        let ann = normalize_annotation(source_annotation(json!({
            "name": "io.swagger.annotations.Api",
            "arguments": [
                { "node": "literal", "kind": "string", "raw": "\"pm_jobs\"" },
                { "node": "assignment", "key": "description", "value": { "node": "literal", "kind": "string", "raw": "\"d\"" } }
            ]
        })))
        .unwrap();
        let keys: Vec<&str> = ann.arguments.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["value", "description"]);
        assert_eq!(
            *ann.arguments[0].value,
            Node::Literal(Literal { kind: LiteralKind::String, raw: "\"pm_jobs\"".into() })
        );
    }

    #[test]
    fn nested_annotations_are_normalized_too() {
        let ann = normalize_annotation(source_annotation(json!({
            "name": "io.swagger.annotations.ApiResponses",
            "arguments": [{
                "node": "array_literal",
                "elements": [{
                    "node": "annotation",
                    "name": "io.swagger.annotations.ApiResponse",
                    "arguments": [{ "node": "assignment", "key": "code", "value": { "node": "literal", "kind": "number", "raw": "200" } }]
                }]
            }]
        })))
        .unwrap();
        assert_eq!(ann.arguments[0].key, "value");
        let Node::ArrayLiteral { elements } = ann.arguments[0].value.as_ref() else {
            panic!("expected array");
        };
        let Node::Annotation(inner) = &elements[0] else {
            panic!("expected annotation");
        };
        assert_eq!(inner.arguments[0].key, "code");
    }

    #[test]
    fn second_positional_is_rejected() {
        let err = normalize_annotation(source_annotation(json!({
            "name": "x.Y",
            "arguments": [
                { "node": "identifier", "name": "A" },
                { "node": "identifier", "name": "B" }
            ]
        })))
        .unwrap_err();
        assert_eq!(err, NormalizeError::ExtraPositional { annotation: "x.Y".into() });
    }

    #[test]
    fn garbled_names_are_rejected() {
        for name in ["", "io..Api", "1abc", "io.swagger.Api()", "@Api"] {
            let err = normalize_annotation(source_annotation(json!({ "name": name }))).unwrap_err();
            assert!(matches!(err, NormalizeError::InvalidQualifiedName { .. }), "{name}");
        }
        assert!(normalize_annotation(source_annotation(json!({ "name": "Override" }))).is_ok());
    }

    #[test]
    fn unit_path_falls_back_to_origin() {
        let unit: SourceUnit = serde_json::from_value(json!({ "imports": ["java.util.Map"] })).unwrap();
        let unit = normalize_unit(unit, Path::new("in/A.json")).unwrap();
        assert_eq!(unit.path, Path::new("in/A.json"));
        assert_eq!(unit.imports, ["java.util.Map"]);
    }
}
