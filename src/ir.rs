// Normalized tree the rules consume and produce. Positional arguments are gone
// by the time anything lands here (see `norm`).
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Annotation(Annotation),
    Assignment(Assignment),
    Identifier { name: String },
    Literal(Literal),
    ArrayLiteral { elements: Vec<Node> },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully qualified name, e.g. `io.swagger.annotations.ApiParam`.
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Assignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub key: String,
    pub value: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Source text as written; string literals keep their quotes.
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    String,
    Number,
    Boolean,
    TypeReference,
}

/// Variant tag of a [`Node`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Annotation,
    Assignment,
    Identifier,
    Literal(LiteralKind),
    ArrayLiteral,
    Empty,
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub path: PathBuf,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    /// Parser-specific fields, passed through untouched for the printer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Members of a type, parameters of a method.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Declaration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Type,
    Method,
    Field,
    Parameter,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Annotation(_) => NodeKind::Annotation,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::Identifier { .. } => NodeKind::Identifier,
            Node::Literal(lit) => NodeKind::Literal(lit.kind),
            Node::ArrayLiteral { .. } => NodeKind::ArrayLiteral,
            Node::Empty => NodeKind::Empty,
        }
    }

    /// True for the string literal `""`.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Node::Literal(lit) if lit.kind == LiteralKind::String && lit.raw == "\"\"")
    }
}

impl Annotation {
    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// First argument with the given key.
    pub fn argument(&self, key: &str) -> Option<&Assignment> {
        self.arguments.iter().find(|arg| arg.key == key)
    }

    pub fn has_argument(&self, key: &str) -> bool {
        self.argument(key).is_some()
    }

    /// Every qualified name used by this annotation, nested ones included.
    pub fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.name);
        for arg in &self.arguments {
            arg.value.collect_names(out);
        }
    }
}

impl Node {
    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Annotation(ann) => ann.collect_names(out),
            Node::Assignment(ass) => ass.value.collect_names(out),
            Node::ArrayLiteral { elements } => {
                for el in elements {
                    el.collect_names(out);
                }
            }
            Node::Identifier { .. } | Node::Literal(_) | Node::Empty => {}
        }
    }
}

impl Declaration {
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Declaration)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

impl CompilationUnit {
    /// Qualified names of every annotation left in the tree.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for decl in &self.declarations {
            decl.walk(&mut |d| {
                for ann in &d.annotations {
                    ann.collect_names(&mut out);
                }
            });
        }
        out
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LiteralKind::String => "string",
            LiteralKind::Number => "number",
            LiteralKind::Boolean => "boolean",
            LiteralKind::TypeReference => "type reference",
        };
        f.write_str(label)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Annotation => f.write_str("annotation"),
            NodeKind::Assignment => f.write_str("assignment"),
            NodeKind::Identifier => f.write_str("identifier"),
            NodeKind::Literal(kind) => write!(f, "{kind} literal"),
            NodeKind::ArrayLiteral => f.write_str("array literal"),
            NodeKind::Empty => f.write_str("empty expression"),
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeclarationKind::Type => "type",
            DeclarationKind::Method => "method",
            DeclarationKind::Field => "field",
            DeclarationKind::Parameter => "parameter",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nodes_are_tagged_by_node_field() {
        let node = Node::Literal(Literal { kind: LiteralKind::Number, raw: "200".into() });
        let v = serde_json::to_value(&node).unwrap();
        assert_eq!(v, json!({ "node": "literal", "kind": "number", "raw": "200" }));

        let back: Node = serde_json::from_value(json!({ "node": "identifier", "name": "ParameterIn.PATH" })).unwrap();
        assert_eq!(back, Node::Identifier { name: "ParameterIn.PATH".into() });
    }

    #[test]
    fn referenced_names_include_nested_annotations() {
        let unit: CompilationUnit = serde_json::from_value(json!({
            "path": "A.java",
            "declarations": [{
                "kind": "method",
                "name": "get",
                "annotations": [{
                    "name": "x.Outer",
                    "arguments": [{ "key": "value", "value": {
                        "node": "array_literal",
                        "elements": [{ "node": "annotation", "name": "x.Inner" }]
                    }}]
                }]
            }]
        }))
        .unwrap();
        assert_eq!(unit.referenced_names(), vec!["x.Outer", "x.Inner"]);
    }

    #[test]
    fn extra_fields_round_trip() {
        let src = json!({
            "path": "A.java",
            "imports": [],
            "declarations": [{ "kind": "type", "name": "A", "annotations": [], "span": [1, 20] }],
            "package": "com.acme"
        });
        let unit: CompilationUnit = serde_json::from_value(src.clone()).unwrap();
        assert_eq!(unit.extra.get("package"), Some(&json!("com.acme")));
        assert_eq!(unit.declarations[0].extra.get("span"), Some(&json!([1, 20])));
        assert_eq!(serde_json::to_value(&unit).unwrap(), src);
    }

    #[test]
    fn empty_string_detection() {
        let empty = Node::Literal(Literal { kind: LiteralKind::String, raw: "\"\"".into() });
        let blank = Node::Literal(Literal { kind: LiteralKind::String, raw: "\" \"".into() });
        assert!(empty.is_empty_string());
        assert!(!blank.is_empty_string());
        assert!(!Node::Identifier { name: "EMPTY".into() }.is_empty_string());
    }
}
