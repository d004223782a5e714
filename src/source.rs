//! Parser-facing tree.
//!
//! Mirrors [`crate::ir`] except that annotation arguments are plain nodes, the
//! way a parser hands them over: `assignment` nodes are named arguments and
//! anything else is positional. [`crate::norm`] turns this into the IR.
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ir::{DeclarationKind, Literal};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum SourceNode {
    Annotation(SourceAnnotation),
    Assignment { key: String, value: Box<SourceNode> },
    Identifier { name: String },
    Literal(Literal),
    ArrayLiteral { elements: Vec<SourceNode> },
    Empty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceAnnotation {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<SourceNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceDeclaration {
    pub kind: DeclarationKind,
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<SourceAnnotation>,
    #[serde(default)]
    pub children: Vec<SourceDeclaration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceUnit {
    /// Falls back to the file the document was read from.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub declarations: Vec<SourceDeclaration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
