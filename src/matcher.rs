//! Exact-name annotation matching and the read-only sibling view.
use crate::ir::{Annotation, Node};

/// True iff `node` is an annotation named exactly `qualified_name`.
pub fn matches(node: &Node, qualified_name: &str) -> bool {
    match node {
        Node::Annotation(ann) => matches_annotation(ann, qualified_name),
        Node::Assignment(_)
        | Node::Identifier { .. }
        | Node::Literal(_)
        | Node::ArrayLiteral { .. }
        | Node::Empty => false,
    }
}

pub fn matches_annotation(annotation: &Annotation, qualified_name: &str) -> bool {
    annotation.name == qualified_name
}

/// Every annotation attached to the declaration being converted.
#[derive(Debug, Clone, Copy)]
pub struct SiblingContext<'a> {
    annotations: &'a [Annotation],
}

impl<'a> SiblingContext<'a> {
    pub fn new(annotations: &'a [Annotation]) -> Self {
        Self { annotations }
    }

    pub fn empty() -> Self {
        Self { annotations: &[] }
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.annotations.iter().any(|ann| matches_annotation(ann, qualified_name))
    }

    pub fn contains_any(&self, qualified_names: &[&str]) -> bool {
        qualified_names.iter().any(|name| self.contains(name))
    }
}
