//! Constructors for replacement nodes. Nothing here touches imports; rules
//! record their own import changes.
use crate::ir::{Annotation, Assignment, Literal, LiteralKind, Node};

pub fn annotation(qualified_name: &str, arguments: Vec<Assignment>) -> Annotation {
    Annotation {
        name: qualified_name.to_string(),
        arguments,
    }
}

pub fn assignment(key: &str, value: Node) -> Assignment {
    Assignment {
        key: key.to_string(),
        value: Box::new(value),
    }
}

/// Quoted Java string literal. `"`, `\` and control characters are escaped;
/// controls without a short escape use the fixed three-digit octal form.
pub fn string_literal(s: &str) -> Node {
    let mut raw = String::with_capacity(s.len() + 2);
    raw.push('"');
    for c in s.chars() {
        match c {
            '"' => raw.push_str("\\\""),
            '\\' => raw.push_str("\\\\"),
            '\n' => raw.push_str("\\n"),
            '\r' => raw.push_str("\\r"),
            '\t' => raw.push_str("\\t"),
            '\u{8}' => raw.push_str("\\b"),
            '\u{c}' => raw.push_str("\\f"),
            c if c.is_ascii_control() => raw.push_str(&format!("\\{:03o}", c as u32)),
            c => raw.push(c),
        }
    }
    raw.push('"');
    Node::Literal(Literal { kind: LiteralKind::String, raw })
}

/// `200` → `"200"`. `None` unless the literal is a number.
pub fn numeric_as_quoted_string(literal: &Literal) -> Option<Literal> {
    match literal.kind {
        LiteralKind::Number => Some(Literal {
            kind: LiteralKind::String,
            raw: format!("\"{}\"", literal.raw),
        }),
        LiteralKind::String | LiteralKind::Boolean | LiteralKind::TypeReference => None,
    }
}

pub fn array_of(elements: Vec<Node>) -> Node {
    Node::ArrayLiteral { elements }
}

pub fn identifier(name: &str) -> Node {
    Node::Identifier { name: name.to_string() }
}

pub fn nested(annotation: Annotation) -> Node {
    Node::Annotation(annotation)
}
