//! Conversion rules, one per v2 annotation family.
//!
//! Every rule has the same shape: it gets the annotation being converted plus a
//! read-only view of its siblings, and returns either a complete replacement
//! with the import changes it implies, or `Unchanged`. Rules never see the rest
//! of the tree and never touch the ledger; the engine does both.
//!
//! Values that get forwarded into the v3 annotation must be a literal or a
//! constant reference. Anything else is a malformed argument, not a guess.
pub mod tag;
pub mod operation;
pub mod parameter;
pub mod response;
pub mod model;

use std::fmt;

use serde::Serialize;

use crate::error::RuleError;
use crate::ir::{Annotation, Assignment, Literal, LiteralKind, Node};
use crate::ledger::ImportDelta;
use crate::matcher::{self, SiblingContext};
use crate::names::v2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Tag,
    Operation,
    Parameter,
    Response,
    Model,
}

const DISPATCH: &[(&str, Rule)] = &[
    (v2::API, Rule::Tag),
    (v2::API_OPERATION, Rule::Operation),
    (v2::API_PARAM, Rule::Parameter),
    (v2::API_RESPONSES, Rule::Response),
    (v2::API_RESPONSE, Rule::Response),
    (v2::API_MODEL, Rule::Model),
    (v2::API_MODEL_PROPERTY, Rule::Model),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub outcome: Outcome,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Replaced { annotation: Annotation, delta: ImportDelta },
    /// Leave the original annotation where it is.
    Unchanged,
}

/// Non-fatal conditions a rule ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// No binding annotation next to an `ApiParam`; `in` fell back to DEFAULT.
    MissingLocationAnnotation,
    /// `Api` without a `value`; nothing to name the tag with.
    EmptyPositionalValue,
}

// ————————————————————————————————————————————————————————————————————————————
// DISPATCH
// ————————————————————————————————————————————————————————————————————————————

impl Rule {
    /// The rule that owns this annotation, if any.
    pub fn for_annotation(annotation: &Annotation) -> Option<Rule> {
        DISPATCH
            .iter()
            .find(|(name, _)| matcher::matches_annotation(annotation, name))
            .map(|(_, rule)| *rule)
    }

    pub fn convert(self, annotation: &Annotation, siblings: SiblingContext<'_>) -> Result<Conversion, RuleError> {
        match self {
            Rule::Tag => tag::convert(annotation, siblings),
            Rule::Operation => operation::convert(annotation, siblings),
            Rule::Parameter => parameter::convert(annotation, siblings),
            Rule::Response => response::convert(annotation, siblings),
            Rule::Model => model::convert(annotation, siblings),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rule::Tag => "tag",
            Rule::Operation => "operation",
            Rule::Parameter => "parameter",
            Rule::Response => "response",
            Rule::Model => "model",
        }
    }
}

impl Conversion {
    pub fn replaced(annotation: Annotation, delta: ImportDelta) -> Self {
        Self { outcome: Outcome::Replaced { annotation, delta }, notices: Vec::new() }
    }

    pub fn unchanged() -> Self {
        Self { outcome: Outcome::Unchanged, notices: Vec::new() }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    /// The replacement, if the rule produced one.
    pub fn annotation(&self) -> Option<&Annotation> {
        match &self.outcome {
            Outcome::Replaced { annotation, .. } => Some(annotation),
            Outcome::Unchanged => None,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MissingLocationAnnotation => {
                f.write_str("no binding-location annotation found; using ParameterIn.DEFAULT")
            }
            Notice::EmptyPositionalValue => f.write_str("no `value` to name the tag with; left untouched"),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ARGUMENT HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// A value that can be carried over verbatim: a literal or a constant reference.
pub(crate) fn forwardable(annotation: &Annotation, arg: &Assignment) -> Result<Node, RuleError> {
    match arg.value.as_ref() {
        node @ (Node::Literal(_) | Node::Identifier { .. }) => Ok(node.clone()),
        other @ (Node::Annotation(_) | Node::Assignment(_) | Node::ArrayLiteral { .. } | Node::Empty) => Err(
            RuleError::malformed(annotation, &arg.key, "a literal or constant reference", other.kind()),
        ),
    }
}

/// A literal of one specific kind.
pub(crate) fn literal_of<'a>(
    annotation: &Annotation,
    arg: &'a Assignment,
    kind: LiteralKind,
    expected: &'static str,
) -> Result<&'a Literal, RuleError> {
    match arg.value.as_ref() {
        Node::Literal(lit) if lit.kind == kind => Ok(lit),
        other @ (Node::Literal(_)
        | Node::Annotation(_)
        | Node::Assignment(_)
        | Node::Identifier { .. }
        | Node::ArrayLiteral { .. }
        | Node::Empty) => Err(RuleError::malformed(annotation, &arg.key, expected, other.kind())),
    }
}

/// Any literal, whatever its kind.
pub(crate) fn any_literal<'a>(annotation: &Annotation, arg: &'a Assignment) -> Result<&'a Literal, RuleError> {
    match arg.value.as_ref() {
        Node::Literal(lit) => Ok(lit),
        other @ (Node::Annotation(_)
        | Node::Assignment(_)
        | Node::Identifier { .. }
        | Node::ArrayLiteral { .. }
        | Node::Empty) => Err(RuleError::malformed(annotation, &arg.key, "a literal", other.kind())),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn dispatch_covers_every_v2_name() {
        let cases = [
            (v2::API, Rule::Tag),
            (v2::API_OPERATION, Rule::Operation),
            (v2::API_PARAM, Rule::Parameter),
            (v2::API_RESPONSES, Rule::Response),
            (v2::API_RESPONSE, Rule::Response),
            (v2::API_MODEL, Rule::Model),
            (v2::API_MODEL_PROPERTY, Rule::Model),
        ];
        for (name, rule) in cases {
            assert_eq!(Rule::for_annotation(&ann(name, vec![])), Some(rule), "{name}");
        }
        assert_eq!(Rule::for_annotation(&ann("io.swagger.v3.oas.annotations.tags.Tag", vec![])), None);
        assert_eq!(Rule::for_annotation(&ann("Api", vec![])), None);
    }

    #[test]
    fn forwardable_rejects_structures() {
        let host = ann(v2::API_PARAM, vec![]);
        assert!(forwardable(&host, &arg("value", s("x"))).is_ok());
        assert!(forwardable(&host, &arg("value", crate::builder::identifier("Constants.DESCRIPTION"))).is_ok());
        let err = forwardable(&host, &arg("value", crate::builder::array_of(vec![]))).unwrap_err();
        assert_eq!(err.key(), "value");
        assert!(err.to_string().contains("found array literal"), "{err}");
    }

    #[test]
    fn literal_of_reports_found_kind() {
        let host = ann(v2::API_RESPONSE, vec![]);
        let err = literal_of(&host, &arg("code", s("200")), LiteralKind::Number, "a numeric literal").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed attribute `code` on @ApiResponse: expected a numeric literal, found string literal"
        );
    }
}
