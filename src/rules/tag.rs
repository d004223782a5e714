//! `@Api` → `@Tag`.
use crate::builder;
use crate::error::RuleError;
use crate::ir::{Annotation, Node};
use crate::ledger::ImportDelta;
use crate::matcher::SiblingContext;
use crate::names::{v2, v3};

use super::{Conversion, Notice, forwardable};

pub fn convert(api: &Annotation, _siblings: SiblingContext<'_>) -> Result<Conversion, RuleError> {
    let mut name: Option<Node> = None;
    let mut description: Option<Node> = None;

    for arg in &api.arguments {
        match arg.key.as_str() {
            "value" if name.is_none() => {
                name = match arg.value.as_ref() {
                    // `value = {"a", ...}`: the first element names the tag
                    Node::ArrayLiteral { elements } => match elements.first() {
                        Some(first) => Some(forwardable(api, &builder::assignment("value", first.clone()))?),
                        None => None,
                    },
                    Node::Annotation(_)
                    | Node::Assignment(_)
                    | Node::Identifier { .. }
                    | Node::Literal(_)
                    | Node::Empty => Some(forwardable(api, arg)?),
                };
            }
            "description" => {
                let value = forwardable(api, arg)?;
                if !value.is_empty_string() {
                    description = Some(value);
                }
            }
            // authorizations, tags, produces, consumes, protocols, hidden, ...
            _ => {}
        }
    }

    let Some(name) = name else {
        return Ok(Conversion::unchanged().with_notice(Notice::EmptyPositionalValue));
    };

    let mut arguments = vec![builder::assignment("name", name)];
    if let Some(description) = description {
        arguments.push(builder::assignment("description", description));
    }
    let delta = ImportDelta::new()
        .remove(v2::API)
        .remove(v2::AUTHORIZATION)
        .add(v3::TAG);
    Ok(Conversion::replaced(builder::annotation(v3::TAG, arguments), delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{array_of, identifier, nested};
    use crate::rules::Outcome;
    use crate::rules::test_support::*;

    fn run(api: Annotation) -> Conversion {
        convert(&api, SiblingContext::empty()).unwrap()
    }

    #[test]
    fn name_and_description() {
        let out = run(ann(v2::API, vec![arg("value", s("pm_jobs")), arg("description", s("the pm_jobs API"))]));
        assert_eq!(
            out.annotation().unwrap().to_string(),
            r#"@Tag(name = "pm_jobs", description = "the pm_jobs API")"#
        );
        let Outcome::Replaced { delta, .. } = out.outcome else { panic!("expected replacement") };
        assert!(delta.removed.contains(v2::API));
        assert!(delta.added.contains(v3::TAG));
    }

    #[test]
    fn empty_description_is_not_carried() {
        let out = run(ann(v2::API, vec![arg("value", s("pets")), arg("description", s(""))]));
        assert_eq!(out.annotation().unwrap().to_string(), r#"@Tag(name = "pets")"#);
    }

    #[test]
    fn authorizations_and_tags_are_discarded() {
        let auth = nested(ann(v2::AUTHORIZATION, vec![arg("value", s("oauth"))]));
        let out = run(ann(
            v2::API,
            vec![
                arg("value", s("pets")),
                arg("authorizations", array_of(vec![auth])),
                arg("tags", array_of(vec![s("a"), s("b")])),
                arg("hidden", boolean("false")),
            ],
        ));
        assert_eq!(out.annotation().unwrap().to_string(), r#"@Tag(name = "pets")"#);
        let Outcome::Replaced { delta, .. } = out.outcome else { panic!("expected replacement") };
        assert!(delta.removed.contains(v2::AUTHORIZATION));
    }

    #[test]
    fn missing_value_leaves_original() {
        let out = run(ann(v2::API, vec![arg("tags", array_of(vec![s("a")]))]));
        assert_eq!(out.outcome, Outcome::Unchanged);
        assert_eq!(out.notices, vec![Notice::EmptyPositionalValue]);
    }

    #[test]
    fn array_value_uses_first_element() {
        let out = run(ann(v2::API, vec![arg("value", array_of(vec![s("first"), s("second")]))]));
        assert_eq!(out.annotation().unwrap().to_string(), r#"@Tag(name = "first")"#);

        let out = run(ann(v2::API, vec![arg("value", array_of(vec![]))]));
        assert_eq!(out.outcome, Outcome::Unchanged);
    }

    #[test]
    fn constant_value_is_forwarded() {
        let out = run(ann(v2::API, vec![arg("value", identifier("Tags.PETS"))]));
        assert_eq!(out.annotation().unwrap().to_string(), "@Tag(name = Tags.PETS)");
    }

    #[test]
    fn nested_annotation_as_value_is_malformed() {
        let err = convert(
            &ann(v2::API, vec![arg("value", nested(ann("x.Y", vec![])))]),
            SiblingContext::empty(),
        )
        .unwrap_err();
        assert_eq!(err.key(), "value");
    }
}
