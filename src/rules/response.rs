//! `@ApiResponses` / `@ApiResponse` → their v3 namesakes.
//!
//! Two tiers: the container converts each element of its `value` array on its
//! own, in order, and wraps the results back up. Each element turns
//!
//! ```text
//! @ApiResponse(code = 200, message = "OK", response = Pet.class, responseContainer = "List")
//! ```
//!
//! into
//!
//! ```text
//! @ApiResponse(responseCode = "200", description = "OK",
//!              array = @ArraySchema(schema = @Schema(implementation = Pet.class)))
//! ```
//!
//! and without `responseContainer` the type lands in `schema = @Schema(...)`.
use crate::builder;
use crate::error::RuleError;
use crate::ir::{Annotation, LiteralKind, Node};
use crate::ledger::ImportDelta;
use crate::matcher::{self, SiblingContext};
use crate::names::{v2, v3};

use super::{Conversion, any_literal, literal_of};

pub fn convert(annotation: &Annotation, _siblings: SiblingContext<'_>) -> Result<Conversion, RuleError> {
    if matcher::matches_annotation(annotation, v2::API_RESPONSES) {
        convert_container(annotation)
    } else {
        // standalone @ApiResponse straight on the method
        let mut delta = ImportDelta::new();
        let single = convert_single(annotation, &mut delta)?;
        Ok(Conversion::replaced(single, delta))
    }
}

fn convert_container(responses: &Annotation) -> Result<Conversion, RuleError> {
    let mut delta = ImportDelta::new().remove(v2::API_RESPONSES).add(v3::API_RESPONSES);
    let mut converted = Vec::new();

    for arg in &responses.arguments {
        if arg.key != "value" {
            return Err(RuleError::unknown(responses, &arg.key));
        }
        match arg.value.as_ref() {
            Node::ArrayLiteral { elements } => {
                for element in elements {
                    converted.push(Node::Annotation(convert_element(responses, &arg.key, element, &mut delta)?));
                }
            }
            // `@ApiResponses(@ApiResponse(...))` without braces
            single @ Node::Annotation(_) => {
                converted.push(Node::Annotation(convert_element(responses, &arg.key, single, &mut delta)?));
            }
            other @ (Node::Assignment(_) | Node::Identifier { .. } | Node::Literal(_) | Node::Empty) => {
                return Err(RuleError::malformed(
                    responses,
                    &arg.key,
                    "an array of @ApiResponse",
                    other.kind(),
                ));
            }
        }
    }

    let container = builder::annotation(
        v3::API_RESPONSES,
        vec![builder::assignment("value", builder::array_of(converted))],
    );
    Ok(Conversion::replaced(container, delta))
}

fn convert_element(
    responses: &Annotation,
    key: &str,
    element: &Node,
    delta: &mut ImportDelta,
) -> Result<Annotation, RuleError> {
    match element {
        Node::Annotation(inner) if matcher::matches(element, v2::API_RESPONSE) => {
            convert_single(inner, delta)
        }
        other @ (Node::Annotation(_)
        | Node::Assignment(_)
        | Node::Identifier { .. }
        | Node::Literal(_)
        | Node::ArrayLiteral { .. }
        | Node::Empty) => Err(RuleError::malformed(responses, key, "an @ApiResponse", other.kind())),
    }
}

fn convert_single(response: &Annotation, delta: &mut ImportDelta) -> Result<Annotation, RuleError> {
    // only selects the array branch; never forwarded
    let as_array = response.has_argument("responseContainer");
    let mut arguments = Vec::with_capacity(response.arguments.len());

    for arg in &response.arguments {
        match arg.key.as_str() {
            "code" => {
                let code = literal_of(response, arg, LiteralKind::Number, "a numeric literal")?;
                let code = builder::numeric_as_quoted_string(code)
                    .ok_or_else(|| RuleError::malformed(response, &arg.key, "a numeric literal", arg.value.kind()))?;
                arguments.push(builder::assignment("responseCode", Node::Literal(code)));
            }
            "message" => {
                let message = any_literal(response, arg)?;
                arguments.push(builder::assignment("description", Node::Literal(message.clone())));
            }
            "response" => {
                let ty = literal_of(response, arg, LiteralKind::TypeReference, "a class literal")?;
                let schema = builder::annotation(
                    v3::SCHEMA,
                    vec![builder::assignment("implementation", Node::Literal(ty.clone()))],
                );
                delta.record_add(v3::SCHEMA);
                if as_array {
                    let array = builder::annotation(
                        v3::ARRAY_SCHEMA,
                        vec![builder::assignment("schema", builder::nested(schema))],
                    );
                    delta.record_add(v3::ARRAY_SCHEMA);
                    arguments.push(builder::assignment("array", builder::nested(array)));
                } else {
                    arguments.push(builder::assignment("schema", builder::nested(schema)));
                }
            }
            "responseContainer" => {}
            _ => return Err(RuleError::unknown(response, &arg.key)),
        }
    }

    delta.record_remove(v2::API_RESPONSE);
    delta.record_add(v3::API_RESPONSE);
    Ok(builder::annotation(v3::API_RESPONSE, arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{array_of, identifier, nested};
    use crate::rules::Outcome;
    use crate::rules::test_support::*;

    fn response(code: &str, message: &str, extra: Vec<crate::ir::Assignment>) -> Node {
        let mut args = vec![arg("code", num(code)), arg("message", s(message))];
        args.extend(extra);
        nested(ann(v2::API_RESPONSE, args))
    }

    fn run(annotation: Annotation) -> Result<Conversion, RuleError> {
        convert(&annotation, SiblingContext::empty())
    }

    #[test]
    fn single_response_with_schema() {
        let out = run(ann(
            v2::API_RESPONSE,
            vec![arg("code", num("200")), arg("message", s("OK")), arg("response", class("Void.class"))],
        ))
        .unwrap();
        assert_eq!(
            out.annotation().unwrap().to_string(),
            r#"@ApiResponse(responseCode = "200", description = "OK", schema = @Schema(implementation = Void.class))"#
        );
        let Outcome::Replaced { delta, .. } = out.outcome else { panic!("expected replacement") };
        assert!(delta.added.contains(v3::API_RESPONSE));
        assert!(delta.added.contains(v3::SCHEMA));
        assert!(!delta.added.contains(v3::ARRAY_SCHEMA));
        assert!(delta.removed.contains(v2::API_RESPONSE));
    }

    #[test]
    fn container_wraps_schema_in_array() {
        let out = run(ann(
            v2::API_RESPONSE,
            vec![
                arg("code", num("200")),
                arg("message", s("OK")),
                arg("response", class("Pet.class")),
                arg("responseContainer", s("List")),
            ],
        ))
        .unwrap();
        let replacement = out.annotation().unwrap();
        let keys: Vec<&str> = replacement.arguments.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["responseCode", "description", "array"]);
        assert_eq!(
            replacement.to_string(),
            r#"@ApiResponse(responseCode = "200", description = "OK", array = @ArraySchema(schema = @Schema(implementation = Pet.class)))"#
        );
        let Outcome::Replaced { delta, .. } = out.outcome else { panic!("expected replacement") };
        assert!(delta.added.contains(v3::ARRAY_SCHEMA));
    }

    #[test]
    fn container_order_is_preserved() {
        let codes = ["504", "200", "404", "405"];
        let elements = codes.iter().map(|c| response(c, "m", vec![])).collect();
        let out = run(ann(v2::API_RESPONSES, vec![arg("value", array_of(elements))])).unwrap();
        let replacement = out.annotation().unwrap();
        assert_eq!(replacement.name, v3::API_RESPONSES);
        let Node::ArrayLiteral { elements } = replacement.arguments[0].value.as_ref() else {
            panic!("expected array");
        };
        let rendered: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            codes
                .iter()
                .map(|c| format!(r#"@ApiResponse(responseCode = "{c}", description = "m")"#))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn unbracketed_single_element() {
        let out = run(ann(v2::API_RESPONSES, vec![arg("value", response("201", "Created", vec![]))])).unwrap();
        assert_eq!(
            out.annotation().unwrap().to_string(),
            r#"@ApiResponses(value = {@ApiResponse(responseCode = "201", description = "Created")})"#
        );
    }

    #[test]
    fn unknown_inner_attribute_is_fatal() {
        let inner = response("200", "OK", vec![arg("responseHeaders", array_of(vec![]))]);
        let err = run(ann(v2::API_RESPONSES, vec![arg("value", array_of(vec![inner]))])).unwrap_err();
        assert_eq!(
            err,
            RuleError::UnknownAttribute { annotation: "ApiResponse".into(), key: "responseHeaders".into() }
        );
    }

    #[test]
    fn unknown_outer_attribute_is_fatal() {
        let err = run(ann(v2::API_RESPONSES, vec![arg("value", array_of(vec![])), arg("extra", s("x"))])).unwrap_err();
        assert_eq!(err.key(), "extra");
    }

    #[test]
    fn string_code_is_malformed() {
        let err = run(ann(v2::API_RESPONSE, vec![arg("code", s("200"))])).unwrap_err();
        assert!(matches!(err, RuleError::MalformedArgument { ref key, .. } if key == "code"), "{err}");
    }

    #[test]
    fn constant_type_reference_is_malformed() {
        let err = run(ann(v2::API_RESPONSE, vec![arg("response", identifier("PET_TYPE"))])).unwrap_err();
        assert!(matches!(err, RuleError::MalformedArgument { ref key, .. } if key == "response"), "{err}");
    }

    #[test]
    fn foreign_element_is_malformed() {
        let stray = nested(ann("x.NotAResponse", vec![]));
        let err = run(ann(v2::API_RESPONSES, vec![arg("value", array_of(vec![stray]))])).unwrap_err();
        assert!(matches!(err, RuleError::MalformedArgument { .. }), "{err}");
    }

    #[test]
    fn missing_value_yields_empty_container() {
        let out = run(ann(v2::API_RESPONSES, vec![])).unwrap();
        assert_eq!(out.annotation().unwrap().to_string(), "@ApiResponses(value = {})");
        let Outcome::Replaced { delta, .. } = out.outcome else { panic!("expected replacement") };
        assert!(!delta.added.contains(v3::API_RESPONSE));
    }
}
