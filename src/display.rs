// Annotation-syntax rendering for reports and diagnostics. This is not the
// printer: no imports, no layout, simple names only.
use std::fmt;

use crate::ir::{Annotation, Assignment, Node};

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.simple_name())?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Annotation(ann) => write!(f, "{ann}"),
            Node::Assignment(ass) => write!(f, "{ass}"),
            Node::Identifier { name } => f.write_str(name),
            Node::Literal(lit) => f.write_str(&lit.raw),
            Node::ArrayLiteral { elements } => {
                f.write_str("{")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{el}")?;
                }
                f.write_str("}")
            }
            Node::Empty => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::*;
    use crate::ir::{Literal, LiteralKind, Node};

    #[test]
    fn renders_nested_structures() {
        let void = Node::Literal(Literal { kind: LiteralKind::TypeReference, raw: "Void.class".into() });
        let schema = annotation("io.swagger.v3.oas.annotations.media.Schema", vec![assignment("implementation", void)]);
        let array = annotation("io.swagger.v3.oas.annotations.media.ArraySchema", vec![assignment("schema", nested(schema))]);
        let resp = annotation(
            "io.swagger.v3.oas.annotations.responses.ApiResponse",
            vec![assignment("responseCode", string_literal("200")), assignment("array", nested(array))],
        );
        assert_eq!(
            resp.to_string(),
            r#"@ApiResponse(responseCode = "200", array = @ArraySchema(schema = @Schema(implementation = Void.class)))"#
        );
    }

    #[test]
    fn renders_arrays_and_bare_annotations() {
        let outer = annotation(
            "x.Outer",
            vec![assignment("value", array_of(vec![nested(annotation("x.A", vec![])), identifier("B.C")]))],
        );
        assert_eq!(outer.to_string(), "@Outer(value = {@A, B.C})");
    }
}
