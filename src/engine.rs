//! Per-file rewrite pass.
//!
//! Walks every declaration of a compilation unit once, depth first, in
//! document order. At each declaration the original annotation list is the
//! sibling context for every rule run there. Replacements are spliced in
//! place; the file's ledger is resolved once at the very end against the
//! names still used by surviving annotations.
//!
//! A fatal rule error drops everything built so far: the caller gets either a
//! fully rewritten unit or the error, never half of each.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ConversionError;
use crate::ir::{Annotation, CompilationUnit, Declaration, DeclarationKind};
use crate::ledger::ImportLedger;
use crate::matcher::SiblingContext;
use crate::rules::{Notice, Outcome, Rule};

#[derive(Debug, Clone)]
pub struct Rewrite {
    /// The rebuilt unit; `imports` holds the final import set.
    pub unit: CompilationUnit,
    pub report: RewriteReport,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    pub path: PathBuf,
    pub conversions: BTreeMap<Rule, usize>,
    pub changes: Vec<Change>,
    pub notices: Vec<LocatedNotice>,
    pub imports_added: Vec<String>,
    pub imports_removed: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Change {
    pub declaration: String,
    pub rule: Rule,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocatedNotice {
    pub declaration: String,
    pub notice: Notice,
}

// ————————————————————————————————————————————————————————————————————————————
// ENTRY POINT
// ————————————————————————————————————————————————————————————————————————————

pub fn rewrite_unit(unit: &CompilationUnit) -> Result<Rewrite, ConversionError> {
    let mut pass = Pass {
        path: &unit.path,
        ledger: ImportLedger::new(),
        report: RewriteReport { path: unit.path.clone(), ..RewriteReport::default() },
    };

    // 1) rebuild every declaration
    let declarations = unit
        .declarations
        .iter()
        .map(|decl| pass.visit(decl, None))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rebuilt = CompilationUnit {
        path: unit.path.clone(),
        imports: Vec::new(),
        declarations,
        extra: unit.extra.clone(),
    };

    // 2) settle imports against what survived
    let Pass { ledger, mut report, .. } = pass;
    let imports = ledger.resolve(&unit.imports, rebuilt.referenced_names());
    report.imports_removed = unit.imports.iter().filter(|i| !imports.contains(i)).cloned().collect();
    report.imports_added = imports.iter().filter(|i| !unit.imports.contains(i)).cloned().collect();
    rebuilt.imports = imports;

    tracing::info!(
        path = %unit.path.display(),
        conversions = report.total(),
        "rewrote compilation unit"
    );
    Ok(Rewrite { unit: rebuilt, report })
}

// ————————————————————————————————————————————————————————————————————————————
// PASS
// ————————————————————————————————————————————————————————————————————————————

struct Pass<'u> {
    path: &'u Path,
    ledger: ImportLedger,
    report: RewriteReport,
}

impl Pass<'_> {
    fn visit(&mut self, decl: &Declaration, scope: Option<&str>) -> Result<Declaration, ConversionError> {
        let locator = locate(scope, decl);
        let annotations = self.rewrite_annotations(&decl.annotations, &locator)?;
        let children = decl
            .children
            .iter()
            .map(|child| self.visit(child, Some(locator.as_str())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Declaration {
            kind: decl.kind,
            name: decl.name.clone(),
            annotations,
            children,
            extra: decl.extra.clone(),
        })
    }

    fn rewrite_annotations(
        &mut self,
        annotations: &[Annotation],
        locator: &str,
    ) -> Result<Vec<Annotation>, ConversionError> {
        let siblings = SiblingContext::new(annotations);
        let mut out = Vec::with_capacity(annotations.len());

        for annotation in annotations {
            let Some(rule) = Rule::for_annotation(annotation) else {
                out.push(annotation.clone());
                continue;
            };
            let conversion = rule.convert(annotation, siblings).map_err(|source| ConversionError {
                path: self.path.to_path_buf(),
                declaration: locator.to_string(),
                source,
            })?;

            for notice in conversion.notices {
                tracing::warn!(
                    path = %self.path.display(),
                    declaration = locator,
                    annotation = annotation.simple_name(),
                    "{notice}"
                );
                self.report.notices.push(LocatedNotice { declaration: locator.to_string(), notice });
            }

            match conversion.outcome {
                Outcome::Replaced { annotation: replacement, delta } => {
                    tracing::debug!(declaration = locator, before = %annotation, after = %replacement, "converted");
                    self.ledger.merge(&delta);
                    *self.report.conversions.entry(rule).or_default() += 1;
                    self.report.changes.push(Change {
                        declaration: locator.to_string(),
                        rule,
                        before: annotation.to_string(),
                        after: replacement.to_string(),
                    });
                    out.push(replacement);
                }
                Outcome::Unchanged => out.push(annotation.clone()),
            }
        }
        Ok(out)
    }
}

/// `Type`, `Type::method`, `Type::method(param)`, `Outer::Inner`.
fn locate(scope: Option<&str>, decl: &Declaration) -> String {
    match (scope, decl.kind) {
        (None, _) => decl.name.clone(),
        (Some(scope), DeclarationKind::Parameter) => format!("{scope}({})", decl.name),
        (Some(scope), DeclarationKind::Type | DeclarationKind::Method | DeclarationKind::Field) => {
            format!("{scope}::{}", decl.name)
        }
    }
}

impl RewriteReport {
    pub fn total(&self) -> usize {
        self.conversions.values().sum()
    }

    pub fn is_noop(&self) -> bool {
        self.changes.is_empty() && self.imports_added.is_empty() && self.imports_removed.is_empty()
    }
}
