//! `@ApiOperation` → `@Operation`.
//!
//! Only the description survives: `notes` when it says something, else
//! `value`. nickname, response, responseContainer, tags, authorizations and
//! the rest are dropped.
use crate::builder;
use crate::error::RuleError;
use crate::ir::Annotation;
use crate::ledger::ImportDelta;
use crate::matcher::SiblingContext;
use crate::names::{v2, v3};

use super::{Conversion, forwardable};

pub fn convert(op: &Annotation, _siblings: SiblingContext<'_>) -> Result<Conversion, RuleError> {
    let notes = op.argument("notes").map(|arg| forwardable(op, arg)).transpose()?;
    let value = op.argument("value").map(|arg| forwardable(op, arg)).transpose()?;

    let description = match (notes, value) {
        (Some(notes), _) if !notes.is_empty_string() => notes,
        (_, Some(value)) => value,
        (Some(empty_notes), None) => empty_notes,
        (None, None) => builder::string_literal(""),
    };

    // dropped `authorizations` may have held the file's last @Authorization
    let delta = ImportDelta::new()
        .remove(v2::API_OPERATION)
        .remove(v2::AUTHORIZATION)
        .add(v3::OPERATION);
    let operation = builder::annotation(v3::OPERATION, vec![builder::assignment("description", description)]);
    Ok(Conversion::replaced(operation, delta))
}
