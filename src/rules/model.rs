//! `@ApiModel` / `@ApiModelProperty` → `@Schema`.
use crate::builder;
use crate::error::RuleError;
use crate::ir::Annotation;
use crate::ledger::ImportDelta;
use crate::matcher::{self, SiblingContext};
use crate::names::{v2, v3};

use super::{Conversion, forwardable};

pub fn convert(annotation: &Annotation, _siblings: SiblingContext<'_>) -> Result<Conversion, RuleError> {
    let (source, map_key): (&str, fn(&str) -> Option<Mapping>) =
        if matcher::matches_annotation(annotation, v2::API_MODEL) {
            (v2::API_MODEL, model_key)
        } else {
            (v2::API_MODEL_PROPERTY, property_key)
        };

    let mut arguments = Vec::with_capacity(annotation.arguments.len());
    for arg in &annotation.arguments {
        match map_key(&arg.key) {
            Some(Mapping::Forward(key)) => arguments.push(builder::assignment(key, forwardable(annotation, arg)?)),
            Some(Mapping::Drop) => {}
            None => return Err(RuleError::unknown(annotation, &arg.key)),
        }
    }

    let delta = ImportDelta::new().remove(source).add(v3::SCHEMA);
    Ok(Conversion::replaced(builder::annotation(v3::SCHEMA, arguments), delta))
}

enum Mapping {
    Forward(&'static str),
    Drop,
}

fn model_key(key: &str) -> Option<Mapping> {
    match key {
        "description" => Some(Mapping::Forward("description")),
        "value" => Some(Mapping::Forward("name")),
        _ => None,
    }
}

fn property_key(key: &str) -> Option<Mapping> {
    match key {
        "name" => Some(Mapping::Forward("name")),
        "value" => Some(Mapping::Forward("description")),
        // deprecated in v3 in favour of requiredMode, still accepted
        "required" => Some(Mapping::Forward("required")),
        "example" => Some(Mapping::Forward("example")),
        "hidden" => Some(Mapping::Forward("hidden")),
        // v3 spells this allowableValues = {...} on @Schema; not remapped
        "allowableValues" => Some(Mapping::Drop),
        _ => None,
    }
}
