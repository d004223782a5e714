//! `@ApiParam` → `@Parameter`.
//!
//! `in` is not read from the annotation itself: it comes from whatever binding
//! annotation sits next to it on the same parameter.
use crate::builder;
use crate::error::RuleError;
use crate::ir::Annotation;
use crate::ledger::ImportDelta;
use crate::matcher::SiblingContext;
use crate::names::{binding, v2, v3};

use super::{Conversion, Notice, forwardable};

/// Mirror of the v3 `ParameterIn` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterIn {
    Default,
    Header,
    Query,
    Path,
    Cookie,
}

impl ParameterIn {
    pub fn constant(self) -> &'static str {
        match self {
            ParameterIn::Default => "ParameterIn.DEFAULT",
            ParameterIn::Header => "ParameterIn.HEADER",
            ParameterIn::Query => "ParameterIn.QUERY",
            ParameterIn::Path => "ParameterIn.PATH",
            ParameterIn::Cookie => "ParameterIn.COOKIE",
        }
    }
}

/// Strict priority: cookie, header, path, query.
pub fn binding_location(siblings: SiblingContext<'_>) -> Option<ParameterIn> {
    let tiers = [
        (binding::COOKIE, ParameterIn::Cookie),
        (binding::HEADER, ParameterIn::Header),
        (binding::PATH, ParameterIn::Path),
        (binding::QUERY, ParameterIn::Query),
    ];
    tiers
        .into_iter()
        .find(|(names, _)| siblings.contains_any(names))
        .map(|(_, location)| location)
}

pub fn convert(param: &Annotation, siblings: SiblingContext<'_>) -> Result<Conversion, RuleError> {
    let (location, notice) = match binding_location(siblings) {
        Some(location) => (location, None),
        None => (ParameterIn::Default, Some(Notice::MissingLocationAnnotation)),
    };

    let mut arguments = vec![builder::assignment("in", builder::identifier(location.constant()))];
    for arg in &param.arguments {
        let key = match arg.key.as_str() {
            "required" => "required",
            "value" => "description",
            "name" => "name",
            "example" => "example",
            // no v3 counterpart
            "type" | "allowableValues" | "defaultValue" => continue,
            _ => return Err(RuleError::unknown(param, &arg.key)),
        };
        arguments.push(builder::assignment(key, forwardable(param, arg)?));
    }

    let delta = ImportDelta::new()
        .remove(v2::API_PARAM)
        .add(v3::PARAMETER)
        .add(v3::PARAMETER_IN);
    let conversion = Conversion::replaced(builder::annotation(v3::PARAMETER, arguments), delta);
    Ok(match notice {
        Some(notice) => conversion.with_notice(notice),
        None => conversion,
    })
}
