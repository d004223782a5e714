//! Swagger 2 → OpenAPI 3 annotation migration over parsed Java sources.
//!
//! Input is a parser's JSON dump of a compilation unit ([`source`]). It is
//! normalized into the rewrite IR ([`ir`], [`norm`]), each v2 annotation is
//! handed to its [`rules`] entry by the [`engine`], and the file's import list
//! is settled through the [`ledger`]. [`batch`] and [`cli`] drive many files.
pub mod batch;
pub mod builder;
pub mod cli;
pub mod display;
pub mod engine;
pub mod error;
pub mod ir;
pub mod jq_exec;
pub mod ledger;
pub mod matcher;
pub mod names;
pub mod norm;
pub mod path_de;
pub mod rules;
pub mod source;

pub use engine::{Rewrite, RewriteReport, rewrite_unit};
pub use error::{ConversionError, Error, NormalizeError, RuleError};
