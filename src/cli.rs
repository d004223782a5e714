//! CLI: parser output → (migrate | check)
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use crate::batch::{self, FailurePolicy, FileOutcome, InputOptions};
use crate::engine::RewriteReport;
use crate::error::Error;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// rewrite Swagger 2 (io.swagger.annotations) usages into their OpenAPI 3 equivalents
#[derive(Parser, Debug)]
#[command(name = "swagger-upgrade", version)]
pub struct CommandLineInterface {
    /// more log output (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// rewrite every unit and write the result as NDJSON
    Migrate(MigrateOut),
    /// dry run: report what would change without writing anything
    Check(CheckOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON), one unit per line
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to the unit inside each document (e.g. /result/unit)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ filter selecting units from each document (e.g. '.units[]')
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct MigrateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .ndjson file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// stop as soon as any file fails; nothing is written
    #[arg(long)]
    fail_fast: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// print every conversion as `before → after`
    #[arg(long)]
    show_changes: bool,

    /// print the reports as JSON on stdout instead of a summary
    #[arg(long, conflicts_with = "show_changes")]
    json: bool,
}

/// One line of `check --json` output.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum CheckEntry<'a> {
    Rewritten(&'a RewriteReport),
    Failed { origin: &'a Path, error: String },
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn options(&self) -> InputOptions {
        InputOptions {
            ndjson: self.ndjson,
            json_pointer: self.json_pointer.clone(),
            jq_expr: self.jq_expr.clone(),
        }
    }

    fn load(&self) -> Result<Vec<batch::SourceDocument>, Error> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        batch::load_documents(&source_paths, &self.options())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn run(&self) -> anyhow::Result<ExitCode> {
        match &self.cmd {
            Command::Migrate(target) => {
                let docs = target.input_settings.load()?;
                let policy = if target.fail_fast { FailurePolicy::FailFast } else { FailurePolicy::Continue };
                let outcomes = batch::run_batch(&docs, policy)?;

                let units = outcomes.iter().filter_map(|o| o.result.as_ref().ok()).map(|r| &r.unit);
                batch::write_ndjson(units, target.out.as_deref())?;

                print_summary(&outcomes, false);
                Ok(exit_code(&outcomes))
            }
            Command::Check(target) => {
                let docs = target.input_settings.load()?;
                let outcomes = batch::run_batch(&docs, FailurePolicy::Continue)?;

                if target.json {
                    let entries: Vec<CheckEntry> = outcomes.iter().map(CheckEntry::from).collect();
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else {
                    print_summary(&outcomes, target.show_changes);
                }
                Ok(exit_code(&outcomes))
            }
        }
    }
}

impl<'a> From<&'a FileOutcome> for CheckEntry<'a> {
    fn from(outcome: &'a FileOutcome) -> Self {
        match &outcome.result {
            Ok(rewrite) => CheckEntry::Rewritten(&rewrite.report),
            Err(error) => CheckEntry::Failed { origin: &outcome.origin, error: error.to_string() },
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn print_summary(outcomes: &[FileOutcome], show_changes: bool) {
    let mut converted = 0;
    let mut unchanged = 0;
    let mut failed = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(rewrite) if rewrite.report.is_noop() => {
                unchanged += 1;
                eprintln!("{} {}", "unchanged".dimmed(), rewrite.report.path.display());
            }
            Ok(rewrite) => {
                converted += 1;
                let report = &rewrite.report;
                let counts: Vec<String> = report.conversions.iter().map(|(rule, n)| format!("{rule} ×{n}")).collect();
                eprintln!("{} {} ({})", "rewrote".green(), report.path.display(), counts.join(", "));
                if show_changes {
                    for change in &report.changes {
                        eprintln!("  {}", change.declaration.bold());
                        eprintln!("    {} {}", "-".red(), change.before.red());
                        eprintln!("    {} {}", "+".green(), change.after.green());
                    }
                }
            }
            Err(error) => {
                failed += 1;
                eprintln!("{} {error}", "failed".red().bold());
            }
        }
        if let Ok(rewrite) = &outcome.result {
            for located in &rewrite.report.notices {
                eprintln!("  {} {}: {}", "warning".yellow(), located.declaration, located.notice);
            }
        }
    }

    let summary = format!("{converted} rewritten, {unchanged} unchanged, {failed} failed");
    if failed > 0 {
        eprintln!("\n{}", summary.red().bold());
    } else {
        eprintln!("\n{}", summary.green().bold());
    }
}

fn exit_code(outcomes: &[FileOutcome]) -> ExitCode {
    if outcomes.iter().any(|o| o.result.is_err()) { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            let entries = glob::glob(pattern).map_err(|e| Error::Glob(format!("{pattern}: {e}")))?;
            for entry in entries {
                let path = entry.map_err(|e| Error::Glob(e.to_string()))?;
                matched_any = true;
                out.push(path);
            }
            if !matched_any {
                return Err(Error::Glob(format!("glob pattern matched no files: {pattern}")));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
