// SPDX-License-Identifier: MPL-2.0
//! Command-line interface of the `ts_lens` binary.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::audit;
use crate::config::Config;
use crate::domain::catalog::CatalogStats;
use crate::error::{Error, Result};
use crate::export::{self, ExportFormat};
use crate::i18n::catalog_set::catalog_files;
use crate::i18n::{CatalogSet, Translator};
use crate::placeholder::FormatArgs;
use crate::ts;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
ts_lens - inspect, check and convert Qt Linguist TS catalogs

USAGE:
    ts_lens [GLOBAL OPTIONS] <COMMAND> [ARGS]

COMMANDS:
    lookup [PATH] --context C --source S   Print the translation shown at runtime
        --lang L        Locale to use when PATH is a directory
        --comment T     Disambiguation comment
        --count N       Numerus quantity
    check [FILES..]                        Audit catalogs (exit status 1 on errors)
        --reference F   Catalog whose contexts the others must match
        --json          Print the report as JSON
    stats [FILES..]                        Translation progress per catalog
        --json          Print JSON
    export FILE --format FMT               Convert to po, json, json-flat or ftl
        --output F      Write to F instead of stdout
    normalize FILE                         Re-serialize in canonical layout
        --output F      Write to F instead of stdout

    PATH and FILES may be catalogs or directories of catalogs; they default
    to the configured catalog directory.

GLOBAL OPTIONS:
    --config-dir DIR    Directory holding settings.toml
    -v, --verbose       Debug logging
    -h, --help          Show this help message
    -V, --version       Show version

ENVIRONMENT VARIABLES:
    TS_LENS_CONFIG_DIR  Same as --config-dir
    TS_LENS_LOG         tracing filter, e.g. ts_lens=debug
";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub config_dir: Option<String>,
    pub verbose: bool,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Lookup {
        path: Option<PathBuf>,
        context: String,
        source: String,
        comment: Option<String>,
        count: Option<u64>,
        lang: Option<String>,
    },
    Check {
        files: Vec<PathBuf>,
        reference: Option<PathBuf>,
        json: bool,
    },
    Stats {
        files: Vec<PathBuf>,
        json: bool,
    },
    Export {
        file: PathBuf,
        format: ExportFormat,
        output: Option<PathBuf>,
    },
    Normalize {
        file: PathBuf,
        output: Option<PathBuf>,
    },
    Help,
    Version,
}

/// Parses the process arguments.
pub fn parse_env() -> Result<Cli> {
    parse(pico_args::Arguments::from_env())
}

/// Parses an argument list without the program name.
pub fn parse_from(args: Vec<OsString>) -> Result<Cli> {
    parse(pico_args::Arguments::from_vec(args))
}

fn parse(mut args: pico_args::Arguments) -> Result<Cli> {
    let help = args.contains(["-h", "--help"]);
    let version = args.contains(["-V", "--version"]);
    let verbose = args.contains(["-v", "--verbose"]);
    let config_dir: Option<String> = args.opt_value_from_str("--config-dir")?;

    let command = if help {
        Command::Help
    } else if version {
        Command::Version
    } else {
        match args.subcommand()?.as_deref() {
            Some("lookup") => Command::Lookup {
                context: args.value_from_str("--context")?,
                source: args.value_from_str("--source")?,
                comment: args.opt_value_from_str("--comment")?,
                count: args.opt_value_from_str("--count")?,
                lang: args.opt_value_from_str("--lang")?,
                path: single_optional(remaining(args)?)?,
            },
            Some("check") => Command::Check {
                reference: args.opt_value_from_os_str("--reference", to_path)?,
                json: args.contains("--json"),
                files: remaining(args)?,
            },
            Some("stats") => Command::Stats {
                json: args.contains("--json"),
                files: remaining(args)?,
            },
            Some("export") => Command::Export {
                format: args.value_from_str("--format")?,
                output: args.opt_value_from_os_str("--output", to_path)?,
                file: single_required(remaining(args)?, "export")?,
            },
            Some("normalize") => Command::Normalize {
                output: args.opt_value_from_os_str("--output", to_path)?,
                file: single_required(remaining(args)?, "normalize")?,
            },
            Some(other) => return Err(Error::Usage(format!("unknown command '{other}'"))),
            None => Command::Help,
        }
    };

    Ok(Cli {
        config_dir,
        verbose,
        command,
    })
}

fn to_path(value: &std::ffi::OsStr) -> std::result::Result<PathBuf, &'static str> {
    Ok(PathBuf::from(value))
}

/// Free arguments left after options; anything that looks like a flag is rejected.
fn remaining(args: pico_args::Arguments) -> Result<Vec<PathBuf>> {
    args.finish()
        .into_iter()
        .map(|arg| {
            if arg.to_string_lossy().starts_with('-') {
                Err(Error::Usage(format!(
                    "unexpected option '{}'",
                    arg.to_string_lossy()
                )))
            } else {
                Ok(PathBuf::from(arg))
            }
        })
        .collect()
}

fn single_optional(mut paths: Vec<PathBuf>) -> Result<Option<PathBuf>> {
    match paths.len() {
        0 | 1 => Ok(paths.pop()),
        _ => Err(Error::Usage("expected at most one path".to_string())),
    }
}

fn single_required(paths: Vec<PathBuf>, command: &str) -> Result<PathBuf> {
    match single_optional(paths)? {
        Some(path) => Ok(path),
        None => Err(Error::Usage(format!("{command} needs a catalog file"))),
    }
}

// =============================================================================
// Execution
// =============================================================================

/// Runs `command`, writing results to `out`. Returns the process exit status.
pub fn run(command: &Command, config: &Config, out: &mut dyn Write) -> Result<u8> {
    match command {
        Command::Help => {
            out.write_all(HELP_TEXT.as_bytes())?;
            Ok(0)
        }
        Command::Version => {
            writeln!(out, "ts_lens {VERSION}")?;
            Ok(0)
        }
        Command::Lookup {
            path,
            context,
            source,
            comment,
            count,
            lang,
        } => {
            let path = path
                .clone()
                .unwrap_or_else(|| config.general.catalog_dir_or_default());
            let text = lookup(
                &path,
                context,
                source,
                comment.as_deref(),
                *count,
                lang.as_deref(),
                config,
            )?;
            writeln!(out, "{text}")?;
            Ok(0)
        }
        Command::Check {
            files,
            reference,
            json,
        } => {
            let set = load_set(files, config)?;
            let reference = reference.as_deref().map(ts::parse_file).transpose()?;
            let report = audit::audit_set(&set, reference.as_ref(), &config.audit);
            if *json {
                writeln!(out, "{}", report.to_json()?)?;
            } else {
                out.write_all(report.render_text().as_bytes())?;
            }
            Ok(u8::from(report.has_errors()))
        }
        Command::Stats { files, json } => {
            let set = load_set(files, config)?;
            let rows: Vec<StatsRow> = set
                .iter()
                .map(|loaded| {
                    StatsRow::new(
                        loaded.path.as_deref(),
                        &loaded.locale.to_string(),
                        loaded.catalog.stats(),
                    )
                })
                .collect();
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            } else {
                for row in &rows {
                    writeln!(out, "{row}")?;
                }
            }
            Ok(u8::from(!set.load_errors().is_empty()))
        }
        Command::Export {
            file,
            format,
            output,
        } => {
            let catalog = ts::parse_file(file)?;
            let rendered = export::export(&catalog, *format)?;
            emit(out, output.as_deref(), &rendered)?;
            Ok(0)
        }
        Command::Normalize { file, output } => {
            let catalog = ts::parse_file(file)?;
            emit(out, output.as_deref(), &ts::to_string(&catalog)?)?;
            Ok(0)
        }
    }
}

fn lookup(
    path: &Path,
    context: &str,
    source: &str,
    comment: Option<&str>,
    count: Option<u64>,
    lang: Option<&str>,
    config: &Config,
) -> Result<String> {
    let (set, lang) = if path.is_dir() {
        (CatalogSet::load_dir(path)?, lang.map(str::to_string))
    } else {
        // A single file is used whatever language was asked for.
        let loaded = CatalogSet::load_file(path)?;
        let lang = Some(loaded.locale.to_string());
        let mut set = CatalogSet::new();
        set.insert(loaded.locale, loaded.catalog);
        (set, lang)
    };
    let translator = Translator::new(set, lang, config);
    Ok(translate(&translator, context, source, comment, count))
}

fn translate(
    translator: &Translator,
    context: &str,
    source: &str,
    comment: Option<&str>,
    count: Option<u64>,
) -> String {
    match (count, comment) {
        (Some(n), _) => translator.tr_plural(context, source, n, &FormatArgs::new()),
        (None, Some(comment)) => translator.tr_disambiguated(context, source, comment),
        (None, None) => translator.tr(context, source),
    }
}

/// Catalogs named on the command line, directories expanded; the configured
/// catalog directory when none are given.
fn load_set(files: &[PathBuf], config: &Config) -> Result<CatalogSet> {
    if files.is_empty() {
        return CatalogSet::load_dir(config.general.catalog_dir_or_default());
    }
    let mut paths = Vec::new();
    for file in files {
        if file.is_dir() {
            paths.extend(catalog_files(file)?);
        } else {
            paths.push(file.clone());
        }
    }
    Ok(CatalogSet::load_files(&paths))
}

fn emit(out: &mut dyn Write, output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            export::write_atomic(path, content)?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => out.write_all(content.as_bytes())?,
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct StatsRow {
    catalog: String,
    locale: String,
    contexts: usize,
    messages: usize,
    finished: usize,
    unfinished: usize,
    vanished: usize,
    empty_finished: usize,
    completion_percent: f64,
}

impl StatsRow {
    fn new(path: Option<&Path>, locale: &str, stats: CatalogStats) -> Self {
        Self {
            catalog: path.map_or_else(|| locale.to_string(), |p| p.display().to_string()),
            locale: locale.to_string(),
            contexts: stats.contexts,
            messages: stats.messages,
            finished: stats.finished,
            unfinished: stats.unfinished,
            vanished: stats.vanished,
            empty_finished: stats.empty_finished,
            completion_percent: (stats.completion_percent() * 10.0).round() / 10.0,
        }
    }
}

impl std::fmt::Display for StatsRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {:.1}% of {} live messages; {} unfinished, {} empty, {} vanished, {} contexts",
            self.catalog,
            self.locale,
            self.completion_percent,
            self.messages - self.vanished,
            self.unfinished,
            self.empty_finished,
            self.vanished,
            self.contexts
        )
    }
}
