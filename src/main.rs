//! Strongpass CLI
//!
//! Command-line interface over the strongpass library: generate
//! passwords, analyze their strength, and validate import documents.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use strongpass::{
    analysis::StrengthAnalyzer,
    config::{ConfigError, FileConfig},
    generation::{GenerationError, Generator, MAX_COUNT},
    metrics::{MetricsError, MetricsRegistry, MetricsSnapshot},
    validation::{validate_import_data, validate_settings, RangeError},
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[clap(long)]
    json: bool,

    /// Print Prometheus metrics after the command.
    #[clap(long)]
    metrics: bool,

    /// Enable debug logging on stderr.
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate random passwords.
    Generate {
        /// Password length (4-64).
        #[clap(short, long)]
        length: Option<usize>,

        /// Exclude A-Z.
        #[clap(long)]
        no_uppercase: bool,

        /// Exclude a-z.
        #[clap(long)]
        no_lowercase: bool,

        /// Exclude 0-9.
        #[clap(long)]
        no_numbers: bool,

        /// Exclude symbols.
        #[clap(long)]
        no_symbols: bool,

        /// Number of passwords.
        #[clap(short = 'n', long)]
        count: Option<usize>,

        /// Split into groups of four joined by this separator.
        #[clap(long)]
        separator: Option<String>,

        /// Print a strength analysis for each password.
        #[clap(long)]
        analyze: bool,
    },
    /// Generate a numeric PIN.
    Pin {
        /// PIN length (4-12).
        #[clap(short, long, default_value_t = 4)]
        length: usize,
    },
    /// Generate from a pattern such as 2u3l2n1s.
    Pattern {
        /// Pattern of <count><u|l|n|s> tokens.
        spec: String,
    },
    /// Generate from a custom alphabet.
    Custom {
        /// Password length.
        #[clap(short, long)]
        length: usize,

        /// Characters to draw from.
        alphabet: String,
    },
    /// Generate a pronounceable password.
    Memorable {
        /// Password length (4-64).
        #[clap(short, long)]
        length: Option<usize>,
    },
    /// Show standard, strong and memorable suggestions.
    Suggest,
    /// Analyze password strength.
    ///
    /// Passwords given on the command line may end up in shell
    /// history.
    Analyze {
        /// Passwords to analyze.
        #[clap(required = true)]
        passwords: Vec<String>,

        /// Print a full security report per password.
        #[clap(long)]
        report: bool,
    },
    /// Validate a JSON export document and its settings.
    CheckImport {
        /// JSON file to check.
        file: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("import rejected: {}", .0.join(", "))]
    InvalidImport(Vec<String>),
}

/// Shared state for a single invocation.
struct Context {
    config: FileConfig,
    analyzer: StrengthAnalyzer,
    generator: Generator,
    json: bool,
    metrics: Option<MetricsRegistry>,
}

impl Context {
    fn emit<T: Serialize + ?Sized>(
        &self,
        value: &T,
        plain: impl FnOnce() -> String,
    ) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", plain());
        }
        Ok(())
    }

    fn generated(&self, count: usize) {
        if let Some(metrics) = &self.metrics {
            metrics.record_generated(count);
        }
    }

    fn checked<T>(&self, result: Result<T, GenerationError>) -> Result<T, CliError> {
        if result.is_err() {
            if let Some(metrics) = &self.metrics {
                metrics.record_generation_error();
            }
        }
        Ok(result?)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("Strongpass v{}", strongpass::VERSION);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let metrics = if cli.metrics || config.output.metrics {
        Some(MetricsRegistry::new()?)
    } else {
        None
    };

    let mut ctx = Context {
        analyzer: config.analyzer(),
        json: cli.json || config.output.json,
        config,
        generator: Generator::from_os_entropy(),
        metrics,
    };

    execute(&mut ctx, cli.cmd)?;

    if let Some(metrics) = &ctx.metrics {
        metrics.update(&MetricsSnapshot::from_rng(ctx.generator.rng()));
        print!("{}", metrics.encode()?);
    }
    Ok(())
}

fn execute(ctx: &mut Context, cmd: Command) -> Result<(), CliError> {
    match cmd {
        Command::Generate {
            length,
            no_uppercase,
            no_lowercase,
            no_numbers,
            no_symbols,
            count,
            separator,
            analyze,
        } => {
            let mut options = ctx.config.generation_options();
            if let Some(length) = length {
                options.length = length;
            }
            options.include_uppercase &= !no_uppercase;
            options.include_lowercase &= !no_lowercase;
            options.include_numbers &= !no_numbers;
            options.include_symbols &= !no_symbols;
            let count = count.unwrap_or(ctx.config.generation.count);

            info!(length = options.length, count, "Generating passwords");
            let passwords = match &separator {
                Some(sep) => {
                    let result = RangeError::check(
                        "count",
                        i64::try_from(count).unwrap_or(i64::MAX),
                        1,
                        MAX_COUNT as i64,
                    )
                    .map_err(GenerationError::from)
                    .and_then(|_| {
                        (0..count)
                            .map(|_| ctx.generator.generate_with_separators(&options, sep))
                            .collect::<Result<Vec<_>, _>>()
                    });
                    ctx.checked(result)?
                }
                None => {
                    let result = ctx.generator.generate_multiple(count, &options);
                    ctx.checked(result)?
                }
            };
            ctx.generated(passwords.len());

            if analyze {
                let entries = ctx.analyzer.analyze_batch(passwords.as_slice());
                record_analyses(ctx, entries.iter().map(|e| &e.analysis));

                #[derive(Serialize)]
                struct Analyzed<'a> {
                    password: &'a str,
                    analysis: &'a strongpass::StrengthAnalysis,
                }
                let rows: Vec<_> = passwords
                    .iter()
                    .zip(&entries)
                    .map(|(password, entry)| Analyzed {
                        password,
                        analysis: &entry.analysis,
                    })
                    .collect();
                ctx.emit(&rows, || {
                    rows.iter()
                        .map(|row| {
                            format!(
                                "{}  {} ({}/100, {:.1} bits, {})",
                                row.password,
                                row.analysis.tier,
                                row.analysis.score,
                                row.analysis.entropy_bits,
                                row.analysis.crack_time
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            } else {
                ctx.emit(&passwords, || passwords.join("\n"))
            }
        }
        Command::Pin { length } => {
            let result = ctx.generator.generate_pin(length);
            let pin = ctx.checked(result)?;
            ctx.generated(1);
            ctx.emit(&pin, || pin.clone())
        }
        Command::Pattern { spec } => {
            let result = ctx.generator.generate_pattern(&spec);
            let password = ctx.checked(result)?;
            ctx.generated(1);
            ctx.emit(&password, || password.clone())
        }
        Command::Custom { length, alphabet } => {
            let result = ctx.generator.generate_with_custom_set(length, &alphabet);
            let password = ctx.checked(result)?;
            ctx.generated(1);
            ctx.emit(&password, || password.clone())
        }
        Command::Memorable { length } => {
            let length = length.unwrap_or(ctx.config.generation.length);
            let result = ctx.generator.generate_memorable(length);
            let password = ctx.checked(result)?;
            ctx.generated(1);
            ctx.emit(&password, || password.clone())
        }
        Command::Suggest => {
            let options = ctx.config.generation_options();
            let result = ctx.generator.suggestions(&options);
            let suggestions = ctx.checked(result)?;
            ctx.generated(suggestions.len());
            ctx.emit(&suggestions, || {
                suggestions
                    .iter()
                    .map(|s| format!("{:<10} {}  ({})", s.name, s.password, s.description))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::Analyze { passwords, report } => {
            if report {
                let reports: Vec<_> = passwords.iter().map(|p| ctx.analyzer.report(p)).collect();
                record_analyses(ctx, reports.iter().map(|r| &r.analysis));
                ctx.emit(&reports, || {
                    reports
                        .iter()
                        .map(|r| {
                            let mut lines = vec![
                                format!(
                                    "{}  {} ({}/100)",
                                    r.masked_password, r.analysis.tier, r.analysis.score
                                ),
                                format!("  risk: {}", r.risk_level),
                                format!("  compromised: {}", r.compromised),
                                format!("  crack time: {}", r.analysis.crack_time),
                            ];
                            lines.extend(
                                r.analysis
                                    .recommendations
                                    .iter()
                                    .map(|rec| format!("  - {}", rec)),
                            );
                            lines.join("\n")
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            } else {
                let entries = ctx.analyzer.analyze_batch(passwords.as_slice());
                record_analyses(ctx, entries.iter().map(|e| &e.analysis));
                ctx.emit(&entries, || {
                    entries
                        .iter()
                        .map(|e| {
                            format!(
                                "{}  {} ({}/100, {:.1} bits, {})",
                                e.masked_password,
                                e.analysis.tier,
                                e.analysis.score,
                                e.analysis.entropy_bits,
                                e.analysis.crack_time
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            }
        }
        Command::CheckImport { file } => {
            let content = std::fs::read_to_string(&file).map_err(|source| CliError::Read {
                path: file.clone(),
                source,
            })?;
            let document: serde_json::Value = serde_json::from_str(&content)?;

            let import = validate_import_data(&document);
            let settings =
                validate_settings(&serde_json::Value::Object(import.data.settings.clone()));

            let mut errors = import.errors.clone();
            errors.extend(settings.errors.iter().cloned());

            #[derive(Serialize)]
            struct ImportSummary<'a> {
                valid: bool,
                errors: &'a [String],
                passwords: usize,
                categories: usize,
                history: usize,
                settings: &'a strongpass::validation::SanitizedSettings,
            }
            let summary = ImportSummary {
                valid: errors.is_empty(),
                errors: &errors,
                passwords: import.data.passwords.len(),
                categories: import.data.categories.len(),
                history: import.data.history.len(),
                settings: &settings.sanitized,
            };
            ctx.emit(&summary, || {
                format!(
                    "{} passwords, {} categories, {} history entries",
                    summary.passwords, summary.categories, summary.history
                )
            })?;

            if errors.is_empty() {
                Ok(())
            } else {
                Err(CliError::InvalidImport(errors))
            }
        }
    }
}

fn record_analyses<'a>(
    ctx: &Context,
    analyses: impl Iterator<Item = &'a strongpass::StrengthAnalysis>,
) {
    if let Some(metrics) = &ctx.metrics {
        for analysis in analyses {
            metrics.record_analysis(analysis);
        }
    }
}
