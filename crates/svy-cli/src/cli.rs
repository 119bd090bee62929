//! CLI argument definitions for the survey query tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use svy_model::{AgeRange, CategoryId, FilterSpec};

#[derive(Parser)]
#[command(
    name = "svy",
    version,
    about = "Survey Query CLI - Inspect labeled survey datasets",
    long_about = "Query labeled survey datasets from the command line.\n\n\
                  Loads a CSV bundle (responses plus variable and value-label\n\
                  sidecars), classifies questions into thematic categories, and\n\
                  reports answer distributions with optional demographic filters."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Report output format (table for terminals, json for scripts).
    #[arg(long = "output", value_enum, default_value = "table", global = true)]
    pub output: ReportFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize a dataset bundle (shape, origin, fingerprint).
    Info(BundleArgs),

    /// List the thematic categories of the classification scheme.
    Categories,

    /// List catalogued questions, optionally restricted to one category.
    Questions(QuestionsArgs),

    /// Report the answer distribution of one question.
    Distribution(DistributionArgs),
}

#[derive(Parser)]
pub struct BundleArgs {
    /// Path to the dataset bundle folder containing CSV files.
    #[arg(value_name = "BUNDLE_DIR")]
    pub bundle_dir: PathBuf,
}

#[derive(Parser)]
pub struct QuestionsArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    /// Restrict the listing to one category id.
    #[arg(long = "category", value_name = "ID")]
    pub category: Option<CategoryId>,
}

#[derive(Parser)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    /// Question identifier to tabulate (for example Q_1 or SEXO).
    #[arg(value_name = "QUESTION_ID")]
    pub question: String,

    /// Metric to report for each answer value.
    #[arg(long = "metric", value_enum, default_value = "count")]
    pub metric: MetricArg,

    /// Keep only respondents with this quality-of-life code.
    #[arg(long = "quality-of-life", value_name = "CODE")]
    pub quality_of_life: Option<f64>,

    /// Keep only respondents from this municipality code.
    #[arg(long = "municipality", value_name = "CODE")]
    pub municipality: Option<f64>,

    /// Keep only respondents with this sex code.
    #[arg(long = "sex", value_name = "CODE")]
    pub sex: Option<f64>,

    /// Keep only respondents with this education level code.
    #[arg(long = "education", value_name = "CODE")]
    pub education: Option<f64>,

    /// Keep only respondents in this socioeconomic stratum.
    #[arg(long = "socioeconomic", value_name = "CODE")]
    pub socioeconomic: Option<f64>,

    /// Keep only respondents at least this old (inclusive).
    #[arg(long = "age-min", value_name = "YEARS")]
    pub age_min: Option<f64>,

    /// Keep only respondents at most this old (inclusive).
    #[arg(long = "age-max", value_name = "YEARS")]
    pub age_max: Option<f64>,
}

impl DistributionArgs {
    /// Collect the demographic flags into a filter, or `None` when no flag
    /// was given.
    pub fn filter_spec(&self) -> Option<FilterSpec> {
        let mut spec = FilterSpec::new();
        if let Some(code) = self.quality_of_life {
            spec = spec.with_quality_of_life(code);
        }
        if let Some(code) = self.municipality {
            spec = spec.with_municipality(code);
        }
        if let Some(code) = self.sex {
            spec = spec.with_sex(code);
        }
        if let Some(code) = self.education {
            spec = spec.with_education(code);
        }
        if let Some(code) = self.socioeconomic {
            spec = spec.with_socioeconomic(code);
        }
        if self.age_min.is_some() || self.age_max.is_some() {
            spec = spec.with_age(AgeRange::new(self.age_min, self.age_max));
        }
        if spec.is_empty() { None } else { Some(spec) }
    }
}

/// CLI metric choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Count,
    Percentage,
}

/// CLI report format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
