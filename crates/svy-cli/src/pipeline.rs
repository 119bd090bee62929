//! Bundle-to-service wiring shared by the CLI commands.

use std::path::Path;

use anyhow::{Context, Result};

use svy_ingest::SurveyBundle;
use svy_model::SurveyError;
use svy_query::{DatasetSource, SurveyService};

/// Open a dataset bundle folder and wrap it in a query service.
///
/// The folder is scanned here, so discovery problems surface before the
/// first query; the CSV files themselves are only read once a query runs.
pub fn open_service(bundle_dir: &Path) -> Result<SurveyService<impl DatasetSource>> {
    let bundle = SurveyBundle::open(bundle_dir)
        .with_context(|| format!("open bundle {}", bundle_dir.display()))?;
    Ok(SurveyService::new(move || bundle.load()))
}

/// Map a command failure to a process exit code.
///
/// Unknown question or category identifiers exit with 2 so scripts can tell
/// caller mistakes from operational failures, which exit with 1.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<SurveyError>() {
        Some(source) if source.is_caller_error() => 2,
        _ => 1,
    }
}
