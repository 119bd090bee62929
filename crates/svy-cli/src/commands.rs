use anyhow::Result;
use tracing::info_span;

use svy_cli::pipeline::open_service;
use svy_cli::render::{
    applied_filters_line, categories_table, distribution_table, info_table, questions_table,
};
use svy_model::MetricMode;
use svy_taxonomy::Taxonomy;

use crate::cli::{BundleArgs, DistributionArgs, MetricArg, QuestionsArgs, ReportFormatArg};

pub fn run_info(args: &BundleArgs, format: ReportFormatArg) -> Result<()> {
    let service = open_service(&args.bundle_dir)?;
    let info = service.info()?;
    match format {
        ReportFormatArg::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        ReportFormatArg::Table => println!("{}", info_table(&info)),
    }
    Ok(())
}

pub fn run_categories(format: ReportFormatArg) -> Result<()> {
    let taxonomy = Taxonomy::survey_2024();
    match format {
        ReportFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(taxonomy.categories())?);
        }
        ReportFormatArg::Table => println!("{}", categories_table(taxonomy.categories())),
    }
    Ok(())
}

pub fn run_questions(args: &QuestionsArgs, format: ReportFormatArg) -> Result<()> {
    let service = open_service(&args.bundle.bundle_dir)?;
    let questions = service.questions(args.category)?;
    match format {
        ReportFormatArg::Json => println!("{}", serde_json::to_string_pretty(&questions)?),
        ReportFormatArg::Table => {
            println!("{}", questions_table(&questions));
            println!("{} questions", questions.len());
        }
    }
    Ok(())
}

pub fn run_distribution(args: &DistributionArgs, format: ReportFormatArg) -> Result<()> {
    let span = info_span!("distribution", question = %args.question);
    let _guard = span.enter();
    let service = open_service(&args.bundle.bundle_dir)?;
    let mode = metric_mode(args.metric);
    let distribution = match args.filter_spec() {
        Some(spec) => service.filtered_distribution(&args.question, mode, &spec)?,
        None => service.distribution(&args.question, mode)?,
    };
    match format {
        ReportFormatArg::Json => println!("{}", serde_json::to_string_pretty(&distribution)?),
        ReportFormatArg::Table => {
            println!("{}: {}", distribution.identifier, distribution.text);
            if let Some(applied) = &distribution.applied
                && !applied.is_empty()
            {
                println!("Filters: {}", applied_filters_line(applied));
            }
            println!("{}", distribution_table(&distribution));
        }
    }
    Ok(())
}

fn metric_mode(metric: MetricArg) -> MetricMode {
    match metric {
        MetricArg::Count => MetricMode::Count,
        MetricArg::Percentage => MetricMode::Percentage,
    }
}
