//! varsub - Main Entry Point
//!
//! Loads a request file, expands every string in it and prints a JSON
//! report on stdout. Diagnostics go to stderr, filtered by `RUST_LOG`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use varsub_application::{EnginePorts, ExpandStrings, ExpansionEngine};
use varsub_domain::{ExpansionErrorEntry, ExpansionStatus};
use varsub_infrastructure::{
    PlatformPathNormalizer, ProcessEnvironment, RequestFileLoader, to_json_stable,
};

#[derive(Serialize)]
struct Report<'a> {
    results: Vec<ReportEntry<'a>>,
}

#[derive(Serialize)]
struct ReportEntry<'a> {
    input: &'a str,
    result: &'a str,
    status: ExpansionStatus,
    errors: &'a [ExpansionErrorEntry],
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: varsub <request-file>")?;

    let request = RequestFileLoader::new().load(&path).await?;
    let input = request.to_input()?;

    tracing::info!(
        path = %path.display(),
        strings = input.strings.len(),
        "expanding request"
    );

    let engine = ExpansionEngine::new(EnginePorts {
        environment: Arc::new(ProcessEnvironment::new()),
        path_normalizer: Arc::new(PlatformPathNormalizer::for_current_platform()),
        workspace_folders: Arc::new(request.workspace_folders()),
        commands: Arc::new(request.command_executor()),
    });
    let output = ExpandStrings::new(engine).execute(&input).await;

    let report = Report {
        results: input
            .strings
            .iter()
            .zip(output.outcomes.iter().zip(&output.string_errors))
            .map(|(input, (outcome, errors))| ReportEntry {
                input,
                result: &outcome.result,
                status: outcome.status,
                errors: errors.entries(),
            })
            .collect(),
    };
    print!("{}", to_json_stable(&report)?);

    if !output.is_complete {
        tracing::warn!(
            incomplete = output.incomplete_count(),
            errors = output.errors.len(),
            "expansion finished with problems"
        );
    }

    Ok(())
}
