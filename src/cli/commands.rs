//! Command implementations for the Lately CLI.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{LatelyError, Result};
use crate::provider::activation::{ActivationOutcome, CommandActivator};
use crate::provider::meta::ExtensionIconResolver;
use crate::provider::recent::RecentFilesProvider;
use crate::provider::registry::SearchProvider;
use crate::query::terms::Terms;
use crate::search::config::SearchConfig;
use crate::source::RecordSource;
use crate::source::json::JsonSource;

/// Execute a CLI command.
pub fn execute_command(args: LatelyArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_history(search_args, &args),
        Command::List(list_args) => list_history(list_args, &args),
        Command::Open(open_args) => open_best_match(open_args, &args),
    }
}

/// Load the search configuration named on the command line, or the defaults.
pub fn load_config(args: &LatelyArgs) -> Result<SearchConfig> {
    match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            SearchConfig::from_json_file(path)
        }
        None => Ok(SearchConfig::default()),
    }
}

fn open_provider(
    records_file: &Path,
    config: SearchConfig,
    activator: CommandActivator,
) -> Result<RecentFilesProvider> {
    let source = Arc::new(JsonSource::open(records_file)?);
    Ok(RecentFilesProvider::new(source, Arc::new(activator), config)?
        .with_icon_resolver(Arc::new(ExtensionIconResolver::new())))
}

/// Search the history, narrowing once per `--refine` query.
fn search_history(args: &SearchArgs, cli_args: &LatelyArgs) -> Result<()> {
    let config = load_config(cli_args)?.with_skip_missing_files(!args.include_missing);
    let provider = open_provider(&args.records_file, config, CommandActivator::new())?;

    let start_time = Instant::now();

    let mut terms = Terms::parse(&args.query.join(" "));
    let mut hits = provider.initial_result_set(&terms)?;
    for query in &args.refine {
        terms = Terms::parse(query);
        hits = provider.subsearch_result_set(&hits, &terms);
    }

    let duration = start_time.elapsed();
    let total_hits = hits.len();
    let shown = args.limit.unwrap_or(total_hits).min(total_hits);

    output_result(
        &SearchOutput {
            terms: terms.as_slice().to_vec(),
            total_hits,
            duration_us: elapsed_micros(duration),
            results: provider.result_metas(&hits[..shown]),
        },
        cli_args,
    )
}

fn elapsed_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// List the records of the history.
fn list_history(args: &ListArgs, cli_args: &LatelyArgs) -> Result<()> {
    let source = JsonSource::open(&args.records_file)?;
    let records = source.list_current_records()?;

    output_result(
        &ListOutput {
            total_records: records.len(),
            records,
        },
        cli_args,
    )
}

/// Open the best match for a query.
fn open_best_match(args: &OpenArgs, cli_args: &LatelyArgs) -> Result<()> {
    let activator = CommandActivator::new()
        .with_app_launcher(args.app_launcher.clone())
        .with_default_opener(Some(args.opener.clone()));
    let provider = open_provider(&args.records_file, load_config(cli_args)?, activator.clone())?;

    let terms = Terms::parse(&args.query.join(" "));
    let hits = provider.initial_result_set(&terms)?;
    let best = hits
        .first()
        .ok_or_else(|| LatelyError::other(format!("no record matches \"{terms}\"")))?;
    let record = &best.record;

    let output = if args.dry_run {
        OpenOutput {
            name: record.name.clone(),
            location: record.location.clone(),
            launched: false,
            command_line: Some(activator.command_line(&record.launch_target, &record.location)?),
            reason: None,
        }
    } else {
        let outcome = provider.activate_result(best);
        OpenOutput {
            name: record.name.clone(),
            location: record.location.clone(),
            launched: outcome.is_launched(),
            command_line: None,
            reason: match outcome {
                ActivationOutcome::Launched => None,
                ActivationOutcome::Failed(reason) => Some(reason),
            },
        }
    };

    output_result(&output, cli_args)
}
