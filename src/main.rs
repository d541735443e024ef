use anyhow::Result;
use pm2uigf::{
    cli::{Cli, Commands, OverrideCommands},
    io::{load_json, save_json},
    overrides::{init_table, merge_entries, todo_entries, OverrideTable, TodoBatch, UnresolvedReport},
    pipeline::run_convert,
    reference::{HttpFetcher, ALL_SOURCES},
    validate::{JsonSchemaValidator, SchemaValidator},
    ConsoleUi, ConvertError, SilentUi,
};
use serde_json::Value;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    let default_filter = if cli.verbose { "pm2uigf=info" } else { "pm2uigf=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Convert(args) => {
            let start = Instant::now();
            let quiet = args.quiet;
            let settings = args.into_settings()?;
            let fetcher = HttpFetcher::new(settings.http_timeout)?;

            let summary = if quiet {
                run_convert(&settings, &fetcher, &mut SilentUi::new())?
            } else {
                run_convert(&settings, &fetcher, &mut ConsoleUi::new())?
            };

            if !quiet {
                println!(
                    "\nCreated {:?} ({} records, {} dropped, {} without rank) in {:.1}s",
                    settings.output,
                    summary.v4_records,
                    summary.dropped,
                    summary.unresolved,
                    start.elapsed().as_secs_f64()
                );
            }
        }

        Commands::Overrides { command } => match command {
            OverrideCommands::Init {
                missing,
                override_path,
            } => {
                println!("Reading {:?}", missing);
                let report: UnresolvedReport = load_json(&missing)?;

                let table = init_table(&report);
                save_json(&override_path, &table)?;
                println!("Created {:?} with {} entries", override_path, table.items.len());
                println!("Fill in rank_type for each entry by hand.");
            }

            OverrideCommands::Todo {
                missing,
                override_path,
                out,
            } => {
                println!("Reading {:?}", missing);
                let report: UnresolvedReport = load_json(&missing)?;
                println!("Reading {:?}", override_path);
                let table: OverrideTable = load_json(&override_path)?;

                let batch = TodoBatch {
                    base_missing_file: missing.display().to_string(),
                    items: todo_entries(&report, &table),
                };
                save_json(&out, &batch)?;
                println!("Wrote {:?} with {} new items", out, batch.items.len());
                println!("Fill in rank_type, then run `overrides merge`.");
            }

            OverrideCommands::Merge {
                override_path,
                todo,
            } => {
                println!("Reading {:?}", override_path);
                let mut table: OverrideTable = load_json(&override_path)?;
                println!("Reading {:?}", todo);
                let batch: TodoBatch = load_json(&todo)?;

                let stats = merge_entries(&mut table, &batch.items);
                save_json(&override_path, &table)?;
                println!(
                    "Updated {:?}: added {}, updated {}",
                    override_path, stats.added, stats.updated
                );
            }
        },

        Commands::Validate { schema, data } => {
            println!("Reading schema {:?}", schema);
            let schema: Value = load_json(&schema)?;
            println!("Reading data {:?}", data);
            let data: Value = load_json(&data)?;

            match JsonSchemaValidator.validate(&schema, &data) {
                Ok(()) => println!("Document conforms to the schema"),
                Err(ConvertError::Validation {
                    path,
                    message,
                    rule,
                }) => {
                    println!("Schema validation failed");
                    println!("  path:    {}", path);
                    println!("  message: {}", message);
                    println!("  rule:    {}", rule);
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::ListSources => {
            println!("Reference sources (merge order):\n");
            for source in ALL_SOURCES {
                println!("  {:14} {}", source.key, source.url);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
