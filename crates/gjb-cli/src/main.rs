use anyhow::Result;
use clap::{Parser, Subcommand};
use gjb_sync::{SyncConfig, SyncPipeline};
use gjb_vocab::VocabularyBundle;

#[derive(Debug, Parser)]
#[command(name = "gjb-cli")]
#[command(about = "Green Jobs Board command-line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Categorise the latest scrape batch and diff it against the live stores.
    Sync,
    /// Render the most recent run reports as markdown.
    Report {
        #[arg(long, default_value_t = 3)]
        runs: usize,
    },
    /// Load the vocabulary bundle and print per-axis counts.
    CheckVocab,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => {
            let config = SyncConfig::from_env();
            let pipeline = SyncPipeline::new(config)?;
            let summary = pipeline.run_once().await?;
            println!(
                "sync complete: run_id={} classified={} inserts={} removals={} review={} excluded={} reports={}",
                summary.run_id,
                summary.classified,
                summary.inserts,
                summary.removals,
                summary.review_items,
                summary.exclusions.total(),
                summary.reports_dir
            );

            if let Some(mut scheduler) = pipeline.maybe_build_scheduler().await? {
                scheduler.start().await?;
                println!("scheduler running; press ctrl-c to stop");
                tokio::signal::ctrl_c().await?;
            }
        }
        Commands::Report { runs } => {
            let config = SyncConfig::from_env();
            let markdown = gjb_sync::report_recent_runs(runs, &config.reports_dir)?;
            println!("{markdown}");
        }
        Commands::CheckVocab => {
            let config = SyncConfig::from_env();
            let bundle = VocabularyBundle::load(&config.vocab_dir)?;
            println!(
                "regions: {} initial labels ({} keywords), {} alias labels",
                bundle.regions_initial.len(),
                bundle.regions_initial.keyword_count(),
                bundle.regions_exact.len()
            );
            println!(
                "job functions: {} labels ({} keywords)",
                bundle.job_functions.len(),
                bundle.job_functions.keyword_count()
            );
            println!(
                "seniority: {} initial labels, {} refining rule sets",
                bundle.seniority_initial.len(),
                bundle.seniority_refining.len()
            );
        }
    }

    Ok(())
}
