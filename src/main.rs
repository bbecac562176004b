use anyhow::{Context, Result};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use uex_destinations::{
    cli::{Cli, Commands},
    logging::init_logging,
    snapshot::{FileSink, MemorySink, Sink, SnapshotWriter},
    upstream::HttpTransport,
    Pipeline,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();

    match cli.command() {
        Commands::Sync => {
            let pipeline = build_pipeline(&cli, output_sink(&cli)?)?;
            let summary = pipeline.run().await.context("Data update failed")?;
            tracing::info!(
                "Updated resources.json ({} commodities), {} and destinations.json ({} destinations) in {:.1}s",
                summary.commodities.kept,
                summary.commodities.audit_file,
                summary.destinations,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Commodities => {
            let pipeline = build_pipeline(&cli, output_sink(&cli)?)?;
            let report = pipeline
                .run_commodities()
                .await
                .context("Commodity update failed")?;
            tracing::info!(
                "Kept {} of {} commodities in {:.1}s",
                report.kept,
                report.fetched,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Destinations => {
            let pipeline = build_pipeline(&cli, output_sink(&cli)?)?;
            let total = pipeline
                .run_destinations()
                .await
                .context("Destination update failed")?;
            tracing::info!(
                "Wrote {} destinations in {:.1}s",
                total,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Recount => {
            let total = SnapshotWriter::new(output_sink(&cli)?)
                .recount()
                .context("Failed to recount destinations")?;
            tracing::info!("Recounted {} destinations", total);
        }

        Commands::ListSystems => {
            // Read-only: never touches the output directory.
            let pipeline = build_pipeline(&cli, MemorySink::new())?;
            let systems = pipeline
                .list_systems()
                .await
                .context("Failed to list star systems")?;
            println!("Star systems:\n");
            for (system, selected) in systems {
                let mark = if selected { "*" } else { " " };
                println!("  {} {:>4}  {}", mark, system.id, system.name);
            }
        }
    }

    Ok(())
}

fn output_sink(cli: &Cli) -> Result<FileSink> {
    FileSink::new(&cli.output_dir).context("Failed to prepare output directory")
}

fn build_pipeline<S: Sink>(cli: &Cli, sink: S) -> Result<Pipeline<HttpTransport, S>> {
    let transport = HttpTransport::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))
        .context("Failed to create HTTP client")?;
    Ok(Pipeline::new(transport, sink, cli.pipeline_config()))
}
