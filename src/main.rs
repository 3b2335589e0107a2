mod cli;
mod config;

use cli::Args;
use config::Settings;
use ots_sbom::adapters::outbound::console::StderrProgressReporter;
use ots_sbom::adapters::outbound::filesystem::SyftJsonReader;
use ots_sbom::adapters::outbound::network::RegistryResolver;
use ots_sbom::application::dto::EnrichStats;
use ots_sbom::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use ots_sbom::application::read_models::LibraryDocumentBuilder;
use ots_sbom::application::use_cases::EnrichSbomUseCase;
use ots_sbom::ports::outbound::{OutputPresenter, ReportFormatter};
use ots_sbom::shared::error::ExitCode;
use ots_sbom::shared::Result;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Parse command-line arguments (clap exits with code 2 on invalid input)
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = config::load_config(args.config.as_deref(), &cwd)?;
    let Settings {
        request,
        format,
        output,
        request_timeout,
        github_token,
    } = config::merge(args, config)?;

    tracing::debug!(
        workers = request.workers,
        timeout_secs = request.task_timeout.as_secs(),
        max_parents = ?request.max_parents,
        match_mode = %request.match_mode,
        "effective settings"
    );

    // Create adapters (Dependency Injection)
    let sbom_reader = SyftJsonReader::new();
    let resolver = RegistryResolver::new(request_timeout, github_token)?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = EnrichSbomUseCase::new(sbom_reader, resolver, progress_reporter);
    let response = use_case.execute(request).await?;

    if response.dry_run {
        return Ok(());
    }

    print_summary(&response.stats);

    eprintln!("{}", FormatterFactory::progress_message(format));
    let document = LibraryDocumentBuilder::build(&response.libraries);
    let formatted_output = FormatterFactory::create(format).format(&document)?;

    PresenterFactory::create(PresenterType::from_output(output)).present(&formatted_output)?;

    Ok(())
}

fn print_summary(stats: &EnrichStats) {
    eprintln!(
        "📊 {} package(s): {} resolved, {} failed, {} unsupported",
        stats.total_packages, stats.resolved, stats.failed, stats.unsupported
    );
    if stats.failed > 0 {
        eprintln!("   Failed packages keep empty metadata; run with -v for details.");
    }
}
