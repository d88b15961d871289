use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use ddi_lookup::{output, Catalog, Fetcher, LookupError, LookupRequest, PersistError, Settings};

#[derive(Parser)]
#[command(
    name = "ddi_lookup",
    about = "Find a drug interaction page in a sitemap catalog and extract it"
)]
struct Cli {
    /// Sitemap XML listing the interaction pages
    catalog: PathBuf,
    /// First drug name
    drug1: String,
    /// Second drug name (order does not matter)
    drug2: String,
    /// Where to write the extracted JSON (default: interaction_data.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Scrape every matching page instead of only the first
    #[arg(long)]
    all: bool,
    /// Worker threads for --all
    #[arg(short = 'w', long)]
    workers: Option<usize>,
    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,
    /// Print the summary but do not write JSON
    #[arg(long)]
    no_save: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::from_env();
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(workers) = self.workers {
            settings.workers = workers;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        settings
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = cli.settings();

    let code = match run(&cli, &settings) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code(&e)
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    code
}

fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<ExitCode> {
    println!(
        "\nSearching for interactions between '{}' and '{}'...",
        cli.drug1, cli.drug2
    );
    println!("{}", "-".repeat(70));

    if cli.all {
        return run_all(cli, settings);
    }

    let request = LookupRequest {
        catalog_path: cli.catalog.clone(),
        drug1: cli.drug1.clone(),
        drug2: cli.drug2.clone(),
    };
    let found = match ddi_lookup::check_interaction(&request, settings) {
        Ok(found) => found,
        Err(e @ LookupError::NoMatch { .. }) => return Ok(report_no_match(cli, &e)),
        Err(e @ LookupError::Catalog(_)) => return Err(e).context("Failed to load catalog"),
        Err(e) => return Err(e).context("Could not scrape detailed information from URL"),
    };

    print_matches(&found.matches);
    println!("\n{}", output::summary(&found.record));
    persist(cli, settings, &found.record)?;
    Ok(ExitCode::SUCCESS)
}

/// Scrape every matching page and save them as one JSON array.
fn run_all(cli: &Cli, settings: &Settings) -> anyhow::Result<ExitCode> {
    let catalog = Catalog::load(&cli.catalog)
        .map_err(LookupError::from)
        .context("Failed to load catalog")?;

    let matches = match ddi_lookup::resolve(&catalog, &cli.drug1, &cli.drug2) {
        Ok(matches) => matches,
        Err(e @ LookupError::NoMatch { .. }) => return Ok(report_no_match(cli, &e)),
        Err(e) => return Err(e.into()),
    };
    print_matches(&matches);

    let fetcher = Fetcher::new(settings).map_err(LookupError::from)?;
    let mut records = Vec::new();
    let mut first_error = None;
    for result in fetcher.scrape_many(&matches, settings.workers) {
        match result {
            Ok(record) => {
                println!("\n{}", output::summary(&record));
                records.push(record);
            }
            Err(e) => {
                warn!("{}", e);
                first_error.get_or_insert(e);
            }
        }
    }
    if records.is_empty() {
        if let Some(e) = first_error {
            return Err(LookupError::from(e)).context("Could not scrape any matching page");
        }
    }
    persist(cli, settings, &records)?;
    Ok(ExitCode::SUCCESS)
}

fn report_no_match(cli: &Cli, e: &LookupError) -> ExitCode {
    println!("\nNo interaction found between '{}' and '{}'.", cli.drug1, cli.drug2);
    println!("Note: This doesn't guarantee safety - always consult a healthcare professional.");
    code_for(e)
}

fn print_matches(matches: &[String]) {
    println!("\nINTERACTION FOUND: {} interaction(s) detected!\n", matches.len());
    for (i, url) in matches.iter().enumerate() {
        println!("{}. {}", i + 1, url);
    }
}

fn persist<T: serde::Serialize + ?Sized>(
    cli: &Cli,
    settings: &Settings,
    value: &T,
) -> anyhow::Result<()> {
    if cli.no_save {
        return Ok(());
    }
    output::save_json(&settings.output, value)?;
    println!("\nDetailed interaction data saved to {}", settings.output.display());
    Ok(())
}

fn code_for(e: &LookupError) -> ExitCode {
    ExitCode::from(e.exit_code() as u8)
}

fn exit_code(e: &anyhow::Error) -> ExitCode {
    if let Some(lookup) = e.downcast_ref::<LookupError>() {
        code_for(lookup)
    } else if let Some(persist) = e.downcast_ref::<PersistError>() {
        ExitCode::from(persist.exit_code() as u8)
    } else {
        ExitCode::FAILURE
    }
}
