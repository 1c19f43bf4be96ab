//! Digital Economy CLI
//!
//! Command-line companion for the dashboard:
//! - Inspect the route table and resolve paths
//! - Simulate a navigation sequence
//! - Check the evaluation backend and list stored records
//! - Serve the compiled front-end

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use digital_economy::client::{ApiClient, EvaluationApi};
use digital_economy::config::{generate_default_config, Config};
use digital_economy::evaluation::{DateRangeResult, Subsystem};
use digital_economy::host::{self, HostState};
use digital_economy::logging::{init_logging, with_startup_logging};
use digital_economy::navigation::{MemoryHistory, Navigator};
use digital_economy::routes::{RouteTable, RouteTarget};
use digital_economy::ui::Locale;

#[derive(Parser)]
#[command(name = "digital-economy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ecosystem evaluation dashboard tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the route table
    Routes,

    /// Resolve paths through the route table
    Resolve {
        /// Paths to resolve
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Navigate through a sequence of paths and print the history
    Navigate {
        /// Paths, in navigation order
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Fetch the latest overall evaluation from the backend
    Check,

    /// List stored records entered between two dates (inclusive)
    Records {
        /// First day, YYYY-MM-DD
        from: NaiveDate,
        /// Last day, YYYY-MM-DD
        to: NaiveDate,
    },

    /// Serve the compiled front-end
    Serve {
        /// Directory containing index.html
        #[arg(short, long)]
        dist: Option<PathBuf>,
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = with_startup_logging(|| match &cli.config {
        Some(path) => Config::load_with_env(path),
        None => Ok(Config::load_default()),
    })?;
    config.validate().context("Invalid configuration")?;

    init_logging(&config.logging);

    let table = Arc::new(RouteTable::standard());

    match cli.command {
        Commands::Routes => {
            println!("{:<12} {}", "PATH", "TARGET");
            for binding in table.bindings() {
                let target = match &binding.target {
                    RouteTarget::Page(page) => format!("{} ({})", page, page.title()),
                    RouteTarget::Redirect(to) => format!("→ {}", to),
                };
                println!("{:<12} {}", binding.path, target);
            }
        }

        Commands::Resolve { paths } => {
            let mut failed = false;
            for path in paths {
                match table.resolve(&path) {
                    Ok(resolution) if resolution.is_redirected() => println!(
                        "{} → {} ({}) via {}",
                        path,
                        resolution.page,
                        resolution.path,
                        resolution.redirects.join(" → ")
                    ),
                    Ok(resolution) => println!("{} → {}", path, resolution.page),
                    Err(e) => {
                        failed = true;
                        println!("{} → error: {}", path, e);
                    }
                }
            }
            if failed {
                std::process::exit(1);
            }
        }

        Commands::Navigate { paths } => {
            let mut navigator = Navigator::new(Arc::clone(&table), MemoryHistory::new());
            for path in paths {
                match navigator.navigate(&path) {
                    Ok(pending) => {
                        let rendered = navigator.complete(pending)?;
                        println!("{} → rendered {}", path, rendered.page);
                    }
                    Err(e) => println!("{} → {}", path, e),
                }
            }
            println!("History: {}", navigator.history().entries().join(" → "));
        }

        Commands::Check => {
            let client = ApiClient::new(config.api.client_config())?;
            tracing::info!("Checking backend at {}", client.config().base_url);

            let api = EvaluationApi::new(client);
            let overall = api
                .overall()
                .await
                .context("Failed to fetch overall evaluation")?;

            for subsystem in Subsystem::ALL {
                let grade = overall.evaluation(subsystem);
                println!(
                    "{:<6} {}",
                    subsystem.label(),
                    if grade.is_empty() { "-" } else { grade }
                );
            }
        }

        Commands::Records { from, to } => {
            anyhow::ensure!(from <= to, "{} is after {}", from, to);
            let start = from.and_hms_opt(0, 0, 0).context("Invalid start date")?;
            let end = to.and_hms_opt(23, 59, 59).context("Invalid end date")?;

            let api = EvaluationApi::new(ApiClient::new(config.api.client_config())?);
            let result = api
                .records_by_date_range(start, end)
                .await
                .context("Failed to fetch records")?;

            for line in record_lines(&result, config.ui.locale) {
                println!("{}", line);
            }
        }

        Commands::Serve { dist, host, port } => {
            let mut host_config = config.host.clone();
            if let Some(dist) = dist {
                host_config.dist_dir = dist;
            }
            if let Some(host) = host {
                host_config.host = host;
            }
            if let Some(port) = port {
                host_config.port = port;
            }

            if !host_config.dist_dir.join("index.html").exists() {
                tracing::warn!(
                    "No index.html in {:?}; build the front-end first",
                    host_config.dist_dir
                );
            }

            let state = HostState::new(host_config.dist_dir.clone(), Arc::clone(&table));
            host::serve(state, &host_config.addr()).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// One line per record, entry times in the configured locale
fn record_lines(result: &DateRangeResult, locale: Locale) -> Vec<String> {
    let mut lines: Vec<String> = result
        .records
        .iter()
        .map(|record| format!("{:>6}  {}", record.id, locale.format_datetime(&record.entry_time)))
        .collect();
    lines.push(format!("{} record(s)", result.total_count));
    lines
}
