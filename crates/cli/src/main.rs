use anyhow::Context;
use archdocs_site::{Route, SiteBuilder};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "archdocs")]
#[command(about = "Build and check the Arch Network documentation site")]
struct Cli {
    /// Project root containing archdocs.yaml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Deployment environment (defaults to $ARCHDOCS_ENV, then production)
    #[arg(long, global = true)]
    env: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site
    Build,
    /// Validate and compile all content without writing output
    Check,
    /// Show how a request path is served
    Resolve {
        /// Request path, optionally with a query string
        path: String,
    },
    /// Print the active redirect rules
    Redirects,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let builder = SiteBuilder::new(&cli.root, cli.env.as_deref())
        .with_context(|| format!("loading configuration from {}", cli.root.display()))?;
    log::debug!("environment `{}`", builder.environment());

    match cli.command {
        Commands::Build => {
            let report = builder.build()?;
            println!(
                "Built {} pages and {} redirects into {}",
                report.pages,
                report.redirects,
                report.out_dir.display()
            );
        }
        Commands::Check => {
            let site = builder.prepare()?;
            println!(
                "{} pages and {} redirects OK",
                site.router().pages().len(),
                site.router().redirects().len()
            );
        }
        Commands::Resolve { path } => {
            let site = builder.prepare()?;
            match site.router().resolve(&path) {
                Route::Redirect { location, status } => println!("{} {location}", status.code()),
                Route::Page(page) => {
                    println!("200 {} ({})", page.url, page.source.display())
                }
                Route::NotFound => println!("404"),
            }
        }
        Commands::Redirects => {
            let table = builder.redirects()?;
            if table.is_empty() {
                println!("No redirects for environment `{}`", builder.environment());
            }
            for rule in table.rules() {
                println!(
                    "{} {} -> {}",
                    rule.status().code(),
                    rule.source,
                    rule.destination
                );
            }
        }
    }

    Ok(())
}
