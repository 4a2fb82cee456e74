use anyhow::Result;
use clap::Parser;
use ghfolio::browser::{FilterState, Visibility};
use ghfolio::commands;
use std::path::PathBuf;

/// ghfolio - GitHub portfolio builder
///
/// Fetch a GitHub account's repositories and render them as filterable
/// project cards for a static portfolio page.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   ghfolio render -o site/index.html     # Render the built-in page
///   ghfolio --user octocat list --search cli
#[derive(Parser, Debug)]
#[command(author, version = env!("GHFOLIO_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub account whose repositories are shown (also via GHFOLIO_USER)
    #[arg(long, short = 'u', env = "GHFOLIO_USER", value_name = "USER", global = true)]
    pub user: Option<String>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Render the portfolio page with the project grid filled in
    Render(RenderArgs),

    /// List repositories in the terminal
    List(FilterArgs),

    /// Show repository statistics
    Stats(StatsArgs),

    /// Filter repositories interactively, one command or query per line
    Browse,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// HTML page containing a #projectsGrid element (defaults to a built-in page)
    #[arg(long, short = 't', value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Where to write the page (defaults to stdout)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(clap::Args, Debug)]
pub struct FilterArgs {
    /// Show all, public or private repositories
    #[arg(long, value_name = "all|public|private", default_value = "all")]
    pub visibility: Visibility,

    /// Case-insensitive match on name, description or topics
    #[arg(long, short = 's', value_name = "TEXT")]
    pub search: Option<String>,

    /// Only repositories whose primary language is LANGUAGE
    #[arg(long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Only repositories with at least N stars
    #[arg(long = "min-stars", value_name = "N", default_value_t = 0)]
    pub min_stars: u64,

    /// Only repositories with at least one topic
    #[arg(long = "has-topics")]
    pub has_topics: bool,
}

impl From<FilterArgs> for FilterState {
    fn from(args: FilterArgs) -> Self {
        FilterState {
            visibility: args.visibility,
            query: args.search.unwrap_or_default(),
            language: args.language,
            min_stars: args.min_stars,
            has_topics: args.has_topics,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = ghfolio::runtime::RealRuntime;

    match cli.command {
        Commands::Render(args) => {
            commands::render(
                runtime,
                cli.user,
                cli.api_url,
                args.template,
                args.output,
                args.filter.into(),
            )
            .await?
        }
        Commands::List(args) => {
            commands::list(runtime, cli.user, cli.api_url, args.into()).await?
        }
        Commands::Stats(args) => {
            commands::stats(runtime, cli.user, cli.api_url, args.json).await?
        }
        Commands::Browse => commands::browse(runtime, cli.user, cli.api_url).await?,
    }
    Ok(())
}
