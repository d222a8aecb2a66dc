use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use cmc_mock::cli::OutputFormat;
use cmc_mock::core::filter::{
    DEFAULT_LISTING_AUX, DEFAULT_QUOTES_AUX, ListingFilter, QuotesFilter, SortKey, split_list,
};
use cmc_mock::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the mock API until interrupted
    Serve,
    /// List assets from the local catalog
    Map(MapArgs),
    /// Look up quotes for assets
    Quotes(QuotesArgs),
}

#[derive(Args)]
struct MapArgs {
    /// Comma-separated listing statuses to include
    #[arg(long, default_value = "active")]
    listing_status: String,

    /// 1-based offset into the matching assets
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    start: u64,

    /// Maximum number of assets to return
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..=5000))]
    limit: u64,

    /// Sort order: id or cmc_rank
    #[arg(long, default_value_t = SortKey::Id)]
    sort: SortKey,

    /// Comma-separated symbols; bypasses status, paging and sorting
    #[arg(long)]
    symbol: Option<String>,

    /// Comma-separated optional fields to include
    #[arg(long, default_value = DEFAULT_LISTING_AUX)]
    aux: String,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("identifiers")
        .required(true)
        .multiple(true)
        .args(["id", "slug", "symbol"])
))]
struct QuotesArgs {
    /// Comma-separated asset ids
    #[arg(long)]
    id: Option<String>,

    /// Comma-separated asset slugs
    #[arg(long)]
    slug: Option<String>,

    /// Comma-separated asset symbols
    #[arg(long)]
    symbol: Option<String>,

    /// Comma-separated conversion symbols (default USD)
    #[arg(long)]
    convert: Option<String>,

    /// Comma-separated conversion ids, ignored when --convert is given
    #[arg(long)]
    convert_id: Option<String>,

    /// Comma-separated optional fields to include
    #[arg(long, default_value = DEFAULT_QUOTES_AUX)]
    aux: String,

    /// Leave out unknown identifiers instead of failing
    #[arg(long)]
    skip_invalid: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn output_format(json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    }
}

fn list_arg(value: Option<String>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty()).map(|v| split_list(&v))
}

impl From<MapArgs> for cmc_mock::AppCommand {
    fn from(args: MapArgs) -> Self {
        let filter = ListingFilter {
            status_set: ListingFilter::statuses_from(&split_list(&args.listing_status)),
            start: args.start as usize,
            limit: args.limit as usize,
            sort: args.sort,
            symbol: list_arg(args.symbol),
            aux: split_list(&args.aux),
        };
        cmc_mock::AppCommand::Map {
            filter,
            format: output_format(args.json),
        }
    }
}

impl From<QuotesArgs> for cmc_mock::AppCommand {
    fn from(args: QuotesArgs) -> Self {
        let filter = QuotesFilter {
            id: list_arg(args.id),
            slug: list_arg(args.slug),
            symbol: list_arg(args.symbol),
            convert: list_arg(args.convert),
            convert_id: list_arg(args.convert_id),
            aux: split_list(&args.aux),
            skip_invalid: args.skip_invalid,
        };
        cmc_mock::AppCommand::Quotes {
            filter,
            format: output_format(args.json),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, matches!(cli.command, Some(Commands::Serve)));

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => match config_path {
            Some(path) => cmc_mock::cli::setup::setup_at_path(path),
            None => cmc_mock::cli::setup::setup(),
        },
        Some(Commands::Serve) => {
            cmc_mock::run_command(cmc_mock::AppCommand::Serve, config_path).await
        }
        Some(Commands::Map(args)) => cmc_mock::run_command(args.into(), config_path).await,
        Some(Commands::Quotes(args)) => cmc_mock::run_command(args.into(), config_path).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
