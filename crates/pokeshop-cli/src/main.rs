mod harvest;
mod import;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pokeshop-cli")]
#[command(about = "Pokeshop catalog harvester and importer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch Pokémon records from `PokéAPI` into a JSON file
    Harvest {
        /// Number of identifiers to fetch, starting at 1
        #[arg(long, default_value_t = pokeshop_pokeapi::DEFAULT_HARVEST_COUNT)]
        count: u32,
        /// Destination file
        #[arg(long, default_value = pokeshop_pokeapi::DEFAULT_OUTPUT_FILE)]
        output: PathBuf,
    },
    /// Load a harvested JSON file into the product catalog
    Import(ImportArgs),
    /// Database management commands
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// Harvested JSON file to read
    #[arg(long, default_value = pokeshop_pokeapi::DEFAULT_OUTPUT_FILE)]
    file: PathBuf,
    /// Price used for every product unless --random_price is set
    #[arg(long = "default_price", default_value = "5.99")]
    default_price: Decimal,
    /// Lower bound for random prices
    #[arg(long = "min_price", default_value = "4.00")]
    min_price: Decimal,
    /// Upper bound for random prices
    #[arg(long = "max_price", default_value = "15.00")]
    max_price: Decimal,
    /// Draw each price uniformly from [min_price, max_price]
    #[arg(long = "random_price")]
    random_price: bool,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check database connectivity
    Ping,
}

/// `RUST_LOG` wins when set; otherwise the configured `POKESHOP_LOG_LEVEL`.
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

async fn connect(config: &pokeshop_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = pokeshop_db::PoolConfig::from_app_config(config);
    let pool = pokeshop_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Harvest { count, output }) => {
            let config = pokeshop_core::load_harvest_config()?;
            init_tracing(&config.log_level)?;
            harvest::run_harvest(&config, count, &output).await?;
        }
        Some(Commands::Import(args)) => {
            let config = pokeshop_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let pricing = pokeshop_core::PricingConfig::new(
                args.default_price,
                args.min_price,
                args.max_price,
                args.random_price,
            )?;
            let pool = connect(&config).await?;
            let summary = import::run_import(&pool, &args.file, &pricing).await?;
            println!(
                "import complete: {} created, {} updated, {} skipped, {} failed",
                summary.created, summary.updated, summary.skipped, summary.failed
            );
        }
        Some(Commands::Db { command }) => {
            let config = pokeshop_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let pool = connect(&config).await?;
            match command {
                DbCommands::Migrate => {
                    let applied = pokeshop_db::run_migrations(&pool).await?;
                    println!("migrations applied: {applied}");
                }
                DbCommands::Ping => {
                    pokeshop_db::ping(&pool).await?;
                    println!("database reachable");
                }
            }
        }
        None => println!("pokeshop-cli: run with --help to list commands"),
    }

    Ok(())
}
