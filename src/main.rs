use clap::{Parser, Subcommand};
use dotenv::dotenv;
use kurs::{CurrencyService, RateClient, RateKind, SourceConfig, TARGET_CURRENCY};
use std::{error::Error, fs, path::PathBuf, process::ExitCode, time::Duration};

#[derive(Parser)]
#[command(name = "kurs", about = "Money changer rates in IDR")]
struct Cli {
    /// Rate page to scrape
    #[arg(long, global = true)]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Read the page from a file instead of fetching it
    #[arg(long, global = true)]
    page: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every listed rate as JSON
    List,
    /// Convert an amount of foreign currency
    Convert {
        amount: f64,
        from: String,
        #[arg(long, default_value = TARGET_CURRENCY)]
        to: String,
        #[arg(long, default_value_t = RateKind::Sell)]
        rate: RateKind,
    },
}

async fn build_service(cli: &Cli) -> Result<CurrencyService, Box<dyn Error>> {
    let mut config = SourceConfig::default();
    if let Some(url) = &cli.url {
        config = config.with_url(url.as_str());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    match &cli.page {
        Some(path) => {
            let page = fs::read_to_string(path)?;
            Ok(CurrencyService::with_page(RateClient::new(config)?, page).await?)
        }
        None => Ok(CurrencyService::new(config)?),
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let mut service = build_service(&cli).await?;

    match cli.command {
        Command::List => {
            let response = service.get_currencies().await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(if response.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Convert { amount, from, to, rate } => {
            match service.convert(amount, &from, &to, rate).await? {
                Some(converted) => println!("{} {} is {:.2} {}", amount, from, converted, TARGET_CURRENCY),
                None => println!("no result"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
