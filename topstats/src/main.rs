//! topstats CLI — query Discord bot stats, history, rankings, and comparisons from the terminal.

mod output;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::process::ExitCode;
use topstats_lib::{
    get_token, Client, ClientConfig, MetricType, SortBy, SortMethod, TimeFrame,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "topstats")]
#[command(about = "topstats.gg CLI — query Discord bot stats, history, rankings, and comparisons", long_about = None)]
struct Cli {
    /// Output format: plain (human-readable), json (structured).
    #[arg(short, long, default_value = "plain", value_enum, global = true)]
    output: OutputFormatArg,

    /// Show timestamps in UTC only. By default timestamps are shown in local timezone.
    #[arg(long, global = true)]
    utc: bool,

    /// API token. Falls back to the 1Password / Bitwarden backends when unset.
    #[arg(long, env = "TOPSTATS_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// API origin (defaults to https://api.topstats.gg)
    #[arg(long, env = "TOPSTATS_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Log requests to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormatArg {
    Plain,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show one bot
    Bot { bot_id: String },
    /// Historical series for one bot
    Historical {
        bot_id: String,
        /// alltime, 5y, 3y, 1y, 270d, 180d, 90d, 30d, 7d, 1d, 12hr, 6hr
        #[arg(long, default_value = "7d")]
        time_frame: TimeFrame,
        /// monthly_votes, total_votes, server_count, shard_count, review_count
        #[arg(long = "type", default_value = "monthly_votes")]
        metric: MetricType,
    },
    /// Hourly and daily recent stats for one bot
    Recent {
        bot_id: String,
        /// Show only the daily series
        #[arg(long, conflicts_with = "hourly")]
        daily: bool,
        /// Show only the hourly series
        #[arg(long)]
        hourly: bool,
    },
    /// Bot leaderboard
    Rankings {
        /// monthly_votes_rank, total_votes_rank, server_count_rank, shard_count_rank
        #[arg(long, default_value = "monthly_votes_rank")]
        sort_by: SortBy,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        sort_method: SortMethod,
        /// Number of entries, 1-500 (default 100)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List the bots a user owns
    UserBots { user_id: String },
    /// Compare latest stats of several bots
    Compare {
        #[arg(required = true, num_args = 1..)]
        bot_ids: Vec<String>,
    },
    /// Compare historical series of several bots
    CompareHistorical {
        #[arg(required = true, num_args = 1..)]
        bot_ids: Vec<String>,
        #[arg(long, default_value = "7d")]
        time_frame: TimeFrame,
        #[arg(long = "type", default_value = "monthly_votes")]
        metric: MetricType,
    },
    /// Show version
    Version,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if matches!(cli.command, Commands::Version) {
        println!("topstats {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let printer = Printer {
        format: match cli.output {
            OutputFormatArg::Plain => output::OutputFormat::Plain,
            OutputFormatArg::Json => output::OutputFormat::Json,
        },
        plain: output::PlainOptions { use_utc: cli.utc },
    };

    match run(&client, cli.command, printer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> Result<Client, topstats_lib::Error> {
    let (token, source) = get_token(cli.token.as_deref())?;
    debug!(?source, "resolved API token");
    let mut config = ClientConfig::new(token);
    if let Some(ref base) = cli.base_url {
        config = config.base_url(base.clone());
    }
    Client::new(config)
}

#[derive(Clone, Copy)]
struct Printer {
    format: output::OutputFormat,
    plain: output::PlainOptions,
}

impl Printer {
    fn print<T: Serialize>(&self, data: &T) -> Result<(), String> {
        let value = serde_json::to_value(data).map_err(|e| e.to_string())?;
        match self.format {
            output::OutputFormat::Plain => print!("{}", output::format_plain(&value, self.plain)),
            output::OutputFormat::Json => {
                println!("{}", output::format_json(&value).map_err(|e| e.to_string())?)
            }
        }
        Ok(())
    }
}

async fn run(client: &Client, cmd: Commands, printer: Printer) -> Result<(), String> {
    match cmd {
        Commands::Bot { bot_id } => {
            let bot = client.get_bot(&bot_id).await.map_err(|e| e.to_string())?;
            printer.print(&bot)?;
        }
        Commands::Historical {
            bot_id,
            time_frame,
            metric,
        } => {
            let points = client
                .get_bot_historical(&bot_id, time_frame, metric)
                .await
                .map_err(|e| e.to_string())?;
            printer.print(&points)?;
        }
        Commands::Recent {
            bot_id,
            daily,
            hourly,
        } => {
            let recent = client
                .get_bot_recent(&bot_id)
                .await
                .map_err(|e| e.to_string())?;
            if daily {
                printer.print(&recent.daily)?;
            } else if hourly {
                printer.print(&recent.hourly)?;
            } else {
                printer.print(&recent)?;
            }
        }
        Commands::Rankings {
            sort_by,
            sort_method,
            limit,
        } => {
            let page = client
                .get_rankings(sort_by, sort_method, limit)
                .await
                .map_err(|e| e.to_string())?;
            printer.print(&page)?;
        }
        Commands::UserBots { user_id } => {
            let bots = client
                .get_users_bots(&user_id)
                .await
                .map_err(|e| e.to_string())?;
            printer.print(&bots)?;
        }
        Commands::Compare { bot_ids } => {
            let data = client
                .compare_bots(&bot_ids)
                .await
                .map_err(|e| e.to_string())?;
            printer.print(&data)?;
        }
        Commands::CompareHistorical {
            bot_ids,
            time_frame,
            metric,
        } => {
            let data = client
                .compare_bots_historical(&bot_ids, time_frame, metric)
                .await
                .map_err(|e| e.to_string())?;
            printer.print(&data)?;
        }
        Commands::Version => {}
    }
    Ok(())
}
