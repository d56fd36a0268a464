//! topstats.gg API client library.
//!
//! Provides a typed client for the topstats.gg Discord bot statistics API:
//! bot snapshots, historical series, recent stats, rankings, a user's bots,
//! and multi-bot comparisons.
//!
//! ```no_run
//! # async fn run() -> Result<(), topstats_lib::Error> {
//! use topstats_lib::{Client, MetricType, TimeFrame};
//!
//! let client = Client::new("your-token")?;
//! let bot = client.get_bot("583807014896140293").await?;
//! let series = client
//!     .get_bot_historical(&bot.id, TimeFrame::SevenDays, MetricType::MonthlyVotes)
//!     .await?;
//! println!("{}: {} points", bot.name, series.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod helpers;
pub mod secret;
pub mod types;

pub use client::{Client, ClientConfig, API_BASE, DEFAULT_TIMEOUT};
pub use error::{ApiError, Error, ErrorKind, RateLimitError};
pub use helpers::{format_timestamp_display, get_token, is_valid_snowflake, TokenSource};
pub use types::{
    BotSnapshot, Comparison, HistoricalComparison, HistoricalPoint, MetricType, RankingEntry,
    RankingsLimit, RankingsPage, RecentStat, RecentStatsBundle, SortBy, SortMethod, TimeFrame,
};

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
