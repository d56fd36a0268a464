//! Typed request and response shapes for the topstats.gg API.

pub mod bots;
pub mod compare;
pub mod rankings;
pub mod users;

pub use bots::{
    BotSnapshot, HistoricalPoint, MetricType, PercentageChanges, RawHistoricalRecord,
    RecentStat, RecentStatsBundle, TimeFrame,
};
pub use compare::{Comparison, HistoricalComparison};
pub use rankings::{RankingEntry, RankingsLimit, RankingsPage, SortBy, SortMethod};
pub use users::UsersBotsResponse;
