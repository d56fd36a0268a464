//! Bot snapshots, historical series, and recent stats.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current metadata and metrics for one bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub deleted: bool,
    /// Deprecated upstream; still sent by the service.
    #[serde(default)]
    pub certified: bool,
    #[serde(default)]
    pub def_avatar: Option<String>,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub lib: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// ISO 8601.
    #[serde(default)]
    pub approved_at: Option<String>,
    #[serde(default)]
    pub monthly_votes: u64,
    #[serde(default)]
    pub total_votes: u64,
    #[serde(default)]
    pub server_count: u64,
    #[serde(default)]
    pub shard_count: Option<u64>,
    #[serde(default)]
    pub review_count: Option<u64>,
    #[serde(default)]
    pub monthly_votes_rank: Option<u64>,
    #[serde(default)]
    pub total_votes_rank: Option<u64>,
    #[serde(default)]
    pub server_count_rank: Option<u64>,
    #[serde(default)]
    pub shard_count_rank: Option<u64>,
    /// ISO 8601 time of the last update.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub unix_timestamp: Option<i64>,
    #[serde(default, rename = "percentageChanges")]
    pub percentage_changes: Option<PercentageChanges>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageChanges {
    #[serde(default)]
    pub daily: Option<f64>,
    #[serde(default)]
    pub monthly: Option<f64>,
}

/// Window bounding a historical query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "alltime")]
    AllTime,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "270d")]
    NineMonths,
    #[serde(rename = "180d")]
    SixMonths,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "12hr")]
    TwelveHours,
    #[serde(rename = "6hr")]
    SixHours,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 12] = [
        TimeFrame::AllTime,
        TimeFrame::FiveYears,
        TimeFrame::ThreeYears,
        TimeFrame::OneYear,
        TimeFrame::NineMonths,
        TimeFrame::SixMonths,
        TimeFrame::NinetyDays,
        TimeFrame::ThirtyDays,
        TimeFrame::SevenDays,
        TimeFrame::OneDay,
        TimeFrame::TwelveHours,
        TimeFrame::SixHours,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeFrame::AllTime => "alltime",
            TimeFrame::FiveYears => "5y",
            TimeFrame::ThreeYears => "3y",
            TimeFrame::OneYear => "1y",
            TimeFrame::NineMonths => "270d",
            TimeFrame::SixMonths => "180d",
            TimeFrame::NinetyDays => "90d",
            TimeFrame::ThirtyDays => "30d",
            TimeFrame::SevenDays => "7d",
            TimeFrame::OneDay => "1d",
            TimeFrame::TwelveHours => "12hr",
            TimeFrame::SixHours => "6hr",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeFrame::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Invalid time frame '{}'. Must be one of: {}",
                    s,
                    TimeFrame::ALL.map(TimeFrame::as_str).join(", ")
                ))
            })
    }
}

/// Metric kinds the service tracks historically.
///
/// The service has shipped both `shard_count` and `review_count` as the
/// fourth metric; both are accepted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    MonthlyVotes,
    TotalVotes,
    ServerCount,
    ShardCount,
    ReviewCount,
}

impl MetricType {
    pub const ALL: [MetricType; 5] = [
        MetricType::MonthlyVotes,
        MetricType::TotalVotes,
        MetricType::ServerCount,
        MetricType::ShardCount,
        MetricType::ReviewCount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::MonthlyVotes => "monthly_votes",
            MetricType::TotalVotes => "total_votes",
            MetricType::ServerCount => "server_count",
            MetricType::ShardCount => "shard_count",
            MetricType::ReviewCount => "review_count",
        }
    }

    /// Read this metric's field out of a raw historical record.
    pub fn value_of(self, raw: &RawHistoricalRecord) -> Option<f64> {
        match self {
            MetricType::MonthlyVotes => raw.monthly_votes,
            MetricType::TotalVotes => raw.total_votes,
            MetricType::ServerCount => raw.server_count,
            MetricType::ShardCount => raw.shard_count,
            MetricType::ReviewCount => raw.review_count,
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricType::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Invalid metric type '{}'. Must be one of: {}",
                    s,
                    MetricType::ALL.map(MetricType::as_str).join(", ")
                ))
            })
    }
}

/// Historical record as the service sends it: the metric sits under a field
/// named after the requested type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHistoricalRecord {
    pub time: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub monthly_votes: Option<f64>,
    #[serde(default)]
    pub total_votes: Option<f64>,
    #[serde(default)]
    pub server_count: Option<f64>,
    #[serde(default)]
    pub shard_count: Option<f64>,
    #[serde(default)]
    pub review_count: Option<f64>,
}

/// One normalized point of a historical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub time: String,
    pub id: String,
    #[serde(rename = "type")]
    pub metric: MetricType,
    pub value: f64,
}

impl HistoricalPoint {
    /// Normalize a raw record for `metric`. `fallback_id` fills in records
    /// that omit their bot id (multi-bot responses keyed by id).
    pub fn from_raw(
        raw: RawHistoricalRecord,
        metric: MetricType,
        fallback_id: Option<&str>,
    ) -> Result<Self, Error> {
        let value = metric.value_of(&raw).ok_or_else(|| {
            Error::Transport(format!(
                "historical record at {} has no '{}' field",
                raw.time, metric
            ))
        })?;
        let id = match (raw.id, fallback_id) {
            (Some(id), _) => id,
            (None, Some(id)) => id.to_string(),
            (None, None) => {
                return Err(Error::Transport(format!(
                    "historical record at {} has no bot id",
                    raw.time
                )))
            }
        };
        Ok(Self {
            time: raw.time,
            id,
            metric,
            value,
        })
    }
}

/// Recent stats for one bot, hourly and daily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentStatsBundle {
    #[serde(rename = "hourlyData", default)]
    pub hourly: Vec<RecentStat>,
    #[serde(rename = "dailyData", default)]
    pub daily: Vec<RecentStat>,
}

/// Values at one point plus deltas against the previous point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentStat {
    pub time: String,
    #[serde(default)]
    pub monthly_votes: u64,
    #[serde(default)]
    pub total_votes: u64,
    #[serde(default)]
    pub server_count: u64,
    #[serde(default)]
    pub shard_count: Option<u64>,
    #[serde(default)]
    pub review_count: Option<u64>,
    #[serde(default)]
    pub monthly_votes_change: i64,
    #[serde(default)]
    pub monthly_votes_change_perc: Option<f64>,
    #[serde(default)]
    pub total_votes_change: i64,
    #[serde(default)]
    pub total_votes_change_perc: Option<f64>,
    #[serde(default)]
    pub server_count_change: i64,
    #[serde(default)]
    pub server_count_change_perc: Option<f64>,
    #[serde(default)]
    pub shard_count_change: Option<i64>,
    #[serde(default)]
    pub review_count_change: Option<i64>,
}

/// `{ "data": [...] }` envelope used by the historical and compare endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}
