//! Leaderboard rankings.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of entries requested from the rankings endpoint, always within 1..=500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RankingsLimit(u16);

impl RankingsLimit {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 500;
    pub const DEFAULT: RankingsLimit = RankingsLimit(100);

    pub fn new(limit: u32) -> Result<Self, Error> {
        if limit < u32::from(Self::MIN) || limit > u32::from(Self::MAX) {
            return Err(Error::Validation(format!(
                "Rankings limit must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                limit
            )));
        }
        Ok(Self(limit as u16))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl Default for RankingsLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for RankingsLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Leaderboard sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    MonthlyVotesRank,
    TotalVotesRank,
    ServerCountRank,
    ShardCountRank,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [
        SortBy::MonthlyVotesRank,
        SortBy::TotalVotesRank,
        SortBy::ServerCountRank,
        SortBy::ShardCountRank,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::MonthlyVotesRank => "monthly_votes_rank",
            SortBy::TotalVotesRank => "total_votes_rank",
            SortBy::ServerCountRank => "server_count_rank",
            SortBy::ShardCountRank => "shard_count_rank",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Invalid sortBy '{}'. Must be one of: {}",
                    s,
                    SortBy::ALL.map(SortBy::as_str).join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    Asc,
    #[default]
    Desc,
}

impl SortMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMethod::Asc => "asc",
            SortMethod::Desc => "desc",
        }
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortMethod::Asc),
            "desc" => Ok(SortMethod::Desc),
            _ => Err(Error::Validation(format!(
                "Invalid sortMethod '{}'. Must be asc or desc",
                s
            ))),
        }
    }
}

/// One page of the bot leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingsPage {
    #[serde(rename = "totalBotCount")]
    pub total_count: u64,
    #[serde(rename = "data", default)]
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub monthly_votes: u64,
    #[serde(default)]
    pub monthly_votes_rank: u64,
    #[serde(default)]
    pub monthly_votes_rank_change: i64,
    #[serde(default)]
    pub total_votes: u64,
    #[serde(default)]
    pub total_votes_rank: u64,
    #[serde(default)]
    pub total_votes_rank_change: i64,
    #[serde(default)]
    pub server_count: u64,
    #[serde(default)]
    pub server_count_rank: u64,
    #[serde(default)]
    pub server_count_rank_change: i64,
    #[serde(default)]
    pub shard_count: Option<u64>,
    #[serde(default)]
    pub shard_count_rank: Option<u64>,
    #[serde(default)]
    pub shard_count_rank_change: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_bounds() {
        assert_eq!(RankingsLimit::new(1).unwrap().get(), 1);
        assert_eq!(RankingsLimit::new(500).unwrap().get(), 500);
        assert!(RankingsLimit::new(0).is_err());
        assert!(RankingsLimit::new(501).is_err());
        assert!(RankingsLimit::new(u32::MAX).is_err());
        assert_eq!(RankingsLimit::default().get(), 100);
    }

    #[test]
    fn limit_error_is_validation() {
        assert!(matches!(
            RankingsLimit::new(1000),
            Err(Error::Validation(msg)) if msg.contains("between 1 and 500")
        ));
    }

    #[test]
    fn sort_enums_parse_wire_names() {
        assert_eq!(
            "server_count_rank".parse::<SortBy>().unwrap(),
            SortBy::ServerCountRank
        );
        assert!("votes".parse::<SortBy>().is_err());
        assert_eq!("asc".parse::<SortMethod>().unwrap(), SortMethod::Asc);
        assert!("ASC".parse::<SortMethod>().is_err());
        assert_eq!(SortMethod::default(), SortMethod::Desc);
    }

    #[test]
    fn page_deserializes_service_names() {
        let page: RankingsPage = serde_json::from_value(serde_json::json!({
            "totalBotCount": 12000,
            "data": [{
                "id": "1", "name": "a",
                "monthly_votes": 5, "monthly_votes_rank": 1, "monthly_votes_rank_change": -2
            }]
        }))
        .unwrap();
        assert_eq!(page.total_count, 12000);
        assert_eq!(page.entries[0].monthly_votes_rank_change, -2);
    }
}
