//! Multi-bot comparison shapes.

use super::bots::{HistoricalPoint, RawHistoricalRecord};
use serde_json::Value;
use std::collections::BTreeMap;

/// Latest stats across several bots, as the service returns them.
pub type Comparison = Vec<Value>;

/// Historical series per bot id.
pub type HistoricalComparison = BTreeMap<String, Vec<HistoricalPoint>>;

pub(crate) type RawHistoricalComparison = BTreeMap<String, Vec<RawHistoricalRecord>>;
