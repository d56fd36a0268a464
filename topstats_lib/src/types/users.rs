use super::bots::BotSnapshot;
use serde::{Deserialize, Serialize};

/// Bots owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersBotsResponse {
    #[serde(default)]
    pub bots: Vec<BotSnapshot>,
}
