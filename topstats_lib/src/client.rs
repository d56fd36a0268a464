//! HTTP client for the topstats.gg REST API.

use crate::error::{ApiError, Error, RateLimitError};
use crate::helpers::validate_snowflake;
use crate::types::bots::DataEnvelope;
use crate::types::compare::RawHistoricalComparison;
use crate::types::{
    BotSnapshot, Comparison, HistoricalComparison, HistoricalPoint, MetricType, RankingsLimit,
    RankingsPage, RawHistoricalRecord, RecentStatsBundle, SortBy, SortMethod, TimeFrame,
    UsersBotsResponse,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE: &str = "https://api.topstats.gg";
/// Request timeout applied when [`ClientConfig::timeout`] is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Query or body parameters; `None` values are left out of the request.
type Params<'a> = [(&'a str, Option<Value>)];

/// Client configuration. A bare token converts into a config with defaults.
#[derive(Clone)]
pub struct ClientConfig {
    pub token: String,
    /// Defaults to [`API_BASE`].
    pub base_url: Option<String>,
    /// Overall request timeout handed to the transport. Defaults to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: None,
            timeout: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The timeout [`Client::new`] hands to the transport.
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl From<&str> for ClientConfig {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for ClientConfig {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// topstats.gg API client.
///
/// Stateless apart from its configuration; clones share the underlying
/// connection pool and may be used concurrently.
#[derive(Clone)]
pub struct Client {
    api_base: String,
    headers: HeaderMap,
    http: HttpClient,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client from a token or a [`ClientConfig`].
    pub fn new(config: impl Into<ClientConfig>) -> Result<Self, Error> {
        let config = config.into();
        let http = HttpClient::builder()
            .timeout(config.effective_timeout())
            .build()
            .map_err(|e| Error::Configuration(format!("HTTP client: {}", e)))?;
        Self::with_http_client(config, http)
    }

    /// Create a client on top of a caller-built transport. `config.timeout` is
    /// ignored; configure it on `http` instead.
    pub fn with_http_client(
        config: impl Into<ClientConfig>,
        http: HttpClient,
    ) -> Result<Self, Error> {
        let config = config.into();
        let token = config.token.trim();
        if token.is_empty() {
            return Err(Error::Configuration("No API token provided".to_string()));
        }
        let mut auth = HeaderValue::from_str(token).map_err(|_| {
            Error::Configuration("API token contains characters not allowed in a header".into())
        })?;
        auth.set_sensitive(true);

        let base = config.base_url.as_deref().unwrap_or(API_BASE).trim();
        let parsed = Url::parse(base)
            .map_err(|e| Error::Configuration(format!("Invalid base URL '{}': {}", base, e)))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "Invalid base URL '{}': expected an http(s) origin",
                base
            )));
        }

        let user_agent = format!("topstats-rs/{}", crate::VERSION);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|e| Error::Configuration(format!("User-Agent: {}", e)))?,
        );

        Ok(Self {
            api_base: base.trim_end_matches('/').to_string(),
            headers,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.api_base
    }

    /// Current information for one bot.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_bot(&self, bot_id: &str) -> Result<BotSnapshot, Error> {
        validate_snowflake(bot_id, "bot")?;
        self.get(&format!("/discord/bots/{}", bot_id), &[]).await
    }

    /// Historical series for one bot, normalized to `{time, id, type, value}` points.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_bot_historical(
        &self,
        bot_id: &str,
        time_frame: TimeFrame,
        metric: MetricType,
    ) -> Result<Vec<HistoricalPoint>, Error> {
        validate_snowflake(bot_id, "bot")?;
        let res: DataEnvelope<Vec<RawHistoricalRecord>> = self
            .get(
                &format!("/discord/bots/{}/historical", bot_id),
                &historical_params(time_frame, metric),
            )
            .await?;
        res.data
            .into_iter()
            .map(|raw| HistoricalPoint::from_raw(raw, metric, Some(bot_id)))
            .collect()
    }

    /// Hourly and daily recent stats for one bot.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_bot_recent(&self, bot_id: &str) -> Result<RecentStatsBundle, Error> {
        validate_snowflake(bot_id, "bot")?;
        self.get(&format!("/discord/bots/{}/recent", bot_id), &[])
            .await
    }

    /// Bot leaderboard. `limit` defaults to 100 and must be within 1..=500.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_rankings(
        &self,
        sort_by: SortBy,
        sort_method: SortMethod,
        limit: Option<u32>,
    ) -> Result<RankingsPage, Error> {
        let limit = match limit {
            Some(l) => RankingsLimit::new(l)?,
            None => RankingsLimit::DEFAULT,
        };
        self.get(
            "/discord/rankings/bots",
            &[
                ("sortBy", Some(Value::from(sort_by.as_str()))),
                ("sortMethod", Some(Value::from(sort_method.as_str()))),
                ("limit", Some(Value::from(limit.get()))),
            ],
        )
        .await
    }

    /// Bots owned by a user.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_users_bots(&self, user_id: &str) -> Result<Vec<BotSnapshot>, Error> {
        validate_snowflake(user_id, "user")?;
        let res: UsersBotsResponse = self
            .get(&format!("/discord/users/{}/bots", user_id), &[])
            .await?;
        Ok(res.bots)
    }

    /// Latest stats for several bots side by side.
    #[tracing::instrument(level = "debug", skip(self, bot_ids))]
    pub async fn compare_bots<S: AsRef<str>>(&self, bot_ids: &[S]) -> Result<Comparison, Error> {
        let path = compare_path("/discord/compare", bot_ids)?;
        let res: DataEnvelope<Comparison> = self.get(&path, &[]).await?;
        Ok(res.data)
    }

    /// Historical series for several bots, keyed by bot id.
    #[tracing::instrument(level = "debug", skip(self, bot_ids))]
    pub async fn compare_bots_historical<S: AsRef<str>>(
        &self,
        bot_ids: &[S],
        time_frame: TimeFrame,
        metric: MetricType,
    ) -> Result<HistoricalComparison, Error> {
        let path = compare_path("/discord/compare/historical", bot_ids)?;
        let res: DataEnvelope<RawHistoricalComparison> = self
            .get(&path, &historical_params(time_frame, metric))
            .await?;
        res.data
            .into_iter()
            .map(|(id, records)| {
                records
                    .into_iter()
                    .map(|raw| HistoricalPoint::from_raw(raw, metric, Some(id.as_str())))
                    .collect::<Result<Vec<_>, Error>>()
                    .map(|points| (id, points))
            })
            .collect()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &Params<'_>) -> Result<T, Error> {
        self.request(Method::GET, path, params).await
    }

    /// Send one request. GET carries defined params as a query string, other
    /// methods as a JSON object body.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &Params<'_>,
    ) -> Result<T, Error> {
        let mut url = format!("{}{}", self.api_base, path);
        let req = if method == Method::GET {
            let query = encode_query(params);
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
            self.http.get(&url)
        } else {
            let req = self.http.request(method.clone(), &url);
            if params.is_empty() {
                req
            } else {
                let body: Map<String, Value> = params
                    .iter()
                    .filter_map(|(k, v)| v.clone().map(|v| (k.to_string(), v)))
                    .collect();
                req.json(&body)
            }
        };
        debug!(%method, %url, "sending request");
        let res = req.headers(self.headers.clone()).send().await?;
        let status = res.status();
        let body = res.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        parse_response(status, &body)
    }
}

fn historical_params(
    time_frame: TimeFrame,
    metric: MetricType,
) -> Vec<(&'static str, Option<Value>)> {
    vec![
        ("timeFrame", Some(Value::from(time_frame.as_str()))),
        ("type", Some(Value::from(metric.as_str()))),
    ]
}

/// `{prefix}/{id1}/{id2}/...` after validating every id.
fn compare_path<S: AsRef<str>>(prefix: &str, bot_ids: &[S]) -> Result<String, Error> {
    if bot_ids.is_empty() {
        return Err(Error::Validation(
            "At least one bot ID is required".to_string(),
        ));
    }
    let mut path = prefix.to_string();
    for id in bot_ids {
        let id = id.as_ref();
        validate_snowflake(id, "bot")?;
        path.push('/');
        path.push_str(id);
    }
    Ok(path)
}

/// URL-encoded `k=v&...` for every defined param. Strings go in raw, other
/// JSON values in their JSON text.
fn encode_query(params: &Params<'_>) -> String {
    params
        .iter()
        .filter_map(|(k, v)| {
            let v = match v.as_ref()? {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some(format!(
                "{}={}",
                urlencoding::encode(k),
                urlencoding::encode(&v)
            ))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Map a status and body onto the typed result or error.
fn parse_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, Error> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let data: Value = serde_json::from_str(body).unwrap_or(Value::Null);
        let err = RateLimitError::from_body(&data);
        warn!(expires_in = %err.expires_in, "rate limited: {}", err.message);
        return Err(Error::RateLimit(err));
    }
    if !status.is_success() {
        return Err(Error::Api(ApiError::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status"),
            serde_json::from_str(body).ok(),
        )));
    }
    serde_json::from_str(body)
        .map_err(|e| Error::Transport(format!("Invalid JSON in response body: {}", e)))
}
