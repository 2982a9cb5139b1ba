//! Client configuration

use crate::error::UnknownRankStrategy;
use std::str::FromStr;
use std::time::Duration;

/// How new ranks are chosen when a row moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankStrategy {
    /// Renumber only the two swapped rows: swap their ranks, or fall back to
    /// their array indices when the ranks tie. Two writes per move; ties
    /// elsewhere in the collection stay latent.
    #[default]
    SwapPair,
    /// Renumber every row whose rank differs from its index to `0..n-1`.
    /// More writes, but the reloaded order always matches the displayed one.
    Contiguous,
}

impl FromStr for RankStrategy {
    type Err = UnknownRankStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swap-pair" | "swap_pair" | "pair" => Ok(Self::SwapPair),
            "contiguous" | "renumber" => Ok(Self::Contiguous),
            other => Err(UnknownRankStrategy(other.to_string())),
        }
    }
}

/// Client configuration for connecting to the listing API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:4000/api")
    pub base_url: String,

    /// Bearer token for admin endpoints
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Delay between a confirmed reorder and the reconciling reload
    pub reconcile_delay: Duration,

    /// How long a notice stays visible
    pub notice_ttl: Duration,

    /// Rank assignment on move
    pub rank_strategy: RankStrategy,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 20,
            reconcile_delay: Duration::from_millis(100),
            notice_ttl: Duration::from_secs(3),
            rank_strategy: RankStrategy::SwapPair,
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    ///
    /// - `CLUTCH_API_URL`
    /// - `CLUTCH_API_TOKEN`
    /// - `CLUTCH_TIMEOUT_SECS`
    /// - `CLUTCH_RECONCILE_DELAY_MS`
    /// - `CLUTCH_RANK_STRATEGY` (`swap-pair` | `contiguous`)
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            std::env::var("CLUTCH_API_URL").unwrap_or_else(|_| Self::default().base_url),
        );

        if let Ok(token) = std::env::var("CLUTCH_API_TOKEN")
            && !token.is_empty()
        {
            config.token = Some(token);
        }
        if let Some(secs) = std::env::var("CLUTCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = secs;
        }
        if let Some(ms) = std::env::var("CLUTCH_RECONCILE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.reconcile_delay = Duration::from_millis(ms);
        }
        if let Ok(raw) = std::env::var("CLUTCH_RANK_STRATEGY") {
            match raw.parse() {
                Ok(strategy) => config.rank_strategy = strategy,
                Err(e) => tracing::warn!(error = %e, "Ignoring CLUTCH_RANK_STRATEGY"),
            }
        }

        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_reconcile_delay(mut self, delay: Duration) -> Self {
        self.reconcile_delay = delay;
        self
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    pub fn with_rank_strategy(mut self, strategy: RankStrategy) -> Self {
        self.rank_strategy = strategy;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:4000/api")
    }
}
