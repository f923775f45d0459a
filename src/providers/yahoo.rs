// =============================================================================
// Yahoo Finance chart API — daily history provider
// =============================================================================
//
// Public v8 chart endpoint, no authentication:
//   GET {base}/v8/finance/chart/{symbol}?range={range}&interval=1d
//
// Yahoo pads the quote arrays with nulls for halted or partial sessions; any
// row with a null OHLCV component is dropped rather than zero-filled. A
// recognised-but-empty symbol comes back as an empty history, which the
// batch pipeline treats as a normal skip.
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::market_data::{PriceBar, PriceHistory};
use crate::pipeline::HistoryProvider;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// Yahoo rejects requests without a browser-like User-Agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0 Safari/537.36";

/// History provider backed by Yahoo Finance's chart API.
#[derive(Clone)]
pub struct YahooClient {
    base_url: String,
    interval: String,
    client: reqwest::Client,
}

// ---------------------------------------------------------------------------
// Response model
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize, Default)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl YahooClient {
    /// Create a client against the public Yahoo endpoint.
    pub fn new(interval: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, interval, timeout_secs)
    }

    /// Create a client against a custom base URL (used by tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        interval: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            base_url: base_url.into(),
            interval: interval.into(),
            client,
        })
    }

    /// Convert one chart result into ascending daily bars.
    fn bars_from_chart(symbol: &str, result: &ChartResult) -> Vec<PriceBar> {
        let Some(quote) = result.indicators.quote.first() else {
            warn!(symbol, "chart result carried no quote block");
            return Vec::new();
        };

        let mut bars = Vec::with_capacity(result.timestamp.len());
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let row = (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            );
            let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = row else {
                debug!(symbol, index = i, "dropping bar with null components");
                continue;
            };
            let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
                warn!(symbol, timestamp = ts, "dropping bar with invalid timestamp");
                continue;
            };

            bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }
        bars
    }
}

#[async_trait]
impl HistoryProvider for YahooClient {
    /// Fetch `range` of daily bars for `symbol`.
    #[instrument(skip(self), name = "yahoo::fetch")]
    async fn fetch(&self, symbol: &str, range: &str) -> Result<PriceHistory> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", self.interval.as_str())])
            .send()
            .await
            .with_context(|| format!("GET /v8/finance/chart/{symbol} request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("Yahoo chart endpoint returned {status} for {symbol}");
        }

        let body: ChartResponse = resp
            .json()
            .await
            .with_context(|| format!("failed to parse chart response for {symbol}"))?;

        if let Some(err) = body.chart.error {
            anyhow::bail!("Yahoo chart error for {symbol}: {}", err.description);
        }

        let results = body.chart.result.unwrap_or_default();
        let bars = results
            .first()
            .map(|r| Self::bars_from_chart(symbol, r))
            .unwrap_or_default();

        debug!(symbol, range, bars = bars.len(), "history fetched");
        Ok(PriceHistory::new(bars))
    }
}

impl std::fmt::Debug for YahooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
