pub mod errors;
#[cfg(feature = "cli")]
pub mod logging;
pub mod models;
pub mod providers;
pub mod services;

use serde_json::Value;

use errors::CoreError;
use models::{
    bar::HistoricalBar,
    chart::{ChartDimensions, ChartGeometry},
    history::RecentPredictions,
    market::{Market, MarketSymbol},
    prediction::Prediction,
    settings::ClientSettings,
};
use providers::{http::HttpForecastProvider, traits::ForecastProvider};
use services::{
    chart_service::ChartService, market_service::parse_market_data,
    normalizer::ResponseNormalizer,
};

/// Identifies one request issued for the current selection.
///
/// A response is applied only while its ticket is still the newest one of
/// its kind for the selected symbol; anything older is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub symbol: MarketSymbol,
    pub seq: u64,
}

/// What happened to a response handed back to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response was current and is now the dashboard state
    Applied,
    /// A newer selection or request superseded it; state is unchanged
    Discarded,
}

/// Main entry point for the forecast dashboard core.
///
/// Owns the provider, the markets catalogue, the selected symbol and the
/// data fetched for it. Selection is last-write-wins: starting a new
/// selection makes every earlier in-flight response stale.
#[must_use]
pub struct ForecastDashboard {
    provider: Box<dyn ForecastProvider>,
    normalizer: ResponseNormalizer,
    markets: Vec<Market>,
    selected: Option<MarketSymbol>,
    market_data: Option<HistoricalBar>,
    prediction: Option<Prediction>,
    recent: RecentPredictions,
    /// Monotonic counter shared by all tickets
    next_seq: u64,
    /// Newest market-data ticket issued, if any
    market_seq: Option<u64>,
    /// Newest prediction ticket issued, if any
    prediction_seq: Option<u64>,
}

impl std::fmt::Debug for ForecastDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastDashboard")
            .field("provider", &self.provider.name())
            .field("markets", &self.markets.len())
            .field("selected", &self.selected)
            .field("has_market_data", &self.market_data.is_some())
            .field("has_prediction", &self.prediction.is_some())
            .field("recent", &self.recent.len())
            .finish()
    }
}

impl ForecastDashboard {
    /// Create a dashboard talking to the HTTP service described by `settings`.
    pub fn new(settings: &ClientSettings) -> Self {
        Self::with_provider(Box::new(HttpForecastProvider::new(settings)))
    }

    /// Create a dashboard over any provider (mock, alternate transport, ...).
    pub fn with_provider(provider: Box<dyn ForecastProvider>) -> Self {
        Self {
            provider,
            normalizer: ResponseNormalizer::new(),
            markets: Market::defaults(),
            selected: None,
            market_data: None,
            prediction: None,
            recent: RecentPredictions::default(),
            next_seq: 0,
            market_seq: None,
            prediction_seq: None,
        }
    }

    /// Replace the prediction key lookup order.
    pub fn set_normalizer(&mut self, normalizer: ResponseNormalizer) {
        self.normalizer = normalizer;
    }

    // ── Markets ─────────────────────────────────────────────────────

    /// Refresh the catalogue from `/markets`.
    ///
    /// On failure the current catalogue (initially the built-in one) is kept
    /// and returned; the error is only logged.
    pub async fn load_markets(&mut self) -> &[Market] {
        match self.provider.list_markets().await {
            Ok(markets) => {
                tracing::debug!(count = markets.len(), "loaded markets");
                self.markets = markets;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load markets, keeping current list");
            }
        }
        &self.markets
    }

    #[must_use]
    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Select a symbol (case-insensitive) and issue a market-data ticket.
    ///
    /// Clears the previous bar and prediction. Any response still in flight
    /// for an earlier selection will be discarded.
    pub fn select_market(&mut self, input: &str) -> Result<RequestTicket, CoreError> {
        let symbol = MarketSymbol::parse(input)?;
        tracing::debug!(%symbol, "market selected");

        self.selected = Some(symbol.clone());
        self.market_data = None;
        self.prediction = None;
        self.prediction_seq = None;

        let seq = self.bump_seq();
        self.market_seq = Some(seq);
        Ok(RequestTicket { symbol, seq })
    }

    /// Drop the selection (e.g. when the user switches to a custom symbol).
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.market_data = None;
        self.prediction = None;
        self.market_seq = None;
        self.prediction_seq = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&MarketSymbol> {
        self.selected.as_ref()
    }

    /// Apply a `/market-data` response issued under `ticket`.
    ///
    /// Stale tickets are discarded without parsing. A current response that
    /// fails to parse returns the error and leaves the bar empty.
    pub fn accept_market_data(
        &mut self,
        ticket: &RequestTicket,
        response: Result<Option<Value>, CoreError>,
    ) -> Result<Outcome, CoreError> {
        if !self.is_current(ticket, self.market_seq) {
            tracing::debug!(symbol = %ticket.symbol, seq = ticket.seq, "discarding stale market data");
            return Ok(Outcome::Discarded);
        }
        let bar = parse_market_data(response?.as_ref())?;
        self.market_data = Some(bar);
        Ok(Outcome::Applied)
    }

    /// Select `input` and fetch its prior-day bar.
    pub async fn load_market(&mut self, input: &str) -> Result<Outcome, CoreError> {
        let ticket = self.select_market(input)?;
        let response = self.provider.fetch_market_data(&ticket.symbol).await;
        self.accept_market_data(&ticket, response)
    }

    #[must_use]
    pub fn market_data(&self) -> Option<&HistoricalBar> {
        self.market_data.as_ref()
    }

    // ── Prediction ──────────────────────────────────────────────────

    /// Issue a prediction ticket for the selected symbol.
    /// Supersedes any earlier prediction request.
    pub fn prediction_ticket(&mut self) -> Result<RequestTicket, CoreError> {
        let symbol = self
            .selected
            .clone()
            .ok_or_else(|| CoreError::ValidationError("No market selected".into()))?;
        let seq = self.bump_seq();
        self.prediction_seq = Some(seq);
        Ok(RequestTicket { symbol, seq })
    }

    /// Apply a `/predict` response issued under `ticket`.
    ///
    /// A current response is normalized; on success it replaces the shown
    /// prediction and is recorded in the recent predictions. On failure the
    /// previous prediction is cleared and the error returned once.
    pub fn accept_prediction(
        &mut self,
        ticket: &RequestTicket,
        response: Result<Option<Value>, CoreError>,
    ) -> Result<Outcome, CoreError> {
        if !self.is_current(ticket, self.prediction_seq) {
            tracing::debug!(symbol = %ticket.symbol, seq = ticket.seq, "discarding stale prediction");
            return Ok(Outcome::Discarded);
        }

        let normalized = response.and_then(|body| self.normalizer.normalize(body.as_ref()));
        match normalized {
            Ok(prediction) => {
                self.recent.record(ticket.symbol.as_str(), &prediction);
                self.prediction = Some(prediction);
                Ok(Outcome::Applied)
            }
            Err(e) => {
                tracing::warn!(symbol = %ticket.symbol, error = %e, "prediction failed");
                self.prediction = None;
                Err(e)
            }
        }
    }

    /// Request and apply a prediction for the selected symbol.
    pub async fn request_prediction(&mut self) -> Result<Outcome, CoreError> {
        let ticket = self.prediction_ticket()?;
        let response = self.provider.fetch_prediction(&ticket.symbol).await;
        self.accept_prediction(&ticket, response)
    }

    #[must_use]
    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    /// Expected change of the current prediction, in percent.
    #[must_use]
    pub fn expected_change_pct(&self) -> Option<f64> {
        self.prediction
            .as_ref()
            .and_then(|p| p.expected_change_pct(self.market_data.as_ref()))
    }

    #[must_use]
    pub fn recent_predictions(&self) -> &RecentPredictions {
        &self.recent
    }

    // ── Chart ───────────────────────────────────────────────────────

    /// Lay out the current prediction. `Ok(None)` when there is none.
    pub fn chart(&self, dimensions: ChartDimensions) -> Result<Option<ChartGeometry>, CoreError> {
        self.prediction
            .as_ref()
            .map(|p| ChartService::with_dimensions(dimensions).layout_forecast(p))
            .transpose()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn is_current(&self, ticket: &RequestTicket, newest: Option<u64>) -> bool {
        self.selected.as_ref() == Some(&ticket.symbol) && newest == Some(ticket.seq)
    }
}
