//! Fetch the prior-day bar and a forecast for one symbol, then print the
//! normalized prediction and the chart layout.
//!
//! # Usage
//!
//! ```sh
//! export FORECAST_API_URL="http://localhost:8000/api"
//! cargo run --bin forecast_check --features cli -- AAPL
//! ```

use market_forecast_core::errors::CoreError;
use market_forecast_core::logging::{init_logging, LoggingConfig};
use market_forecast_core::models::chart::ChartDimensions;
use market_forecast_core::models::settings::ClientSettings;
use market_forecast_core::services::format::{
    format_date_long, format_percent, format_price, format_volume,
};
use market_forecast_core::ForecastDashboard;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env())?;

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());
    let settings = ClientSettings::from_env()?;
    tracing::info!(base_url = %settings.base_url, %symbol, "starting forecast check");

    let mut dashboard = ForecastDashboard::new(&settings);
    for market in dashboard.load_markets().await {
        println!("  {}", market.label());
    }

    dashboard.load_market(&symbol).await?;
    if let Some(bar) = dashboard.market_data() {
        let day = format_date_long(bar.last_updated.as_deref().unwrap_or(""));
        println!("\n{symbol} - prior trading day ({day})");
        println!("  Open   {}", format_price(bar.open));
        println!("  High   {}", format_price(bar.high));
        println!("  Low    {}", format_price(bar.low));
        println!("  Close  {}", format_price(bar.close));
        println!("  Volume {}", format_volume(bar.volume));
    }

    dashboard.request_prediction().await?;
    let Some(prediction) = dashboard.prediction() else {
        return Ok(());
    };
    println!(
        "\nPredicted close {} ({}, {:.0}% confidence, {})",
        format_price(Some(prediction.predicted_close)),
        prediction.model,
        prediction.clamped_confidence(),
        if prediction.cache_hit { "cached" } else { "fresh" },
    );
    println!("Expected change {}", format_percent(dashboard.expected_change_pct()));

    if let Some(chart) = dashboard.chart(ChartDimensions::default())? {
        for point in &chart.points {
            println!(
                "  {:<8} {:>10} at ({:.1}, {:.1}){}",
                point.label,
                format_price(Some(point.price)),
                point.x,
                point.y,
                if point.is_extremum { " *" } else { "" },
            );
        }
        for note in &chart.annotations {
            println!("  [{}] {}", note.caption, note.label);
        }
    }

    Ok(())
}
