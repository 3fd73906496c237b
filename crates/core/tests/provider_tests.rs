// ═══════════════════════════════════════════════════════════════════
// Provider Tests — HTTP provider URL building and body handling
// ═══════════════════════════════════════════════════════════════════

use reqwest::StatusCode;
use serde_json::json;

use market_forecast_core::errors::CoreError;
use market_forecast_core::models::settings::ClientSettings;
use market_forecast_core::providers::http::{error_message, parse_body, HttpForecastProvider};
use market_forecast_core::providers::traits::ForecastProvider;

fn provider(base_url: &str) -> HttpForecastProvider {
    HttpForecastProvider::new(&ClientSettings::new(base_url, 5))
}

mod endpoints {
    use super::*;

    #[test]
    fn default_points_at_local_api() {
        let p = HttpForecastProvider::default();
        assert_eq!(p.base_url(), "http://localhost:8000/api");
        assert_eq!(p.name(), "Forecast API");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(provider("http://localhost:8000/api/").base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn predict_endpoint() {
        let url = provider("http://localhost:8000/api").endpoint(&["predict", "BTC-USD"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/predict/BTC-USD");
    }

    #[test]
    fn markets_endpoint_without_base_path() {
        let url = provider("http://localhost:8000").endpoint(&["markets"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/markets");
    }

    #[test]
    fn symbol_segment_is_encoded() {
        let url = provider("http://localhost:8000/api").endpoint(&["market-data", "A/B C"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/market-data/A%2FB%20C");
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = provider("not a url").endpoint(&["markets"]).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}

mod bodies {
    use super::*;

    #[test]
    fn blank_body_is_none() {
        assert_eq!(parse_body("").unwrap(), None);
        assert_eq!(parse_body("  \n").unwrap(), None);
    }

    #[test]
    fn null_body_is_none() {
        assert_eq!(parse_body("null").unwrap(), None);
    }

    #[test]
    fn json_body_is_returned() {
        let body = r#"{"predicted_close": 184.5, "confidence": 89}"#;
        assert_eq!(
            parse_body(body).unwrap(),
            Some(json!({ "predicted_close": 184.5, "confidence": 89 }))
        );
    }

    #[test]
    fn garbage_body_is_deserialization_error() {
        assert!(matches!(parse_body("<html>"), Err(CoreError::Deserialization(_))));
    }
}

mod failures {
    use super::*;

    #[test]
    fn detail_from_json_body() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Données insuffisantes (3 jours, besoin 30+)"}"#,
        );
        assert_eq!(msg, "Données insuffisantes (3 jours, besoin 30+)");
    }

    #[test]
    fn message_from_json_body() {
        let msg = error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message": "boom"}"#);
        assert_eq!(msg, "boom");
    }

    #[test]
    fn status_line_when_body_is_unhelpful() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "HTTP 404 Not Found");
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "HTTP 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let p = provider("http://127.0.0.1:9/api");
        let err = p.list_markets().await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}
