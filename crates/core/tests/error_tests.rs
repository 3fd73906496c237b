// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use market_forecast_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn empty_response() {
        assert_eq!(
            CoreError::EmptyResponse.to_string(),
            "Empty response from prediction service"
        );
    }

    #[test]
    fn service_reported_error() {
        let err = CoreError::ServiceReportedError("Données insuffisantes".into());
        assert_eq!(
            err.to_string(),
            "Prediction service reported an error: Données insuffisantes"
        );
    }

    #[test]
    fn no_prediction_value() {
        assert_eq!(
            CoreError::NoPredictionValue.to_string(),
            "No predicted close value found in response"
        );
    }

    #[test]
    fn invalid_prediction_value() {
        let err = CoreError::InvalidPredictionValue {
            key: "predicted".into(),
            value: "\"n/a\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'predicted': \"n/a\" is not a finite number"
        );
    }

    #[test]
    fn invalid_geometry_input() {
        let err = CoreError::InvalidGeometryInput("price at point 2 is not finite (NaN)".into());
        assert_eq!(
            err.to_string(),
            "Invalid chart input: price at point 2 is not finite (NaN)"
        );
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "Forecast API".into(),
            message: "HTTP 404 Not Found".into(),
        };
        assert_eq!(err.to_string(), "API error (Forecast API): HTTP 404 Not Found");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("No market selected".into());
        assert_eq!(err.to_string(), "Validation failed: No market selected");
    }

    #[test]
    fn config() {
        let err = CoreError::Config("bad timeout".into());
        assert_eq!(err.to_string(), "Configuration error: bad timeout");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(ref m) if !m.is_empty()));
    }

    #[test]
    fn question_mark_converts_json_errors() {
        fn parse(s: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(s)?)
        }
        assert!(parse("[1, 2]").is_ok());
        assert!(matches!(parse("]"), Err(CoreError::Deserialization(_))));
    }
}

#[test]
fn core_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<CoreError>();
}
