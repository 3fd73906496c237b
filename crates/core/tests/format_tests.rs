// ═══════════════════════════════════════════════════════════════════
// Format Tests — prices, percentages, volumes, dates and sentinels
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use serde_json::json;

use market_forecast_core::services::format::{
    format_date_long, format_date_short, format_percent, format_price, format_price_value,
    format_volume, parse_date, INVALID_DATE, NOT_AVAILABLE,
};

mod price {
    use super::*;

    #[test]
    fn missing_price_is_not_available() {
        assert_eq!(format_price(None), "N/A");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_price(Some(182.456)), "$182.46");
    }

    #[test]
    fn pads_to_two_decimals() {
        assert_eq!(format_price(Some(185.0)), "$185.00");
        assert_eq!(format_price(Some(0.0)), "$0.00");
    }

    #[test]
    fn negative_sign_goes_before_the_dollar() {
        assert_eq!(format_price(Some(-3.5)), "-$3.50");
    }

    #[test]
    fn non_finite_is_not_available() {
        assert_eq!(format_price(Some(f64::NAN)), NOT_AVAILABLE);
        assert_eq!(format_price(Some(f64::INFINITY)), NOT_AVAILABLE);
    }

    #[test]
    fn json_numbers_and_numeric_strings() {
        assert_eq!(format_price_value(Some(&json!(182.456))), "$182.46");
        assert_eq!(format_price_value(Some(&json!("12.3"))), "$12.30");
    }

    #[test]
    fn json_non_numeric_is_not_available() {
        assert_eq!(format_price_value(None), "N/A");
        assert_eq!(format_price_value(Some(&json!(null))), "N/A");
        assert_eq!(format_price_value(Some(&json!("abc"))), "N/A");
        assert_eq!(format_price_value(Some(&json!({ "v": 1 }))), "N/A");
    }
}

mod percent_and_volume {
    use super::*;

    #[test]
    fn percent_is_signed() {
        assert_eq!(format_percent(Some(0.27)), "+0.27%");
        assert_eq!(format_percent(Some(-1.5)), "-1.50%");
        assert_eq!(format_percent(None), "N/A");
    }

    #[test]
    fn volume_has_thousands_separators() {
        assert_eq!(format_volume(Some(5_000_000)), "5,000,000");
        assert_eq!(format_volume(Some(1_000)), "1,000");
        assert_eq!(format_volume(Some(999)), "999");
        assert_eq!(format_volume(Some(0)), "0");
        assert_eq!(format_volume(Some(12_345_678)), "12,345,678");
        assert_eq!(format_volume(None), "N/A");
    }
}

mod dates {
    use super::*;

    #[test]
    fn long_form() {
        assert_eq!(format_date_long("2024-01-12"), "Friday, January 12, 2024");
    }

    #[test]
    fn short_form() {
        assert_eq!(format_date_short("2024-01-12"), "Jan 12");
        assert_eq!(format_date_short("2024-11-05"), "Nov 5");
    }

    #[test]
    fn timestamps_are_accepted() {
        assert_eq!(format_date_short("2024-01-11T00:00:00"), "Jan 11");
        assert_eq!(format_date_short("2024-01-11T00:00:00.123456"), "Jan 11");
        assert_eq!(format_date_short("2024-01-11T10:30:00+00:00"), "Jan 11");
        assert_eq!(format_date_short("2024-01-11 09:15:00"), "Jan 11");
    }

    #[test]
    fn blank_input_is_not_available() {
        assert_eq!(format_date_long(""), NOT_AVAILABLE);
        assert_eq!(format_date_short("   "), NOT_AVAILABLE);
    }

    #[test]
    fn unparsable_input_is_invalid_date() {
        assert_eq!(format_date_long("not a date"), INVALID_DATE);
        assert_eq!(format_date_short("2024-13-01"), INVALID_DATE);
    }

    #[test]
    fn parse_date_returns_calendar_day() {
        assert_eq!(
            parse_date("2024-01-11T23:59:59"),
            NaiveDate::from_ymd_opt(2024, 1, 11)
        );
        assert_eq!(parse_date("yesterday"), None);
    }
}
