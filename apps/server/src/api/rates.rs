use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    routing::get,
    Json, Router,
};
use boc_rates::RateError;

use crate::{
    error::{ApiError, ApiResult, INVALID_FORMAT_MESSAGE},
    main_lib::AppState,
    models::{CurrencyListResponse, RateRecord, RateResponse, SupportedCurrency, SUCCESS_MESSAGE},
};

/// Validate and normalize the `currency` query parameter.
///
/// The code must be exactly three characters; it is uppercased and checked
/// against the catalog before any page is fetched. When the key is repeated
/// the first value is used.
fn parse_currency(query: Option<&str>) -> ApiResult<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.unwrap_or_default())
        .map_err(|_| ApiError::BadRequest(INVALID_FORMAT_MESSAGE.to_string()))?;

    let currency = pairs
        .into_iter()
        .find_map(|(key, value)| (key == "currency").then_some(value))
        .filter(|c| c.chars().count() == 3)
        .ok_or_else(|| ApiError::BadRequest(INVALID_FORMAT_MESSAGE.to_string()))?;

    let code = currency.to_uppercase();
    if !boc_rates::is_supported(&code) {
        return Err(RateError::UnsupportedCurrency(code).into());
    }
    Ok(code)
}

#[utoipa::path(
    get,
    path = "/",
    params(("currency" = String, Query, description = "Three-letter currency code, case-insensitive")),
    responses(
        (status = 200, body = RateResponse),
        (status = 400, body = RateResponse, description = "Malformed or unsupported code"),
        (status = 404, body = RateResponse, description = "No published rate"),
        (status = 500, body = RateResponse),
    )
)]
pub async fn get_rate(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<RateResponse>> {
    let code = parse_currency(query.as_deref())?;
    let records = state.aggregator.aggregate(&code).await?;
    tracing::info!("Found {} rate rows for {}", records.len(), code);
    Ok(Json(RateResponse::success(
        records.into_iter().map(RateRecord::from).collect(),
    )))
}

#[utoipa::path(get, path = "/api/v1/currencies", responses((status = 200, body = CurrencyListResponse)))]
pub async fn list_currencies() -> Json<CurrencyListResponse> {
    let data = boc_rates::supported_codes()
        .map(|(code, name)| SupportedCurrency {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect();
    Json(CurrencyListResponse {
        code: 200,
        message: SUCCESS_MESSAGE.to_string(),
        data,
    })
}

/// Rate lookup, served at the root.
pub fn rate_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_rate))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/currencies", get(list_currencies))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: ApiResult<String>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_accepts_any_case() {
        assert_eq!(parse_currency(Some("currency=usd")).unwrap(), "USD");
        assert_eq!(parse_currency(Some("currency=Eur")).unwrap(), "EUR");
        assert_eq!(parse_currency(Some("foo=1&currency=JPY")).unwrap(), "JPY");
    }

    #[test]
    fn test_repeated_key_uses_first_value() {
        assert_eq!(
            parse_currency(Some("currency=usd&currency=EUR")).unwrap(),
            "USD"
        );
        assert_eq!(
            message(parse_currency(Some("currency=XXX&currency=USD"))),
            "Unsupported currency code: XXX"
        );
        assert_eq!(
            message(parse_currency(Some("currency=US&currency=USD"))),
            INVALID_FORMAT_MESSAGE
        );
    }

    #[test]
    fn test_missing_or_wrong_length_is_format_error() {
        for query in [None, Some(""), Some("currency="), Some("currency=US"), Some("currency=USDT")] {
            assert_eq!(message(parse_currency(query)), INVALID_FORMAT_MESSAGE);
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Three characters, nine bytes: passes the format check, fails the catalog.
        let err = parse_currency(Some("currency=%E7%BE%8E%E5%85%83%E5%85%83")).unwrap_err();
        assert!(matches!(err, ApiError::Rate(RateError::UnsupportedCurrency(_))));
    }

    #[test]
    fn test_unknown_code_names_the_code() {
        assert_eq!(
            message(parse_currency(Some("currency=xxx"))),
            "Unsupported currency code: XXX"
        );
    }
}
