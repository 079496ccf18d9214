use serde::Serialize;
use utoipa::ToSchema;

pub const SUCCESS_MESSAGE: &str = "success";

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RateRecord {
    /// Requested currency code
    pub currency_name: String,
    pub foreign_exchange_buying_rate: String,
    pub cash_buying_rate: String,
    pub foreign_exchange_selling_rate: String,
    pub cash_selling_rate: String,
    pub boc_conversion_rate: String,
    pub release_time: String,
}

impl From<boc_rates::RateRecord> for RateRecord {
    fn from(r: boc_rates::RateRecord) -> Self {
        Self {
            currency_name: r.currency_name,
            foreign_exchange_buying_rate: r.foreign_exchange_buying_rate,
            cash_buying_rate: r.cash_buying_rate,
            foreign_exchange_selling_rate: r.foreign_exchange_selling_rate,
            cash_selling_rate: r.cash_selling_rate,
            boc_conversion_rate: r.boc_conversion_rate,
            release_time: r.release_time,
        }
    }
}

/// Envelope returned by the rate endpoint, for success and failure alike.
#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct RateResponse {
    pub code: u16,
    pub message: String,
    pub data: Option<Vec<RateRecord>>,
}

impl RateResponse {
    pub fn success(records: Vec<RateRecord>) -> Self {
        Self {
            code: 200,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(records),
        }
    }

    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct SupportedCurrency {
    pub code: String,
    /// Name used by the quotation table
    pub name: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct CurrencyListResponse {
    pub code: u16,
    pub message: String,
    pub data: Vec<SupportedCurrency>,
}
