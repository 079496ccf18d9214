//! Rate data models.

use serde::Serialize;

/// One published row of the quotation table.
///
/// Every field is kept verbatim as text. Some cells are legitimately empty
/// (for example, cash rates for currencies the bank does not trade in cash).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRecord {
    /// Canonical currency code (e.g. "USD"), set by the aggregator
    pub currency_name: String,
    pub foreign_exchange_buying_rate: String,
    pub cash_buying_rate: String,
    pub foreign_exchange_selling_rate: String,
    pub cash_selling_rate: String,
    /// The bank's own conversion (middle) rate
    pub boc_conversion_rate: String,
    pub release_time: String,
}

impl RateRecord {
    /// Returns the record relabelled with the given currency code.
    pub fn with_code(mut self, code: &str) -> Self {
        self.currency_name = code.to_string();
        self
    }
}

/// Position of a page within the quotation listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListingPage {
    /// `index.html`
    First,
    /// `index_{n}.html`
    Continuation(u8),
}

impl ListingPage {
    /// File name of the page relative to the listing base.
    pub fn file_name(&self) -> String {
        match self {
            ListingPage::First => "index.html".to_string(),
            ListingPage::Continuation(n) => format!("index_{}.html", n),
        }
    }

    /// Full URL of the page under `base`.
    ///
    /// `base` may be given with or without a trailing slash.
    pub fn resolve(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_names() {
        assert_eq!(ListingPage::First.file_name(), "index.html");
        assert_eq!(ListingPage::Continuation(3).file_name(), "index_3.html");
    }

    #[test]
    fn test_resolve_handles_trailing_slash() {
        let with = ListingPage::Continuation(1).resolve("https://www.boc.cn/sourcedb/whpj/");
        let without = ListingPage::Continuation(1).resolve("https://www.boc.cn/sourcedb/whpj");
        assert_eq!(with, "https://www.boc.cn/sourcedb/whpj/index_1.html");
        assert_eq!(with, without);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = RateRecord {
            currency_name: "USD".to_string(),
            foreign_exchange_buying_rate: "710.52".to_string(),
            release_time: "2024.11.01 10:30:00".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["currencyName"], "USD");
        assert_eq!(json["foreignExchangeBuyingRate"], "710.52");
        assert_eq!(json["bocConversionRate"], "");
        assert_eq!(json["releaseTime"], "2024.11.01 10:30:00");
    }
}
