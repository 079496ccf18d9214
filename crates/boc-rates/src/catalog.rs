//! Currency catalog.
//!
//! Maps the three-letter codes we accept to the Chinese display names the
//! quotation table uses in its first column. The names are the join key
//! against scraped rows and must match the site byte for byte.

use lazy_static::lazy_static;
use std::collections::BTreeMap;

const CURRENCIES: &[(&str, &str)] = &[
    ("AED", "阿联酋迪拉姆"),
    ("AUD", "澳大利亚元"),
    ("BRL", "巴西里亚尔"),
    ("CAD", "加拿大元"),
    ("CHF", "瑞士法郎"),
    ("DKK", "丹麦克朗"),
    ("EUR", "欧元"),
    ("GBP", "英镑"),
    ("HKD", "港币"),
    ("IDR", "印尼卢比"),
    ("INR", "印度卢比"),
    ("JPY", "日元"),
    ("KRW", "韩国元"),
    ("MOP", "澳门元"),
    ("MYR", "林吉特"),
    ("NOK", "挪威克朗"),
    ("NZD", "新西兰元"),
    ("PHP", "菲律宾比索"),
    ("RUB", "卢布"),
    ("SAR", "沙特里亚尔"),
    ("SEK", "瑞典克朗"),
    ("SGD", "新加坡元"),
    ("THB", "泰国铢"),
    ("TRY", "土耳其里拉"),
    ("TWD", "新台币"),
    ("USD", "美元"),
    ("ZAR", "南非兰特"),
];

lazy_static! {
    static ref CATALOG: BTreeMap<&'static str, &'static str> =
        CURRENCIES.iter().copied().collect();
}

/// Localized name for `code`, if the code is supported.
///
/// Matching is exact: callers normalize case before looking up.
pub fn lookup(code: &str) -> Option<&'static str> {
    CATALOG.get(code).copied()
}

pub fn is_supported(code: &str) -> bool {
    CATALOG.contains_key(code)
}

/// All supported `(code, name)` pairs in ascending code order.
pub fn supported_codes() -> impl Iterator<Item = (&'static str, &'static str)> {
    CATALOG.iter().map(|(code, name)| (*code, *name))
}
