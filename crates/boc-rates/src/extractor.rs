//! Quotation table extraction.
//!
//! The listing renders one `<table align="left">` whose first row is a header
//! and whose data rows carry seven cells:
//!
//! ```text
//! | name | FX buy | cash buy | FX sell | cash sell | conversion | release time |
//! ```
//!
//! Each cell is read from its first text node and trimmed. Cells 2-6 may be
//! blank; the release time may not.

use scraper::{ElementRef, Html, Selector};

use crate::errors::RateError;
use crate::models::RateRecord;

const RATE_TABLE: &str = r#"table[align="left"]"#;

/// Extract every row of `html` whose name cell equals `localized_name`.
///
/// A page that is not UTF-8, has no rate table, or carries a matching row
/// without a release time yields no records. Rows keep document order and
/// leave `currency_name` empty for the caller to assign.
pub fn extract(html: &[u8], localized_name: &str) -> Vec<RateRecord> {
    match try_extract(html, localized_name) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Discarding page while looking for {}: {}", localized_name, e);
            Vec::new()
        }
    }
}

/// Like [`extract`], but reports why a page was unusable.
pub fn try_extract(html: &[u8], localized_name: &str) -> Result<Vec<RateRecord>, RateError> {
    let text = std::str::from_utf8(html)
        .map_err(|e| RateError::Malformed(format!("page is not valid UTF-8: {}", e)))?;
    let document = Html::parse_document(text);
    let table_selector =
        Selector::parse(RATE_TABLE).map_err(|e| RateError::Malformed(e.to_string()))?;

    let mut records = Vec::new();
    for table in document.select(&table_selector) {
        for row in table_rows(table).into_iter().skip(1) {
            let cells: Vec<ElementRef> = child_elements(row, "td").collect();

            let Some(name) = cells.first().and_then(|cell| first_text(*cell)) else {
                continue;
            };
            if name != localized_name {
                continue;
            }

            let release_time = cells
                .get(6)
                .and_then(|cell| first_text(*cell))
                .ok_or_else(|| {
                    RateError::Malformed(format!("row for {} has no release time", name))
                })?;
            let cell = |index: usize| {
                cells
                    .get(index)
                    .and_then(|cell| first_text(*cell))
                    .unwrap_or_default()
            };

            records.push(RateRecord {
                currency_name: String::new(),
                foreign_exchange_buying_rate: cell(1),
                cash_buying_rate: cell(2),
                foreign_exchange_selling_rate: cell(3),
                cash_selling_rate: cell(4),
                boc_conversion_rate: cell(5),
                release_time,
            });
        }
    }

    Ok(records)
}

/// Rows belonging directly to `table`, looking through the row groups the
/// HTML parser inserts (`tbody` etc.) but not into nested tables.
fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(child_elements(child, "tr")),
            _ => {}
        }
    }
    rows
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == name)
}

/// Trimmed content of the element's first direct text node.
fn first_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .find_map(|node| node.value().as_text().map(|text| text.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "<tr><th>货币名称</th><th>现汇买入价</th><th>现钞买入价</th>\
        <th>现汇卖出价</th><th>现钞卖出价</th><th>中行折算价</th><th>发布时间</th></tr>";

    fn page(rows: &str) -> String {
        format!(
            "<html><body>\
             <table width=\"100%\"><tr><td>menu</td></tr>\
             <tr><td>美元</td><td>a</td><td>b</td><td>c</td><td>d</td><td>e</td><td>layout</td></tr></table>\
             <table cellpadding=\"0\" align=\"left\" cellspacing=\"0\" width=\"100%\">{}{}</table>\
             </body></html>",
            HEADER, rows
        )
    }

    fn row(name: &str, cells: [&str; 6]) -> String {
        let mut html = format!("<tr><td>{}</td>", name);
        for cell in cells {
            html.push_str(&format!("<td>{}</td>", cell));
        }
        html.push_str("</tr>");
        html
    }

    #[test]
    fn test_extracts_matching_row() {
        let html = page(&format!(
            "{}{}",
            row("港币", ["91.26", "91.16", "91.63", "91.63", "91.41", "2024.11.01 10:30:00"]),
            row("美元", ["710.52", "710.52", "713.51", "713.51", "711.93", "2024.11.01 10:30:00"]),
        ));

        let records = extract(html.as_bytes(), "美元");

        assert_eq!(records.len(), 1);
        let usd = &records[0];
        assert_eq!(usd.currency_name, "");
        assert_eq!(usd.foreign_exchange_buying_rate, "710.52");
        assert_eq!(usd.cash_buying_rate, "710.52");
        assert_eq!(usd.foreign_exchange_selling_rate, "713.51");
        assert_eq!(usd.cash_selling_rate, "713.51");
        assert_eq!(usd.boc_conversion_rate, "711.93");
        assert_eq!(usd.release_time, "2024.11.01 10:30:00");
    }

    #[test]
    fn test_only_left_aligned_table_is_scanned() {
        let html = page(&row("港币", ["1", "2", "3", "4", "5", "2024.11.01 10:30:00"]));

        // The layout table above also contains a "美元" cell.
        assert!(extract(html.as_bytes(), "美元").is_empty());
    }

    #[test]
    fn test_trims_whitespace_and_blanks_empty_cells() {
        let html = page(
            "<tr><td>\n  巴西里亚尔 \n</td><td></td><td>  127.4 </td><td></td>\
             <td>149.55</td><td>124.67</td><td> 2024.11.01 10:30:00\n</td></tr>",
        );

        let records = extract(html.as_bytes(), "巴西里亚尔");

        assert_eq!(records.len(), 1);
        let brl = &records[0];
        assert_eq!(brl.foreign_exchange_buying_rate, "");
        assert_eq!(brl.cash_buying_rate, "127.4");
        assert_eq!(brl.foreign_exchange_selling_rate, "");
        assert_eq!(brl.cash_selling_rate, "149.55");
        assert_eq!(brl.release_time, "2024.11.01 10:30:00");
    }

    #[test]
    fn test_multiple_matches_keep_document_order() {
        let html = page(&format!(
            "{}{}{}",
            row("美元", ["7.0", "", "", "", "", "2024.11.01 09:30:00"]),
            row("欧元", ["7.8", "", "", "", "", "2024.11.01 09:30:00"]),
            row("美元", ["7.1", "", "", "", "", "2024.11.01 10:30:00"]),
        ));

        let records = extract(html.as_bytes(), "美元");

        let rates: Vec<&str> = records
            .iter()
            .map(|r| r.foreign_exchange_buying_rate.as_str())
            .collect();
        assert_eq!(rates, vec!["7.0", "7.1"]);
    }

    #[test]
    fn test_header_row_is_skipped() {
        let html = page(&row("美元", ["1", "", "", "", "", "t"]));

        assert!(extract(html.as_bytes(), "货币名称").is_empty());
    }

    #[test]
    fn test_first_row_skipped_even_without_th() {
        let html = format!(
            "<table align=\"left\">{}{}</table>",
            row("美元", ["header", "", "", "", "", "t0"]),
            row("美元", ["7.0", "", "", "", "", "t1"]),
        );

        let records = extract(html.as_bytes(), "美元");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].release_time, "t1");
    }

    #[test]
    fn test_missing_table_yields_nothing() {
        let html = "<html><body><p>Service unavailable</p></body></html>";

        assert!(extract(html.as_bytes(), "美元").is_empty());
    }

    #[test]
    fn test_invalid_utf8_yields_nothing() {
        let bytes = [0x3c, 0x74, 0x61, 0xff, 0xfe, 0x3e];

        assert!(extract(&bytes, "美元").is_empty());
        assert!(matches!(
            try_extract(&bytes, "美元"),
            Err(RateError::Malformed(_))
        ));
    }

    #[test]
    fn test_matching_row_without_release_time_discards_page() {
        let html = page(&format!(
            "{}{}",
            row("美元", ["7.0", "", "", "", "", "2024.11.01 09:30:00"]),
            "<tr><td>美元</td><td>7.1</td><td></td></tr>",
        ));

        assert!(extract(html.as_bytes(), "美元").is_empty());
        assert!(try_extract(html.as_bytes(), "美元").is_err());
    }

    #[test]
    fn test_row_without_cells_is_skipped() {
        let html = page(&format!(
            "<tr></tr>{}",
            row("美元", ["7.0", "", "", "", "", "2024.11.01 09:30:00"])
        ));

        assert_eq!(extract(html.as_bytes(), "美元").len(), 1);
    }
}
