use std::borrow::Cow;
use std::io::Write;

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::currency::format_plain;
use crate::errors::LedgerResult;
use crate::ledger::ProjectedSme;

pub const CSV_HEADER: [&str; 9] = [
    "ID",
    "Name",
    "Phone",
    "Tool Given",
    "Total Cost",
    "Daily Rate",
    "Total Paid",
    "Balance",
    "Status",
];

/// One master-list row, already rendered to text cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmeRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub tool_given: String,
    pub total_cost: String,
    pub daily_rate: String,
    pub total_paid: String,
    pub balance: String,
    pub status: String,
}

impl From<&ProjectedSme> for SmeRecord {
    fn from(entry: &ProjectedSme) -> Self {
        let sme = entry.sme();
        Self {
            id: sme.id.to_string(),
            name: sme.name.clone(),
            phone: sme.phone.clone(),
            tool_given: sme.tool_given.clone(),
            total_cost: format_plain(sme.total_cost),
            daily_rate: format_plain(sme.daily_rate),
            total_paid: format_plain(entry.total_paid()),
            balance: format_plain(entry.balance()),
            status: entry.status().label().to_string(),
        }
    }
}

impl SmeRecord {
    /// Cells as written to the file. Text columns are always quoted so that
    /// names and phone numbers which look like numbers stay text.
    fn cells(&self) -> [Cow<'_, str>; 9] {
        [
            Cow::Borrowed(self.id.as_str()),
            quote_text(&self.name),
            quote_text(&self.phone),
            quote_text(&self.tool_given),
            Cow::Borrowed(self.total_cost.as_str()),
            Cow::Borrowed(self.daily_rate.as_str()),
            Cow::Borrowed(self.total_paid.as_str()),
            Cow::Borrowed(self.balance.as_str()),
            quote_text(&self.status),
        ]
    }
}

fn quote_text(value: &str) -> Cow<'static, str> {
    Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
}

/// Writes the header row followed by one row per entry. Numeric cells are
/// left bare; text cells are double-quoted with embedded quotes doubled.
pub fn write_sme_csv<'a, W: Write>(
    out: W,
    entries: impl IntoIterator<Item = &'a ProjectedSme>,
) -> LedgerResult<()> {
    // Quoting is decided per column in `SmeRecord::cells`, not by content.
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        let record = SmeRecord::from(entry);
        writer.write_record(record.cells().iter().map(|cell| cell.as_bytes()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn sme_csv_string<'a>(entries: impl IntoIterator<Item = &'a ProjectedSme>) -> LedgerResult<String> {
    let mut buffer = Vec::new();
    write_sme_csv(&mut buffer, entries)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SmeDraft, TransactionDraft};
    use crate::ledger::LedgerStore;

    #[test]
    fn header_and_rows_use_expected_quoting() {
        let mut store = LedgerStore::new();
        store
            .add_sme(
                &SmeDraft::new("Alpha Textiles", "Sewing Machine")
                    .phone("555-0101")
                    .total_cost(500)
                    .daily_rate(10),
            )
            .unwrap();
        store
            .append_transaction(&TransactionDraft::new("2024-01-02", "001", 12.5, "Kwame"))
            .unwrap();

        let text = sme_csv_string(&store.project()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "ID,Name,Phone,Tool Given,Total Cost,Daily Rate,Total Paid,Balance,Status"
        );
        assert_eq!(
            lines[1],
            "001,\"Alpha Textiles\",\"555-0101\",\"Sewing Machine\",500,10,12.5,487.5,\"Active\""
        );
    }

    #[test]
    fn embedded_quotes_and_commas_are_escaped() {
        let mut store = LedgerStore::new();
        store
            .add_sme(
                &SmeDraft::new("Bob \"The\" Smith, Ltd", "Saw")
                    .total_cost(1)
                    .daily_rate(1),
            )
            .unwrap();
        let text = sme_csv_string(&store.project()).unwrap();
        assert!(text.contains("\"Bob \"\"The\"\" Smith, Ltd\""), "{text}");
    }

    #[test]
    fn numeric_looking_text_stays_quoted() {
        let mut store = LedgerStore::new();
        store
            .add_sme(
                &SmeDraft::new("2024", "Saw")
                    .phone("0244123456")
                    .total_cost(1)
                    .daily_rate(1),
            )
            .unwrap();
        store
            .add_sme(
                &SmeDraft::new("NaN", "inf")
                    .phone("1e5")
                    .total_cost(1)
                    .daily_rate(1),
            )
            .unwrap();

        let text = sme_csv_string(&store.project()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "001,\"2024\",\"0244123456\",\"Saw\",1,1,0,1,\"Active\"");
        assert_eq!(lines[2], "002,\"NaN\",\"1e5\",\"inf\",1,1,0,1,\"Active\"");
    }

    #[test]
    fn empty_view_still_has_header() {
        let text = sme_csv_string(&LedgerStore::new().project()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn export_name_carries_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(export_file_name("sme_export", date), "sme_export_2024-06-30.csv");
    }
}
