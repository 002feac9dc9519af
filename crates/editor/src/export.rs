//! CSV export of the visible table.

use chrono::NaiveDate;

use meditrack_inventory::money::{CURRENCY_ASCII, CURRENCY_SYMBOL};

use crate::table::TableView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
}

/// Header row plus one line per row, in table order. Only data columns are
/// written, and `₹` is replaced with `Rs.`.
pub fn export_csv(
    table: &TableView,
    page: &str,
    today: NaiveDate,
) -> Result<CsvExport, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let fields = table.kind().fields();
    let mut header = vec!["ID"];
    header.extend(fields.iter().map(|f| f.label()));
    wtr.write_record(&header)?;

    for row in table.rows() {
        let mut line = vec![row.id().to_string()];
        line.extend(fields.iter().map(|f| {
            row.cell(*f)
                .map(|c| c.text().replace(CURRENCY_SYMBOL, CURRENCY_ASCII))
                .unwrap_or_default()
        }));
        wtr.write_record(&line)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let contents = String::from_utf8_lossy(&bytes).into_owned();

    Ok(CsvExport {
        file_name: format!("meditrack_{page}_export_{}.csv", today.format("%Y-%m-%d")),
        contents,
    })
}
