#[cfg(test)]
#[path = "table_test.rs"]
mod tests;

use std::fmt::Write;

use anyhow::Result;

/// Maximum number of rows included in a prompt context preview.
pub const PREVIEW_MAX_ROWS: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub label: String,
    pub prior_year: i64,
    pub current_year: i64,
    pub growth_pct: f64,
}

impl LineItem {
    pub fn new(label: &str, prior_year: i64, current_year: i64, growth_pct: f64) -> LineItem {
        return LineItem {
            label: label.to_string(),
            prior_year,
            current_year,
            growth_pct,
        };
    }
}

/// The processed financial statement table for the session. The contents are
/// a fixed sample and never change for the lifetime of the process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FinancialTable {
    pub rows: Vec<LineItem>,
}

impl FinancialTable {
    pub fn sample() -> FinancialTable {
        return FinancialTable {
            rows: vec![
                LineItem::new("Cash", 1000, 1500, 50.0),
                LineItem::new("Accounts receivable", 5000, 5500, 10.0),
                LineItem::new("Total assets", 20000, 22000, 10.0),
                LineItem::new("Short-term liabilities", 8000, 7500, -6.25),
                LineItem::new("Owner's equity", 12000, 14500, 20.83),
            ],
        };
    }

    pub fn len(&self) -> usize {
        return self.rows.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.rows.is_empty();
    }

    /// Renders the first `min(max_rows, len)` rows as a markdown pipe table.
    pub fn to_markdown(&self, max_rows: usize) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "| Line item | Prior year | Current year | Growth (%) |")?;
        writeln!(out, "| --- | ---: | ---: | ---: |")?;

        for row in self.rows.iter().take(max_rows) {
            writeln!(
                out,
                "| {} | {} | {} | {:.2} |",
                row.label, row.prior_year, row.current_year, row.growth_pct
            )?;
        }

        return Ok(out.trim_end().to_string());
    }
}
