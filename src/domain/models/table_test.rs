use anyhow::Result;

use super::FinancialTable;
use super::LineItem;
use super::PREVIEW_MAX_ROWS;

fn table_with_rows(count: usize) -> FinancialTable {
    let rows = (1..=count)
        .map(|n| {
            return LineItem::new(&format!("Item {n}"), 100, 200, 100.0);
        })
        .collect::<Vec<LineItem>>();

    return FinancialTable { rows };
}

#[test]
fn it_builds_the_sample_table() {
    let table = FinancialTable::sample();

    assert_eq!(table.len(), 5);
    assert!(!table.is_empty());
    assert_eq!(table.rows[0].label, "Cash");
    assert_eq!(table.rows[0].prior_year, 1000);
    assert_eq!(table.rows[0].current_year, 1500);
    assert_eq!(table.rows[3].growth_pct, -6.25);
}

#[test]
fn it_renders_markdown() -> Result<()> {
    let markdown = FinancialTable::sample().to_markdown(PREVIEW_MAX_ROWS)?;
    let lines = markdown.split('\n').collect::<Vec<&str>>();

    assert_eq!(lines.len(), 7);
    assert_eq!(
        lines[0],
        "| Line item | Prior year | Current year | Growth (%) |"
    );
    assert_eq!(lines[1], "| --- | ---: | ---: | ---: |");
    assert_eq!(lines[2], "| Cash | 1000 | 1500 | 50.00 |");
    assert_eq!(lines[5], "| Short-term liabilities | 8000 | 7500 | -6.25 |");

    return Ok(());
}

#[test]
fn it_truncates_to_max_rows() -> Result<()> {
    let markdown = table_with_rows(12).to_markdown(PREVIEW_MAX_ROWS)?;
    let lines = markdown.split('\n').collect::<Vec<&str>>();

    assert_eq!(lines.len(), 2 + PREVIEW_MAX_ROWS);
    assert!(markdown.contains("| Item 10 |"));
    assert!(!markdown.contains("| Item 11 |"));

    return Ok(());
}

#[test]
fn it_renders_only_headers_for_empty_tables() -> Result<()> {
    let markdown = FinancialTable::default().to_markdown(PREVIEW_MAX_ROWS)?;
    let lines = markdown.split('\n').collect::<Vec<&str>>();

    assert_eq!(lines.len(), 2);

    return Ok(());
}
