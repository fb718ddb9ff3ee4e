use super::BackendPrompt;
use super::CONTEXT_NO_DATA_NOTE;
use super::SYSTEM_INSTRUCTIONS;
use crate::domain::models::FinancialTable;
use crate::domain::models::LineItem;

#[test]
fn it_composes_with_table_context() {
    let table = FinancialTable::sample();
    let prompt = BackendPrompt::compose("How did cash evolve?", true, Some(&table));

    assert!(prompt.text.starts_with(SYSTEM_INSTRUCTIONS));
    assert!(prompt.text.contains("## User question:\nHow did cash evolve?"));
    assert!(prompt.text.contains("### Data context (truncated excerpt):"));
    assert!(prompt
        .text
        .contains("| Line item | Prior year | Current year | Growth (%) |"));
    assert!(prompt.text.contains("| Cash | 1000 | 1500 | 50.00 |"));
}

#[test]
fn it_previews_at_most_ten_rows() {
    let rows = (1..=12)
        .map(|n| {
            return LineItem::new(&format!("Item {n}"), 100, 200, 100.0);
        })
        .collect::<Vec<LineItem>>();
    let table = FinancialTable { rows };

    let prompt = BackendPrompt::compose("Summarize the table.", true, Some(&table));

    assert!(prompt.text.contains("| Item 10 |"));
    assert!(!prompt.text.contains("| Item 11 |"));
}

#[test]
fn it_substitutes_the_no_data_note_for_empty_tables() {
    let table = FinancialTable::default();
    let prompt = BackendPrompt::compose("Anything there?", true, Some(&table));

    assert!(prompt.text.contains(CONTEXT_NO_DATA_NOTE));
    assert!(!prompt.text.contains("| Line item |"));
}

#[test]
fn it_substitutes_the_no_data_note_for_missing_tables() {
    let prompt = BackendPrompt::compose("Anything there?", true, None);

    assert!(prompt.text.contains(CONTEXT_NO_DATA_NOTE));
}

#[test]
fn it_omits_context_when_disabled() {
    let table = FinancialTable::sample();
    let prompt = BackendPrompt::compose("How did cash evolve?", false, Some(&table));

    assert!(!prompt.text.contains("Data context"));
    assert!(!prompt.text.contains("| Cash |"));
    assert!(prompt.text.contains("How did cash evolve?"));
}
