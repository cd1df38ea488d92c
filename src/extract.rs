//! Table extraction over parsed documents.
//!
//! Everything that touches the markup library's object model for tabular
//! regions lives here, so the merge and persistence logic never sees a
//! selector. [`extract_rows`] yields rows lazily in document order and
//! tolerates malformed rows by skipping them; [`format_numbers`] handles the
//! multi-value phone/fax cells.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::debug;

static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// One retained table row: its `td` cells in document order.
///
/// Cells stay as raw element references so callers can sub-parse them
/// (multi-value number cells, onclick attributes) without re-querying the
/// document.
pub struct Row<'a> {
    pub cells: Vec<ElementRef<'a>>,
}

impl<'a> Row<'a> {
    /// Concatenated text of cell `index`, trimmed.
    pub fn text(&self, index: usize) -> String {
        self.cells[index].text().collect::<String>().trim().to_string()
    }

    /// Attribute `name` of cell `index`, if present.
    pub fn attr(&self, index: usize, name: &str) -> Option<&'a str> {
        self.cells.get(index)?.value().attr(name)
    }
}

/// Yield the rows of `table` that have at least `min_columns` cells.
///
/// Rows with fewer cells (header rows, separator rows, malformed markup) are
/// skipped with a debug log, never an error. The sequence is lazy and
/// single-pass, consistent with walking the parsed document once.
pub fn extract_rows<'a>(
    table: ElementRef<'a>,
    min_columns: usize,
) -> impl Iterator<Item = Row<'a>> + 'a {
    table.select(&TR).filter_map(move |tr| {
        let cells: Vec<ElementRef<'a>> = tr.select(&TD).collect();
        if cells.len() < min_columns {
            debug!(cells = cells.len(), min_columns, "Skipping malformed row");
            return None;
        }
        Some(Row { cells })
    })
}

/// Split a multi-value cell into formatted numbers.
///
/// The phone and fax cells hold several numbers separated by line breaks.
/// Each fragment is trimmed; fragments shorter than `min_len` are stray
/// separators and are dropped. Surviving fragments get `prefix` prepended,
/// in their original order.
pub fn format_numbers(cell: ElementRef<'_>, min_len: usize, prefix: &str) -> Vec<String> {
    cell.text()
        .flat_map(|fragment| fragment.lines())
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.chars().count() >= min_len {
                Some(format!("{prefix}{trimmed}"))
            } else {
                None
            }
        })
        .collect()
}
