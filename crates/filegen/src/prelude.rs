pub use crate::error::Error;

pub use anstream::{eprint, eprintln, println};
pub use color_eyre::eyre::{eyre, Context, OptionExt, Result};
pub use std::format as f;

use colored::Colorize;
use prettytable::{format::FormatBuilder, Cell, Row, Table};

/// Borderless table with a bold header row.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(FormatBuilder::new().padding(1, 1).build());

    let titles = headers
        .iter()
        .map(|header| Cell::new(&header.bold().to_string()))
        .collect();
    table.set_titles(Row::new(titles));

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_has_headers_and_no_rows() {
        let table = new_table(&["TYPE", "EXTENSION"]);
        let rendered = table.to_string();

        assert_eq!(table.len(), 0);
        assert!(rendered.contains("TYPE"));
        assert!(rendered.contains("EXTENSION"));
    }
}
