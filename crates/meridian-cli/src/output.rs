//! Table and message formatting for the terminal UI.

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render a list of rows as a table, or a placeholder when empty.
pub fn print_table<T: Tabled>(rows: &[T]) {
    if rows.is_empty() {
        println!("\nNo results found.\n");
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("\n{table}\n");
}

pub fn print_heading(msg: &str) {
    println!("\n{msg}\n");
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Format an optional staff reference.
pub fn opt_id(id: &Option<uuid::Uuid>) -> String {
    id.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
