//! Output formatting for user listings.
//!
//! Renders the result of `get_all_users` for the command-line front end.

use crate::models::{COLUMN_AGE, COLUMN_ID, COLUMN_LAST_NAME, COLUMN_NAME, User};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Output format for user listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array
    Json,
    /// ASCII table format (like MySQL CLI)
    #[default]
    Table,
    /// Markdown table format
    Markdown,
}

const COLUMNS: [&str; 4] = [COLUMN_ID, COLUMN_NAME, COLUMN_LAST_NAME, COLUMN_AGE];

/// Numeric cells are right-aligned in the ASCII table.
const NUMERIC: [bool; 4] = [true, false, false, true];

fn cells(user: &User) -> [String; 4] {
    [
        user.id.to_string(),
        user.name.clone(),
        user.last_name.clone(),
        user.age.to_string(),
    ]
}

pub fn format_users(users: &[User], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(users).unwrap_or_default() + "\n",
        OutputFormat::Table => format_as_table(users),
        OutputFormat::Markdown => format_as_markdown(users),
    }
}

pub fn format_as_table(users: &[User]) -> String {
    if users.is_empty() {
        return "Empty set\n".to_string();
    }

    let rows: Vec<[String; 4]> = users.iter().map(cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = String::new();
    let separator: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+\n";

    output.push_str(&separator);
    let header: String = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("| {} ", pad_center(col, *w)))
        .collect::<String>()
        + "|\n";
    output.push_str(&header);
    output.push_str(&separator);

    for row in &rows {
        let row_str: String = row
            .iter()
            .zip(&widths)
            .zip(NUMERIC)
            .map(|((cell, w), numeric)| {
                let fill = " ".repeat(w.saturating_sub(cell.width()));
                if numeric {
                    format!("| {}{} ", fill, cell)
                } else {
                    format!("| {}{} ", cell, fill)
                }
            })
            .collect::<String>()
            + "|\n";
        output.push_str(&row_str);
    }

    output.push_str(&separator);

    let row_text = if users.len() == 1 { "row" } else { "rows" };
    output.push_str(&format!("{} {} in set\n", users.len(), row_text));

    output
}

pub fn format_as_markdown(users: &[User]) -> String {
    let mut output = String::new();

    let header: String = COLUMNS
        .iter()
        .map(|c| format!("| {} ", c))
        .collect::<String>()
        + "|\n";
    output.push_str(&header);

    let sep: String = COLUMNS.iter().map(|_| "|---").collect::<String>() + "|\n";
    output.push_str(&sep);

    for user in users {
        let row_str: String = cells(user)
            .iter()
            .map(|cell| format!("| {} ", cell))
            .collect::<String>()
            + "|\n";
        output.push_str(&row_str);
    }

    output.push_str(&format!("\n*{} rows*\n", users.len()));

    output
}

/// Center by display width; `format!("{:^w$}")` counts chars, not columns.
fn pad_center(s: &str, width: usize) -> String {
    let total = width.saturating_sub(s.width());
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(total - left))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<User> {
        vec![
            User::new(1, "Ivan", "Petrov", 25),
            User::new(12, "Анна", "Сидорова", 30),
        ]
    }

    #[test]
    fn test_table_empty_set() {
        assert_eq!(format_as_table(&[]), "Empty set\n");
    }

    #[test]
    fn test_table_layout() {
        let out = format_as_table(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "+----+------+----------+-----+");
        assert_eq!(lines[1], "| id | name | lastName | age |");
        assert_eq!(lines[3], "|  1 | Ivan | Petrov   |  25 |");
        assert_eq!(lines[4], "| 12 | Анна | Сидорова |  30 |");
        assert_eq!(lines[6], "2 rows in set");
    }

    #[test]
    fn test_table_single_row_wording() {
        let out = format_as_table(&sample()[..1]);
        assert!(out.ends_with("1 row in set\n"));
    }

    #[test]
    fn test_markdown() {
        let out = format_as_markdown(&sample());
        assert!(out.starts_with("| id | name | lastName | age |\n|---|---|---|---|\n"));
        assert!(out.contains("| 1 | Ivan | Petrov | 25 |"));
        assert!(out.contains("*2 rows*"));
    }

    #[test]
    fn test_json() {
        let out = format_users(&sample(), OutputFormat::Json);
        let parsed: Vec<User> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, sample());
        assert!(out.contains("\"lastName\""));
    }
}
