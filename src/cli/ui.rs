use crate::query::Projected;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use serde_json::Value;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Creates a cell for displaying percentage change with color coding.
pub fn change_cell(change: f64) -> Cell {
    let text = format!("{change:.2}%");
    if change >= 0.0 {
        Cell::new(text)
            .fg(Color::Green)
            .set_alignment(CellAlignment::Right)
    } else {
        Cell::new(text)
            .fg(Color::Red)
            .set_alignment(CellAlignment::Right)
    }
}

/// Renders a projected JSON value. Nested platforms show their symbol.
pub fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        None | Some(Value::Null) => format_optional_cell(None::<()>, |_| String::new()),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => format_optional_cell(Some(f), |f| format!("{f:.2}")),
            _ => format_optional_cell(Some(n), |n| n.to_string()),
        },
        Some(Value::String(s)) => Cell::new(s),
        Some(Value::Bool(b)) => Cell::new(b),
        Some(Value::Array(items)) => Cell::new(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Some(Value::Object(map)) => match map.get("symbol").and_then(Value::as_str) {
            Some(symbol) => Cell::new(symbol),
            None => Cell::new(Value::Object(map.clone()).to_string()),
        },
    }
}

/// Column names in order of first appearance across `rows`.
pub fn columns(rows: &[Projected]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for key in rows.iter().flat_map(|row| row.keys()) {
        if !names.contains(key) {
            names.push(key.clone());
        }
    }
    names
}

/// Lays out projected records one per row, skipping the columns in `hidden`.
pub fn projection_table(rows: &[Projected], hidden: &[&str]) -> Table {
    let names: Vec<String> = columns(rows)
        .into_iter()
        .filter(|name| !hidden.contains(&name.as_str()))
        .collect();

    let mut table = new_styled_table();
    table.set_header(names.iter().map(|name| header_cell(name)));
    for row in rows {
        table.add_row(names.iter().map(|name| value_cell(row.get(name))));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn projected(value: Value) -> Projected {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_columns_follow_first_appearance() {
        let rows = vec![
            projected(json!({"id": 1, "symbol": "BTC"})),
            projected(json!({"id": 2, "rank": 5, "symbol": "ETH"})),
        ];
        assert_eq!(columns(&rows), vec!["id", "symbol", "rank"]);
    }

    #[test]
    fn test_projection_table_hides_columns() {
        let rows = vec![projected(
            json!({"id": 1, "symbol": "BTC", "platform": {"symbol": "ETH"}, "quote": null}),
        )];
        let rendered = projection_table(&rows, &["quote"]).to_string();
        assert!(rendered.contains("BTC"));
        assert!(rendered.contains("platform"));
        assert!(!rendered.contains("quote"));
    }
}
