use super::{OutputFormat, ui};
use crate::core::filter::QuotesFilter;
use crate::query::{Projected, lookup_quotes};
use crate::store::Store;
use anyhow::Result;
use comfy_table::{Cell, Table};
use serde_json::Value;

/// Conversion table for one entry: a row per target currency.
fn conversions_table(quote: &Projected) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Target"),
        ui::header_cell("Price"),
        ui::header_cell("Volume 24h"),
        ui::header_cell("Market Cap"),
        ui::header_cell("1h"),
        ui::header_cell("24h"),
        ui::header_cell("7d"),
    ]);

    for (target, snapshot) in quote {
        let metric = |name: &str| snapshot.get(name).and_then(Value::as_f64);
        let change = |name: &str| match metric(name) {
            Some(value) => ui::change_cell(value),
            None => ui::format_optional_cell(None::<f64>, |_| String::new()),
        };
        table.add_row(vec![
            Cell::new(target),
            ui::format_optional_cell(metric("price"), |p| format!("{p:.6}")),
            ui::format_optional_cell(metric("volume_24h"), |v| format!("{v:.2}")),
            ui::format_optional_cell(metric("market_cap"), |v| format!("{v:.2}")),
            change("percent_change_1h"),
            change("percent_change_24h"),
            change("percent_change_7d"),
        ]);
    }
    table
}

pub fn run(store: &Store, filter: &QuotesFilter, format: OutputFormat) -> Result<()> {
    let entries = lookup_quotes(store, filter)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Table => {
            if entries.is_empty() {
                println!("No quotes found.");
                return Ok(());
            }
            let rows: Vec<Projected> = entries
                .values()
                .filter_map(Value::as_object)
                .cloned()
                .collect();
            println!("{}", ui::projection_table(&rows, &["quote"]));

            for (key, entry) in &entries {
                let Some(quote) = entry.get("quote").and_then(Value::as_object) else {
                    continue;
                };
                println!("\n{}", ui::style_text(key, ui::StyleType::Title));
                println!("{}", conversions_table(quote));
            }
        }
    }
    Ok(())
}
