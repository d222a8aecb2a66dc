use super::{OutputFormat, ui};
use crate::core::filter::ListingFilter;
use crate::query::list_assets;
use crate::store::Store;
use anyhow::Result;

pub fn run(store: &Store, filter: &ListingFilter, format: OutputFormat) -> Result<()> {
    let assets = list_assets(store, filter);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assets)?),
        OutputFormat::Table => {
            if assets.is_empty() {
                println!("No assets matched the listing filter.");
                return Ok(());
            }
            let summary = format!("({} sorted by {})", assets.len(), filter.sort);
            println!(
                "\n{} {}",
                ui::style_text("Assets", ui::StyleType::Title),
                ui::style_text(&summary, ui::StyleType::Subtle)
            );
            println!("{}", ui::projection_table(&assets, &["quote"]));
        }
    }
    Ok(())
}
