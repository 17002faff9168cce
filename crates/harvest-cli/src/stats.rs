//! `harvest stats`: summarise one day's catalog file.

use std::path::Path;

use chrono::NaiveDate;
use harvest_core::{AppConfig, DailyCatalog};
use harvest_store::DailyStore;

pub(crate) async fn run_stats(config: &AppConfig, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let store = DailyStore::new(&config.data_dir);
    let date = date.unwrap_or_else(|| store.today());
    let catalog = store.load(date).await?;
    println!("{}", render(&store.path_for(date), date, catalog.as_ref()));
    Ok(())
}

fn render(path: &Path, date: NaiveDate, catalog: Option<&DailyCatalog>) -> String {
    match catalog {
        Some(catalog) => format!(
            "{}\n  records:      {}\n  distinct ids: {}",
            path.display(),
            catalog.total_products,
            catalog.distinct_ids()
        ),
        None => format!(
            "no catalog for {} ({})",
            date.format("%Y-%m-%d"),
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_missing_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let out = render(Path::new("data/products_20250131.json"), date, None);
        assert_eq!(out, "no catalog for 2025-01-31 (data/products_20250131.json)");
    }

    #[test]
    fn render_empty_catalog() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let out = render(
            Path::new("products_20250131.json"),
            date,
            Some(&DailyCatalog::default()),
        );
        assert!(out.contains("records:      0"), "got: {out}");
        assert!(out.contains("distinct ids: 0"), "got: {out}");
    }
}
