use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::model::{Dataset, Observation};
use super::normalize::normalize;

pub const CROPLAND_FILE: &str = "Cropland Value.csv";
pub const CROP_PRICES_FILE: &str = "Crop Prices.csv";
pub const INDEX_FILE: &str = "Index Prices.csv";

// ---------------------------------------------------------------------------
// Source records – one serde struct per CSV schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CroplandRecord {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct CropPriceRecord {
    #[serde(rename = "Commodity")]
    commodity: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct IndexRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Value")]
    value: String,
}

// ---------------------------------------------------------------------------
// Per-schema loaders
// ---------------------------------------------------------------------------

/// Regional cropland values: `State,Year,Value`, dollar values written with
/// thousands separators. Entity labels are stored upper-case.
pub fn load_cropland(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_cropland(file)
}

fn read_cropland<R: io::Read>(rdr: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let rec: CroplandRecord = result.with_context(|| format!("cropland CSV row {row_no}"))?;
        rows.push(Observation {
            entity: Some(rec.state.trim().to_uppercase()),
            period: rec.year,
            value: normalize(&rec.value),
        });
    }
    Ok(Dataset::from_rows(Some("State"), rows))
}

/// National crop prices: `Commodity,Year,Value`.
pub fn load_crop_prices(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_crop_prices(file)
}

fn read_crop_prices<R: io::Read>(rdr: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let rec: CropPriceRecord =
            result.with_context(|| format!("crop prices CSV row {row_no}"))?;
        rows.push(Observation {
            entity: Some(rec.commodity.trim().to_uppercase()),
            period: rec.year,
            value: normalize(&rec.value),
        });
    }
    Ok(Dataset::from_rows(Some("Commodity"), rows))
}

/// National price index: `Year,Value`, single series with no entity column.
pub fn load_index(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_index(file)
}

fn read_index<R: io::Read>(rdr: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let rec: IndexRecord = result.with_context(|| format!("index CSV row {row_no}"))?;
        rows.push(Observation {
            entity: None,
            period: rec.year,
            value: normalize(&rec.value),
        });
    }
    Ok(Dataset::from_rows(None, rows))
}

// ---------------------------------------------------------------------------
// Directory loader – all three tables at once
// ---------------------------------------------------------------------------

/// The three source tables, loaded once and immutable thereafter.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub cropland: Dataset,
    pub crop_prices: Dataset,
    pub index: Dataset,
}

/// Load all three CSVs from a directory by their conventional names.
pub fn load_dir(dir: &Path) -> Result<LoadedData> {
    let cropland = load_cropland(&dir.join(CROPLAND_FILE))?;
    let crop_prices = load_crop_prices(&dir.join(CROP_PRICES_FILE))?;
    let index = load_index(&dir.join(INDEX_FILE))?;

    log::info!(
        "Loaded {} cropland, {} crop price, {} index rows from {}",
        cropland.len(),
        crop_prices.len(),
        index.len(),
        dir.display()
    );

    Ok(LoadedData {
        cropland,
        crop_prices,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cropland_values_are_normalized() {
        let csv = "State,Year,Value\n\
                   KENTUCKY,2020,\"4,560\"\n\
                   ohio,2020,(D)\n";
        let ds = read_cropland(csv.as_bytes()).unwrap();

        assert_eq!(ds.entity_field.as_deref(), Some("State"));
        assert_eq!(ds.len(), 2, "unparseable rows are kept, not dropped");
        assert_eq!(ds.rows[0].value, Some(4560.0));
        assert_eq!(ds.rows[1].value, None);
        assert_eq!(
            ds.rows[1].entity.as_deref(),
            Some("OHIO"),
            "entities are stored upper-case"
        );
    }

    #[test]
    fn crop_prices_schema() {
        let csv = "Commodity,Year,Value\nWHEAT,2024,5.47\nCORN,2024,4.55\n";
        let ds = read_crop_prices(csv.as_bytes()).unwrap();
        assert_eq!(ds.entity_field.as_deref(), Some("Commodity"));
        assert_eq!(ds.rows[0].value, Some(5.47));
        let names: Vec<&str> = ds.entities.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["CORN", "WHEAT"]);
    }

    #[test]
    fn index_has_no_entity_dimension() {
        let csv = "Year,Value\n2011,100.0\n2024,131.8\n";
        let ds = read_index(csv.as_bytes()).unwrap();
        assert_eq!(ds.entity_field, None);
        assert!(ds.rows.iter().all(|r| r.entity.is_none()));
        assert_eq!(ds.period_bounds, Some((2011, 2024)));
    }

    #[test]
    fn malformed_year_is_a_load_error() {
        let csv = "Year,Value\ntwenty,100.0\n";
        assert!(read_index(csv.as_bytes()).is_err());
    }
}
