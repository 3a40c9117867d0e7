use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use geo::{MultiPolygon, Polygon};
use geojson::GeoJson;

use super::model::{SourceDataset, SourceRecord};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the source dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with a header row
/// * `.xlsx` / `.xls` / `.xlsm` – first worksheet, header row first
pub fn load_records(path: &Path) -> Result<SourceDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            parse_csv(file)
        }
        "xlsx" | "xls" | "xlsm" => load_spreadsheet(path),
        other => bail!("Unsupported record file extension: .{other}"),
    }
}

/// Load the study-area boundary from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.geojson` / `.json` – GeoJSON feature collection, feature, or geometry
/// * `.shp` – ESRI Shapefile
///
/// All polygon parts found are flattened into a single [`MultiPolygon`];
/// non-polygon geometries are skipped with a warning.
pub fn load_boundary(path: &Path) -> Result<MultiPolygon<f64>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parts = match ext.as_str() {
        "geojson" | "json" => load_geojson(path)?,
        "shp" => load_shapefile(path)?,
        other => bail!("Unsupported boundary file extension: .{other}"),
    };

    if parts.is_empty() {
        bail!("Boundary file {} contains no polygon geometry", path.display());
    }
    Ok(MultiPolygon(parts))
}

// ---------------------------------------------------------------------------
// Column aliasing
// ---------------------------------------------------------------------------

// Real-world radiocarbon tables are wildly inconsistent about header names;
// these cover the variants seen in the source datasets.
const LAB_ID_COLS: &[&str] = &["labnr", "labid", "lab_id", "labcode"];
const LAT_COLS: &[&str] = &["lat", "latitude"];
const LON_COLS: &[&str] = &["lon", "lng", "long", "longitude"];
const AGE_COLS: &[&str] = &["c14age", "c14_age", "age", "bp"];
const ERROR_COLS: &[&str] = &["c14std", "c14_std", "error", "std", "sd"];
const SPECIES_COLS: &[&str] = &["species", "taxon"];
const REGION_COLS: &[&str] = &["region", "country"];

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
}

fn require_column(headers: &[String], aliases: &[&str]) -> Result<usize> {
    find_column(headers, aliases)
        .with_context(|| format!("missing required column (any of: {})", aliases.join(", ")))
}

/// Column indices resolved once per file.
struct ColumnMap {
    lab_id: usize,
    lat: usize,
    lon: usize,
    age: usize,
    error: usize,
    species: Option<usize>,
    region: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self> {
        Ok(ColumnMap {
            lab_id: require_column(headers, LAB_ID_COLS)?,
            lat: require_column(headers, LAT_COLS)?,
            lon: require_column(headers, LON_COLS)?,
            age: require_column(headers, AGE_COLS)?,
            error: require_column(headers, ERROR_COLS)?,
            species: find_column(headers, SPECIES_COLS),
            region: find_column(headers, REGION_COLS),
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn parse_csv<R: Read>(input: R) -> Result<SourceDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let cols = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        records.push(SourceRecord {
            lab_id: field(cols.lab_id).to_string(),
            lat: parse_f64(field(cols.lat), row_no, "latitude")?,
            lon: parse_f64(field(cols.lon), row_no, "longitude")?,
            age: parse_f64(field(cols.age), row_no, "age")?,
            error: parse_f64(field(cols.error), row_no, "error")?,
            species: cols.species.map(field).filter(|s| !s.is_empty()).map(String::from),
            region: cols.region.map(field).filter(|s| !s.is_empty()).map(String::from),
        });
    }
    Ok(SourceDataset::from_records(records))
}

fn parse_f64(s: &str, row: usize, col: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path) -> Result<SourceDataset> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .context("spreadsheet has no worksheets")?
        .context("reading first worksheet")?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .context("worksheet is empty")?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();
    let cols = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    for (row_no, row) in rows.enumerate() {
        let number = |idx: usize, col: &str| -> Result<f64> {
            row.get(idx)
                .and_then(cell_f64)
                .with_context(|| format!("Row {row_no}, {col}: not a number"))
        };
        records.push(SourceRecord {
            lab_id: row.get(cols.lab_id).and_then(cell_string).unwrap_or_default(),
            lat: number(cols.lat, "latitude")?,
            lon: number(cols.lon, "longitude")?,
            age: number(cols.age, "age")?,
            error: number(cols.error, "error")?,
            species: cols.species.and_then(|i| row.get(i)).and_then(cell_string),
            region: cols.region.and_then(|i| row.get(i)).and_then(cell_string),
        });
    }
    Ok(SourceDataset::from_records(records))
}

fn cell_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// GeoJSON boundary
// ---------------------------------------------------------------------------

fn load_geojson(path: &Path) -> Result<Vec<Polygon<f64>>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let geojson: GeoJson = raw.parse().context("parsing GeoJSON")?;

    let mut parts = Vec::new();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                if let Some(geometry) = feature.geometry {
                    collect_polygons(geometry.value, &mut parts)?;
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = feature.geometry {
                collect_polygons(geometry.value, &mut parts)?;
            }
        }
        GeoJson::Geometry(geometry) => collect_polygons(geometry.value, &mut parts)?,
    }
    Ok(parts)
}

fn collect_polygons(value: geojson::Value, parts: &mut Vec<Polygon<f64>>) -> Result<()> {
    match value {
        geojson::Value::Polygon(_) => {
            let polygon: Polygon<f64> =
                value.try_into().context("converting GeoJSON polygon")?;
            parts.push(polygon);
        }
        geojson::Value::MultiPolygon(_) => {
            let multi: MultiPolygon<f64> =
                value.try_into().context("converting GeoJSON multipolygon")?;
            parts.extend(multi.0);
        }
        geojson::Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_polygons(geometry.value, parts)?;
            }
        }
        _ => log::warn!("ignoring non-polygon geometry in boundary file"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Shapefile boundary
// ---------------------------------------------------------------------------

fn load_shapefile(path: &Path) -> Result<Vec<Polygon<f64>>> {
    let shapes = shapefile::read_shapes(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let mut parts = Vec::new();
    for shape in shapes {
        match shape {
            shapefile::Shape::Polygon(polygon) => {
                let multi: MultiPolygon<f64> = polygon
                    .try_into()
                    .context("converting shapefile polygon")?;
                parts.extend(multi.0);
            }
            _ => log::warn!("ignoring non-polygon shape in boundary file"),
        }
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
LabID,Latitude,Longitude,C14Age,C14STD,Species,Region
OxA-1234,40.1,-3.2,5210,40,Ovis aries,Iberia
Beta-99,41.0,-2.8,4980,35,,
";

    #[test]
    fn csv_headers_are_aliased_case_insensitively() {
        let ds = parse_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].lab_id, "OxA-1234");
        assert_eq!(ds.records[0].age, 5210.0);
        assert_eq!(ds.records[0].species.as_deref(), Some("Ovis aries"));
        assert_eq!(ds.records[1].species, None);
        assert_eq!(ds.records[1].region, None);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let err = parse_csv("LabID,Lat,Age\nX-1,40.0,1000\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing required column"));
    }

    #[test]
    fn non_numeric_coordinate_is_an_error() {
        let bad = "labnr,lat,lon,c14age,c14std\nX-1,forty,3.0,1000,30\n";
        assert!(parse_csv(bad.as_bytes()).is_err());
    }
}
