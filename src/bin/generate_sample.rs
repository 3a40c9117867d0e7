//! Writes a plausible source dataset and a square study-area boundary for
//! trying the simulator:
//!
//! ```text
//! cargo run --bin generate_sample
//! cargo run -- --records source_data.csv --boundary study_area.geojson \
//!     --output simulated.csv --seed 42 --source-epsg 4326 --study-epsg 4326
//! ```

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::json;

// Boundary square, degrees (lon, lat).
const LON_RANGE: (f64, f64) = (-6.0, 2.0);
const LAT_RANGE: (f64, f64) = (38.0, 43.5);

fn main() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let prefixes = [
        ("OxA", 40),
        ("Beta", 30),
        ("GrN", 12),
        ("KIA", 8),
        ("Ua", 5),
        ("Poz", 5),
    ];
    let species = ["Ovis aries", "Bos taurus", "Cervus elaphus", "Sus scrofa"];
    let regions = ["Northeast", "Central", "Southwest"];
    let errors = [20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 80.0];

    let prefix_pool: Vec<&str> = prefixes
        .iter()
        .flat_map(|&(p, weight)| std::iter::repeat(p).take(weight))
        .collect();

    let mut writer = csv::Writer::from_path("source_data.csv")?;
    writer.write_record([
        "LabID", "Latitude", "Longitude", "C14Age", "C14STD", "Species", "Region",
    ])?;

    let n = 600;
    for i in 0..n {
        let prefix = prefix_pool.choose(&mut rng).unwrap();
        let lab_id = format!("{}-{}", prefix, 1000 + i * 3 + rng.gen_range(0..3));

        // Scatter positions a little beyond the boundary so the spatial
        // filter has something to drop.
        let lat = rng.gen_range(LAT_RANGE.0 - 0.5..LAT_RANGE.1 + 0.5);
        let lon = rng.gen_range(LON_RANGE.0 - 0.5..LON_RANGE.1 + 0.5);

        // Ages thin out towards the old end, roughly like real date lists.
        let age = 200.0 + 4800.0 * rng.gen_range(0.0f64..1.0).powi(2);

        writer.write_record([
            lab_id,
            format!("{lat:.5}"),
            format!("{lon:.5}"),
            format!("{:.0}", age),
            format!("{:.0}", errors.choose(&mut rng).unwrap()),
            species.choose(&mut rng).unwrap().to_string(),
            regions.choose(&mut rng).unwrap().to_string(),
        ])?;
    }
    writer.flush()?;

    let boundary = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "name": "study area" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [LON_RANGE.0, LAT_RANGE.0],
                    [LON_RANGE.1, LAT_RANGE.0],
                    [LON_RANGE.1, LAT_RANGE.1],
                    [LON_RANGE.0, LAT_RANGE.1],
                    [LON_RANGE.0, LAT_RANGE.0],
                ]]
            }
        }]
    });
    std::fs::write("study_area.geojson", serde_json::to_string_pretty(&boundary)?)?;

    println!("Wrote {n} records to source_data.csv and the boundary to study_area.geojson");
    Ok(())
}
