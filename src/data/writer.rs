use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::SimulatedRecord;

// ---------------------------------------------------------------------------
// CSV output
// ---------------------------------------------------------------------------

/// Serialize the simulated records to CSV at `path`, header row included.
/// Column order is fixed by the field order of [`SimulatedRecord`].
pub fn write_csv(path: &Path, records: &[SimulatedRecord]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_records(file, records)
}

fn write_records<W: Write>(out: W, records: &[SimulatedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer.serialize(record).context("writing output row")?;
    }
    writer.flush().context("flushing output")?;
    Ok(())
}
