use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cohort::ObservationTable;

pub const TABLE_HEADER: &str = "patient_id\ttreatment\tvisit\tpain\turgency\tfrequency";

pub fn write_tsv(path: &Path, table: &ObservationTable) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "{}", TABLE_HEADER)?;
    for row in table.rows() {
        writeln!(
            w,
            "{}\t{}\t{}\t{:.6}\t{:.6}\t{:.6}",
            row.patient_id,
            row.treatment.as_str(),
            row.visit,
            row.scores.pain,
            row.scores.urgency,
            row.scores.frequency
        )?;
    }

    Ok(())
}
