use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cohort::{Observation, ObservationTable, SymptomScores, Treatment};
use crate::io::tsv_writer::TABLE_HEADER;

/// Read an observation table previously written by `write_tsv`.
pub fn read_tsv(path: &Path) -> Result<ObservationTable> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        bail!("{} is empty", path.display());
    };
    if header != TABLE_HEADER {
        bail!("unexpected header in {}: {:?}", path.display(), header);
    }

    let mut table = ObservationTable::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 6 {
            bail!("line {}: expected 6 fields, got {}", line_no, fields.len());
        }
        let patient_id = fields[0]
            .parse::<u32>()
            .with_context(|| format!("line {}: bad patient id {:?}", line_no, fields[0]))?;
        let Some(treatment) = Treatment::from_label(fields[1]) else {
            bail!("line {}: unknown treatment label {:?}", line_no, fields[1]);
        };
        let pain = parse_score(fields[3], line_no)?;
        let urgency = parse_score(fields[4], line_no)?;
        let frequency = parse_score(fields[5], line_no)?;
        table.push(Observation {
            patient_id,
            treatment,
            visit: fields[2].to_string(),
            scores: SymptomScores::new(pain, urgency, frequency),
        });
    }

    Ok(table)
}

fn parse_score(field: &str, line_no: usize) -> Result<f64> {
    field
        .parse::<f64>()
        .with_context(|| format!("line {}: bad score {:?}", line_no, field))
}
