use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::cohort::{Observation, ObservationTable};
use crate::config::VisitSchedule;

/// Table extended with per-patient baseline deltas.
#[derive(Debug, Clone)]
pub struct DifferenceOutcome {
    pub table: ObservationTable,
    pub diff_rows: usize,
    pub patients_excluded: usize,
}

/// Append one derived row per (patient, present follow-up visit) carrying the
/// component-wise change from the patient's baseline scores.
///
/// Patients without a baseline row are excluded from the output entirely, not
/// just from the derived rows, so downstream consumers never mix partial and
/// complete histories. The input table is left untouched; original rows are
/// copied through unchanged with the derived rows appended after them.
pub fn compute_differences(
    table: &ObservationTable,
    schedule: &VisitSchedule,
) -> Result<DifferenceOutcome> {
    let Some(baseline_label) = schedule.baseline() else {
        bail!("visit schedule is empty");
    };

    let patients = table.patient_ids();
    let mut baselines: HashMap<u32, &Observation> = HashMap::new();
    let mut patients_excluded = 0usize;
    for &patient in &patients {
        match table.find(patient, baseline_label) {
            Some(row) => {
                baselines.insert(patient, row);
            }
            None => patients_excluded += 1,
        }
    }

    let mut out = ObservationTable::new();
    for row in table.rows() {
        if baselines.contains_key(&row.patient_id) {
            out.push(row.clone());
        }
    }

    let mut diff_rows = 0usize;
    for &patient in &patients {
        let Some(baseline) = baselines.get(&patient) else {
            continue;
        };
        for follow_up in schedule.follow_ups() {
            let Some(row) = table.find(patient, follow_up) else {
                continue;
            };
            out.push(Observation {
                patient_id: patient,
                treatment: row.treatment,
                visit: VisitSchedule::diff_label(follow_up),
                scores: row.scores.delta_from(&baseline.scores),
            });
            diff_rows += 1;
        }
    }

    Ok(DifferenceOutcome {
        table: out,
        diff_rows,
        patients_excluded,
    })
}
