use std::collections::{HashMap, HashSet};

use anyhow::{Result, bail};

use crate::cohort::{ObservationTable, Treatment};
use crate::config::{ScaleRange, VisitSchedule};

/// Structural findings for a previously written observation table.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub patients: usize,
    pub rows: usize,
    pub derived_rows: usize,
    pub problems: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check the invariants the pipeline guarantees for its own output: one
/// treatment label per patient, at most one row per (patient, visit), known
/// visit labels, scores inside the configured scales on canonical rows, a
/// baseline row for every patient, and derived rows only where the matching
/// follow-up row exists.
pub fn validate_table(
    table: &ObservationTable,
    schedule: &VisitSchedule,
    pain_urgency: ScaleRange,
    frequency: ScaleRange,
) -> Result<ValidationReport> {
    let Some(baseline_label) = schedule.baseline() else {
        bail!("visit schedule is empty");
    };

    let mut report = ValidationReport {
        rows: table.len(),
        ..ValidationReport::default()
    };

    let diff_sources: HashMap<String, &str> = schedule
        .follow_ups()
        .iter()
        .map(|v| (VisitSchedule::diff_label(v), v.as_str()))
        .collect();

    let mut treatments: HashMap<u32, Treatment> = HashMap::new();
    let mut conflicting: HashSet<u32> = HashSet::new();
    let mut seen: HashSet<(u32, &str)> = HashSet::new();

    for row in table.rows() {
        match treatments.get(&row.patient_id) {
            Some(known) if *known != row.treatment => {
                if conflicting.insert(row.patient_id) {
                    report.problems.push(format!(
                        "patient {} has conflicting treatment labels",
                        row.patient_id
                    ));
                }
            }
            Some(_) => {}
            None => {
                treatments.insert(row.patient_id, row.treatment);
            }
        }

        let canonical = schedule.index_of(&row.visit).is_some();
        let derived = diff_sources.contains_key(row.visit.as_str());
        if !canonical && !derived {
            report.problems.push(format!(
                "patient {} has unknown visit label {:?}",
                row.patient_id, row.visit
            ));
        }
        if derived {
            report.derived_rows += 1;
        }

        if !seen.insert((row.patient_id, row.visit.as_str())) {
            report.problems.push(format!(
                "duplicate row for patient {} at visit {:?}",
                row.patient_id, row.visit
            ));
        }

        if canonical {
            if !pain_urgency.contains(row.scores.pain) {
                report.problems.push(format!(
                    "patient {} at {}: pain {} outside scale",
                    row.patient_id, row.visit, row.scores.pain
                ));
            }
            if !pain_urgency.contains(row.scores.urgency) {
                report.problems.push(format!(
                    "patient {} at {}: urgency {} outside scale",
                    row.patient_id, row.visit, row.scores.urgency
                ));
            }
            if !frequency.contains(row.scores.frequency) {
                report.problems.push(format!(
                    "patient {} at {}: frequency {} outside scale",
                    row.patient_id, row.visit, row.scores.frequency
                ));
            }
        }
    }

    report.patients = treatments.len();

    let mut patients: Vec<u32> = treatments.keys().copied().collect();
    patients.sort_unstable();
    for patient in patients {
        if !seen.contains(&(patient, baseline_label)) {
            report
                .problems
                .push(format!("patient {} has no baseline row", patient));
        }
    }

    for row in table.rows() {
        if let Some(source) = diff_sources.get(row.visit.as_str()) {
            if !seen.contains(&(row.patient_id, source)) {
                report.problems.push(format!(
                    "patient {} has a {} row without a {} row",
                    row.patient_id, row.visit, source
                ));
            }
        }
    }

    Ok(report)
}
