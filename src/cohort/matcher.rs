use anyhow::{Result, bail};
use tracing::debug;

use crate::cohort::{ControlMatch, Observation, ObservationTable, Treatment};
use crate::config::VisitSchedule;
use crate::math::stats::{Vector, mahalanobis, pseudo_inverse, sample_covariance};

/// Nearest untreated control for one treated observation.
///
/// The candidate pool is every untreated row with complete scores whose visit
/// sits at or before the query visit in canonical order. Distances are
/// Mahalanobis under the pool's own sample covariance; the pseudo-inverse
/// keeps a collinear or tiny pool usable. An empty pool is an expected
/// outcome and yields `None`, never an error.
pub fn find_nearest_control(
    table: &ObservationTable,
    query: &Observation,
    schedule: &VisitSchedule,
) -> Result<Option<ControlMatch>> {
    let Some(query_order) = schedule.index_of(&query.visit) else {
        bail!("visit {:?} is not in the canonical schedule", query.visit);
    };
    if query.treatment != Treatment::Treated {
        bail!("nearest-control lookup expects a treated observation");
    }
    if !query.scores.is_complete() {
        return Ok(None);
    }

    let pool: Vec<&Observation> = table
        .rows()
        .iter()
        .filter(|row| row.treatment == Treatment::Untreated)
        .filter(|row| row.scores.is_complete())
        .filter(|row| {
            schedule
                .index_of(&row.visit)
                .is_some_and(|order| order <= query_order)
        })
        .collect();
    if pool.is_empty() {
        return Ok(None);
    }

    let vectors: Vec<Vector> = pool.iter().map(|row| row.scores.as_vector()).collect();
    let inv_cov = pseudo_inverse(&sample_covariance(&vectors));
    let target = query.scores.as_vector();

    // Stable argmin: ties resolve to the earliest candidate.
    let mut best = 0usize;
    let mut best_distance = f64::INFINITY;
    for (idx, vector) in vectors.iter().enumerate() {
        let distance = mahalanobis(vector, &target, &inv_cov);
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }

    let control = pool[best];
    Ok(Some(ControlMatch {
        treated_patient: query.patient_id,
        treated_visit: query.visit.clone(),
        control_patient: control.patient_id,
        control_visit: control.visit.clone(),
        distance: best_distance,
    }))
}

/// Outcome of matching every treated row at a canonical visit.
#[derive(Debug, Clone, Default)]
pub struct MatchSweep {
    pub matches: Vec<ControlMatch>,
    pub skipped: usize,
}

pub fn match_all(table: &ObservationTable, schedule: &VisitSchedule) -> Result<MatchSweep> {
    let mut sweep = MatchSweep::default();
    for row in table.rows() {
        if row.treatment != Treatment::Treated {
            continue;
        }
        if schedule.index_of(&row.visit).is_none() {
            continue;
        }
        match find_nearest_control(table, row, schedule)? {
            Some(found) => sweep.matches.push(found),
            None => {
                debug!(
                    patient = row.patient_id,
                    visit = %row.visit,
                    "no eligible control"
                );
                sweep.skipped += 1;
            }
        }
    }
    Ok(sweep)
}
