use rand::Rng;

use crate::cohort::{Observation, ObservationTable, SymptomScores, Treatment};
use crate::config::{Sampling, ScaleRange, StudyConfig};

/// Draw one synthetic cohort: one row per patient and canonical visit.
///
/// The treatment label is assigned once per patient and repeated on every
/// visit row. Scores are drawn independently per visit; no cross-visit
/// correlation is modeled, which keeps this a deliberately flat baseline
/// cohort. Callers are expected to have validated the config.
pub fn generate_cohort(config: &StudyConfig, rng: &mut impl Rng) -> ObservationTable {
    let mut table = ObservationTable::new();
    for patient_id in 1..=config.patient_count as u32 {
        let treatment = if rng.random_bool(config.treated_ratio) {
            Treatment::Treated
        } else {
            Treatment::Untreated
        };
        for visit in config.visits.labels() {
            let scores = SymptomScores::new(
                draw(rng, config.sampling, config.pain_urgency),
                draw(rng, config.sampling, config.pain_urgency),
                draw(rng, config.sampling, config.frequency),
            );
            table.push(Observation {
                patient_id,
                treatment,
                visit: visit.clone(),
                scores,
            });
        }
    }
    table
}

fn draw(rng: &mut impl Rng, sampling: Sampling, scale: ScaleRange) -> f64 {
    match sampling {
        Sampling::Continuous => rng.random_range(scale.min..=scale.max),
        Sampling::Discrete => {
            rng.random_range(scale.min.ceil() as i64..=scale.max.floor() as i64) as f64
        }
    }
}
