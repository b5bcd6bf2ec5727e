use serde::{Deserialize, Serialize};

use crate::config::{Sampling, StudyConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    Continuous,
    Discrete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleMeta {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyMeta {
    pub patients: u64,
    pub treated_ratio: f64,
    pub visits: Vec<String>,
    pub pain_urgency_scale: ScaleMeta,
    pub frequency_scale: ScaleMeta,
    pub sampling: SamplingMode,
    pub seed: u64,
}

impl StudyMeta {
    pub fn from_config(config: &StudyConfig, seed: u64) -> Self {
        Self {
            patients: config.patient_count as u64,
            treated_ratio: config.treated_ratio,
            visits: config.visits.labels().to_vec(),
            pain_urgency_scale: ScaleMeta {
                min: config.pain_urgency.min,
                max: config.pain_urgency.max,
            },
            frequency_scale: ScaleMeta {
                min: config.frequency.min,
                max: config.frequency.max,
            },
            sampling: match config.sampling {
                Sampling::Continuous => SamplingMode::Continuous,
                Sampling::Discrete => SamplingMode::Discrete,
            },
            seed,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CohortCounts {
    pub rows_total: u64,
    pub rows_observed: u64,
    pub rows_derived: u64,
    pub patients_treated: u64,
    pub patients_untreated: u64,
    pub patients_excluded: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub treated_patient: u64,
    pub treated_visit: String,
    pub control_patient: u64,
    pub control_visit: String,
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matching {
    pub attempted: u64,
    pub matched: u64,
    pub skipped_no_pool: u64,
    pub pairs: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortSimV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub study: StudyMeta,
    pub counts: CohortCounts,
    pub matching: Option<Matching>,
    pub table_tsv_path: Option<String>,
}

impl CohortSimV1 {
    pub fn empty(tool_version: &str, study: StudyMeta) -> Self {
        Self {
            tool: "cohortsim".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            study,
            counts: CohortCounts::default(),
            matching: None,
            table_tsv_path: None,
        }
    }
}
