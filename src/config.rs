use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Inclusive sampling bounds for one symptom scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    Continuous,
    Discrete,
}

/// Ordered canonical visit labels. The first label is the baseline; "at or
/// before" comparisons during matching use the position in this sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitSchedule {
    labels: Vec<String>,
}

impl VisitSchedule {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn baseline(&self) -> Option<&str> {
        self.labels.first().map(|s| s.as_str())
    }

    pub fn follow_ups(&self) -> &[String] {
        self.labels.get(1..).unwrap_or(&[])
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Label of the derived row carrying the change from baseline to `visit`.
    pub fn diff_label(visit: &str) -> String {
        format!("diff{}", visit)
    }
}

/// Study parameters for one simulated cohort.
///
/// Defaults mirror the published study setup: 400 patients, 0.47 treated
/// ratio, visits at baseline/3mos/6mos, pain and urgency on a 0-9 scale,
/// frequency on a -15..15 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    pub patient_count: usize,
    pub treated_ratio: f64,
    pub visits: VisitSchedule,
    pub pain_urgency: ScaleRange,
    pub frequency: ScaleRange,
    pub sampling: Sampling,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            patient_count: 400,
            treated_ratio: 0.47,
            visits: VisitSchedule::new(vec![
                "baseline".to_string(),
                "3mos".to_string(),
                "6mos".to_string(),
            ]),
            pain_urgency: ScaleRange::new(0.0, 9.0),
            frequency: ScaleRange::new(-15.0, 15.0),
            sampling: Sampling::Continuous,
        }
    }
}

impl StudyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.patient_count == 0 {
            bail!("patient_count must be positive");
        }
        if !(0.0..=1.0).contains(&self.treated_ratio) {
            bail!(
                "treated_ratio must be within [0, 1], got {}",
                self.treated_ratio
            );
        }
        if self.visits.is_empty() {
            bail!("visit schedule is empty");
        }
        for (i, label) in self.visits.labels().iter().enumerate() {
            if self.visits.labels()[..i].contains(label) {
                bail!("duplicate visit label {:?}", label);
            }
        }
        validate_scale("pain/urgency", self.pain_urgency, self.sampling)?;
        validate_scale("frequency", self.frequency, self.sampling)?;
        Ok(())
    }
}

fn validate_scale(name: &str, scale: ScaleRange, sampling: Sampling) -> Result<()> {
    if !scale.min.is_finite() || !scale.max.is_finite() {
        bail!("{} scale bounds must be finite", name);
    }
    if scale.min > scale.max {
        bail!(
            "{} scale is inverted: min {} > max {}",
            name,
            scale.min,
            scale.max
        );
    }
    // Discrete draws are integer-uniform; the range must contain an integer.
    if matches!(sampling, Sampling::Discrete) && scale.min.ceil() > scale.max.floor() {
        bail!("{} scale contains no integer for discrete sampling", name);
    }
    Ok(())
}
