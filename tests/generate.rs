use std::collections::HashMap;

use rand::{SeedableRng, rngs::StdRng};

use cohortsim::cohort::Treatment;
use cohortsim::cohort::generate::generate_cohort;
use cohortsim::config::{Sampling, StudyConfig};

fn small_config(patients: usize) -> StudyConfig {
    StudyConfig {
        patient_count: patients,
        ..StudyConfig::default()
    }
}

#[test]
fn row_count_is_patients_times_visits() {
    let config = small_config(25);
    let mut rng = StdRng::seed_from_u64(1);
    let table = generate_cohort(&config, &mut rng);
    assert_eq!(table.len(), 25 * config.visits.len());
}

#[test]
fn patient_ids_are_one_based_and_unique() {
    let config = small_config(10);
    let mut rng = StdRng::seed_from_u64(2);
    let table = generate_cohort(&config, &mut rng);
    let ids = table.patient_ids();
    assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
}

#[test]
fn treatment_label_constant_per_patient() {
    let config = small_config(50);
    let mut rng = StdRng::seed_from_u64(3);
    let table = generate_cohort(&config, &mut rng);

    let mut labels: HashMap<u32, Treatment> = HashMap::new();
    for row in table.rows() {
        let known = labels.entry(row.patient_id).or_insert(row.treatment);
        assert_eq!(*known, row.treatment, "patient {}", row.patient_id);
    }
}

#[test]
fn scores_stay_within_configured_scales() {
    for sampling in [Sampling::Continuous, Sampling::Discrete] {
        let config = StudyConfig {
            patient_count: 40,
            sampling,
            ..StudyConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let table = generate_cohort(&config, &mut rng);
        for row in table.rows() {
            assert!(config.pain_urgency.contains(row.scores.pain));
            assert!(config.pain_urgency.contains(row.scores.urgency));
            assert!(config.frequency.contains(row.scores.frequency));
        }
    }
}

#[test]
fn discrete_sampling_yields_integers() {
    let config = StudyConfig {
        patient_count: 20,
        sampling: Sampling::Discrete,
        ..StudyConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(5);
    let table = generate_cohort(&config, &mut rng);
    for row in table.rows() {
        assert_eq!(row.scores.pain.fract(), 0.0);
        assert_eq!(row.scores.urgency.fract(), 0.0);
        assert_eq!(row.scores.frequency.fract(), 0.0);
    }
}

#[test]
fn same_seed_reproduces_the_cohort() {
    let config = small_config(15);
    let mut rng1 = StdRng::seed_from_u64(7);
    let mut rng2 = StdRng::seed_from_u64(7);
    let a = generate_cohort(&config, &mut rng1);
    let b = generate_cohort(&config, &mut rng2);
    assert_eq!(a.rows(), b.rows());
}

#[test]
fn visit_labels_follow_the_schedule_order() {
    let config = small_config(3);
    let mut rng = StdRng::seed_from_u64(8);
    let table = generate_cohort(&config, &mut rng);
    let labels: Vec<&str> = table
        .rows()
        .iter()
        .take(config.visits.len())
        .map(|row| row.visit.as_str())
        .collect();
    assert_eq!(labels, vec!["baseline", "3mos", "6mos"]);
}

#[test]
fn extreme_ratios_pin_the_treatment_label() {
    let all_treated = StudyConfig {
        patient_count: 12,
        treated_ratio: 1.0,
        ..StudyConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(9);
    let table = generate_cohort(&all_treated, &mut rng);
    assert!(table.rows().iter().all(|r| r.treatment == Treatment::Treated));

    let none_treated = StudyConfig {
        patient_count: 12,
        treated_ratio: 0.0,
        ..StudyConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(9);
    let table = generate_cohort(&none_treated, &mut rng);
    assert!(
        table
            .rows()
            .iter()
            .all(|r| r.treatment == Treatment::Untreated)
    );
}
