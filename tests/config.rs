use cohortsim::config::{Sampling, ScaleRange, StudyConfig, VisitSchedule};

#[test]
fn default_config_is_valid() {
    assert!(StudyConfig::default().validate().is_ok());
}

#[test]
fn zero_patients_is_rejected() {
    let config = StudyConfig {
        patient_count: 0,
        ..StudyConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn out_of_range_ratio_is_rejected() {
    for ratio in [-0.1, 1.5] {
        let config = StudyConfig {
            treated_ratio: ratio,
            ..StudyConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

#[test]
fn duplicate_visit_labels_are_rejected() {
    let config = StudyConfig {
        visits: VisitSchedule::new(vec![
            "baseline".to_string(),
            "3mos".to_string(),
            "3mos".to_string(),
        ]),
        ..StudyConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn inverted_scale_is_rejected() {
    let config = StudyConfig {
        pain_urgency: ScaleRange::new(9.0, 0.0),
        ..StudyConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn discrete_sampling_needs_an_integer_in_range() {
    let config = StudyConfig {
        frequency: ScaleRange::new(0.2, 0.8),
        sampling: Sampling::Discrete,
        ..StudyConfig::default()
    };
    assert!(config.validate().is_err());

    let config = StudyConfig {
        frequency: ScaleRange::new(0.2, 1.8),
        sampling: Sampling::Discrete,
        ..StudyConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn schedule_ordering_drives_visit_indices() {
    let schedule = VisitSchedule::new(vec![
        "baseline".to_string(),
        "3mos".to_string(),
        "6mos".to_string(),
    ]);
    assert_eq!(schedule.baseline(), Some("baseline"));
    assert_eq!(schedule.follow_ups(), ["3mos".to_string(), "6mos".to_string()]);
    assert_eq!(schedule.index_of("6mos"), Some(2));
    assert_eq!(schedule.index_of("12mos"), None);
    assert_eq!(VisitSchedule::diff_label("3mos"), "diff3mos");
}
