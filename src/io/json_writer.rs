use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cohort::Treatment;
use crate::ctx::Ctx;
use crate::schema::v1::{CohortCounts, CohortSimV1, MatchRecord, Matching, StudyMeta};

pub fn build_report(ctx: &Ctx) -> CohortSimV1 {
    let mut treatments: HashMap<u32, Treatment> = HashMap::new();
    for row in ctx.table.rows() {
        treatments.entry(row.patient_id).or_insert(row.treatment);
    }
    let patients_treated = treatments
        .values()
        .filter(|t| **t == Treatment::Treated)
        .count() as u64;
    let patients_untreated = treatments.len() as u64 - patients_treated;

    let counts = CohortCounts {
        rows_total: ctx.table.len() as u64,
        rows_observed: (ctx.table.len() - ctx.diff_rows) as u64,
        rows_derived: ctx.diff_rows as u64,
        patients_treated,
        patients_untreated,
        patients_excluded: ctx.patients_excluded as u64,
    };

    let matching = if ctx.match_controls {
        Some(Matching {
            attempted: (ctx.matches.len() + ctx.matches_skipped) as u64,
            matched: ctx.matches.len() as u64,
            skipped_no_pool: ctx.matches_skipped as u64,
            pairs: ctx
                .matches
                .iter()
                .map(|m| MatchRecord {
                    treated_patient: m.treated_patient as u64,
                    treated_visit: m.treated_visit.clone(),
                    control_patient: m.control_patient as u64,
                    control_visit: m.control_visit.clone(),
                    distance: m.distance,
                })
                .collect(),
        })
    } else {
        None
    };

    CohortSimV1 {
        tool: "cohortsim".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        study: StudyMeta::from_config(&ctx.config, ctx.seed),
        counts,
        matching,
        table_tsv_path: if ctx.write_tsv {
            Some("cohortsim.tsv".to_string())
        } else {
            None
        },
    }
}

pub fn write_json(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_report(ctx);
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
