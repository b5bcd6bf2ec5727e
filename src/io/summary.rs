use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let counts = &ctx.report.counts;

    let mut out = String::new();
    out.push_str(&format!("cohortsim v{}\n", version));
    out.push_str(&format!(
        "Cohort: {} patients ({} treated, {} untreated), {} visits\n",
        counts.patients_treated + counts.patients_untreated,
        counts.patients_treated,
        counts.patients_untreated,
        ctx.report.study.visits.len()
    ));
    out.push_str(&format!(
        "Rows: {} ({} observed, {} derived)\n",
        counts.rows_total, counts.rows_observed, counts.rows_derived
    ));
    if let Some(matching) = &ctx.report.matching {
        out.push_str(&format!(
            "Matches: {}/{} treated rows paired ({} without eligible controls)\n",
            matching.matched, matching.attempted, matching.skipped_no_pool
        ));
    }
    out
}
