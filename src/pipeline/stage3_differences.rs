use anyhow::Result;
use tracing::info;

use crate::cohort::differences::compute_differences;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage3Differences;

impl Stage3Differences {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Differences {
    fn name(&self) -> &'static str {
        "stage3_differences"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let outcome = compute_differences(&ctx.table, &ctx.config.visits)?;
        if outcome.patients_excluded > 0 {
            info!(
                patients_excluded = outcome.patients_excluded,
                "patients without a baseline row were dropped"
            );
            ctx.warnings.push(format!(
                "{} patients lacked a baseline row and were dropped",
                outcome.patients_excluded
            ));
        }
        ctx.diff_rows = outcome.diff_rows;
        ctx.patients_excluded = outcome.patients_excluded;
        ctx.table = outcome.table;
        info!(diff_rows = ctx.diff_rows, "differences_ready");
        Ok(())
    }
}
