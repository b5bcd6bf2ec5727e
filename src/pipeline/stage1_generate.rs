use anyhow::Result;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::cohort::generate::generate_cohort;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage1Generate;

impl Stage1Generate {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Generate {
    fn name(&self) -> &'static str {
        "stage1_generate"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(ctx.seed);
        ctx.table = generate_cohort(&ctx.config, &mut rng);
        info!(
            rows = ctx.table.len(),
            patients = ctx.config.patient_count,
            seed = ctx.seed,
            "cohort_ready"
        );
        Ok(())
    }
}
