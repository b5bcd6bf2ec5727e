use anyhow::Result;
use tracing::info;

use crate::cohort::matcher;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage2Match;

impl Stage2Match {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Match {
    fn name(&self) -> &'static str {
        "stage2_match"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if !ctx.match_controls {
            info!("control matching disabled, skipping");
            return Ok(());
        }

        let sweep = matcher::match_all(&ctx.table, &ctx.config.visits)?;
        info!(
            matched = sweep.matches.len(),
            skipped = sweep.skipped,
            "controls_matched"
        );
        ctx.matches = sweep.matches;
        ctx.matches_skipped = sweep.skipped;
        Ok(())
    }
}
