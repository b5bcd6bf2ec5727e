use std::path::PathBuf;

use crate::cohort::{ControlMatch, ObservationTable};
use crate::config::StudyConfig;
use crate::schema::v1::{CohortSimV1, StudyMeta};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub config: StudyConfig,
    pub seed: u64,
    pub match_controls: bool,
    pub write_json: bool,
    pub write_tsv: bool,
    pub warnings: Vec<String>,
    pub table: ObservationTable,
    pub matches: Vec<ControlMatch>,
    pub matches_skipped: usize,
    pub diff_rows: usize,
    pub patients_excluded: usize,
    pub output: OutputPaths,
    pub report: CohortSimV1,
}

impl Ctx {
    pub fn new(
        config: StudyConfig,
        seed: u64,
        out_dir: PathBuf,
        match_controls: bool,
        write_json: bool,
        write_tsv: bool,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("cohortsim.json");
        let tsv_path = out_dir.join("cohortsim.tsv");
        let report = CohortSimV1::empty(tool_version, StudyMeta::from_config(&config, seed));
        Self {
            config,
            seed,
            match_controls,
            write_json,
            write_tsv,
            warnings: Vec::new(),
            table: ObservationTable::new(),
            matches: Vec::new(),
            matches_skipped: 0,
            diff_rows: 0,
            patients_excluded: 0,
            output: OutputPaths {
                out_dir,
                json_path,
                tsv_path,
            },
            report,
        }
    }
}
