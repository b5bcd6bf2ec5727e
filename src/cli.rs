use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cohortsim", version, about = "Synthetic longitudinal cohort CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = 400, help = "Number of simulated patients")]
    pub patients: usize,

    #[arg(long, default_value_t = 0.47, help = "Probability of the treated label")]
    pub treated_ratio: f64,

    #[arg(
        long,
        num_args = 1..,
        default_values_t = ["baseline".to_string(), "3mos".to_string(), "6mos".to_string()],
        help = "Canonical visit labels, baseline first"
    )]
    pub visits: Vec<String>,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pain_urgency_min: f64,

    #[arg(long, default_value_t = 9.0, allow_negative_numbers = true)]
    pub pain_urgency_max: f64,

    #[arg(long, default_value_t = -15.0, allow_negative_numbers = true)]
    pub frequency_min: f64,

    #[arg(long, default_value_t = 15.0, allow_negative_numbers = true)]
    pub frequency_max: f64,

    #[arg(long, value_enum, default_value_t = SamplingArg::Continuous)]
    pub sampling: SamplingArg,

    #[arg(long, default_value_t = 42, help = "Seed for the random source")]
    pub seed: u64,

    #[arg(
        long,
        default_value_t = false,
        help = "Pair each treated row with its nearest untreated control"
    )]
    pub match_controls: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Observation table TSV written by a previous run")]
    pub input: PathBuf,

    #[arg(
        long,
        num_args = 1..,
        default_values_t = ["baseline".to_string(), "3mos".to_string(), "6mos".to_string()],
        help = "Canonical visit labels, baseline first"
    )]
    pub visits: Vec<String>,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pain_urgency_min: f64,

    #[arg(long, default_value_t = 9.0, allow_negative_numbers = true)]
    pub pain_urgency_max: f64,

    #[arg(long, default_value_t = -15.0, allow_negative_numbers = true)]
    pub frequency_min: f64,

    #[arg(long, default_value_t = 15.0, allow_negative_numbers = true)]
    pub frequency_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplingArg {
    Continuous,
    Discrete,
}
