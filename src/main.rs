use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cohortsim::cli::{Cli, Commands, RunArgs, SamplingArg, ValidateArgs};
use cohortsim::config::{Sampling, ScaleRange, StudyConfig, VisitSchedule};
use cohortsim::ctx::Ctx;
use cohortsim::io::{summary, tsv_reader, validate};
use cohortsim::pipeline::Pipeline;
use cohortsim::pipeline::stage0_scaffold::Stage0Scaffold;
use cohortsim::pipeline::stage1_generate::Stage1Generate;
use cohortsim::pipeline::stage2_match::Stage2Match;
use cohortsim::pipeline::stage3_differences::Stage3Differences;
use cohortsim::pipeline::stage4_output::Stage4Output;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Validate(args) => validate_table(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let config = StudyConfig {
        patient_count: args.patients,
        treated_ratio: args.treated_ratio,
        visits: VisitSchedule::new(args.visits),
        pain_urgency: ScaleRange::new(args.pain_urgency_min, args.pain_urgency_max),
        frequency: ScaleRange::new(args.frequency_min, args.frequency_max),
        sampling: match args.sampling {
            SamplingArg::Continuous => Sampling::Continuous,
            SamplingArg::Discrete => Sampling::Discrete,
        },
    };

    let mut ctx = Ctx::new(
        config,
        args.seed,
        args.out,
        args.match_controls,
        args.json,
        args.tsv,
        env!("CARGO_PKG_VERSION"),
    );

    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage1Generate::new()),
        Box::new(Stage2Match::new()),
        Box::new(Stage3Differences::new()),
        Box::new(Stage4Output::new()),
    ]);
    pipeline.run(&mut ctx)?;

    print_summary(&ctx);
    Ok(())
}

fn print_summary(ctx: &Ctx) {
    print!("{}", summary::format_summary(ctx));
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}

fn validate_table(args: ValidateArgs) -> Result<()> {
    let schedule = VisitSchedule::new(args.visits);
    let pain_urgency = ScaleRange::new(args.pain_urgency_min, args.pain_urgency_max);
    let frequency = ScaleRange::new(args.frequency_min, args.frequency_max);

    let table = tsv_reader::read_tsv(&args.input)?;
    let report = validate::validate_table(&table, &schedule, pain_urgency, frequency)?;

    println!(
        "cohortsim validate {}",
        if report.is_ok() { "ok" } else { "failed" }
    );
    println!("patients: {}", report.patients);
    println!("rows: {}", report.rows);
    println!("derived rows: {}", report.derived_rows);
    if !report.is_ok() {
        println!("problems:");
        for problem in &report.problems {
            println!("- {}", problem);
        }
        anyhow::bail!("validation found {} problems", report.problems.len());
    }
    Ok(())
}
