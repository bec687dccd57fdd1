use std::fs::canonicalize;

use clap::Parser;
use colored::Colorize;

use crate::cli::args::Args;
use crate::cli::progress::StepContext;
use crate::config::parse_pipeline_config;
use crate::plan::{execute_plan, generate_plan, step_count, ExecutePlanParams};
use crate::Result;

pub mod args;
pub mod progress;

pub const BANNER: &str = r"
 __  __    _    ____ ____   ___   ____ _____ ____
|  \/  |  / \  / ___|  _ \ / _ \ / ___|  ___/ ___|
| |\/| | / _ \| |   | |_) | | | | |   | |_ | |  _
| |  | |/ ___ \ |___|  _ <| |_| | |___|  _|| |_| |
|_|  |_/_/   \_\____|_| \_\\___/ \____|_|   \____|
";

pub fn run() -> Result<()> {
    let args = Args::parse();

    let config_path = canonicalize(&args.config)?;

    println!("{BANNER}");

    println!("Reading configuration file...\n");
    let mut config = parse_pipeline_config(&config_path)?;
    if let Some(input) = args.input {
        config.input = Some(input);
    }
    if let Some(output) = args.output {
        config.output = Some(output);
    }

    let plan = generate_plan(&config)?;

    println!("Configuration file: {:?}", &config_path);
    println!("Placement:");
    println!("\tInput: {:?}", &plan.input);
    println!("\tOutput: {:?}", &plan.output);
    println!("\tFormat: {:?}", plan.format);
    if !plan.rules.ignore.is_empty() {
        println!("\tIgnored: {}", plan.rules.ignore.join(", "));
    }
    println!("\tSteps: {}\n", step_count(&plan));

    let mut ctx = StepContext::new(&plan);
    let res = execute_plan(ExecutePlanParams {
        plan: &plan,
        ctx: Some(&mut ctx),
    });
    let tiles = ctx.check(res)?;

    if args.dump {
        print!("\n{tiles}");
    }
    println!("Placement saved to: {}\n", format!("{:?}", &plan.output).bold());

    Ok(())
}
