//! Finance Calculator CLI
//!
//! Starts the interactive menu by default; `--demo` prints every formula for
//! one fixed set of inputs instead.

use anyhow::Context;
use clap::Parser;
use finance_calculator::demo::{self, DEFAULT_AMOUNT, DEFAULT_RATE, DEFAULT_TIME};
use finance_calculator::{SessionOutcome, Shell, ShellConfig};
use log::info;
use std::io;

#[derive(Parser, Debug)]
#[command(name = "finance-calculator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results for fixed inputs instead of starting the menu
    #[arg(long)]
    demo: bool,

    /// Emit the demonstration report as JSON
    #[arg(long, requires = "demo")]
    json: bool,

    /// Demonstration amount (principal, future value or present value)
    #[arg(long, default_value_t = DEFAULT_AMOUNT, requires = "demo")]
    principal: f64,

    /// Demonstration rate as a decimal
    #[arg(long, default_value_t = DEFAULT_RATE, requires = "demo", allow_negative_numbers = true)]
    rate: f64,

    /// Demonstration number of years
    #[arg(long, default_value_t = DEFAULT_TIME, requires = "demo", allow_negative_numbers = true)]
    time: f64,

    /// Reject degenerate inputs instead of printing NaN or infinity
    #[arg(long, conflicts_with = "demo")]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.demo {
        info!("demonstration with amount={} rate={} time={}", cli.principal, cli.rate, cli.time);
        let report = demo::run(cli.principal, cli.rate, cli.time);
        let mut stdout = io::stdout().lock();
        if cli.json {
            report.write_json(&mut stdout).context("writing JSON report")?;
        } else {
            report.write_text(&mut stdout).context("writing report")?;
        }
        return Ok(());
    }

    let config = ShellConfig { strict: cli.strict };
    let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock(), config);
    match shell.run().context("interactive session failed")? {
        SessionOutcome::Exited => info!("session ended via exit option"),
        SessionOutcome::EndOfInput => info!("session ended at end of input"),
    }
    Ok(())
}
