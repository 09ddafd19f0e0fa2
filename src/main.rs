//! flakehunt - run a test suite repeatedly to surface flaky tests

use clap::{Parser, Subcommand};
use flakehunt::commands::*;
use flakehunt::highlight::{ColorChoice, Palette};
use flakehunt::ui::{CliUI, UI};
use std::io::Write;

#[derive(Parser)]
#[command(name = "flakehunt")]
#[command(about = "Run tests repeatedly and summarize intermittent failures", long_about = None)]
struct Cli {
    /// Directory holding .flakehunt.conf; tests run from here (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    directory: Option<String>,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto, env = "FLAKEHUNT_COLOR")]
    color: ColorChoice,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tests over and over, pausing after each run with failures
    Soak {
        /// Stop after this many runs (defaults to max_runs from .flakehunt.conf, or 1000)
        #[arg(long, env = "FLAKEHUNT_MAX_RUNS", value_parser = clap::value_parser!(u32).range(1..))]
        max_runs: Option<u32>,

        /// Extra arguments passed to the test command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run the tests a fixed number of times and rank failing tests
    Find {
        /// Number of times to run the tests
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        runs: u32,

        /// Show result lines for passed tests as well (must come before any test command arguments)
        #[arg(long)]
        show_passed: bool,

        /// Extra arguments passed to the test command; everything from the first one on is forwarded verbatim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let colorize = cli.color.should_colorize();
    if let Err(e) = flakehunt::logging::init(colorize) {
        let _ = writeln!(std::io::stderr(), "Error: {}", e);
        std::process::exit(1);
    }
    let palette = Palette::new(colorize);

    let mut ui = CliUI::new();

    let result = match cli.command {
        Commands::Soak { max_runs, args } => {
            let cmd = SoakCommand::new(cli.directory, args)
                .with_max_runs(max_runs)
                .with_palette(palette);
            cmd.execute(&mut ui)
        }
        Commands::Find {
            runs,
            show_passed,
            args,
        } => {
            let cmd = FindCommand::new(cli.directory, runs, show_passed, args).with_palette(palette);
            cmd.execute(&mut ui)
        }
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = ui.clear_progress();
            let _ = ui.error(&e.to_string());
            std::process::exit(1);
        }
    }
}
