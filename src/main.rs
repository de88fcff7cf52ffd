use clap::Parser;
use std::process;
use ukf_trace::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("UKF Trace - Harness Output Parser");
    println!("=================================");
    println!();
    println!("Turn the text output of the UKF test harnesses into typed time-series");
    println!("datasets, summarised on the terminal or exported as JSON.");
    println!();
    println!("USAGE:");
    println!("    ukf-trace <COMMAND> [INPUT] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    narrative   Parse the sectioned log of the scalar UKF harness");
    println!("    tabular     Parse the CSV table of the battery ECM harness");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Run ./ukf_test and summarise each case:");
    println!("    ukf-trace narrative");
    println!();
    println!("    # Parse a saved battery log and export it as JSON:");
    println!("    ukf-trace tabular ecm_run.csv --format json --output ecm_run.json");
    println!();
    println!("    # Run a harness with arguments:");
    println!("    ukf-trace narrative --run ./build/ukf_test --seed 42");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ukf-trace <COMMAND> --help");
}
