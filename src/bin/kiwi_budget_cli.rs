use std::process::ExitCode;

use colored::Colorize;

fn main() -> ExitCode {
    kiwi_budget::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match kiwi_budget::cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
