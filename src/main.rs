//! formula - infix expressions evaluated through RPN
//!
//! Usage:
//!   formula               Start interactive REPL
//!   formula -c "expr"     Evaluate a single expression
//!   formula calc.txt      Evaluate a script, one expression per line

mod cli;
mod rcfile;
mod repl;
mod terminal;

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = cli::parse_args(&args);

    if cli.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if cli.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    formula::init_tracing(cli.trace);

    if let Some(ref cmd) = cli.command {
        return cli::execute_command(cmd, &cli);
    }
    if let Some(ref path) = cli.script {
        return cli::execute_script(path, &cli);
    }

    match repl::run_repl(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::FAILURE
        }
    }
}
