use crate::rcfile::load_rc;
use crate::terminal::{is_comment_or_blank, Session};
use formula::Options;
use std::fs;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) trace: bool,
    pub(crate) strict: bool,
    pub(crate) json: bool,
    pub(crate) no_rc: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => {
                cli.trace = true;
            }
            "--strict" => {
                cli.strict = true;
            }
            "--json" => {
                cli.json = true;
            }
            "--no-rc" => {
                cli.no_rc = true;
            }
            "-c" => {
                // Everything after -c is the expression
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

pub(crate) fn print_help() {
    println!(
        r#"formula {} - infix expressions evaluated through RPN

USAGE:
    formula                     Start interactive REPL
    formula -c <expr>           Evaluate a single expression
    formula <script>            Evaluate a script, one expression per line
    formula --help              Show this help message
    formula --version           Show version

OPTIONS:
    --strict                    Reject malformed names and unbalanced parentheses
    --json                      Print results and errors as JSON
    --trace                     Log every evaluation step to stderr
    --no-rc                     Do not load the rc file

STARTUP:
    ~/.formularc                Evaluated before anything else (FORMULA_RC overrides)
    FORMULA_STRICT=1            Same as --strict
    RUST_LOG=formula=debug      Log pipeline stages to stderr

SYNTAX:
    2 + 3 * 4                   Arithmetic: + - * / and ^ (right-associative)
    1 < 2   3 > 2   2 = 2       Comparisons produce true/false
    $PI  $E                     Variable reference
    SET(#NAME, expr)            Bind NAME, returns the value
{}
EXAMPLES:
    formula -c "54 + SQRT(49) * 8"
    formula -c "IF(54 < 3, 6, 9) + 20"
"#,
        VERSION,
        builtin_usage()
    );
}

/// One usage line per builtin function
pub(crate) fn builtin_usage() -> String {
    let mut out = String::from("\nFUNCTIONS:\n");
    for builtin in formula::builtins() {
        out.push_str("    ");
        out.push_str(builtin.usage);
        out.push('\n');
    }
    out
}

pub(crate) fn print_version() {
    println!("formula {}", VERSION);
}

/// Build a session from the command line, loading the rc file unless disabled
pub(crate) fn session_for(cli: &CliArgs) -> Session {
    let options = if cli.strict {
        Options::strict()
    } else {
        Options::from_env()
    };
    let mut session = Session::new(options);
    session.json = cli.json;
    session.trace = cli.trace;

    if !cli.no_rc {
        load_rc(&mut session);
    }
    session
}

/// Evaluate a single expression
pub(crate) fn execute_command(cmd: &str, cli: &CliArgs) -> ExitCode {
    let mut session = session_for(cli);
    let result = session.execute_line(cmd);
    session.print_result(&result);
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Evaluate a script file, stopping at the first failing line
pub(crate) fn execute_script(path: &str, cli: &CliArgs) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = session_for(cli);

    for (line_num, line) in content.lines().enumerate() {
        if is_comment_or_blank(line) {
            continue;
        }

        match session.execute_line(line.trim()) {
            Ok(value) => session.print_result(&Ok(value)),
            Err(e) => {
                eprintln!("Error at line {}: {}", line_num + 1, e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
