use crate::cli::{builtin_usage, session_for, CliArgs};
use crate::rcfile::dirs_home;
use crate::terminal::Session;
use formula::{display, lex_with, to_rpn, Rpn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper, Result as RlResult};
use std::borrow::Cow;
use std::io::IsTerminal;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper struct for rustyline with name completion
pub(crate) struct FormulaHelper {
    /// Current environment names, refreshed after every line
    pub(crate) variables: Vec<String>,
}

impl Helper for FormulaHelper {}

impl FormulaHelper {
    /// Complete `prefix` (the name run left of the cursor)
    pub(crate) fn candidates(&self, prefix: &str) -> Vec<Pair> {
        if let Some(sigil) = prefix.chars().next().filter(|c| *c == '$' || *c == '#') {
            let name = &prefix[1..];
            self.variables
                .iter()
                .filter(|v| v.starts_with(name))
                .map(|v| Pair {
                    display: v.clone(),
                    replacement: format!("{}{}", sigil, v),
                })
                .collect()
        } else {
            formula::builtins()
                .iter()
                .filter(|b| b.name.starts_with(prefix))
                .map(|b| Pair {
                    display: b.name.to_string(),
                    replacement: format!("{}(", b.name),
                })
                .collect()
        }
    }
}

impl Completer for FormulaHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Find the name run being completed
        let start = line[..pos]
            .char_indices()
            .rev()
            .find(|&(_, c)| !(c.is_ascii_uppercase() || c == '$' || c == '#'))
            .map_or(0, |(i, c)| i + c.len_utf8());
        let prefix = &line[start..pos];

        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        Ok((start, self.candidates(prefix)))
    }
}

impl Hinter for FormulaHelper {
    type Hint = String;
}

impl Highlighter for FormulaHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for FormulaHelper {}

fn print_repl_help() {
    println!(
        r#"Enter an expression to evaluate it, e.g. 54 + SQRT(49) * 8
{}
REPL COMMANDS:
    .help, .h               Show this help
    .env, .e                List variable bindings
    .reset, .r              Restore the default constants, drop user bindings
    .rpn <expr>             Show the postfix form of an expression
    exit, quit              Exit the REPL"#,
        builtin_usage()
    );
}

/// Handle a `.command`; returns false if the line is not one
fn meta_command(session: &mut Session, line: &str) -> bool {
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    match cmd {
        ".help" | ".h" => print_repl_help(),
        ".env" | ".e" => {
            if session.json {
                println!("{}", display::environment_to_json(&session.env));
            } else if !session.env.is_empty() {
                println!("{}", display::format_environment(&session.env));
            }
        }
        ".reset" | ".r" => session.env.reset(),
        ".rpn" => {
            if let Ok(tokens) = lex_with(rest, &session.options) {
                println!("tokens: {}", Rpn(&tokens));
            }
            match to_rpn(rest, &session.options) {
                Ok(rpn) => println!("rpn:    {}", Rpn(&rpn)),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        _ => return false,
    }
    true
}

/// Run the interactive loop
pub(crate) fn run_repl(cli: &CliArgs) -> RlResult<()> {
    let mut rl: Editor<FormulaHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(FormulaHelper {
        variables: Vec::new(),
    }));

    let mut session = session_for(cli);
    session.color = !session.json && std::io::stdout().is_terminal();

    // Try to load history
    let history_path = dirs_home().map(|h| h.join(".formula_history"));
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    if std::env::var("FORMULA_BANNER").is_ok() {
        println!("formula {} - infix expressions evaluated through RPN", VERSION);
        println!("  Type 'exit' or Ctrl-D to quit, '.help' for usage");
    }

    let prompt = "formula> ";

    loop {
        // Update variable names in helper for tab completion
        if let Some(helper) = rl.helper_mut() {
            helper.variables = session.env.iter().map(|(k, _)| k.to_string()).collect();
        }

        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if trimmed == "exit" || trimmed == "quit" {
                    break;
                }
                if trimmed.starts_with('.') && meta_command(&mut session, trimmed) {
                    continue;
                }

                let result = session.execute_line(trimmed);
                session.print_result(&result);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}
