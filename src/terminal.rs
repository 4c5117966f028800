use formula::{display, lex_with, parse_with, Environment, Error, Evaluator, Options, Value};

/// Evaluation state shared by the REPL, `-c` and script modes
pub(crate) struct Session {
    pub(crate) env: Environment,
    pub(crate) options: Options,
    /// Print results and errors as JSON
    pub(crate) json: bool,
    /// Emit a trace event per RPN step
    pub(crate) trace: bool,
    /// Color results (REPL on a terminal)
    pub(crate) color: bool,
}

impl Session {
    pub(crate) fn new(options: Options) -> Self {
        Session {
            env: Environment::new(),
            options,
            json: false,
            trace: false,
            color: false,
        }
    }

    /// Run one expression through the whole pipeline
    pub(crate) fn execute_line(&mut self, input: &str) -> Result<Value, Error> {
        let tokens = lex_with(input, &self.options)?;
        let rpn = parse_with(tokens, &self.options)?;
        let mut evaluator = Evaluator::new(&mut self.env);
        evaluator.set_trace_mode(self.trace);
        Ok(evaluator.eval(&rpn)?)
    }

    /// Print a result to stdout or an error to stderr
    pub(crate) fn print_result(&self, result: &Result<Value, Error>) {
        match (result, self.json) {
            (Ok(value), true) => println!("{}", display::value_to_json(value)),
            (Err(err), true) => println!("{}", display::error_to_json(err)),
            (Ok(value), false) if self.color => println!("{}", display::format_value_colored(value)),
            (Ok(value), false) => println!("{}", display::format_value(value)),
            (Err(err), false) => eprintln!("Error: {}", err),
        }
    }
}

/// Blank lines and `# comment` lines are skipped in rc files and scripts.
/// `#NAME` is a key token, so only a lone `#` or `# ` starts a comment.
pub(crate) fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed == "#" || trimmed.starts_with("# ")
}
