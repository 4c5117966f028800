use crate::terminal::{is_comment_or_blank, Session};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Get home directory
pub(crate) fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// `$FORMULA_RC`, or `~/.formularc`
pub(crate) fn rc_path() -> Option<PathBuf> {
    env::var_os("FORMULA_RC")
        .map(PathBuf::from)
        .or_else(|| dirs_home().map(|h| h.join(".formularc")))
}

/// Load and evaluate the rc file into the session environment, if it exists
pub(crate) fn load_rc(session: &mut Session) {
    let Some(path) = rc_path() else {
        return;
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return,
    };

    let loaded = load_rc_content(session, &content, &path.display().to_string());
    tracing::debug!(path = %path.display(), loaded, "rc file loaded");
}

/// Evaluate each expression line; failures are reported and skipped.
/// Returns the number of lines that evaluated successfully.
pub(crate) fn load_rc_content(session: &mut Session, content: &str, source: &str) -> usize {
    let mut loaded = 0;

    for (line_num, line) in content.lines().enumerate() {
        if is_comment_or_blank(line) {
            continue;
        }

        match session.execute_line(line.trim()) {
            Ok(_) => loaded += 1,
            Err(e) => eprintln!("Warning: {} line {}: {}", source, line_num + 1, e),
        }
    }

    loaded
}
