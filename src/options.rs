//! Scanner and parser strictness switches
//!
//! The defaults reproduce the historical, permissive behavior. Hosts can
//! tighten either stage independently, from code or from the environment:
//!
//! ```text
//! FORMULA_STRICT=1               both switches on
//! FORMULA_STRICT_IDENTIFIERS=1   sigils only at the start of a name
//! FORMULA_STRICT_PARENS=1        unmatched parentheses are parse errors
//! ```

use std::env;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Reject names such as `$#AB` or `A$B`
    pub strict_identifiers: bool,
    /// Reject `)` or `,` without an open `(`, and `(` left open at end of input
    pub strict_parens: bool,
}

impl Options {
    /// Both switches on
    pub fn strict() -> Self {
        Options {
            strict_identifiers: true,
            strict_parens: true,
        }
    }

    /// Read the switches from `FORMULA_STRICT*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).is_some_and(|v| is_truthy(&v));
        let all = flag("FORMULA_STRICT");
        Options {
            strict_identifiers: all || flag("FORMULA_STRICT_IDENTIFIERS"),
            strict_parens: all || flag("FORMULA_STRICT_PARENS"),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
