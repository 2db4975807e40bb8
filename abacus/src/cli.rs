use clap::builder::styling::{AnsiColor, Effects, Style, Styles};

use crate::calculator::ErrorPolicy;

/// Keypad calculator for the terminal.
///
/// Without arguments, starts an interactive session where every line is a
/// sequence of key presses and Enter evaluates.
#[derive(clap::Parser, Debug, Clone)]
#[clap(styles = CARGO_STYLING)]
pub struct Cli {
    /// Evaluate this expression once and print the result
    #[arg(allow_hyphen_values = true)]
    pub expression: Option<String>,

    /// Do not print diagnostics or log messages
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Read key presses from stdin, one evaluation per line
    #[arg(long, default_value_t = false, conflicts_with = "expression")]
    pub stdin: bool,

    /// How evaluation errors are presented
    #[arg(long, value_enum, default_value_t = ErrorPolicy::Inline)]
    pub errors: ErrorPolicy,

    /// Longest accepted expression
    #[arg(long, value_name = "BYTES", default_value_t = abacusc::MAX_LEN)]
    pub max_len: usize,

    /// Deepest accepted nesting of parentheses and unary minus, at most 1024
    #[arg(long, value_name = "LEVELS", default_value_t = abacusc::parser::MAX_DEPTH)]
    pub max_depth: usize,
}

const HEADER: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
const USAGE: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
const LITERAL: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
const PLACEHOLDER: Style = AnsiColor::Cyan.on_default();
const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
const VALID: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
const INVALID: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

/// Cargo's color style
/// [source](https://github.com/crate-ci/clap-cargo/blob/master/src/style.rs)
const CARGO_STYLING: Styles = Styles::styled()
    .header(HEADER)
    .usage(USAGE)
    .literal(LITERAL)
    .placeholder(PLACEHOLDER)
    .error(ERROR)
    .valid(VALID)
    .invalid(INVALID);
