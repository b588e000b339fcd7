use std::fmt;
use std::io::{self, IsTerminal};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

fn label(color: &str, text: &str) -> String {
    if io::stderr().is_terminal() {
        format!("{}{}{}{}", color, BOLD, text, RESET)
    } else {
        text.to_string()
    }
}

pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", label(FG_YELLOW, "warning:"), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", label(FG_RED, "error:"), msg);
}
