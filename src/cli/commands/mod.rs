pub mod alter;
pub mod backdate;
pub mod backend;
pub mod display;
pub mod hours;
pub mod insert;
pub mod kill;
pub mod list;
pub mod modify;
pub mod now;
pub mod post;
pub mod running;
pub mod start;
pub mod stats;
pub mod stop;
pub mod switch;

use crate::errors::AppResult;
use std::io::{BufRead, Write};

/// Print `question` and read one line. `None` on end of input or a read
/// error, which callers treat as "no".
pub(crate) fn ask(out: &mut dyn Write, input: &mut dyn BufRead, question: &str) -> AppResult<Option<String>> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => {
            writeln!(out)?;
            Ok(None)
        }
        Ok(_) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
    }
}

pub(crate) fn is_yes(answer: Option<&str>) -> bool {
    matches!(
        answer.map(|a| a.trim().to_lowercase()).as_deref(),
        Some("y") | Some("yes")
    )
}
