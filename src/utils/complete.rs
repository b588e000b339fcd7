//! Unique-prefix completion shared by command and timesheet lookups.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<'a> {
    Found(&'a str),
    Ambiguous(Vec<String>),
    NoMatch,
}

/// An exact match wins; otherwise the single candidate starting with
/// `lookup`. Ambiguous candidates come back sorted.
pub fn complete<'a, I>(candidates: I, lookup: &str) -> Completion<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matches: Vec<&'a str> = Vec::new();
    for c in candidates {
        if c == lookup {
            return Completion::Found(c);
        }
        if c.starts_with(lookup) {
            matches.push(c);
        }
    }

    match matches.len() {
        0 => Completion::NoMatch,
        1 => Completion::Found(matches[0]),
        _ => {
            let mut sorted: Vec<String> = matches.into_iter().map(str::to_string).collect();
            sorted.sort();
            sorted.dedup();
            Completion::Ambiguous(sorted)
        }
    }
}
