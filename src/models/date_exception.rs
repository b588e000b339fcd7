use serde::Serialize;

/// Calendar exception a day can carry for expected-hours accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateException {
    None,
    Holiday,
    Unpaid,
    Vacation,
}

impl DateException {
    /// Tables in precedence order: a day listed in more than one table
    /// counts as the first one it is found in.
    pub const TABLES: [(DateException, &'static str); 3] = [
        (DateException::Holiday, "holidays"),
        (DateException::Unpaid, "unpaid"),
        (DateException::Vacation, "vacation"),
    ];
}
