//! Severity tag attached to every line the console emits.

use serde::{Deserialize, Serialize};

/// How a line of console output should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Message,
    Warning,
    Error,
}

impl Severity {
    /// Map a `log` level onto a console severity.
    pub fn from_level(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info | log::Level::Debug | log::Level::Trace => Self::Message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping() {
        assert_eq!(Severity::from_level(log::Level::Error), Severity::Error);
        assert_eq!(Severity::from_level(log::Level::Warn), Severity::Warning);
        assert_eq!(Severity::from_level(log::Level::Info), Severity::Message);
        assert_eq!(Severity::from_level(log::Level::Trace), Severity::Message);
    }
}
