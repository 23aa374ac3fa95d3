use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Display priority attached to a remaining-time label. Variants are ordered
/// so that `Expired` sorts above everything else and `Safe` last; the
/// dashboard relies on this ordering when sorting subscriber tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityLevel {
    Safe,
    Ok,
    Alert,
    Critical,
    Expired,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Safe => "safe",
            SeverityLevel::Ok => "ok",
            SeverityLevel::Alert => "alert",
            SeverityLevel::Critical => "critical",
            SeverityLevel::Expired => "expired",
        }
    }
}

impl Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_outranks_every_other_level() {
        let mut levels = vec![
            SeverityLevel::Ok,
            SeverityLevel::Expired,
            SeverityLevel::Safe,
            SeverityLevel::Critical,
            SeverityLevel::Alert,
        ];
        levels.sort();

        assert_eq!(
            levels,
            vec![
                SeverityLevel::Safe,
                SeverityLevel::Ok,
                SeverityLevel::Alert,
                SeverityLevel::Critical,
                SeverityLevel::Expired,
            ]
        );
    }
}
