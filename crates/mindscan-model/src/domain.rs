// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An independent classification axis. Each domain has its own model, label
/// table and recommendation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Depression,
    Satisfaction,
    Personality,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Self::Depression, Self::Satisfaction, Self::Personality];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Depression => "depression",
            Self::Satisfaction => "satisfaction",
            Self::Personality => "personality",
        }
    }

    /// Short key used by the results view (`dep`, `sat`, `big`).
    #[must_use]
    pub const fn short_key(self) -> &'static str {
        match self {
            Self::Depression => "dep",
            Self::Satisfaction => "sat",
            Self::Personality => "big",
        }
    }

    /// Artifact file name of the domain's classifier.
    #[must_use]
    pub const fn artifact_file(self) -> &'static str {
        match self {
            Self::Depression => "dep_model.json",
            Self::Satisfaction => "sat_model.json",
            Self::Personality => "big_model.json",
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Domain;

    #[test]
    fn artifact_files_are_distinct() {
        let mut files: Vec<_> = Domain::ALL.iter().map(|d| d.artifact_file()).collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), Domain::ALL.len());
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let raw = serde_json::to_string(&Domain::Satisfaction).expect("serialize domain");
        assert_eq!(raw, "\"satisfaction\"");
    }
}
