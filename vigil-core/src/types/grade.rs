//! Run grade: an ordinal health summary derived from severity counts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal health grade.
///
/// Variants are declared worst-first so the derived ordering gives
/// `A > B > C > F`, which is what trajectory comparisons rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    F,
    C,
    B,
    A,
}

impl Grade {
    /// Warnings above this count drop a run without criticals to `C`.
    pub const WARNING_LIMIT_FOR_B: u32 = 3;

    /// Grade a run from its critical and warning counts.
    ///
    /// F if any critical; else C if more than 3 warnings; else B if any
    /// warning; else A.
    pub fn from_counts(critical: u32, warning: u32) -> Self {
        if critical > 0 {
            Grade::F
        } else if warning > Self::WARNING_LIMIT_FOR_B {
            Grade::C
        } else if warning > 0 {
            Grade::B
        } else {
            Grade::A
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
