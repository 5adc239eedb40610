//! Two-valued health status reported to views.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    #[default]
    Healthy,
    Infected,
}

impl Status {
    #[inline]
    pub fn from_infected(infected: bool) -> Self {
        if infected { Status::Infected } else { Status::Healthy }
    }

    #[inline]
    pub fn is_infected(self) -> bool {
        self == Status::Infected
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Healthy  => "healthy",
            Status::Infected => "infected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
