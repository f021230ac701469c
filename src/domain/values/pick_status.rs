use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Written in lowercase; read through `FromStr`, so legacy spellings and `""`/`null` decode too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "Option<String>")]
pub enum PickStatus {
    #[default]
    Pending,
    Win,
    Lose,
    Push,
}

impl PickStatus {
    /// Anything other than `pending` is an outcome that merges must not revert.
    pub fn is_settled(&self) -> bool {
        !matches!(self, PickStatus::Pending)
    }
}

impl fmt::Display for PickStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickStatus::Pending => write!(f, "pending"),
            PickStatus::Win => write!(f, "win"),
            PickStatus::Lose => write!(f, "lose"),
            PickStatus::Push => write!(f, "push"),
        }
    }
}

impl FromStr for PickStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "pending" => Ok(PickStatus::Pending),
            "win" | "won" => Ok(PickStatus::Win),
            "lose" | "loss" | "lost" => Ok(PickStatus::Lose),
            "push" | "void" => Ok(PickStatus::Push),
            _ => Err(format!("Unknown pick status: {s}")),
        }
    }
}

impl TryFrom<Option<String>> for PickStatus {
    type Error = String;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        value.as_deref().unwrap_or_default().parse()
    }
}
