use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product tier. Each tier owns one document collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Hero,
    Pro,
}

impl Tier {
    pub fn collection(&self) -> &'static str {
        match self {
            Tier::Free => "daily_picks",
            Tier::Hero => "hero_picks",
            Tier::Pro => "pro_picks",
        }
    }

    /// Lenient lookup used at the boundary: unknown names land on the default tier.
    pub fn lookup(name: &str) -> Tier {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(tier = name, "unknown tier, falling back to {}", Tier::default());
            Tier::default()
        })
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Free => write!(f, "free"),
            Tier::Hero => write!(f, "hero"),
            Tier::Pro => write!(f, "pro"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "hero" => Ok(Tier::Hero),
            "pro" => Ok(Tier::Pro),
            _ => Err(format!("Unknown tier: {s}")),
        }
    }
}
