use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which employee shape a deployment runs with. The two shapes are never
/// mixed inside one roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// One shift with an optional break.
    #[default]
    Single,
    /// Up to two independent shifts, each with its own role.
    Dual,
}

impl Variant {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Variant::Single => "single",
            Variant::Dual => "dual",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Variant::Single),
            "dual" => Some(Variant::Dual),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_strings_round_trip() {
        for v in [Variant::Single, Variant::Dual] {
            assert_eq!(Variant::from_db_str(v.to_db_str()), Some(v));
        }
        assert_eq!(Variant::from_db_str("triple"), None);
    }
}
