use serde::{Deserialize, Serialize};

/// LP backend handed the assembled model.
///
/// `Minilp` is the pure-Rust default; CBC and HiGHS are available behind the
/// `cbc` / `highs` cargo features when the native libraries are installed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolverBackend {
    #[default]
    Minilp,
    #[cfg(feature = "cbc")]
    Cbc,
    #[cfg(feature = "highs")]
    Highs,
}

impl std::fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Minilp => "minilp",
            #[cfg(feature = "cbc")]
            Self::Cbc => "cbc",
            #[cfg(feature = "highs")]
            Self::Highs => "highs",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minilp" => Ok(Self::Minilp),
            #[cfg(feature = "cbc")]
            "cbc" => Ok(Self::Cbc),
            #[cfg(feature = "highs")]
            "highs" => Ok(Self::Highs),
            _ => Err(format!("unknown solver backend: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_backend() {
        assert_eq!(SolverBackend::default(), SolverBackend::Minilp);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!(SolverBackend::from_str("minilp").unwrap(), SolverBackend::Minilp);
        assert_eq!(SolverBackend::from_str("MiniLP").unwrap(), SolverBackend::Minilp);
        assert!(SolverBackend::from_str("simplex-9000").is_err());
    }

    #[test]
    fn test_backend_display_roundtrip() {
        let backend = SolverBackend::Minilp;
        assert_eq!(SolverBackend::from_str(&backend.to_string()).unwrap(), backend);
    }
}
