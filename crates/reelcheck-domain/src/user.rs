//! User module - the people who rate movies

/// Externally supplied user identifier
pub type UserId = i64;

/// Gender as recorded by the source dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Recorded as `M`
    Male,

    /// Recorded as `F`
    Female,
}

impl Gender {
    /// Get the single-letter code used in the dataset and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    /// Parse the single-letter code (exact, case-sensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid gender: {}", s))
    }
}

/// A user that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Identifier from the source dataset
    pub user_id: UserId,

    /// Gender
    pub gender: Gender,

    /// Age in years
    pub age: u8,

    /// Postal code, kept as text so leading zeros survive
    pub cap: String,

    /// Free-text occupation; becomes an entry of the job catalog on load
    pub job: String,
}
