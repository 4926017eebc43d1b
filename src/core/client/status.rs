use core::fmt::{Display, Error as FmtError, Formatter};

/// Whether a client can still be updated and used for proof verification.
///
/// A frozen client is the fatal-per-client condition: misbehaviour was
/// detected, all further updates and verifications through it are refused,
/// but only that trust relationship degrades — the process carries on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Status {
    Active,
    Frozen,
}

impl Status {
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self, Status::Frozen)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Status::Active => write!(f, "ACTIVE"),
            Status::Frozen => write!(f, "FROZEN"),
        }
    }
}
