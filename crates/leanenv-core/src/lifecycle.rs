use crate::CoreError;
use std::fmt;

/// Phases of one clone run. The chain is linear; the only branch is
/// that any phase may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClonePhase {
    Init,
    FetchedFull,
    FetchedHistory,
    Merged,
    Saved,
    Reported,
    Failed,
}

impl ClonePhase {
    fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::FetchedFull),
            Self::FetchedFull => Some(Self::FetchedHistory),
            Self::FetchedHistory => Some(Self::Merged),
            Self::Merged => Some(Self::Saved),
            Self::Saved => Some(Self::Reported),
            Self::Reported | Self::Failed => None,
        }
    }
}

impl fmt::Display for ClonePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::FetchedFull => "fetched-full",
            Self::FetchedHistory => "fetched-history",
            Self::Merged => "merged",
            Self::Saved => "saved",
            Self::Reported => "reported",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub fn validate_transition(from: ClonePhase, to: ClonePhase) -> Result<(), CoreError> {
    let valid = (to == ClonePhase::Failed && from != ClonePhase::Failed)
        || from.next() == Some(to);
    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
