//! Task lifecycle status and the transition table over it.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a CSV-processing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task record exists; no worker has picked the job up yet.
    Pending,
    /// A worker is processing the uploaded file.
    Processing,
    /// Processing completed; a report artifact may exist.
    Finished,
    /// Processing failed.
    Failed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Finished => "finished",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` when no edge leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }

    /// Returns `true` when the directed edge `self -> next` is legal.
    ///
    /// The machine has exactly three edges: `pending -> processing`,
    /// `processing -> finished`, and `processing -> failed`. There are no
    /// self-loops, so re-submitting a task's current status is always
    /// rejected.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Finished)
                | (Self::Processing, Self::Failed)
        )
    }

    /// Returns the status a task must currently hold for a transition into
    /// `desired` to be legal.
    ///
    /// Every reachable status has exactly one predecessor; `None` for
    /// [`TaskStatus::Pending`], which no edge enters. Stores phrase their
    /// conditional update predicate in terms of this value so the backing
    /// store itself rejects disallowed transitions.
    #[must_use]
    pub const fn valid_predecessor(desired: Self) -> Option<Self> {
        match desired {
            Self::Pending => None,
            Self::Processing => Some(Self::Pending),
            Self::Finished | Self::Failed => Some(Self::Processing),
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "finished" => Ok(Self::Finished),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
