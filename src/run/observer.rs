//! Observer interface for presentation layers.
//!
//! The state machine calls the observer synchronously, in command order:
//! notifications raised by a command first, then `phase_changed` once the
//! transition is committed.

use super::state::{RunOutcome, RunPhase};
use crate::shop::PitySnapshot;

/// Toast-style notification about a notable change or a rejected command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    RunStarted { seed: i64 },
    GoldGained { amount: u32, total: u32 },
    GoldSpent { amount: u32, total: u32 },
    LifeGained { amount: u32, total: u32 },
    LifeLost { amount: u32, total: u32 },
    Recruited { name: String },
    HexAcquired { name: String },
    ArtifactAcquired { name: String },
    /// A purchase or refresh was blocked.
    InsufficientGold { needed: u32, available: u32 },
    Revived,
    PityStatus(PitySnapshot),
    RunFinished(RunOutcome),
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::RunStarted { seed } => write!(f, "New run (seed {seed})"),
            Notification::GoldGained { amount, total } => write!(f, "Gold +{amount} ({total})"),
            Notification::GoldSpent { amount, total } => write!(f, "Gold -{amount} ({total})"),
            Notification::LifeGained { amount, total } => write!(f, "Life +{amount} ({total})"),
            Notification::LifeLost { amount, total } => write!(f, "Life -{amount} ({total})"),
            Notification::Recruited { name } => write!(f, "Recruited {name}"),
            Notification::HexAcquired { name } => write!(f, "Hex acquired: {name}"),
            Notification::ArtifactAcquired { name } => write!(f, "Artifact acquired: {name}"),
            Notification::InsufficientGold { needed, available } => {
                write!(f, "Not enough gold: need {needed}, have {available}")
            }
            Notification::Revived => f.write_str("Revived"),
            Notification::PityStatus(snapshot) => write!(f, "Pity: {snapshot}"),
            Notification::RunFinished(RunOutcome::Cleared) => f.write_str("Run cleared"),
            Notification::RunFinished(RunOutcome::Defeated) => f.write_str("Run over"),
        }
    }
}

/// Receives state-machine updates.
///
/// Both methods default to doing nothing.
pub trait RunObserver {
    /// Called after a phase transition is committed.
    fn phase_changed(&mut self, _phase: RunPhase) {}

    /// Called for each notification, before the command's phase change.
    fn notify(&mut self, _notification: &Notification) {}
}
