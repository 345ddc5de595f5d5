//! Wizard state machine — tracks the current step and submission status.

use serde::{Deserialize, Serialize};

use super::catalog::FINAL_STEP;

/// Where the wizard is.
///
/// Editing steps progress linearly 0 → 4. `Finish` at step 4 moves to
/// `Submitting`, which settles into `Completed` or `Failed`. A failed
/// submission stays on step 4 and may be retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WizardState {
    Step { index: usize },
    Submitting,
    Completed,
    Failed { reason: String },
}

impl WizardState {
    pub fn start() -> Self {
        Self::Step { index: 0 }
    }

    /// The step whose form is on screen. Submission states sit on the final step.
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::Step { index } => Some(*index),
            Self::Submitting | Self::Failed { .. } => Some(FINAL_STEP),
            Self::Completed => None,
        }
    }

    /// Whether draft fields may still be edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Step { .. } | Self::Failed { .. })
    }

    /// Whether the wizard is done.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The step reached by `Next`, if it is a legal move ignoring gates.
    pub fn next(&self) -> Option<WizardState> {
        match self {
            Self::Step { index } if *index < FINAL_STEP => Some(Self::Step { index: index + 1 }),
            _ => None,
        }
    }

    /// The step reached by `Back`, if it is a legal move.
    pub fn back(&self) -> Option<WizardState> {
        match self.step() {
            Some(index) if index > 0 && self.is_editable() => {
                Some(Self::Step { index: index - 1 })
            }
            _ => None,
        }
    }

    /// Whether `Finish` may start a submission from here, ignoring gates.
    pub fn can_finish(&self) -> bool {
        match self {
            Self::Step { index } => *index == FINAL_STEP,
            Self::Failed { .. } => true,
            Self::Submitting | Self::Completed => false,
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::start()
    }
}

impl std::fmt::Display for WizardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Step { index } => write!(f, "step {index}"),
            Self::Submitting => write!(f, "submitting"),
            Self::Completed => write!(f, "completed"),
            Self::Failed { .. } => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(index: usize) -> WizardState {
        WizardState::Step { index }
    }

    #[test]
    fn next_walks_all_steps() {
        let mut current = WizardState::start();
        for expected in 1..=FINAL_STEP {
            current = current.next().unwrap();
            assert_eq!(current, step(expected));
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn back_walks_to_first_step() {
        let mut current = step(FINAL_STEP);
        for expected in (0..FINAL_STEP).rev() {
            current = current.back().unwrap();
            assert_eq!(current, step(expected));
        }
        assert!(current.back().is_none());
    }

    #[test]
    fn only_final_step_or_failure_can_finish() {
        for index in 0..FINAL_STEP {
            assert!(!step(index).can_finish());
        }
        assert!(step(FINAL_STEP).can_finish());
        assert!(
            WizardState::Failed {
                reason: "boom".into()
            }
            .can_finish()
        );
        assert!(!WizardState::Submitting.can_finish());
        assert!(!WizardState::Completed.can_finish());
    }

    #[test]
    fn failed_sits_on_final_step_and_can_go_back() {
        let failed = WizardState::Failed {
            reason: "offline".into(),
        };
        assert_eq!(failed.step(), Some(FINAL_STEP));
        assert!(failed.is_editable());
        assert_eq!(failed.back(), Some(step(FINAL_STEP - 1)));
        assert!(failed.next().is_none());
    }

    #[test]
    fn submission_states_are_frozen() {
        for state in [WizardState::Submitting, WizardState::Completed] {
            assert!(!state.is_editable());
            assert!(state.next().is_none());
            assert!(state.back().is_none());
        }
        assert!(WizardState::Completed.is_terminal());
        assert!(WizardState::Completed.step().is_none());
    }

    #[test]
    fn state_serde_roundtrip() {
        let state = WizardState::Failed {
            reason: "network".into(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["reason"], "network");

        let parsed: WizardState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, state);

        let step_json = serde_json::to_value(step(2)).unwrap();
        assert_eq!(step_json, serde_json::json!({"state": "step", "index": 2}));
    }
}
