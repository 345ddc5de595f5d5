//! WizardController — coordinates the draft, step gates, transitions, and
//! finalization.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::watch;

use crate::error::TransitionError;
use crate::store::ProfileStore;

use super::catalog::{
    ColorKey, FINAL_STEP, Gender, LookingFor, QuestionKey, STEPS, TOTAL_STEPS, Trait,
};
use super::model::{ProfileDraft, SessionUser, ToggleOutcome};
use super::persist::PersistenceCoordinator;
use super::personality::derive_traits;
use super::state::WizardState;
use super::validation::can_proceed;

/// Drives one user through the onboarding steps.
///
/// Navigation is strictly one step at a time. Every change is published as
/// a [`WizardView`] on a watch channel so the UI can re-render.
pub struct WizardController {
    user: SessionUser,
    draft: ProfileDraft,
    state: WizardState,
    traits: Vec<Trait>,
    /// `1` after a forward move, `-1` after a backward one.
    direction: i8,
    coordinator: PersistenceCoordinator,
    view_tx: watch::Sender<WizardView>,
}

impl WizardController {
    pub fn new(user: SessionUser, store: Arc<dyn ProfileStore>) -> Self {
        let draft = ProfileDraft::new();
        let state = WizardState::start();
        let (view_tx, _) = watch::channel(WizardView::build(&state, &draft, 1));
        Self {
            user,
            draft,
            state,
            traits: Vec::new(),
            direction: 1,
            coordinator: PersistenceCoordinator::new(store),
            view_tx,
        }
    }

    pub fn user(&self) -> SessionUser {
        self.user
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Traits saved with the profile. Empty until the wizard completes.
    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    /// Whether the primary action (Continue or Finish) is enabled.
    pub fn can_proceed(&self) -> bool {
        match self.state.step() {
            Some(step) if self.state.is_editable() => can_proceed(step, &self.draft),
            _ => false,
        }
    }

    /// Current snapshot for rendering.
    pub fn view(&self) -> WizardView {
        WizardView::build(&self.state, &self.draft, self.direction)
    }

    /// Receive a fresh [`WizardView`] after every change.
    pub fn subscribe(&self) -> watch::Receiver<WizardView> {
        self.view_tx.subscribe()
    }

    // ── Draft edits ─────────────────────────────────────────────────

    pub fn set_display_name(&mut self, name: impl Into<String>) -> Result<(), TransitionError> {
        self.edit("set display name", |d| d.set_display_name(name))
    }

    pub fn set_birthday(&mut self, birthday: Option<NaiveDate>) -> Result<(), TransitionError> {
        self.edit("set birthday", |d| d.set_birthday(birthday))
    }

    pub fn set_gender(&mut self, gender: Gender) -> Result<(), TransitionError> {
        self.edit("set gender", |d| d.set_gender(gender))
    }

    pub fn set_looking_for(&mut self, looking_for: LookingFor) -> Result<(), TransitionError> {
        self.edit("set looking for", |d| d.set_looking_for(looking_for))
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) -> Result<(), TransitionError> {
        self.edit("set bio", |d| d.set_bio(bio))
    }

    pub fn toggle_color(&mut self, key: ColorKey) -> Result<ToggleOutcome, TransitionError> {
        self.edit("toggle color", |d| d.toggle_color(key))
    }

    pub fn set_answer(
        &mut self,
        question: QuestionKey,
        option: impl Into<String>,
    ) -> Result<(), TransitionError> {
        self.edit("answer", |d| d.set_answer(question, option))
    }

    fn edit<R>(
        &mut self,
        action: &'static str,
        f: impl FnOnce(&mut ProfileDraft) -> R,
    ) -> Result<R, TransitionError> {
        if !self.state.is_editable() {
            return Err(TransitionError::NotAllowed {
                action,
                state: self.state.clone(),
            });
        }
        let out = f(&mut self.draft);
        tracing::debug!(action, can_proceed = self.can_proceed(), "Draft updated");
        self.publish();
        Ok(out)
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Move forward one step. Returns the new step index.
    pub fn next(&mut self) -> Result<usize, TransitionError> {
        let target = self.state.next().ok_or_else(|| TransitionError::NotAllowed {
            action: "continue",
            state: self.state.clone(),
        })?;
        let current = self.state.step().unwrap_or_default();
        if !can_proceed(current, &self.draft) {
            return Err(TransitionError::Blocked { step: current });
        }
        self.direction = 1;
        self.set_state(target);
        Ok(current + 1)
    }

    /// Move back one step. Entered data is kept.
    pub fn back(&mut self) -> Result<usize, TransitionError> {
        let target = self.state.back().ok_or_else(|| TransitionError::NotAllowed {
            action: "go back",
            state: self.state.clone(),
        })?;
        let index = target.step().unwrap_or_default();
        self.direction = -1;
        self.set_state(target);
        Ok(index)
    }

    /// Derive traits and save the profile.
    ///
    /// On failure the wizard moves to `Failed`, keeps the draft, and may be
    /// finished again. If the returned future is dropped before the save
    /// settles, the wizard also lands in `Failed`; writes already issued are
    /// not rolled back.
    pub async fn finish(&mut self) -> Result<Vec<Trait>, TransitionError> {
        if !self.state.can_finish() {
            return Err(TransitionError::NotAllowed {
                action: "finish",
                state: self.state.clone(),
            });
        }
        if !can_proceed(FINAL_STEP, &self.draft) {
            return Err(TransitionError::Blocked { step: FINAL_STEP });
        }

        self.direction = 1;
        self.set_state(WizardState::Submitting);
        let traits = derive_traits(self.draft.vibe_answers());

        let mut guard = SubmitGuard {
            wizard: self,
            settled: false,
        };
        let wizard = &*guard.wizard;
        let result = wizard
            .coordinator
            .commit(wizard.user.id, &wizard.draft, &traits)
            .await;
        guard.settled = true;

        let wizard = &mut *guard.wizard;
        match result {
            Ok(()) => {
                wizard.traits = traits.clone();
                wizard.set_state(WizardState::Completed);
                Ok(traits)
            }
            Err(e) => {
                wizard.set_state(WizardState::Failed {
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    fn set_state(&mut self, state: WizardState) {
        tracing::debug!(
            profile_id = %self.user.id,
            from = %self.state,
            to = %state,
            "Wizard transition"
        );
        self.state = state;
        self.publish();
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }
}

/// Moves a wizard left in `Submitting` to `Failed` when `finish` is dropped
/// mid-save.
struct SubmitGuard<'a> {
    wizard: &'a mut WizardController,
    settled: bool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!(
                profile_id = %self.wizard.user.id,
                "Submission abandoned before it settled"
            );
            self.wizard.set_state(WizardState::Failed {
                reason: ABANDONED_REASON.to_string(),
            });
        }
    }
}

const ABANDONED_REASON: &str = "Saving was interrupted. Please try again.";

/// What the UI needs to draw the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardView {
    pub state: WizardState,
    /// Zero-based index of the visible step; `None` once completed.
    pub step: Option<usize>,
    pub total_steps: usize,
    pub progress_percent: u8,
    pub title: Option<&'static str>,
    pub subtitle: Option<&'static str>,
    pub can_proceed: bool,
    pub can_go_back: bool,
    /// Which way the last move went: `1` forward, `-1` back.
    pub direction: i8,
    /// Label of the primary button; `None` once completed.
    pub primary_action: Option<&'static str>,
    /// Advisory message from the last failed save.
    pub error: Option<String>,
}

impl WizardView {
    fn build(state: &WizardState, draft: &ProfileDraft, direction: i8) -> Self {
        let step = state.step();
        let progress_percent = match step {
            Some(s) => ((s + 1) * 100 / TOTAL_STEPS) as u8,
            None => 100,
        };
        let info = step.map(|s| &STEPS[s]);
        let primary_action = match state {
            WizardState::Step { index } if *index < FINAL_STEP => Some("Continue"),
            WizardState::Step { .. } | WizardState::Failed { .. } => Some("Reveal My Aura"),
            WizardState::Submitting => Some("Setting up your aura…"),
            WizardState::Completed => None,
        };
        let error = match state {
            WizardState::Failed { reason } => Some(reason.clone()),
            _ => None,
        };

        Self {
            state: state.clone(),
            step,
            total_steps: TOTAL_STEPS,
            progress_percent,
            title: info.map(|i| i.title),
            subtitle: info.map(|i| i.subtitle),
            can_proceed: match step {
                Some(s) if state.is_editable() => can_proceed(s, draft),
                _ => false,
            },
            can_go_back: state.back().is_some(),
            direction,
            primary_action,
            error,
        }
    }
}
