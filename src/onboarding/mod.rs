//! Onboarding wizard — first-launch profile setup.
//!
//! The user walks through five steps (name and birthday, identity, bio,
//! aura colors, vibe check). Each step is gated on its own fields. Finishing
//! derives personality traits from the vibe answers and saves the profile
//! together with the raw answers.

pub mod catalog;
pub mod entry;
pub mod manager;
pub mod model;
pub mod persist;
pub mod personality;
pub mod state;
pub mod validation;

pub use catalog::{ColorKey, Gender, LookingFor, QuestionKey, Trait};
pub use entry::{EntryRoute, resolve_entry};
pub use manager::{WizardController, WizardView};
pub use model::{PersistedProfile, ProfileDraft, SessionUser, ToggleOutcome, VibeAnswerRecord};
pub use persist::PersistenceCoordinator;
pub use personality::derive_traits;
pub use state::WizardState;
pub use validation::can_proceed;
