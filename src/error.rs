//! Error types for the onboarding flow.

use uuid::Uuid;

use crate::onboarding::state::WizardState;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Persist error: {0}")]
    Persist(#[from] PersistError),

    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Which of the two finalization writes failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStage {
    /// The profile update. Nothing was written.
    Profile,
    /// The answer rows. The profile is already marked complete.
    Answers,
}

impl std::fmt::Display for PersistStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profile => write!(f, "profile"),
            Self::Answers => write!(f, "answers"),
        }
    }
}

/// Finalization failure, tagged with the write that failed.
#[derive(Debug, thiserror::Error)]
#[error("Saving {stage} for {profile_id} failed: {source}")]
pub struct PersistError {
    pub stage: PersistStage,
    pub profile_id: Uuid,
    #[source]
    pub source: DatabaseError,
}

impl PersistError {
    pub fn profile(profile_id: Uuid, source: DatabaseError) -> Self {
        Self {
            stage: PersistStage::Profile,
            profile_id,
            source,
        }
    }

    pub fn answers(profile_id: Uuid, source: DatabaseError) -> Self {
        Self {
            stage: PersistStage::Answers,
            profile_id,
            source,
        }
    }

    /// True when the profile row was already marked complete.
    pub fn is_partial(&self) -> bool {
        self.stage == PersistStage::Answers
    }
}

/// A wizard action that the current state does not allow.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Step {step} is incomplete")]
    Blocked { step: usize },

    #[error("Cannot {action} from {state}")]
    NotAllowed {
        action: &'static str,
        state: WizardState,
    },

    #[error("Finalization failed: {0}")]
    Persist(#[from] PersistError),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
