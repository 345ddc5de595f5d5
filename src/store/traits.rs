//! `ProfileStore` trait — async interface to the durable record store.
//!
//! Finalization uses exactly two writes: `update_profile` and
//! `insert_answers`. The remaining methods serve the entry gate, the
//! signup collaborator, and tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::onboarding::model::{PersistedProfile, ProfileUpdate, VibeAnswerRecord};

/// Backend-agnostic store for profiles and vibe answers.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn init_schema(&self) -> Result<(), DatabaseError>;

    // ── Profiles ────────────────────────────────────────────────────

    /// Create a blank, not-yet-onboarded profile row if none exists.
    async fn ensure_profile(&self, id: Uuid) -> Result<(), DatabaseError>;

    /// Get a profile by user id.
    async fn get_profile(&self, id: Uuid) -> Result<Option<PersistedProfile>, DatabaseError>;

    /// Overwrite the onboarding fields of an existing profile.
    ///
    /// Fails with `DatabaseError::NotFound` when no row has this id.
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<(), DatabaseError>;

    // ── Vibe answers ────────────────────────────────────────────────

    /// Store answer rows. Rows are keyed on `(profile_id, question_key)`;
    /// an existing row for the same key is replaced, so repeating the call
    /// never duplicates answers. Either every row is written or none is.
    async fn insert_answers(&self, rows: &[VibeAnswerRecord]) -> Result<(), DatabaseError>;

    /// List a profile's answers in question order.
    async fn list_answers(&self, profile_id: Uuid) -> Result<Vec<VibeAnswerRecord>, DatabaseError>;
}
