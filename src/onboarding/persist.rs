//! PersistenceCoordinator — sequences the two finalization writes.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::PersistError;
use crate::store::ProfileStore;

use super::catalog::Trait;
use super::model::{ProfileDraft, ProfileUpdate, VibeAnswerRecord};

/// Writes a finished draft to the profile store.
///
/// The profile update runs first and marks the profile complete; the answer
/// rows follow. There is no cross-write transaction, so a failure on the
/// answers leaves a completed profile without answers. Retrying is safe
/// because the store replaces answers by `(profile_id, question_key)`.
pub struct PersistenceCoordinator {
    store: Arc<dyn ProfileStore>,
}

impl PersistenceCoordinator {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Persist the draft, its derived traits, and its raw answers.
    pub async fn commit(
        &self,
        profile_id: Uuid,
        draft: &ProfileDraft,
        traits: &[Trait],
    ) -> Result<(), PersistError> {
        let update = ProfileUpdate::completed(draft, traits.to_vec());
        if let Err(e) = self.store.update_profile(profile_id, &update).await {
            tracing::warn!(profile_id = %profile_id, "Profile update failed: {}", e);
            return Err(PersistError::profile(profile_id, e));
        }

        let rows = VibeAnswerRecord::rows_for(profile_id, draft);
        if let Err(e) = self.store.insert_answers(&rows).await {
            tracing::warn!(
                profile_id = %profile_id,
                "Vibe answers failed after profile was marked complete: {}",
                e
            );
            return Err(PersistError::answers(profile_id, e));
        }

        tracing::info!(
            profile_id = %profile_id,
            traits = traits.len(),
            answers = rows.len(),
            "Onboarding profile saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::error::PersistStage;
    use crate::onboarding::catalog::{ColorKey, Gender, LookingFor, QUESTIONS};
    use crate::store::LibSqlBackend;

    fn complete_draft() -> ProfileDraft {
        let mut d = ProfileDraft::new();
        d.set_display_name("Ines");
        d.set_birthday(NaiveDate::from_ymd_opt(1999, 1, 20));
        d.set_gender(Gender::Woman);
        d.set_looking_for(LookingFor::Men);
        d.set_bio("Always planning the next trip.");
        d.toggle_color(ColorKey::Blue);
        for q in &QUESTIONS {
            d.set_answer(q.key, q.options[0]);
        }
        d
    }

    async fn store() -> Arc<LibSqlBackend> {
        Arc::new(LibSqlBackend::new_memory().await.unwrap())
    }

    #[tokio::test]
    async fn commit_writes_profile_and_answers() {
        let db = store().await;
        let id = Uuid::new_v4();
        db.ensure_profile(id).await.unwrap();

        let coordinator = PersistenceCoordinator::new(db.clone());
        coordinator
            .commit(id, &complete_draft(), &[Trait::EarlyRiser])
            .await
            .unwrap();

        let profile = db.get_profile(id).await.unwrap().unwrap();
        assert!(profile.onboarding_completed);
        assert_eq!(profile.display_name, "Ines");
        assert_eq!(profile.traits, vec![Trait::EarlyRiser]);
        assert_eq!(db.list_answers(id).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn missing_profile_fails_at_profile_stage() {
        let db = store().await;
        let id = Uuid::new_v4();

        let coordinator = PersistenceCoordinator::new(db.clone());
        let err = coordinator
            .commit(id, &complete_draft(), &[])
            .await
            .unwrap_err();

        assert_eq!(err.stage, PersistStage::Profile);
        assert!(!err.is_partial());
        assert!(db.list_answers(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recommit_does_not_duplicate_answers() {
        let db = store().await;
        let id = Uuid::new_v4();
        db.ensure_profile(id).await.unwrap();

        let coordinator = PersistenceCoordinator::new(db.clone());
        let draft = complete_draft();
        coordinator.commit(id, &draft, &[]).await.unwrap();
        coordinator.commit(id, &draft, &[]).await.unwrap();

        assert_eq!(db.list_answers(id).await.unwrap().len(), 6);
    }
}
