//! Profile draft and persisted profile data models.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{ColorKey, Gender, LookingFor, MAX_AURA_COLORS, MAX_BIO_CHARS, QuestionKey, Trait};

/// The signed-in user driving the wizard, supplied by the auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
}

impl SessionUser {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Result of toggling an aura color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// The color was absent and the selection is already full.
    Ignored,
}

impl ToggleOutcome {
    /// Whether the color is selected after the toggle.
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected)
    }
}

/// Everything collected by the wizard before it is saved.
///
/// Setters never validate; completeness is decided by
/// [`can_proceed`](super::validation::can_proceed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    display_name: String,
    birthday: Option<NaiveDate>,
    gender: Option<Gender>,
    looking_for: Option<LookingFor>,
    bio: String,
    aura_colors: Vec<ColorKey>,
    vibe_answers: BTreeMap<QuestionKey, String>,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    pub fn set_birthday(&mut self, birthday: Option<NaiveDate>) {
        self.birthday = birthday;
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = Some(gender);
    }

    pub fn looking_for(&self) -> Option<LookingFor> {
        self.looking_for
    }

    pub fn set_looking_for(&mut self, looking_for: LookingFor) {
        self.looking_for = Some(looking_for);
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    /// Set the bio, keeping at most [`MAX_BIO_CHARS`] characters.
    pub fn set_bio(&mut self, bio: impl Into<String>) {
        let bio = bio.into();
        self.bio = match bio.char_indices().nth(MAX_BIO_CHARS) {
            Some((cut, _)) => bio[..cut].to_string(),
            None => bio,
        };
    }

    /// Bio length in characters, for the counter next to the text box.
    pub fn bio_len(&self) -> usize {
        self.bio.chars().count()
    }

    /// Selected colors in the order they were picked.
    pub fn aura_colors(&self) -> &[ColorKey] {
        &self.aura_colors
    }

    pub fn is_color_selected(&self, key: ColorKey) -> bool {
        self.aura_colors.contains(&key)
    }

    /// Select `key` if absent and there is room, deselect it if present.
    pub fn toggle_color(&mut self, key: ColorKey) -> ToggleOutcome {
        if let Some(pos) = self.aura_colors.iter().position(|c| *c == key) {
            self.aura_colors.remove(pos);
            ToggleOutcome::Deselected
        } else if self.aura_colors.len() < MAX_AURA_COLORS {
            self.aura_colors.push(key);
            ToggleOutcome::Selected
        } else {
            ToggleOutcome::Ignored
        }
    }

    pub fn vibe_answers(&self) -> &BTreeMap<QuestionKey, String> {
        &self.vibe_answers
    }

    pub fn answer(&self, question: QuestionKey) -> Option<&str> {
        self.vibe_answers.get(&question).map(String::as_str)
    }

    /// Record an answer, replacing any earlier one for the same question.
    pub fn set_answer(&mut self, question: QuestionKey, option: impl Into<String>) {
        self.vibe_answers.insert(question, option.into());
    }
}

/// Field values written to the profile row on finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub looking_for: Option<LookingFor>,
    pub bio: String,
    pub aura_colors: Vec<ColorKey>,
    pub traits: Vec<Trait>,
    pub onboarding_completed: bool,
}

impl ProfileUpdate {
    /// Build the completed-profile update from a draft and its derived traits.
    pub fn completed(draft: &ProfileDraft, traits: Vec<Trait>) -> Self {
        Self {
            display_name: draft.display_name.clone(),
            birthday: draft.birthday,
            gender: draft.gender,
            looking_for: draft.looking_for,
            bio: draft.bio.clone(),
            aura_colors: draft.aura_colors.clone(),
            traits,
            onboarding_completed: true,
        }
    }
}

/// The durable profile record, keyed by user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedProfile {
    pub id: Uuid,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looking_for: Option<LookingFor>,
    pub bio: String,
    pub aura_colors: Vec<ColorKey>,
    pub traits: Vec<Trait>,
    pub onboarding_completed: bool,
    pub updated_at: DateTime<Utc>,
}

/// One stored vibe answer, unique per `(profile_id, question_key)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibeAnswerRecord {
    pub profile_id: Uuid,
    pub question_key: QuestionKey,
    pub answer: String,
}

impl VibeAnswerRecord {
    /// One row per answered question, in question order.
    pub fn rows_for(profile_id: Uuid, draft: &ProfileDraft) -> Vec<Self> {
        draft
            .vibe_answers
            .iter()
            .map(|(question_key, answer)| Self {
                profile_id,
                question_key: *question_key,
                answer: answer.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_is_empty() {
        let d = ProfileDraft::new();
        assert!(d.display_name().is_empty());
        assert!(d.birthday().is_none());
        assert!(d.gender().is_none());
        assert!(d.looking_for().is_none());
        assert!(d.bio().is_empty());
        assert!(d.aura_colors().is_empty());
        assert!(d.vibe_answers().is_empty());
    }

    #[test]
    fn toggle_twice_restores_selection() {
        let mut d = ProfileDraft::new();
        d.toggle_color(ColorKey::Gold);
        let before = d.aura_colors().to_vec();

        assert_eq!(d.toggle_color(ColorKey::Blue), ToggleOutcome::Selected);
        assert_eq!(d.toggle_color(ColorKey::Blue), ToggleOutcome::Deselected);
        assert_eq!(d.aura_colors(), before.as_slice());
    }

    #[test]
    fn fourth_color_is_ignored() {
        let mut d = ProfileDraft::new();
        for key in [ColorKey::Blue, ColorKey::Red, ColorKey::Green] {
            assert!(d.toggle_color(key).is_selected());
        }
        assert_eq!(d.toggle_color(ColorKey::Pink), ToggleOutcome::Ignored);
        assert_eq!(d.aura_colors().len(), 3);
        assert!(!d.is_color_selected(ColorKey::Pink));
    }

    #[test]
    fn full_selection_still_allows_deselect() {
        let mut d = ProfileDraft::new();
        for key in [ColorKey::Blue, ColorKey::Red, ColorKey::Green] {
            d.toggle_color(key);
        }
        assert_eq!(d.toggle_color(ColorKey::Red), ToggleOutcome::Deselected);
        assert_eq!(d.toggle_color(ColorKey::Pink), ToggleOutcome::Selected);
        assert_eq!(
            d.aura_colors(),
            &[ColorKey::Blue, ColorKey::Green, ColorKey::Pink]
        );
    }

    #[test]
    fn set_answer_is_last_write_wins() {
        let mut d = ProfileDraft::new();
        d.set_answer(QuestionKey::Energy, "🏔 Adventure");
        d.set_answer(QuestionKey::Energy, "🛋 Chill at home");
        assert_eq!(d.vibe_answers().len(), 1);
        assert_eq!(d.answer(QuestionKey::Energy), Some("🛋 Chill at home"));
    }

    #[test]
    fn bio_is_clamped_on_char_boundary() {
        let mut d = ProfileDraft::new();
        d.set_bio("é".repeat(MAX_BIO_CHARS + 20));
        assert_eq!(d.bio_len(), MAX_BIO_CHARS);

        d.set_bio("short");
        assert_eq!(d.bio(), "short");
    }

    #[test]
    fn completed_update_copies_draft() {
        let mut d = ProfileDraft::new();
        d.set_display_name("Mara");
        d.set_gender(Gender::Woman);
        d.set_looking_for(LookingFor::Everyone);
        d.set_bio("I collect vinyl records.");
        d.toggle_color(ColorKey::Purple);

        let update = ProfileUpdate::completed(&d, vec![Trait::NightOwl]);
        assert_eq!(update.display_name, "Mara");
        assert_eq!(update.aura_colors, vec![ColorKey::Purple]);
        assert_eq!(update.traits, vec![Trait::NightOwl]);
        assert_eq!(update.gender, Some(Gender::Woman));
        assert!(update.onboarding_completed);
    }

    #[test]
    fn answer_rows_follow_question_order() {
        let mut d = ProfileDraft::new();
        d.set_answer(QuestionKey::Social, "☕ One-on-one");
        d.set_answer(QuestionKey::TimeOfDay, "🌅 Morning person");
        let id = Uuid::new_v4();

        let rows = VibeAnswerRecord::rows_for(id, &d);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question_key, QuestionKey::TimeOfDay);
        assert_eq!(rows[1].question_key, QuestionKey::Social);
        assert!(rows.iter().all(|r| r.profile_id == id));
    }
}
