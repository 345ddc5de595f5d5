//! Per-step completeness gates.

use super::catalog::{MIN_BIO_CHARS, QuestionKey};
use super::model::ProfileDraft;

/// Whether the draft holds enough data to leave `step`.
///
/// Advisory only: a failing gate disables forward navigation and never
/// produces an error. Unknown steps never pass.
pub fn can_proceed(step: usize, draft: &ProfileDraft) -> bool {
    match step {
        0 => !draft.display_name().trim().is_empty() && draft.birthday().is_some(),
        1 => draft.gender().is_some() && draft.looking_for().is_some(),
        2 => draft.bio().trim().chars().count() >= MIN_BIO_CHARS,
        3 => !draft.aura_colors().is_empty(),
        4 => QuestionKey::ALL
            .iter()
            .all(|q| draft.vibe_answers().contains_key(q)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::onboarding::catalog::{ColorKey, Gender, LookingFor, QUESTIONS};

    #[test]
    fn empty_draft_blocks_every_step() {
        let d = ProfileDraft::new();
        for step in 0..5 {
            assert!(!can_proceed(step, &d), "step {step} should be blocked");
        }
    }

    #[test]
    fn out_of_range_step_never_passes() {
        assert!(!can_proceed(5, &ProfileDraft::new()));
        assert!(!can_proceed(usize::MAX, &ProfileDraft::new()));
    }

    #[test]
    fn name_step_needs_trimmed_name_and_birthday() {
        let mut d = ProfileDraft::new();
        d.set_display_name("   ");
        d.set_birthday(NaiveDate::from_ymd_opt(1996, 4, 2));
        assert!(!can_proceed(0, &d));

        d.set_display_name(" Jo ");
        assert!(can_proceed(0, &d));

        d.set_birthday(None);
        assert!(!can_proceed(0, &d));
    }

    #[test]
    fn identity_step_needs_both_choices() {
        let mut d = ProfileDraft::new();
        d.set_gender(Gender::Other);
        assert!(!can_proceed(1, &d));
        d.set_looking_for(LookingFor::Men);
        assert!(can_proceed(1, &d));
    }

    #[test]
    fn bio_threshold_is_ten_characters() {
        let mut d = ProfileDraft::new();
        d.set_bio("123456789");
        assert!(!can_proceed(2, &d));
        d.set_bio("1234567890");
        assert!(can_proceed(2, &d));
    }

    #[test]
    fn bio_threshold_ignores_surrounding_whitespace() {
        let mut d = ProfileDraft::new();
        d.set_bio("    123456789     ");
        assert!(!can_proceed(2, &d));
    }

    #[test]
    fn color_step_needs_one_color() {
        let mut d = ProfileDraft::new();
        d.toggle_color(ColorKey::Red);
        assert!(can_proceed(3, &d));
        d.toggle_color(ColorKey::Red);
        assert!(!can_proceed(3, &d));
    }

    #[test]
    fn vibe_step_needs_every_answer() {
        let mut d = ProfileDraft::new();
        for (i, q) in QUESTIONS.iter().enumerate() {
            assert!(!can_proceed(4, &d), "blocked with {i} answers");
            d.set_answer(q.key, q.options[0]);
        }
        assert!(can_proceed(4, &d));
    }
}
