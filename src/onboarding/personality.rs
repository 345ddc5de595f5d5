//! Personality trait derivation from vibe-check answers.

use std::collections::BTreeMap;

use super::catalog::{QuestionKey, Trait};

/// Substring rules per question, checked in order. The first match wins.
///
/// `LoveLanguage` has no rules and never contributes a trait.
fn rules(question: QuestionKey) -> &'static [(&'static str, Trait)] {
    match question {
        QuestionKey::TimeOfDay => &[("Morning", Trait::EarlyRiser), ("Night", Trait::NightOwl)],
        QuestionKey::Energy => &[("Adventure", Trait::Adventurous), ("Chill", Trait::Relaxed)],
        QuestionKey::Conversation => &[("Deep", Trait::DeepThinker), ("Light", Trait::FunLoving)],
        QuestionKey::Intention => &[("long-term", Trait::Committed), ("flow", Trait::OpenMinded)],
        QuestionKey::Social => &[
            ("Big", Trait::SocialButterfly),
            ("One-on-one", Trait::IntimateConnector),
        ],
        QuestionKey::LoveLanguage => &[],
    }
}

/// Derive personality traits from vibe answers.
///
/// Questions are visited in their fixed order and each contributes at most
/// one trait. Missing or unrecognised answers contribute nothing.
pub fn derive_traits(answers: &BTreeMap<QuestionKey, String>) -> Vec<Trait> {
    QuestionKey::ALL
        .into_iter()
        .filter_map(|question| {
            let answer = answers.get(&question)?;
            rules(question)
                .iter()
                .find(|(needle, _)| answer.contains(needle))
                .map(|(_, t)| *t)
        })
        .collect()
}
