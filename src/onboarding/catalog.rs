//! Static reference data: aura colors, vibe questions, identity options,
//! step descriptors, and the trait vocabulary.

use serde::{Deserialize, Serialize};

/// Maximum number of aura colors a profile may carry.
pub const MAX_AURA_COLORS: usize = 3;

/// Maximum bio length, in characters.
pub const MAX_BIO_CHARS: usize = 300;

/// Minimum trimmed bio length required to leave the bio step.
pub const MIN_BIO_CHARS: usize = 10;

// ── Aura colors ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorKey {
    Blue,
    Red,
    Green,
    Purple,
    Gold,
    Pink,
}

impl ColorKey {
    /// All colors in display order.
    pub const ALL: [ColorKey; 6] = [
        ColorKey::Blue,
        ColorKey::Red,
        ColorKey::Green,
        ColorKey::Purple,
        ColorKey::Gold,
        ColorKey::Pink,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Gold => "gold",
            Self::Pink => "pink",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Purple => "Purple",
            Self::Gold => "Gold",
            Self::Pink => "Pink",
        }
    }

    /// What the color says about the person who picks it.
    pub fn meaning(&self) -> &'static str {
        match self {
            Self::Blue => "Calm & Thoughtful",
            Self::Red => "Passionate & Bold",
            Self::Green => "Growth & Balance",
            Self::Purple => "Creative & Intuitive",
            Self::Gold => "Confident & Radiant",
            Self::Pink => "Romantic & Warm",
        }
    }

    /// HSL triple in CSS space-separated form.
    pub fn hsl(&self) -> &'static str {
        match self {
            Self::Blue => "220 80% 60%",
            Self::Red => "0 75% 55%",
            Self::Green => "150 60% 45%",
            Self::Purple => "270 70% 55%",
            Self::Gold => "45 90% 55%",
            Self::Pink => "330 80% 60%",
        }
    }
}

impl std::fmt::Display for ColorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for ColorKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorKey::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown aura color: {s}"))
    }
}

// ── Identity ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Woman,
    Man,
    #[serde(rename = "Non-binary")]
    NonBinary,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Woman, Gender::Man, Gender::NonBinary, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Woman => "Woman",
            Self::Man => "Man",
            Self::NonBinary => "Non-binary",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown gender: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookingFor {
    Women,
    Men,
    Everyone,
}

impl LookingFor {
    pub const ALL: [LookingFor; 3] = [LookingFor::Women, LookingFor::Men, LookingFor::Everyone];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Women => "Women",
            Self::Men => "Men",
            Self::Everyone => "Everyone",
        }
    }
}

impl std::fmt::Display for LookingFor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LookingFor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LookingFor::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown preference: {s}"))
    }
}

// ── Vibe questions ──────────────────────────────────────────────────

/// Key of one of the fixed vibe-check questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKey {
    TimeOfDay,
    Energy,
    Conversation,
    Intention,
    Social,
    LoveLanguage,
}

impl QuestionKey {
    /// All questions in the order they are asked.
    pub const ALL: [QuestionKey; 6] = [
        QuestionKey::TimeOfDay,
        QuestionKey::Energy,
        QuestionKey::Conversation,
        QuestionKey::Intention,
        QuestionKey::Social,
        QuestionKey::LoveLanguage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimeOfDay => "time_of_day",
            Self::Energy => "energy",
            Self::Conversation => "conversation",
            Self::Intention => "intention",
            Self::Social => "social",
            Self::LoveLanguage => "love_language",
        }
    }

    pub fn spec(&self) -> &'static QuestionSpec {
        &QUESTIONS[*self as usize]
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuestionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionKey::ALL
            .into_iter()
            .find(|q| q.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown question: {s}"))
    }
}

/// A vibe-check question with its two mutually exclusive options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    pub key: QuestionKey,
    pub prompt: &'static str,
    pub options: [&'static str; 2],
}

pub static QUESTIONS: [QuestionSpec; 6] = [
    QuestionSpec {
        key: QuestionKey::TimeOfDay,
        prompt: "Are you a…",
        options: ["🌅 Morning person", "🌙 Night owl"],
    },
    QuestionSpec {
        key: QuestionKey::Energy,
        prompt: "Your ideal weekend?",
        options: ["🏔 Adventure", "🛋 Chill at home"],
    },
    QuestionSpec {
        key: QuestionKey::Conversation,
        prompt: "You prefer…",
        options: ["💭 Deep talks", "😄 Light laughs"],
    },
    QuestionSpec {
        key: QuestionKey::Intention,
        prompt: "Looking for…",
        options: ["💍 Something long-term", "🌊 Going with the flow"],
    },
    QuestionSpec {
        key: QuestionKey::Social,
        prompt: "Social style?",
        options: ["🎉 Big groups", "☕ One-on-one"],
    },
    QuestionSpec {
        key: QuestionKey::LoveLanguage,
        prompt: "Love language?",
        options: ["🤗 Quality time", "💌 Words of affirmation"],
    },
];

// ── Steps ───────────────────────────────────────────────────────────

/// Number of wizard steps.
pub const TOTAL_STEPS: usize = 5;

/// Index of the final (questionnaire) step.
pub const FINAL_STEP: usize = TOTAL_STEPS - 1;

/// Heading shown for a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub static STEPS: [StepInfo; TOTAL_STEPS] = [
    StepInfo {
        title: "What's your name?",
        subtitle: "And when's your birthday?",
    },
    StepInfo {
        title: "About you",
        subtitle: "How do you identify?",
    },
    StepInfo {
        title: "Your bio",
        subtitle: "Tell people about yourself",
    },
    StepInfo {
        title: "Your aura colors",
        subtitle: "Pick 1–3 that resonate with your energy",
    },
    StepInfo {
        title: "Vibe check ✨",
        subtitle: "Quick questions to find your match energy",
    },
];

// ── Traits ──────────────────────────────────────────────────────────

/// A personality label derived from vibe answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    #[serde(rename = "Early riser")]
    EarlyRiser,
    #[serde(rename = "Night owl")]
    NightOwl,
    #[serde(rename = "Adventurous")]
    Adventurous,
    #[serde(rename = "Relaxed")]
    Relaxed,
    #[serde(rename = "Deep thinker")]
    DeepThinker,
    #[serde(rename = "Fun-loving")]
    FunLoving,
    #[serde(rename = "Committed")]
    Committed,
    #[serde(rename = "Open-minded")]
    OpenMinded,
    #[serde(rename = "Social butterfly")]
    SocialButterfly,
    #[serde(rename = "Intimate connector")]
    IntimateConnector,
}

impl Trait {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EarlyRiser => "Early riser",
            Self::NightOwl => "Night owl",
            Self::Adventurous => "Adventurous",
            Self::Relaxed => "Relaxed",
            Self::DeepThinker => "Deep thinker",
            Self::FunLoving => "Fun-loving",
            Self::Committed => "Committed",
            Self::OpenMinded => "Open-minded",
            Self::SocialButterfly => "Social butterfly",
            Self::IntimateConnector => "Intimate connector",
        }
    }
}

impl std::fmt::Display for Trait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
