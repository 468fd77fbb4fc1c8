//! Keyword lexicon: the mood classifier and the coping-tip tables.
//!
//! Classification is a plain dictionary lookup. The lowercased input is
//! tested for substring containment against each keyword group in priority
//! order, and the first group with a hit wins. Confidence reflects only
//! whether a keyword was found, not how certain the match is.
//!
//! `excited` and `stressed` have no keyword group, so [`classify`] never
//! produces them. They still get tips through the neutral fallback.

use crate::model::{MoodAnalysis, MoodLabel};

/// Confidence reported when a keyword group matched.
pub const MATCH_CONFIDENCE: f64 = 0.8;

/// Confidence reported for the `neutral` fallback.
pub const FALLBACK_CONFIDENCE: f64 = 0.6;

/// Keywords and tips for one classifiable label.
#[derive(Debug)]
pub struct LexiconGroup {
    pub label: MoodLabel,
    pub keywords: &'static [&'static str],
    pub tips: &'static [&'static str],
}

/// Keyword groups in match priority order.
pub static LEXICON: [LexiconGroup; 5] = [
    LexiconGroup {
        label: MoodLabel::Happy,
        keywords: &[
            "happy",
            "joy",
            "excited",
            "great",
            "amazing",
            "wonderful",
            "fantastic",
            "good",
            "love",
            "awesome",
        ],
        tips: &[
            "Keep nurturing the positive energy you're feeling today!",
            "Consider sharing your joy with someone you care about.",
            "Take a moment to appreciate what's bringing you happiness.",
        ],
    },
    LexiconGroup {
        label: MoodLabel::Sad,
        keywords: &[
            "sad", "depressed", "down", "upset", "crying", "hurt", "lonely", "empty", "hopeless",
        ],
        tips: &[
            "It's okay to feel sad - allow yourself to process these emotions.",
            "Consider reaching out to a friend or loved one for support.",
            "Try gentle activities like listening to music or taking a warm bath.",
        ],
    },
    LexiconGroup {
        label: MoodLabel::Anxious,
        keywords: &[
            "anxious",
            "worried",
            "nervous",
            "scared",
            "panic",
            "stress",
            "overwhelmed",
            "fear",
        ],
        tips: &[
            "Practice deep breathing: inhale for 4 counts, hold for 4, exhale for 6.",
            "Ground yourself by naming 5 things you can see, 4 you can touch, 3 you can hear.",
            "Remember that anxiety is temporary and you have overcome challenges before.",
        ],
    },
    LexiconGroup {
        label: MoodLabel::Calm,
        keywords: &[
            "calm", "peaceful", "relaxed", "serene", "tranquil", "content", "balanced",
        ],
        tips: &[
            "Enjoy this peaceful moment and try to remember what brought you here.",
            "Consider practicing gratitude for the tranquility you're experiencing.",
            "This is a great time for reflection or creative activities.",
        ],
    },
    LexiconGroup {
        label: MoodLabel::Angry,
        keywords: &[
            "angry",
            "mad",
            "furious",
            "irritated",
            "frustrated",
            "annoyed",
            "rage",
        ],
        tips: &[
            "Take some deep breaths and give yourself space to cool down.",
            "Try physical exercise or movement to help release the tension.",
            "Consider what triggered this feeling and how you might address it constructively.",
        ],
    },
];

/// Tips for `neutral`, and for any label without its own list.
pub static NEUTRAL_TIPS: &[&str] = &[
    "Take some time to check in with yourself and your needs.",
    "Consider trying a new activity or reaching out to someone you care about.",
    "Remember that neutral feelings are valid too - you don't always need to feel \"up\".",
];

/// Classify free text into a mood label, confidence and tips.
///
/// Total over all input: text with no keyword hit is `neutral`. Callers are
/// expected to reject blank text before getting here.
pub fn classify(text: &str) -> MoodAnalysis {
    let lowered = text.to_lowercase();

    let matched = LEXICON
        .iter()
        .find(|group| group.keywords.iter().any(|kw| lowered.contains(kw)));

    let (mood, confidence) = match matched {
        Some(group) => (group.label, MATCH_CONFIDENCE),
        None => (MoodLabel::Neutral, FALLBACK_CONFIDENCE),
    };

    MoodAnalysis {
        mood,
        confidence,
        tips: tips_for(mood).iter().map(|t| t.to_string()).collect(),
    }
}

/// The fixed, ordered tip list for a label.
pub fn tips_for(mood: MoodLabel) -> &'static [&'static str] {
    LEXICON
        .iter()
        .find(|group| group.label == mood)
        .map(|group| group.tips)
        .unwrap_or(NEUTRAL_TIPS)
}

/// Display cursor over a non-empty tip list.
///
/// Whatever drives the rotation (a timer, a keypress) calls
/// [`TipCycle::advance`]; this type only owns the index arithmetic.
#[derive(Debug, Clone)]
pub struct TipCycle {
    tips: Vec<String>,
    index: usize,
}

impl TipCycle {
    /// Returns `None` for an empty list.
    pub fn new(tips: Vec<String>) -> Option<Self> {
        if tips.is_empty() {
            return None;
        }
        Some(Self { tips, index: 0 })
    }

    pub fn current(&self) -> &str {
        &self.tips[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next tip, wrapping to the first after the last.
    pub fn advance(&mut self) -> &str {
        self.index = (self.index + 1) % self.tips.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_keyword() {
        let analysis = classify("Today was a wonderful day");
        assert_eq!(analysis.mood, MoodLabel::Happy);
        assert_eq!(analysis.confidence, MATCH_CONFIDENCE);
        assert_eq!(analysis.tips.len(), 3);
    }

    #[test]
    fn test_anxious_presentation_scenario() {
        let analysis = classify("I'm anxious about an upcoming presentation");

        assert_eq!(analysis.mood, MoodLabel::Anxious);
        assert_eq!(analysis.confidence, 0.8);
        assert_eq!(
            analysis.tips,
            vec![
                "Practice deep breathing: inhale for 4 counts, hold for 4, exhale for 6.",
                "Ground yourself by naming 5 things you can see, 4 you can touch, 3 you can hear.",
                "Remember that anxiety is temporary and you have overcome challenges before.",
            ]
        );
    }

    #[test]
    fn test_no_keyword_is_neutral() {
        let analysis = classify("blorp zrx qqq");

        assert_eq!(analysis.mood, MoodLabel::Neutral);
        assert_eq!(analysis.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(analysis.tips, NEUTRAL_TIPS);
    }

    #[test]
    fn test_matching_ignores_case() {
        assert_eq!(classify("FURIOUS right now").mood, MoodLabel::Angry);
    }

    #[test]
    fn test_priority_order() {
        // happy beats sad
        assert_eq!(classify("sad but also happy").mood, MoodLabel::Happy);
        // sad beats anxious
        assert_eq!(classify("lonely and worried").mood, MoodLabel::Sad);
        // anxious beats calm
        assert_eq!(classify("nervous yet calm").mood, MoodLabel::Anxious);
        // calm beats angry
        assert_eq!(classify("relaxed, no longer mad").mood, MoodLabel::Calm);
    }

    #[test]
    fn test_substring_containment() {
        // "stressful" contains "stress"
        assert_eq!(classify("so much stressful work").mood, MoodLabel::Anxious);
        // "goodbye" contains "good"
        assert_eq!(classify("said goodbye").mood, MoodLabel::Happy);
    }

    #[test]
    fn test_excited_text_lands_in_happy() {
        // "excited" is a happy-group keyword, never its own label
        assert_eq!(
            classify("I'm excited about new opportunities ahead").mood,
            MoodLabel::Happy
        );
    }

    #[test]
    fn test_every_label_has_three_tips() {
        for label in MoodLabel::ALL {
            assert_eq!(tips_for(label).len(), 3, "{label}");
        }
    }

    #[test]
    fn test_labels_without_group_fall_back_to_neutral_tips() {
        assert_eq!(tips_for(MoodLabel::Excited), NEUTRAL_TIPS);
        assert_eq!(tips_for(MoodLabel::Stressed), NEUTRAL_TIPS);
        assert_eq!(tips_for(MoodLabel::Neutral), NEUTRAL_TIPS);
    }

    #[test]
    fn test_keyword_groups_are_disjoint() {
        for (i, a) in LEXICON.iter().enumerate() {
            for b in LEXICON.iter().skip(i + 1) {
                for kw in a.keywords {
                    assert!(!b.keywords.contains(kw), "{kw} in {} and {}", a.label, b.label);
                }
            }
        }
    }

    #[test]
    fn test_tip_cycle_wraps() {
        let mut cycle = TipCycle::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();

        assert_eq!(cycle.current(), "a");
        assert_eq!(cycle.advance(), "b");
        assert_eq!(cycle.advance(), "c");
        assert_eq!(cycle.advance(), "a");
        assert_eq!(cycle.index(), 0);
    }

    #[test]
    fn test_tip_cycle_rejects_empty() {
        assert!(TipCycle::new(vec![]).is_none());
    }
}
