//! Keyword grouping and search-intent mix.

use crate::models::{Keyword, KeywordResearchAnalysis, SearchIntent};
use serde::Serialize;

/// Keywords sharing enough words to be targeted together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGroup {
    pub name: String,
    pub keywords: Vec<Keyword>,
    pub total_volume: u64,
    pub average_difficulty: f64,
}

/// Share of common words relative to the longer phrase.
pub fn word_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let words_a: Vec<&str> = a.split(' ').collect();
    let words_b: Vec<&str> = b.split(' ').collect();
    let common = words_a.iter().filter(|w| words_b.contains(w)).count();
    common as f64 / words_a.len().max(words_b.len()) as f64
}

/// Greedy grouping: each ungrouped keyword collects every other ungrouped
/// keyword with similarity above 0.3. Groups are named after the first two
/// words of the keyword that started them.
pub fn group_keywords(keywords: &[Keyword]) -> Vec<KeywordGroup> {
    let mut grouped = vec![false; keywords.len()];
    let mut groups = Vec::new();

    for (i, seed) in keywords.iter().enumerate() {
        if grouped[i] {
            continue;
        }

        let members: Vec<usize> = (0..keywords.len())
            .filter(|&j| !grouped[j] && word_similarity(&seed.keyword, &keywords[j].keyword) > 0.3)
            .collect();
        if members.is_empty() {
            continue;
        }

        let related: Vec<Keyword> = members.iter().map(|&j| keywords[j].clone()).collect();
        for &j in &members {
            grouped[j] = true;
        }

        let total_volume = related.iter().map(|k| k.volume).sum();
        let average_difficulty =
            (related.iter().map(|k| k.difficulty).sum::<f64>() / related.len() as f64).round();

        groups.push(KeywordGroup {
            name: seed.keyword.split(' ').take(2).collect::<Vec<_>>().join(" "),
            keywords: related,
            total_volume,
            average_difficulty,
        });
    }

    groups
}

/// Percentages of transactional, informational and navigational intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntentMix {
    pub transactional: u32,
    pub informational: u32,
    pub navigational: u32,
}

impl Default for IntentMix {
    fn default() -> Self {
        Self {
            transactional: 30,
            informational: 50,
            navigational: 20,
        }
    }
}

/// Intent mix from primary (weight 1) and secondary (weight 0.5) keywords,
/// with commercial counted as transactional.
pub fn intent_mix(research: &KeywordResearchAnalysis) -> IntentMix {
    let mut transactional = 0.0;
    let mut informational = 0.0;
    let mut navigational = 0.0;
    let mut total = 0.0;

    let weighted = research
        .primary_keywords
        .iter()
        .map(|k| (k, 1.0))
        .chain(research.secondary_keywords.iter().map(|k| (k, 0.5)));

    for (keyword, weight) in weighted {
        match keyword.intent {
            SearchIntent::Transactional | SearchIntent::Commercial => transactional += weight,
            SearchIntent::Informational => informational += weight,
            SearchIntent::Navigational => navigational += weight,
        }
        total += weight;
    }

    if total == 0.0 {
        return IntentMix::default();
    }

    let percent = |count: f64| (count / total * 100.0).round() as u32;
    IntentMix {
        transactional: percent(transactional),
        informational: percent(informational),
        navigational: percent(navigational),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(text: &str, volume: u64, difficulty: f64) -> Keyword {
        Keyword::new(text, volume, difficulty, 5.0, SearchIntent::Informational)
    }

    #[test]
    fn test_word_similarity() {
        assert_eq!(word_similarity("Sourdough Bread", "sourdough bread"), 1.0);
        assert_eq!(word_similarity("sourdough bread recipe", "rye bread"), 1.0 / 3.0);
        assert_eq!(word_similarity("croissant", "bagel"), 0.0);
    }

    #[test]
    fn test_group_keywords() {
        let keywords = vec![
            kw("sourdough bread recipe", 1000, 40.0),
            kw("sourdough bread starter", 500, 31.0),
            kw("croissant", 300, 20.0),
            kw("easy sourdough tips for beginners", 200, 10.0),
        ];

        let groups = group_keywords(&keywords);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].name, "sourdough bread");
        assert_eq!(groups[0].keywords.len(), 2);
        assert_eq!(groups[0].total_volume, 1500);
        assert_eq!(groups[0].average_difficulty, 36.0);
        assert_eq!(groups[1].name, "croissant");
        assert_eq!(groups[2].name, "easy sourdough");
    }

    #[test]
    fn test_intent_mix_weights_and_folding() {
        let research = KeywordResearchAnalysis {
            primary_keywords: vec![
                Keyword::new("buy bread", 1, 1.0, 1.0, SearchIntent::Transactional),
                Keyword::new("best bakery", 1, 1.0, 1.0, SearchIntent::Commercial),
                Keyword::new("what is rye", 1, 1.0, 1.0, SearchIntent::Informational),
            ],
            secondary_keywords: vec![Keyword::new("padaria", 1, 1.0, 1.0, SearchIntent::Navigational)],
            ..Default::default()
        };

        // 2 / 3.5, 1 / 3.5, 0.5 / 3.5
        let mix = intent_mix(&research);
        assert_eq!(mix.transactional, 57);
        assert_eq!(mix.informational, 29);
        assert_eq!(mix.navigational, 14);
    }

    #[test]
    fn test_intent_mix_default_without_keywords() {
        assert_eq!(intent_mix(&KeywordResearchAnalysis::default()), IntentMix::default());
    }
}
