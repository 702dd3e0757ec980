//! Relation extraction from free text (table-driven verb patterns).

use std::collections::HashMap;

use regex::Regex;

use super::{RelationLabel, Triple};
use crate::error::{Result, TunegraphError};

/// Turns natural-language text into `(subject, relation, object)` triples.
///
/// Subjects and objects must be usable directly as node ids, relations are
/// lowercase verb lemmas.
pub trait RelationExtractor {
    fn extract(&self, text: &str) -> Vec<Triple>;
}

/// Verb phrases recognized out of the box, English and Portuguese.
const DEFAULT_VERBS: &[(&str, &str)] = &[
    ("originates", "originate"),
    ("originated", "originate"),
    ("originate", "originate"),
    ("gave rise to", "originate"),
    ("gives rise to", "originate"),
    ("give rise to", "originate"),
    ("spawned", "originate"),
    ("spawns", "originate"),
    ("spawn", "originate"),
    ("origina", "originate"),
    ("originou", "originate"),
    ("originaram", "originate"),
    ("plays", "play"),
    ("played", "play"),
    ("play", "play"),
    ("toca", "play"),
    ("tocam", "play"),
    ("tocou", "play"),
    ("listens to", "listen"),
    ("listened to", "listen"),
    ("listen to", "listen"),
    ("escuta", "listen"),
    ("escutam", "listen"),
    ("escutou", "listen"),
    ("follows", "follow"),
    ("followed", "follow"),
    ("follow", "follow"),
    ("segue", "follow"),
    ("seguem", "follow"),
    ("seguiu", "follow"),
];

/// Sentence-level pattern extractor.
///
/// Each sentence is cut at its first known verb phrase into a subject part
/// and an object part. Both parts may list several entities separated by
/// commas or `and`; every subject is paired with every object.
pub struct PatternExtractor {
    sentence: Regex,
    statement: Regex,
    auxiliary: Regex,
    conjunction: Regex,
    verbs: HashMap<String, RelationLabel>,
}

impl PatternExtractor {
    /// Extractor with the built-in verb table.
    pub fn new() -> Result<Self> {
        Self::with_verbs(&HashMap::new())
    }

    /// Extractor with the built-in table extended by `extra` (phrase -> label).
    pub fn with_verbs(extra: &HashMap<String, String>) -> Result<Self> {
        let mut verbs: HashMap<String, RelationLabel> = DEFAULT_VERBS
            .iter()
            .map(|(phrase, label)| (phrase.to_string(), RelationLabel::parse(label)))
            .collect();

        for (phrase, label) in extra {
            let phrase = normalize_phrase(phrase);
            if phrase.is_empty() {
                return Err(TunegraphError::Config(format!(
                    "empty verb phrase mapped to '{}'",
                    label
                )));
            }
            let parsed = RelationLabel::parse(label);
            if !parsed.is_recognized() {
                return Err(TunegraphError::Config(format!(
                    "verb phrase '{}' maps to unknown relation '{}'",
                    phrase, label
                )));
            }
            verbs.insert(phrase, parsed);
        }

        // Longest phrase first so "listens to" wins over any shorter prefix.
        let mut phrases: Vec<&String> = verbs.keys().collect();
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = phrases
            .iter()
            .map(|p| {
                p.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");

        let statement = Regex::new(&format!(
            r"(?i)^(?P<subject>.+?)\s+(?P<verb>{})\s+(?P<object>.+)$",
            alternation
        ))?;

        log::debug!("Relation extractor ready with {} verb phrases", verbs.len());

        Ok(Self {
            sentence: Regex::new(r"[.!?;\n]+")?,
            statement,
            auxiliary: Regex::new(r"(?i)^(?:does|do|did)\s+")?,
            conjunction: Regex::new(r"\s*,\s*(?:(?i:and)\s+|e\s+)?|\s+(?i:and)\s+|\s+e\s+")?,
            verbs,
        })
    }

    /// Label a verb phrase maps to, if known.
    pub fn label_for(&self, phrase: &str) -> Option<&RelationLabel> {
        self.verbs.get(&normalize_phrase(phrase))
    }

    fn split_entities(&self, part: &str) -> Vec<String> {
        self.conjunction
            .split(part.trim())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

impl RelationExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Vec<Triple> {
        let mut triples = Vec::new();

        for sentence in self.sentence.split(text) {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }
            let Some(caps) = self.statement.captures(sentence) else {
                log::trace!("No relation in sentence: {}", sentence);
                continue;
            };
            let Some(label) = self.label_for(&caps["verb"]) else {
                continue;
            };

            let subject_part = self.auxiliary.replace(&caps["subject"], "");
            let subjects = self.split_entities(&subject_part);
            let objects = self.split_entities(&caps["object"]);

            for subject in &subjects {
                for object in &objects {
                    triples.push(Triple::new(subject.as_str(), label.as_str(), object.as_str()));
                }
            }
        }

        triples
    }
}

fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<Triple> {
        PatternExtractor::new().unwrap().extract(text)
    }

    #[test]
    fn test_extract_basic() {
        let triples = extract("Ana listens to Metallica.");
        assert_eq!(triples, vec![Triple::new("Ana", "listen", "Metallica")]);
    }

    #[test]
    fn test_extract_multi_word_names() {
        let triples = extract("Iron Maiden plays Heavy Metal");
        assert_eq!(triples, vec![Triple::new("Iron Maiden", "play", "Heavy Metal")]);
    }

    #[test]
    fn test_extract_multiple_sentences() {
        let text = "Blues gave rise to Rock. Ana follows Bia!\nBia listened to Queen";
        let triples = extract(text);
        assert_eq!(
            triples,
            vec![
                Triple::new("Blues", "originate", "Rock"),
                Triple::new("Ana", "follow", "Bia"),
                Triple::new("Bia", "listen", "Queen"),
            ]
        );
    }

    #[test]
    fn test_extract_cross_product() {
        let triples = extract("Ana and Bia listen to Queen, Rush and Yes");
        assert_eq!(triples.len(), 6);
        assert_eq!(triples[0], Triple::new("Ana", "listen", "Queen"));
        assert_eq!(triples[2], Triple::new("Ana", "listen", "Yes"));
        assert_eq!(triples[5], Triple::new("Bia", "listen", "Yes"));
    }

    #[test]
    fn test_extract_oxford_comma() {
        let triples = extract("Ana follows Bia, Caio, and Duda");
        let objects: Vec<_> = triples.iter().map(|t| t.object.as_str()).collect();
        assert_eq!(objects, vec!["Bia", "Caio", "Duda"]);
    }

    #[test]
    fn test_extract_question_auxiliary_dropped() {
        let triples = extract("Does Ana listen to Metallica?");
        assert_eq!(triples, vec![Triple::new("Ana", "listen", "Metallica")]);
    }

    #[test]
    fn test_extract_portuguese() {
        let triples = extract("Cartola toca Samba. O Blues originou o Rock");
        assert_eq!(
            triples,
            vec![
                Triple::new("Cartola", "play", "Samba"),
                Triple::new("O Blues", "originate", "o Rock"),
            ]
        );
    }

    #[test]
    fn test_extract_case_insensitive_verb() {
        let triples = extract("Ana FOLLOWS Bia");
        assert_eq!(triples, vec![Triple::new("Ana", "follow", "Bia")]);
    }

    #[test]
    fn test_extract_no_matches() {
        assert!(extract("No relations here, just text.").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_extra_verbs_from_config() {
        let mut extra = HashMap::new();
        extra.insert("Is A Fan Of".to_string(), "listen".to_string());
        let extractor = PatternExtractor::with_verbs(&extra).unwrap();
        assert_eq!(extractor.label_for("is a fan of"), Some(&RelationLabel::Listen));
        let triples = extractor.extract("Ana is a fan of Queen");
        assert_eq!(triples, vec![Triple::new("Ana", "listen", "Queen")]);
    }

    #[test]
    fn test_extra_verb_with_unknown_label_rejected() {
        let mut extra = HashMap::new();
        extra.insert("admires".to_string(), "admire".to_string());
        let result = PatternExtractor::with_verbs(&extra);
        assert!(matches!(result, Err(TunegraphError::Config(_))));
    }

    #[test]
    fn test_extra_verb_empty_phrase_rejected() {
        let mut extra = HashMap::new();
        extra.insert("   ".to_string(), "play".to_string());
        assert!(PatternExtractor::with_verbs(&extra).is_err());
    }
}
