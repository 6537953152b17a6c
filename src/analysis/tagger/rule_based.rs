//! Lexicon and suffix rule tagger.
//!
//! Tagging happens in three passes:
//! 1. closed-class words and frequent irregular forms come from a lexicon,
//! 2. unknown words are guessed from their shape and suffix,
//! 3. a noun guess right after `to`, a modal or a subject pronoun is
//!    re-tagged as a verb.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::{PosTagger, TaggedToken};
use crate::error::Result;

const LEXICON_ENTRIES: &[(&str, &str)] = &[
    // determiners
    ("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("that", "DT"),
    ("these", "DT"), ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"),
    ("any", "DT"), ("no", "DT"), ("all", "DT"), ("both", "DT"), ("another", "DT"),
    ("either", "DT"), ("neither", "DT"),
    // prepositions and subordinating conjunctions
    ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"), ("for", "IN"),
    ("with", "IN"), ("about", "IN"), ("against", "IN"), ("between", "IN"), ("into", "IN"),
    ("through", "IN"), ("during", "IN"), ("before", "IN"), ("after", "IN"), ("above", "IN"),
    ("below", "IN"), ("from", "IN"), ("up", "IN"), ("down", "IN"), ("out", "IN"),
    ("off", "IN"), ("over", "IN"), ("under", "IN"), ("since", "IN"), ("until", "IN"),
    ("upon", "IN"), ("within", "IN"), ("without", "IN"), ("among", "IN"), ("across", "IN"),
    ("behind", "IN"), ("beyond", "IN"), ("toward", "IN"), ("towards", "IN"),
    ("around", "IN"), ("near", "IN"), ("via", "IN"), ("per", "IN"), ("than", "IN"),
    ("because", "IN"), ("while", "IN"), ("although", "IN"), ("though", "IN"),
    ("unless", "IN"), ("whether", "IN"), ("if", "IN"), ("as", "IN"), ("like", "IN"),
    ("to", "TO"),
    // coordinating conjunctions
    ("and", "CC"), ("but", "CC"), ("or", "CC"), ("nor", "CC"), ("yet", "CC"), ("plus", "CC"),
    // pronouns
    ("i", "PRP"), ("me", "PRP"), ("you", "PRP"), ("he", "PRP"), ("him", "PRP"),
    ("she", "PRP"), ("her", "PRP"), ("it", "PRP"), ("we", "PRP"), ("us", "PRP"),
    ("they", "PRP"), ("them", "PRP"), ("myself", "PRP"), ("yourself", "PRP"),
    ("himself", "PRP"), ("herself", "PRP"), ("itself", "PRP"), ("ourselves", "PRP"),
    ("themselves", "PRP"), ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"),
    ("its", "PRP$"), ("our", "PRP$"), ("their", "PRP$"),
    // wh-words and existential there
    ("who", "WP"), ("whom", "WP"), ("what", "WP"), ("whose", "WP$"), ("which", "WDT"),
    ("whatever", "WDT"), ("when", "WRB"), ("where", "WRB"), ("why", "WRB"), ("how", "WRB"),
    ("there", "EX"),
    // modals
    ("will", "MD"), ("would", "MD"), ("can", "MD"), ("could", "MD"), ("shall", "MD"),
    ("should", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"),
    // auxiliaries
    ("be", "VB"), ("am", "VBP"), ("is", "VBZ"), ("are", "VBP"), ("was", "VBD"),
    ("were", "VBD"), ("been", "VBN"), ("being", "VBG"), ("have", "VBP"), ("has", "VBZ"),
    ("had", "VBD"), ("having", "VBG"), ("do", "VBP"), ("does", "VBZ"), ("did", "VBD"),
    ("done", "VBN"), ("doing", "VBG"),
    // adverbs
    ("not", "RB"), ("never", "RB"), ("very", "RB"), ("also", "RB"), ("just", "RB"),
    ("now", "RB"), ("then", "RB"), ("here", "RB"), ("too", "RB"), ("so", "RB"),
    ("again", "RB"), ("always", "RB"), ("often", "RB"), ("still", "RB"),
    ("already", "RB"), ("soon", "RB"), ("even", "RB"), ("only", "RB"), ("really", "RB"),
    ("ever", "RB"), ("quite", "RB"), ("rather", "RB"), ("almost", "RB"), ("away", "RB"),
    ("back", "RB"), ("together", "RB"), ("yesterday", "RB"), ("today", "NN"),
    ("tomorrow", "NN"), ("tonight", "NN"),
    // adjectives
    ("good", "JJ"), ("great", "JJ"), ("bad", "JJ"), ("better", "JJR"), ("best", "JJS"),
    ("worse", "JJR"), ("worst", "JJS"), ("new", "JJ"), ("old", "JJ"), ("big", "JJ"),
    ("small", "JJ"), ("high", "JJ"), ("low", "JJ"), ("long", "JJ"), ("many", "JJ"),
    ("much", "JJ"), ("more", "JJR"), ("most", "JJS"), ("other", "JJ"), ("same", "JJ"),
    ("own", "JJ"), ("last", "JJ"), ("first", "JJ"), ("next", "JJ"), ("few", "JJ"),
    ("whole", "JJ"), ("real", "JJ"), ("true", "JJ"), ("false", "JJ"), ("sure", "JJ"),
    ("free", "JJ"), ("able", "JJ"), ("honest", "JJ"), ("latest", "JJS"),
    // interjections
    ("yes", "UH"), ("oh", "UH"), ("wow", "UH"), ("hey", "UH"), ("thanks", "NNS"),
    // irregular past forms
    ("went", "VBD"), ("gone", "VBN"), ("said", "VBD"), ("made", "VBD"), ("took", "VBD"),
    ("taken", "VBN"), ("got", "VBD"), ("gotten", "VBN"), ("came", "VBD"), ("saw", "VBD"),
    ("seen", "VBN"), ("knew", "VBD"), ("known", "VBN"), ("gave", "VBD"), ("given", "VBN"),
    ("thought", "VBD"), ("told", "VBD"), ("found", "VBD"), ("left", "VBD"), ("felt", "VBD"),
    ("brought", "VBD"), ("began", "VBD"), ("begun", "VBN"), ("kept", "VBD"),
    ("held", "VBD"), ("wrote", "VBD"), ("written", "VBN"), ("stood", "VBD"),
    ("heard", "VBD"), ("meant", "VBD"), ("met", "VBD"), ("ran", "VBD"), ("paid", "VBD"),
    ("sat", "VBD"), ("spoke", "VBD"), ("spoken", "VBN"), ("led", "VBD"), ("grew", "VBD"),
    ("grown", "VBN"), ("lost", "VBD"), ("fell", "VBD"), ("fallen", "VBN"), ("sent", "VBD"),
    ("built", "VBD"), ("understood", "VBD"), ("won", "VBD"), ("bought", "VBD"),
    ("taught", "VBD"), ("caught", "VBD"), ("fought", "VBD"), ("chose", "VBD"),
    ("chosen", "VBN"), ("ate", "VBD"), ("eaten", "VBN"), ("drove", "VBD"),
    ("driven", "VBN"), ("broke", "VBD"), ("broken", "VBN"), ("became", "VBD"),
    ("sold", "VBD"), ("agreed", "VBD"), ("freed", "VBD"),
    // words whose suffix would mislead the guesser
    ("thing", "NN"), ("nothing", "NN"), ("something", "NN"), ("everything", "NN"),
    ("anything", "NN"), ("morning", "NN"), ("evening", "NN"), ("building", "NN"),
    ("meeting", "NN"), ("wedding", "NN"), ("ceiling", "NN"), ("need", "VB"),
    ("family", "NN"), ("reply", "NN"), ("apply", "VB"), ("supply", "NN"), ("ally", "NN"),
    ("rally", "NN"), ("july", "NNP"), ("italy", "NNP"), ("news", "NN"), ("series", "NN"),
    ("species", "NN"), ("interest", "NN"), ("protest", "NN"), ("request", "NN"),
    ("contest", "NN"), ("forest", "NN"), ("west", "NN"), ("suggest", "VB"),
    ("arrest", "NN"), ("invest", "VB"), ("test", "NN"), ("rest", "NN"),
];

static LEXICON: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| LEXICON_ENTRIES.iter().copied().collect());

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "less", "ish", "ic", "al",
];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

/// Deterministic tagger backed by a lexicon and suffix rules.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedTagger;

impl RuleBasedTagger {
    /// Create a new rule-based tagger.
    pub fn new() -> Self {
        RuleBasedTagger
    }

    /// Tag a single word without looking at its neighbours.
    pub fn tag_word(&self, word: &str) -> &'static str {
        let lower = word.to_lowercase();
        match LEXICON.get(lower.as_str()) {
            Some(tag) => *tag,
            None => Self::guess(&lower),
        }
    }

    fn guess(word: &str) -> &'static str {
        let len = word.chars().count();

        if word.chars().all(char::is_numeric) {
            return "CD";
        }
        if !word.chars().any(char::is_alphabetic) {
            return "SYM";
        }
        if len >= 5 && word.ends_with("ing") && has_vowel(&word[..word.len() - 3]) {
            return "VBG";
        }
        if len >= 4
            && word.ends_with("ed")
            && !word.ends_with("eed")
            && has_vowel(&word[..word.len() - 2])
        {
            return "VBD";
        }
        if len >= 4 && word.ends_with("ly") {
            return "RB";
        }
        if len >= 6 && word.ends_with("est") {
            return "JJS";
        }
        if len >= 5 && ADJECTIVE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
            return "JJ";
        }
        if len >= 4
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return "NNS";
        }
        "NN"
    }

    /// Re-tag a guessed noun that follows a verb trigger.
    fn contextual(previous: &TaggedToken, current: &'static str) -> &'static str {
        let after_subject = previous.tag == "PRP"
            && SUBJECT_PRONOUNS.contains(&previous.word.to_lowercase().as_str());
        let after_infinitive = previous.tag == "TO" || previous.tag == "MD";

        match current {
            "NN" if after_infinitive => "VB",
            "NN" if after_subject => "VBP",
            "NNS" if after_subject => "VBZ",
            _ => current,
        }
    }
}

fn has_vowel(s: &str) -> bool {
    s.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y'))
}

impl PosTagger for RuleBasedTagger {
    fn tag(&self, words: &[String]) -> Result<Vec<TaggedToken>> {
        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(words.len());

        for word in words {
            let lower = word.to_lowercase();
            let tag = match LEXICON.get(lower.as_str()) {
                Some(tag) => *tag,
                None => {
                    let guessed = Self::guess(&lower);
                    match tagged.last() {
                        Some(previous) => Self::contextual(previous, guessed),
                        None => guessed,
                    }
                }
            };
            tagged.push(TaggedToken::new(word.clone(), tag));
        }

        Ok(tagged)
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(words: &[&str]) -> Vec<String> {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        RuleBasedTagger::new()
            .tag(&words)
            .unwrap()
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn test_lexicon_tags() {
        assert_eq!(
            tags(&["the", "of", "and", "they", "will", "was", "went"]),
            vec!["DT", "IN", "CC", "PRP", "MD", "VBD", "VBD"]
        );
    }

    #[test]
    fn test_suffix_guesses() {
        let tagger = RuleBasedTagger::new();
        assert_eq!(tagger.tag_word("running"), "VBG");
        assert_eq!(tagger.tag_word("voted"), "VBD");
        assert_eq!(tagger.tag_word("quickly"), "RB");
        assert_eq!(tagger.tag_word("famous"), "JJ");
        assert_eq!(tagger.tag_word("strongest"), "JJS");
        assert_eq!(tagger.tag_word("voters"), "NNS");
        assert_eq!(tagger.tag_word("class"), "NN");
        assert_eq!(tagger.tag_word("2016"), "CD");
        assert_eq!(tagger.tag_word("🇺🇸"), "SYM");
        assert_eq!(tagger.tag_word("plan"), "NN");
    }

    #[test]
    fn test_short_words_not_guessed_as_verbs() {
        let tagger = RuleBasedTagger::new();
        assert_eq!(tagger.tag_word("thing"), "NN");
        assert_eq!(tagger.tag_word("bring"), "NN");
        assert_eq!(tagger.tag_word("red"), "NN");
    }

    #[test]
    fn test_context_after_to_and_pronoun() {
        assert_eq!(tags(&["to", "vote"]), vec!["TO", "VB"]);
        assert_eq!(tags(&["we", "win"]), vec!["PRP", "VBP"]);
        assert_eq!(tags(&["he", "wants"]), vec!["PRP", "VBZ"]);
        assert_eq!(tags(&["with", "vote"]), vec!["IN", "NN"]);
    }

    #[test]
    fn test_one_tag_per_word() {
        let words: Vec<String> = "make america great again"
            .split(' ')
            .map(String::from)
            .collect();
        let tagged = RuleBasedTagger::new().tag(&words).unwrap();
        assert_eq!(tagged.len(), words.len());
        for (tagged, word) in tagged.iter().zip(&words) {
            assert_eq!(&tagged.word, word);
        }
    }
}
