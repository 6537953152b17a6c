//! Rule-based English lemmatizer.
//!
//! Lookup order for a word in a given category:
//! 1. the category's exception table (irregular forms),
//! 2. the category's detachment rules, which strip an inflectional suffix and
//!    repair the stem (undoubling a final consonant, restoring a silent `e`).
//!
//! Adverbs are returned unchanged unless they appear in the exception table.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::{LemmaPos, Lemmatizer};
use crate::error::{PartisanError, Result};

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"), ("women", "woman"), ("children", "child"), ("feet", "foot"),
    ("teeth", "tooth"), ("geese", "goose"), ("mice", "mouse"), ("oxen", "ox"),
    ("lives", "life"), ("wives", "wife"), ("knives", "knife"), ("leaves", "leaf"),
    ("wolves", "wolf"), ("halves", "half"), ("selves", "self"), ("thieves", "thief"),
    ("shelves", "shelf"), ("criteria", "criterion"), ("phenomena", "phenomenon"),
    ("indices", "index"), ("analyses", "analysis"), ("crises", "crisis"),
    ("theses", "thesis"), ("heroes", "hero"), ("potatoes", "potato"),
    ("tomatoes", "tomato"), ("vetoes", "veto"), ("echoes", "echo"), ("movies", "movie"),
    ("cookies", "cookie"), ("zombies", "zombie"), ("calories", "calorie"),
    ("rookies", "rookie"), ("brownies", "brownie"), ("selfies", "selfie"),
    ("headaches", "headache"), ("aches", "ache"), ("niches", "niche"),
    ("viruses", "virus"), ("bonuses", "bonus"), ("statuses", "status"),
    ("campuses", "campus"), ("buses", "bus"), ("gases", "gas"),
    // already in dictionary form
    ("news", "news"), ("series", "series"), ("species", "species"),
    ("politics", "politics"), ("economics", "economics"), ("physics", "physics"),
    ("ethics", "ethics"), ("texas", "texas"), ("kansas", "kansas"),
    ("arkansas", "arkansas"), ("vegas", "vegas"), ("christmas", "christmas"),
    ("atlas", "atlas"), ("yemen", "yemen"), ("specimen", "specimen"),
    ("abdomen", "abdomen"), ("semen", "semen"),
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("am", "be"), ("are", "be"), ("is", "be"), ("was", "be"), ("were", "be"),
    ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"),
    ("having", "have"), ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"),
    ("went", "go"), ("gone", "go"), ("goes", "go"), ("said", "say"), ("made", "make"),
    ("took", "take"), ("taken", "take"), ("got", "get"), ("gotten", "get"),
    ("came", "come"), ("saw", "see"), ("seen", "see"), ("knew", "know"),
    ("known", "know"), ("gave", "give"), ("given", "give"), ("thought", "think"),
    ("told", "tell"), ("found", "find"), ("left", "leave"), ("felt", "feel"),
    ("brought", "bring"), ("began", "begin"), ("begun", "begin"), ("kept", "keep"),
    ("held", "hold"), ("wrote", "write"), ("written", "write"), ("writing", "write"),
    ("stood", "stand"), ("heard", "hear"), ("meant", "mean"), ("met", "meet"),
    ("ran", "run"), ("paid", "pay"), ("sat", "sit"), ("spoke", "speak"),
    ("spoken", "speak"), ("led", "lead"), ("grew", "grow"), ("grown", "grow"),
    ("lost", "lose"), ("fell", "fall"), ("fallen", "fall"), ("sent", "send"),
    ("built", "build"), ("understood", "understand"), ("won", "win"),
    ("bought", "buy"), ("taught", "teach"), ("caught", "catch"), ("fought", "fight"),
    ("chose", "choose"), ("chosen", "choose"), ("ate", "eat"), ("eaten", "eat"),
    ("drove", "drive"), ("driven", "drive"), ("broke", "break"), ("broken", "break"),
    ("became", "become"), ("sold", "sell"), ("freed", "free"), ("lying", "lie"),
    ("dying", "die"), ("tying", "tie"), ("created", "create"), ("creating", "create"),
    ("invited", "invite"), ("inviting", "invite"), ("united", "unite"),
    ("excited", "excite"), ("exciting", "excite"), ("aches", "ache"),
    ("focused", "focus"), ("focusing", "focus"),
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ("further", "far"), ("farther", "far"), ("furthest", "far"), ("farthest", "far"),
    ("elder", "old"), ("eldest", "old"),
    // end in -er or -est without being comparatives
    ("other", "other"), ("over", "over"), ("under", "under"), ("never", "never"),
    ("ever", "ever"), ("after", "after"), ("former", "former"), ("latter", "latter"),
    ("proper", "proper"), ("clever", "clever"), ("eager", "eager"), ("bitter", "bitter"),
    ("sober", "sober"), ("super", "super"), ("tender", "tender"), ("upper", "upper"),
    ("inner", "inner"), ("outer", "outer"), ("utter", "utter"), ("silver", "silver"),
    ("sheer", "sheer"), ("honest", "honest"), ("modest", "modest"),
    ("earnest", "earnest"),
];

const ADVERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "well"), ("best", "well"), ("further", "far"), ("farther", "far"),
    ("harder", "hard"), ("hardest", "hard"),
];

type ExceptionTable = HashMap<&'static str, &'static str>;

static EXCEPTIONS: LazyLock<HashMap<LemmaPos, ExceptionTable>> = LazyLock::new(|| {
    [
        (LemmaPos::Noun, NOUN_EXCEPTIONS),
        (LemmaPos::Verb, VERB_EXCEPTIONS),
        (LemmaPos::Adjective, ADJECTIVE_EXCEPTIONS),
        (LemmaPos::Adverb, ADVERB_EXCEPTIONS),
    ]
    .into_iter()
    .map(|(pos, entries)| (pos, entries.iter().copied().collect()))
    .collect()
});

/// Exception tables plus suffix detachment rules per category.
#[derive(Debug, Clone, Default)]
pub struct MorphyLemmatizer;

impl MorphyLemmatizer {
    /// Create a new lemmatizer.
    pub fn new() -> Self {
        MorphyLemmatizer
    }

    /// Look `word` up in the exception table for `pos`.
    pub fn exception(&self, word: &str, pos: LemmaPos) -> Option<&'static str> {
        EXCEPTIONS.get(&pos).and_then(|table| table.get(word)).copied()
    }

    fn noun(word: &str) -> String {
        let len = word.len();

        if len >= 5 && word.ends_with("men") {
            return format!("{}man", &word[..len - 3]);
        }
        if len <= 3
            || !word.ends_with('s')
            || word.ends_with("ss")
            || word.ends_with("us")
            || word.ends_with("is")
        {
            return word.to_string();
        }
        if word.ends_with("ies") {
            return if len <= 4 {
                word[..len - 1].to_string()
            } else {
                format!("{}y", &word[..len - 3])
            };
        }
        if ["sses", "xes", "zzes", "ches", "shes"]
            .iter()
            .any(|suffix| word.ends_with(suffix))
        {
            return word[..len - 2].to_string();
        }
        word[..len - 1].to_string()
    }

    fn verb(word: &str) -> String {
        let len = word.len();

        if word.ends_with("ies") && len >= 4 {
            return if len == 4 {
                word[..len - 1].to_string()
            } else {
                format!("{}y", &word[..len - 3])
            };
        }
        if word.ends_with("es") && len >= 4 {
            let stem = &word[..len - 2];
            if ["ss", "x", "zz", "ch", "sh"]
                .iter()
                .any(|suffix| stem.ends_with(suffix))
            {
                return stem.to_string();
            }
            return word[..len - 1].to_string();
        }
        if word.ends_with('s')
            && len >= 3
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return word[..len - 1].to_string();
        }
        if word.ends_with("ied") && len >= 4 {
            return if len == 4 {
                word[..len - 1].to_string()
            } else {
                format!("{}y", &word[..len - 3])
            };
        }
        if word.ends_with("eed") {
            return if len >= 6 && !word.ends_with("ceed") {
                word[..len - 1].to_string()
            } else {
                word.to_string()
            };
        }
        if word.ends_with("ed") && len >= 4 && has_vowel(&word[..len - 2]) {
            return repair_stem(&word[..len - 2]);
        }
        if word.ends_with("ing") && len >= 5 && has_vowel(&word[..len - 3]) {
            return repair_stem(&word[..len - 3]);
        }
        word.to_string()
    }

    fn adjective(word: &str) -> String {
        let len = word.len();

        if word.ends_with("iest") && len > 5 {
            return format!("{}y", &word[..len - 4]);
        }
        if word.ends_with("ier") && len > 4 {
            return format!("{}y", &word[..len - 3]);
        }
        if word.ends_with("est") && len >= 5 && has_vowel(&word[..len - 3]) {
            return repair_stem(&word[..len - 3]);
        }
        if word.ends_with("er") && len >= 4 && has_vowel(&word[..len - 2]) {
            return repair_stem(&word[..len - 2]);
        }
        word.to_string()
    }
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn is_consonant(b: u8) -> bool {
    b.is_ascii_lowercase() && !is_vowel(b)
}

fn has_vowel(s: &str) -> bool {
    s.bytes().any(|b| is_vowel(b) || b == b'y')
}

/// Fix up a stem left behind by removing `-ed`, `-ing`, `-er` or `-est`.
fn repair_stem(stem: &str) -> String {
    let b = stem.as_bytes();
    let n = b.len();

    // stopp -> stop, bigg -> big; ll, ss and zz are kept (call, pass, buzz)
    if n >= 4 && b[n - 1] == b[n - 2] && is_consonant(b[n - 1]) && !matches!(b[n - 1], b'l' | b's' | b'z')
    {
        return stem[..n - 1].to_string();
    }
    if needs_silent_e(stem) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn needs_silent_e(stem: &str) -> bool {
    let b = stem.as_bytes();
    let n = b.len();
    if n < 2 {
        return false;
    }

    let last = b[n - 1];
    let prev = b[n - 2];
    let before = if n >= 3 { Some(b[n - 3]) } else { None };
    let consonant_before = before.is_some_and(is_consonant);

    // hop, vot, nam
    if n == 3
        && is_consonant(b[0])
        && is_vowel(b[1])
        && is_consonant(last)
        && !matches!(last, b'w' | b'x' | b'y')
    {
        return true;
    }

    match last {
        b'v' | b'c' => true,
        b'z' => is_vowel(prev),
        b'u' => is_consonant(prev),
        b's' => is_vowel(prev) || matches!(prev, b'r' | b'n' | b'p'),
        b'g' => {
            matches!(prev, b'd' | b'r' | b'l')
                || (matches!(prev, b'a' | b'i' | b'u') && consonant_before)
                || (n >= 5 && (stem.ends_with("hang") || stem.ends_with("rang")))
                || stem.ends_with("eng")
        }
        b't' => (prev == b'a' || prev == b'u') && consonant_before,
        b'l' => {
            (is_consonant(prev) && !matches!(prev, b'l' | b'r'))
                || (prev == b'i' && consonant_before)
        }
        b'd' => matches!(prev, b'a' | b'i' | b'o' | b'u') && consonant_before,
        b'k' | b'm' => matches!(prev, b'a' | b'i' | b'o' | b'u') && consonant_before,
        b'n' => (prev == b'i' || (prev == b'o' && n <= 4)) && consonant_before,
        b'p' => prev == b'a' && consonant_before,
        b'r' => {
            (matches!(prev, b'a' | b'i' | b'u') || (prev == b'o' && n <= 4)) && consonant_before
        }
        _ => false,
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize(&self, word: &str, pos: LemmaPos) -> Result<String> {
        if word.is_empty() {
            return Err(PartisanError::analysis("cannot lemmatize an empty word"));
        }
        if word.chars().any(char::is_whitespace) {
            return Err(PartisanError::analysis(format!(
                "cannot lemmatize '{word}': contains whitespace"
            )));
        }

        let word = word.to_lowercase();
        if let Some(lemma) = self.exception(&word, pos) {
            return Ok(lemma.to_string());
        }

        let lemma = match pos {
            LemmaPos::Noun => Self::noun(&word),
            LemmaPos::Verb => Self::verb(&word),
            LemmaPos::Adjective => Self::adjective(&word),
            LemmaPos::Adverb => word,
        };
        Ok(lemma)
    }

    fn name(&self) -> &'static str {
        "morphy"
    }
}
