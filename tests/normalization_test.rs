//! Integration tests for post normalization and corpus processing

use std::sync::Arc;

use partisan::analysis::lemmatizer::{LemmaPos, Lemmatizer};
use partisan::dataset::processor::process_all;
use partisan::dataset::{SCREEN_NAME_FIELD, TEXT_FIELD};
use partisan::prelude::*;

fn normalizer() -> TextNormalizer {
    TextNormalizer::english().unwrap()
}

#[test]
fn test_normalization_is_deterministic() -> Result<()> {
    let normalizer = normalizer();
    let posts = [
        "Voters were running to the polls!",
        "We'll make America's economy GREAT again https://t.co/xyz",
        "   ",
        "#MAGA @GOP 2020!!!",
        "Crowds are bigger than ever, the best numbers in years",
    ];

    for post in posts {
        assert_eq!(normalizer.normalize(post)?, normalizer.normalize(post)?);
        // A second normalizer with the same configuration agrees too.
        assert_eq!(normalizer.normalize(post)?, TextNormalizer::english()?.normalize(post)?);
    }
    Ok(())
}

#[test]
fn test_urls_are_removed() -> Result<()> {
    let tokens = normalizer().normalize("check http://example.com/x now")?;
    assert!(!tokens.is_empty());
    assert!(tokens.iter().all(|token| !token.contains("http")));
    assert!(tokens.iter().all(|token| !token.contains("example")));
    Ok(())
}

#[test]
fn test_possessive_is_stripped() -> Result<()> {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("Obama's plan")?,
        normalizer.normalize("Obama plan")?
    );
    Ok(())
}

#[test]
fn test_hyphen_splits_words() -> Result<()> {
    let tokens = normalizer().normalize("well-known")?;
    assert_eq!(tokens.len(), 2);
    Ok(())
}

#[test]
fn test_unicode_punctuation_does_not_stick_to_words() -> Result<()> {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("\u{201c}Fake news\u{201d} said")?,
        normalizer.normalize("Fake news said")?
    );
    assert_eq!(
        normalizer.normalize("\u{201c}Fake news\u{201d} \u{2014} said the president\u{2026}")?,
        normalizer.normalize("Fake news said the president")?
    );
    Ok(())
}

#[test]
fn test_case_folding() -> Result<()> {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize("GREAT")?, normalizer.normalize("great")?);
    assert_eq!(
        normalizer.normalize("The SENATE Votes")?,
        normalizer.normalize("the senate votes")?
    );
    Ok(())
}

#[test]
fn test_lemmas() -> Result<()> {
    let tokens = normalizer().normalize("Voters were running to the polls!")?;
    assert_eq!(tokens, vec!["voter", "be", "run", "to", "the", "poll"]);
    Ok(())
}

struct NoDigitsLemmatizer;

impl Lemmatizer for NoDigitsLemmatizer {
    fn lemmatize(&self, word: &str, _pos: LemmaPos) -> Result<String> {
        if word.chars().any(|c| c.is_ascii_digit()) {
            Err(PartisanError::analysis(format!("cannot lemmatize '{word}'")))
        } else {
            Ok(word.to_string())
        }
    }

    fn name(&self) -> &'static str {
        "no_digits"
    }
}

#[test]
fn test_failed_tokens_are_skipped() -> Result<()> {
    let normalizer = normalizer().with_lemmatizer(Arc::new(NoDigitsLemmatizer));
    let detailed = normalizer.normalize_detailed("vote 2020 now 4ever")?;

    assert_eq!(detailed.lemmas, vec!["vote", "now"]);
    assert_eq!(detailed.skipped_count(), 2);
    assert_eq!(detailed.outcomes.len(), 4);
    assert_eq!(detailed.outcomes[1].surface(), "2020");
    assert!(detailed.outcomes[1].is_skipped());
    Ok(())
}

#[test]
fn test_corpus_processing_keeps_rows_aligned() -> Result<()> {
    let dataset = Dataset::from_rows(vec![
        Row::builder()
            .add_text(SCREEN_NAME_FIELD, "GOP")
            .add_text(TEXT_FIELD, "Tax cuts are working!")
            .build(),
        Row::builder()
            .add_text(SCREEN_NAME_FIELD, "someone")
            .add_text(TEXT_FIELD, "https://t.co/only-a-link")
            .build(),
        Row::builder()
            .add_text(SCREEN_NAME_FIELD, "mike_pence")
            .add_text(TEXT_FIELD, "Great crowds tonight")
            .build(),
    ]);

    let normalizer = Arc::new(normalizer());
    let processed = process_all(Arc::clone(&normalizer), &dataset)?;

    assert_eq!(processed.len(), dataset.len());
    assert_eq!(
        processed.texts(SCREEN_NAME_FIELD)?,
        vec!["GOP", "someone", "mike_pence"]
    );

    let tokens = processed.token_lists(TEXT_FIELD)?;
    assert_eq!(tokens[0], normalizer.normalize("Tax cuts are working!")?.as_slice());
    assert!(tokens[1].is_empty());
    assert_eq!(tokens[2], normalizer.normalize("Great crowds tonight")?.as_slice());

    // The input still holds raw text.
    assert_eq!(dataset.texts(TEXT_FIELD)?[0], "Tax cuts are working!");
    Ok(())
}

#[test]
fn test_corpus_processing_requires_text() {
    let dataset = Dataset::from_rows(vec![Row::builder().add_text("body", "hello").build()]);
    let result = process_all(Arc::new(normalizer()), &dataset);
    assert!(matches!(result, Err(PartisanError::Field(_))));
}
