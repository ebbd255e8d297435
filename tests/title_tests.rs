use spectral::prelude::*;
use storycard::constants::FALLBACK_TITLE;
use storycard::nlp::Capabilities;
use storycard::nlp::tokenizer::word_count;
use storycard::title::{TitleConfig, TitleExtractor, split_sentences};
use storycard::{ExtractError, Vocabulary, extract_title};

const NARRATIVES: &[&str] = &[
    "I refused to stay silent. My boss ignored every complaint I made.",
    "He said, \"You should wear makeup to work.\" Everyone laughed at me.",
    "Too short.",
    "For years I watched men with less experience get promoted. I finally hit the glass ceiling at work.",
    "and then there was nothing",
    "We moved to the city when I was ten! My teachers always praised the boys, never the girls. It hurt, but I kept studying until I won a scholarship.",
];

#[test]
fn empty_narrative_gives_fallback() {
    assert_that(&extract_title("")).is_equal_to(FALLBACK_TITLE.to_owned());
}

#[test]
fn first_person_impact_sentence_is_quoted() {
    let title = extract_title("I refused to stay silent. My boss ignored every complaint I made.");
    let lowercase = title.to_lowercase();

    assert_that(&(lowercase.contains("refused") || lowercase.contains("ignored"))).is_true();
    assert_that(&word_count(&title)).is_less_than_or_equal_to(7);
}

#[test]
fn quotation_outranks_unquoted_twin() {
    let extractor = TitleExtractor::with_defaults().expect("default vocabulary compiles");
    let sentences = split_sentences(
        "He said, You should wear makeup to work. He said, \"You should wear makeup to work.\"",
    );

    let ranked = extractor.scorer().rank(&sentences);

    assert_that(&ranked).has_length(2);
    assert_that(&ranked.first().map(|c| c.text.contains('"'))).is_equal_to(Some(true));
}

#[test]
fn short_narrative_gets_capitalized_title() {
    let title = extract_title("Too short.");

    assert_that(&title.is_empty()).is_false();
    assert_that(&title.chars().next().is_some_and(char::is_uppercase)).is_true();
}

#[test]
fn key_phrase_anchors_title() {
    let title = extract_title(
        "For years I watched men with less experience get promoted. I finally hit the glass ceiling at work.",
    );

    assert_that(&title).starts_with("Glass ceiling");
}

#[test]
fn titles_are_deterministic() {
    for narrative in NARRATIVES {
        assert_that(&extract_title(narrative)).is_equal_to(extract_title(narrative));
    }
}

#[test]
fn titles_respect_word_cap() {
    for max_words in [1, 3, 7] {
        let extractor = TitleExtractor::new(
            &Vocabulary::default(),
            TitleConfig::default().with_max_words(max_words),
            Capabilities::builtin(),
        )
        .expect("default vocabulary compiles");

        for narrative in NARRATIVES {
            let title = extractor.extract(narrative).expect("syntax available");

            assert_that(&title.is_empty()).is_false();
            if title != FALLBACK_TITLE {
                assert_that(&word_count(&title)).is_less_than_or_equal_to(max_words);
            }
        }
    }
}

#[test]
fn titles_start_uppercase() {
    for narrative in NARRATIVES {
        let title = extract_title(narrative);
        let first = title.chars().next().expect("non-empty title");

        if first.is_alphabetic() {
            assert_that(&first.is_uppercase()).is_true();
        }
    }
}

#[test]
fn titles_without_sentiment() {
    let extractor = TitleExtractor::new(
        &Vocabulary::default(),
        TitleConfig::default(),
        Capabilities::builtin().without_sentiment(),
    )
    .expect("default vocabulary compiles");

    for narrative in NARRATIVES {
        let title = extractor.extract(narrative).expect("syntax available");
        assert_that(&title.is_empty()).is_false();
    }
}

#[test]
fn missing_syntax_lexicon_fails_extraction() {
    let extractor = TitleExtractor::new(
        &Vocabulary::default(),
        TitleConfig::default(),
        Capabilities::resolve(None, Some("/nonexistent/syntax.tsv")),
    )
    .expect("default vocabulary compiles");

    let result = extractor.extract("My boss ignored every complaint I made.");

    assert_that(&matches!(result, Err(ExtractError::SyntaxUnavailable(_)))).is_true();
    assert_that(&extractor.extract("")).is_ok_containing(FALLBACK_TITLE.to_owned());
}

#[test]
fn custom_vocabulary_changes_anchor() {
    let vocabulary: Vocabulary =
        serde_json::from_str(r#"{ "key_phrases": ["wear makeup"] }"#).expect("valid json");
    let extractor = TitleExtractor::new(&vocabulary, TitleConfig::default(), Capabilities::builtin())
        .expect("vocabulary compiles");

    let title = extractor
        .extract("He said, \"You should wear makeup to work.\" Everyone laughed at me.")
        .expect("syntax available");

    assert_that(&title).starts_with("Wear makeup");
}
