//! Tests for sentence splitting and chunk accumulation

use plateful_spk::chunk::{chunk_text, split_sentences};
use proptest::prelude::*;

#[test]
fn test_recipe_steps_one_chunk_per_sentence() {
    let text = "Step 1: Boil water. Step 2: Add pasta. Step 3: Drain and serve.";
    let chunks = chunk_text(text, 30);

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0], "Step 1: Boil water.");
    assert_eq!(chunks[1], "Step 2: Add pasta.");
    assert_eq!(chunks[2], "Step 3: Drain and serve.");
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 30);
    }
}

#[test]
fn test_sentences_accumulate_up_to_limit() {
    let text = "Step 1: Boil water. Step 2: Add pasta. Step 3: Drain and serve.";
    let chunks = chunk_text(text, 150);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], text);
}

#[test]
fn test_unpunctuated_text_is_single_chunk() {
    let chunks = chunk_text("mix everything together and enjoy", 150);
    assert_eq!(chunks, vec!["mix everything together and enjoy"]);
}

#[test]
fn test_whitespace_only_input_yields_nothing() {
    assert!(chunk_text("", 150).is_empty());
    assert!(chunk_text("  \n\t ", 150).is_empty());
}

#[test]
fn test_oversized_sentence_kept_whole() {
    let long = format!(
        "Combine the {} in a large bowl.",
        "flour and sugar and butter and eggs and milk and vanilla"
    );
    let chunks = chunk_text(&long, 20);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], long);
}

#[test]
fn test_terminator_runs_stay_with_their_sentence() {
    let sentences = split_sentences("Wait... then stir. Serve hot!");
    assert_eq!(sentences, vec!["Wait...", "then stir.", "Serve hot!"]);

    let sentences = split_sentences("Really?! Now stir.");
    assert_eq!(sentences, vec!["Really?!", "Now stir."]);
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

proptest! {
    #[test]
    fn prop_chunks_reconstruct_input(
        sentences in proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,6}[.!?]", 1..8),
        max in 20usize..200,
    ) {
        let text = sentences.join(" ");
        let chunks = chunk_text(&text, max);

        prop_assert_eq!(normalize(&chunks.join(" ")), normalize(&text));

        for chunk in &chunks {
            if chunk.chars().count() > max {
                // Only a single oversized sentence may exceed the limit
                prop_assert_eq!(split_sentences(chunk).len(), 1);
            }
        }
    }
}
