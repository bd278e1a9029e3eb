//! Sentence-boundary chunking of narration text
//!
//! Speech engines silently truncate or error on long utterances, so
//! narration text is split into bounded chunks before playback. Chunks
//! end on sentence boundaries where possible; a single sentence longer
//! than the limit becomes its own chunk rather than being cut mid-word.

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split text into sentences, keeping the terminal punctuation with its
/// sentence. Runs of terminators ("?!", "...") stay with one sentence.
/// Fragments with no speakable content are discarded.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        current.push(c);
        if is_terminator(c) && chars.peek().map_or(true, |n| !is_terminator(*n)) {
            flush(&mut current, &mut sentences);
        }
    }
    flush(&mut current, &mut sentences);

    sentences
}

fn flush(current: &mut String, sentences: &mut Vec<String>) {
    let trimmed = current.trim();
    let has_content = trimmed
        .chars()
        .any(|c| !is_terminator(c) && !c.is_whitespace());
    if has_content {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// Split text into chunks of at most `max_chars` characters, greedily
/// accumulating whole sentences. A single sentence over the limit is
/// emitted as its own chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();

        if current.is_empty() {
            current = sentence;
            current_len = sentence_len;
            continue;
        }

        // +1 for the joining space
        if current_len + 1 + sentence_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current = sentence;
            current_len = sentence_len;
        } else {
            current.push(' ');
            current.push_str(&sentence);
            current_len += 1 + sentence_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
