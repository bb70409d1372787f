//! Lorem-style free text generators.

use rand::Rng;

/// Word pool for generated sentences.
const WORDS: &[&str] = &[
    "alias", "consequatur", "aut", "perferendis", "sit", "voluptatem", "accusantium",
    "doloremque", "aperiam", "eaque", "ipsa", "quae", "ab", "illo", "inventore", "veritatis",
    "et", "quasi", "architecto", "beatae", "vitae", "dicta", "sunt", "explicabo", "aspernatur",
    "odit", "fugit", "sed", "quia", "consequuntur", "magni", "dolores", "eos", "qui", "ratione",
    "sequi", "nesciunt", "neque", "dolorem", "ipsum", "dolor", "amet", "consectetur", "adipisci",
    "velit", "numquam", "eius", "modi", "tempora", "incidunt", "ut", "labore", "dolore",
    "magnam", "aliquam", "quaerat", "enim", "ad", "minima", "veniam", "quis", "nostrum",
    "exercitationem", "ullam", "corporis", "nemo", "ipsam", "voluptas", "suscipit",
    "laboriosam", "nisi", "aliquid", "ex", "ea", "commodi", "autem", "vel", "eum", "iure",
    "reprehenderit", "in", "voluptate", "esse", "quam", "nihil", "molestiae", "illum",
    "fugiat", "quo", "nulla", "pariatur", "at", "vero", "accusamus", "officiis", "debitis",
    "rerum", "necessitatibus", "saepe", "eveniet",
];

/// Generate one sentence of `min_words..=max_words` words, capitalized and ending with a period.
pub fn generate_sentence<R: Rng>(rng: &mut R, min_words: usize, max_words: usize) -> String {
    let count = rng.gen_range(min_words.max(1)..=max_words.max(min_words.max(1)));
    let words: Vec<&str> = (0..count)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect();
    finish_sentence(&words)
}

/// Generate a run of sentences no longer than `max_chars` characters.
///
/// Sentences are appended while they fit. When even the first sentence is too
/// long, it is shortened word by word, so the result is empty only when
/// `max_chars` is shorter than the first word.
pub fn generate_paragraph<R: Rng>(rng: &mut R, max_chars: usize) -> String {
    let mut text = String::new();

    loop {
        let sentence = generate_sentence(rng, 4, 10);
        let needed = if text.is_empty() {
            sentence.len()
        } else {
            sentence.len() + 1
        };

        if text.len() + needed > max_chars {
            if text.is_empty() {
                text = shorten_sentence(&sentence, max_chars);
            }
            break;
        }

        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&sentence);
    }

    text
}

fn finish_sentence(words: &[&str]) -> String {
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get(0..1) {
        let upper = first.to_ascii_uppercase();
        sentence.replace_range(0..1, &upper);
    }
    sentence.push('.');
    sentence
}

/// Drop trailing words until the sentence fits in `max_chars`.
fn shorten_sentence(sentence: &str, max_chars: usize) -> String {
    let body = sentence.trim_end_matches('.');
    let mut words: Vec<&str> = body.split(' ').collect();

    while !words.is_empty() && words.join(" ").len() + 1 > max_chars {
        words.pop();
    }

    if words.is_empty() {
        String::new()
    } else {
        format!("{}.", words.join(" "))
    }
}
