//! Word token sequence.
//!
//! Preprocessing wraps every paragraph word in `<span class="gd_word">`
//! with a document-scoped id. Grounding spans reference those ids; this
//! module recovers the total order plus id → text lookup needed to resolve
//! spans to positions and to render the cited phrase.

use mathanno_model::WordId;
use scraper::{Html, Selector};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct WordSequence {
    order: Vec<WordId>,
    positions: HashMap<WordId, usize>,
    texts: HashMap<WordId, String>,
}

impl WordSequence {
    /// Collect every `gd_word` span in document order. Spans without text
    /// keep their place in the order but have no text entry.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let word = Selector::parse("span.gd_word").unwrap();

        let mut sequence = WordSequence::default();
        for element in document.select(&word) {
            let Some(id) = element.value().attr("id") else {
                continue;
            };
            let text: String = element.text().collect();
            sequence.positions.insert(id.to_string(), sequence.order.len());
            sequence.order.push(id.to_string());
            if !text.is_empty() {
                sequence.texts.insert(id.to_string(), text);
            }
        }
        sequence
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of a word id in the total order.
    pub fn position(&self, word_id: &str) -> Option<usize> {
        self.positions.get(word_id).copied()
    }

    pub fn text(&self, word_id: &str) -> Option<&str> {
        self.texts.get(word_id).map(String::as_str)
    }

    /// The phrase spanned by the inclusive id range, words joined with
    /// single spaces and textless tokens skipped. `None` when either id is
    /// unknown; an empty string when `start` comes after `stop`.
    pub fn phrase(&self, start: &str, stop: &str) -> Option<String> {
        let from = self.position(start)?;
        let to = self.position(stop)?;
        if from > to {
            return Some(String::new());
        }
        let words: Vec<&str> = self.order[from..=to]
            .iter()
            .filter_map(|id| self.text(id))
            .collect();
        Some(words.join(" "))
    }
}
