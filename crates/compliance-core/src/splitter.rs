//! Recursive character splitter.
//!
//! Splits on the coarsest separator present (`"\n\n"`, `"\n"`, `" "`, then
//! single characters), recursing into pieces that are still too long, and
//! merges small pieces back together up to `chunk_size` characters while
//! carrying roughly `chunk_overlap` characters into the next chunk.
//!
//! Separators are not kept on the pieces: merged pieces are re-joined with the
//! separator they were split on, so runs of blank lines collapse to one.
use std::collections::VecDeque;

const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn split_text(&self, text: &str) -> Vec<String> { self.split_with(text, &self.separators) }

    fn split_with(&self, text: &str, separators: &[String]) -> Vec<String> {
        let Some(last) = separators.len().checked_sub(1) else { return vec![text.to_string()] };
        let idx = separators
            .iter()
            .position(|s| s.is_empty() || text.contains(s.as_str()))
            .unwrap_or(last);
        let separator = separators[idx].as_str();
        let rest = &separators[idx + 1..];

        let splits: Vec<&str> = if separator.is_empty() {
            text.char_indices().map(|(i, c)| &text[i..i + c.len_utf8()]).collect()
        } else {
            text.split(separator).filter(|s| !s.is_empty()).collect()
        };

        let mut final_chunks = Vec::new();
        let mut good: Vec<&str> = Vec::new();
        for piece in splits {
            if char_len(piece) < self.chunk_size {
                good.push(piece);
                continue;
            }
            if !good.is_empty() {
                final_chunks.extend(self.merge_splits(&good, separator));
                good.clear();
            }
            if rest.is_empty() {
                final_chunks.push(piece.to_string());
            } else {
                final_chunks.extend(self.split_with(piece, rest));
            }
        }
        if !good.is_empty() {
            final_chunks.extend(self.merge_splits(&good, separator));
        }
        final_chunks
    }

    fn merge_splits(&self, splits: &[&str], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut docs = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;
        for &piece in splits {
            let len = char_len(piece);
            let joined_sep = if current.is_empty() { 0 } else { sep_len };
            if total + len + joined_sep > self.chunk_size && !current.is_empty() {
                if let Some(doc) = join_trimmed(&current, separator) {
                    docs.push(doc);
                }
                // Drop from the front until only the overlap remains and the next piece fits.
                loop {
                    let pending_sep = if current.is_empty() { 0 } else { sep_len };
                    let too_long = total + len + pending_sep > self.chunk_size && total > 0;
                    if total <= self.chunk_overlap && !too_long {
                        break;
                    }
                    let Some(first) = current.pop_front() else { break };
                    let dropped = char_len(first) + if current.is_empty() { 0 } else { sep_len };
                    total = total.saturating_sub(dropped);
                }
            }
            if !current.is_empty() {
                total += sep_len;
            }
            current.push_back(piece);
            total += len;
        }
        if let Some(doc) = join_trimmed(&current, separator) {
            docs.push(doc);
        }
        docs
    }
}

fn char_len(s: &str) -> usize { s.chars().count() }

fn join_trimmed(parts: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = parts.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
