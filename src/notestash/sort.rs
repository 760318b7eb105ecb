//! Natural-order comparison and the three item sort policies.
//!
//! Natural order means embedded digit runs compare as integers, so
//! "Item 2" sorts before "Item 10" instead of after it.

use std::cmp::Ordering;

use crate::model::{Item, SortOrder};

/// Compares two strings chunk by chunk, digit runs as integers and text
/// runs lexicographically.
///
/// Case policy: text chunks compare case-insensitively (Unicode lowercase),
/// with a case-sensitive byte-order tie-break so strings that differ only in
/// case still order deterministically. Empty strings compare equal. At a
/// given position a digit chunk sorts before a text chunk; when one string
/// runs out of chunks first, the shorter one sorts first ("Item 10" before
/// "Item 10a").
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match cmp_chunks(x, y) {
                Ordering::Equal => continue,
                ord => return ord,
            },
        }
    }
}

/// Orders items by the given policy. Pure and stable: the input is never
/// mutated, and equal keys keep their original relative order.
pub fn sort_items(items: &[Item], order: SortOrder) -> Vec<Item> {
    let mut sorted = items.to_vec();
    match order {
        SortOrder::Alphabetical => sorted.sort_by(|a, b| natural_cmp(&a.name, &b.name)),
        // created_at only. updated_at never participates in temporal order.
        SortOrder::Newest => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    sorted
}

#[derive(Debug, Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> impl Iterator<Item = Chunk<'_>> {
    let mut out = Vec::new();
    let mut rest = s;
    while let Some(first) = rest.chars().next() {
        let digits = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        out.push(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        });
        rest = tail;
    }
    out.into_iter()
}

fn cmp_chunks(a: Chunk<'_>, b: Chunk<'_>) -> Ordering {
    match (a, b) {
        (Chunk::Digits(x), Chunk::Digits(y)) => {
            // Equal values with different spellings ("01" vs "1") fall back
            // to the literal text.
            cmp_digits(x, y).then_with(|| cmp_text(x, y))
        }
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        (Chunk::Text(x), Chunk::Text(y)) => cmp_text(x, y),
    }
}

// Integer comparison on digit runs of arbitrary length.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
