use crate::types::{HighlightSpan, MatcherConfig, Segment};
use std::ops::Range;

/// Prepare a raw query for matching.
/// Returns None when the query is too short to search (suggestions hidden).
pub fn parse_query<'q>(query: &'q str, config: &MatcherConfig) -> Option<&'q str> {
    let query = if config.trim_query { query.trim() } else { query };
    let len = query.chars().count();
    if len == 0 || len < config.min_query_length {
        return None;
    }
    Some(query)
}

/// Every non-overlapping, case-insensitive occurrence of `query` in `text`,
/// as byte ranges. The query is a literal: no character in it has special
/// meaning. Matching runs on the lowercased text, so an occurrence may begin
/// or end inside a char whose lowercase form is several chars long; the range
/// then covers that whole source char.
pub fn find_occurrences(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return vec![];
    }

    // lowercased char -> byte range of the source char it came from
    let folded: Vec<(char, Range<usize>)> = text
        .char_indices()
        .flat_map(|(i, ch)| {
            let source = i..i + ch.len_utf8();
            ch.to_lowercase().map(move |lower| (lower, source.clone()))
        })
        .collect();

    let mut ranges: Vec<Range<usize>> = vec![];
    let mut i = 0;
    while i + needle.len() <= folded.len() {
        let window = &folded[i..i + needle.len()];
        if window.iter().map(|(c, _)| c).eq(needle.iter()) {
            let mut start = window[0].1.start;
            let end = window[needle.len() - 1].1.end;
            if let Some(last) = ranges.last() {
                start = start.max(last.end);
            }
            if start < end {
                ranges.push(start..end);
            }
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Byte ranges as JavaScript string indices (UTF-16 code units)
pub fn to_highlight_spans(text: &str, ranges: &[Range<usize>]) -> Vec<HighlightSpan> {
    let utf16 = |byte: usize| text[..byte].encode_utf16().count();
    ranges
        .iter()
        .map(|range| HighlightSpan {
            start: utf16(range.start),
            end: utf16(range.end),
        })
        .collect()
}

/// Split `text` into plain and emphasized pieces along byte `ranges`
pub fn to_segments(text: &str, ranges: &[Range<usize>]) -> Vec<Segment> {
    let mut segments = vec![];
    let mut pos = 0;
    for range in ranges {
        if range.start > pos {
            segments.push(Segment {
                text: text[pos..range.start].to_string(),
                emphasized: false,
            });
        }
        segments.push(Segment {
            text: text[range.clone()].to_string(),
            emphasized: true,
        });
        pos = range.end;
    }
    if pos < text.len() {
        segments.push(Segment {
            text: text[pos..].to_string(),
            emphasized: false,
        });
    }
    segments
}
