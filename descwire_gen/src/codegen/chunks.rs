//! Chunked string-literal encoding of serialized schema bytes.
//!
//! The embedded payload is emitted as Java string literals, which carry two
//! independent target-platform ceilings: a per-literal byte limit and a
//! per-method code size limit that caps how many concatenated lines one
//! literal expression may span. `encode` therefore splits the payload into
//! escaped chunks of at most `bytes_per_line` raw bytes and batches them
//! into groups of at most `lines_per_group` chunks. Within a group chunks
//! are concatenated with ` +`; each group becomes one element of the
//! generated string array. Both limits are caller-supplied: this module
//! never decides what the platform ceiling is, and it does not verify that
//! `bytes_per_line * lines_per_group` stays under it.

use std::fmt::Write;

/* An ordered batch of escaped chunks meant to form one literal expression.
 * Concatenating and unescaping the chunks yields exactly one contiguous
 * slice of the original payload. */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkGroup {
    pub chunks: Vec<String>,
}

/// Split `data` into escaped chunk literals of at most `bytes_per_line` raw
/// bytes, batched into groups of at most `lines_per_group` chunks.
///
/// Empty input still produces one group holding one empty chunk, so the
/// generated array always has at least one element. Both limits must be at
/// least 1.
pub fn encode(data: &[u8], bytes_per_line: usize, lines_per_group: usize) -> Vec<ChunkGroup> {
    assert!(bytes_per_line >= 1, "bytes_per_line must be >= 1");
    assert!(lines_per_group >= 1, "lines_per_group must be >= 1");

    if data.is_empty() {
        return vec![ChunkGroup {
            chunks: vec![String::new()],
        }];
    }

    let mut groups: Vec<ChunkGroup> = Vec::new();
    let mut current = ChunkGroup::default();
    for slice in data.chunks(bytes_per_line) {
        if current.chunks.len() == lines_per_group {
            groups.push(std::mem::take(&mut current));
        }
        current.chunks.push(escape_bytes(slice));
    }
    groups.push(current);
    groups
}

/// Escape arbitrary bytes into text valid inside a Java string literal.
///
/// Printable ASCII passes through; quotes, backslash and the common control
/// characters use named escapes; every other byte becomes a 3-digit octal
/// escape. Always emitting three octal digits keeps a following literal
/// digit from being absorbed into the escape, so the mapping is reversible
/// byte-for-byte for all 256 byte values.
pub fn escape_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 4);
    for &byte in data {
        match byte {
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'"' => out.push_str("\\\""),
            b'\'' => out.push_str("\\'"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(byte as char),
            _ => write!(out, "\\{:03o}", byte).unwrap(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /* Inverse of escape_bytes, for round-trip checks */
    fn unescape(escaped: &str) -> Vec<u8> {
        let mut out = Vec::new();
        let mut chars = escaped.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c as u8);
                continue;
            }
            match chars.next().expect("dangling escape") {
                'n' => out.push(b'\n'),
                'r' => out.push(b'\r'),
                't' => out.push(b'\t'),
                '"' => out.push(b'"'),
                '\'' => out.push(b'\''),
                '\\' => out.push(b'\\'),
                digit @ '0'..='7' => {
                    let mut value = digit.to_digit(8).unwrap();
                    for _ in 0..2 {
                        match chars.peek().and_then(|c| c.to_digit(8)) {
                            Some(d) => {
                                value = value * 8 + d;
                                chars.next();
                            }
                            None => break,
                        }
                    }
                    out.push(value as u8);
                }
                other => panic!("unexpected escape '\\{}'", other),
            }
        }
        out
    }

    fn decode(groups: &[ChunkGroup]) -> Vec<u8> {
        let mut out = Vec::new();
        for group in groups {
            for chunk in &group.chunks {
                out.extend(unescape(chunk));
            }
        }
        out
    }

    #[test]
    fn every_byte_value_round_trips() {
        let data: Vec<u8> = (0u8..=255).collect();
        for &byte in &data {
            assert_eq!(unescape(&escape_bytes(&[byte])), vec![byte], "byte {byte:#04x}");
        }
        assert_eq!(unescape(&escape_bytes(&data)), data);
    }

    #[test]
    fn encode_round_trips_for_various_limits() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 31 % 256) as u8).collect();
        for (bytes_per_line, lines_per_group) in [(1, 1), (7, 3), (40, 400), (1000, 1), (13, 2)] {
            let groups = encode(&data, bytes_per_line, lines_per_group);
            assert_eq!(decode(&groups), data, "L={bytes_per_line} G={lines_per_group}");
        }
    }

    #[test]
    fn chunk_and_group_bounds_hold() {
        let data = vec![0xABu8; 997];
        let (bytes_per_line, lines_per_group) = (16, 5);
        let groups = encode(&data, bytes_per_line, lines_per_group);

        for (gi, group) in groups.iter().enumerate() {
            assert!(group.chunks.len() <= lines_per_group);
            assert!(!group.chunks.is_empty());
            if gi + 1 < groups.len() {
                assert_eq!(group.chunks.len(), lines_per_group, "only the final group may be short");
            }
            for chunk in &group.chunks {
                assert!(unescape(chunk).len() <= bytes_per_line);
            }
        }
    }

    #[test]
    fn empty_input_yields_one_empty_chunk() {
        let groups = encode(&[], 40, 400);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].chunks.len(), 1);
        assert!(groups[0].chunks[0].is_empty());
    }

    #[test]
    fn forty_five_bytes_split_forty_five() {
        /* 45 bytes at 40 per line: one group holding a 40-byte and a
         * 5-byte chunk */
        let data: Vec<u8> = (0..45u8).collect();
        let groups = encode(&data, 40, 400);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].chunks.len(), 2);
        assert_eq!(unescape(&groups[0].chunks[0]).len(), 40);
        assert_eq!(unescape(&groups[0].chunks[1]).len(), 5);
    }

    #[test]
    fn group_boundaries_align_to_full_groups() {
        /* 3 full groups of 4*3 bytes plus a 5-byte remainder */
        let data = vec![0u8; 4 * 3 * 3 + 5];
        let groups = encode(&data, 4, 3);
        assert_eq!(groups.len(), 4);
        for group in &groups[..3] {
            let bytes: usize = group.chunks.iter().map(|c| unescape(c).len()).sum();
            assert_eq!(bytes, 12);
        }
        let last: usize = groups[3].chunks.iter().map(|c| unescape(c).len()).sum();
        assert_eq!(last, 5);
    }

    #[test]
    fn group_count_matches_ceiling_division() {
        let (bytes_per_line, lines_per_group) = (4, 3);
        for total_chunks in [1usize, 3, 4, 7, 12, 13] {
            let data = vec![0u8; total_chunks * bytes_per_line];
            let groups = encode(&data, bytes_per_line, lines_per_group);
            let expected = (total_chunks + lines_per_group - 1) / lines_per_group;
            assert_eq!(groups.len(), expected, "chunks={total_chunks}");
        }
    }

    #[test]
    fn quote_byte_never_terminates_the_literal() {
        let data = [0x41, 0x22, 0x42];
        let escaped = escape_bytes(&data);
        assert_eq!(escaped, "A\\\"B");
        assert!(!escaped.contains('"') || escaped.contains("\\\""));
        assert_eq!(unescape(&escaped), data);
    }

    #[test]
    fn octal_escape_is_not_absorbed_by_following_digit() {
        /* 0x01 followed by ASCII '2': the escape must stay 3 digits so the
         * '2' is a plain character */
        let data = [0x01, b'2'];
        let escaped = escape_bytes(&data);
        assert_eq!(escaped, "\\0012");
        assert_eq!(unescape(&escaped), data);
    }
}
