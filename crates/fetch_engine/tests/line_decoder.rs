use fetch_engine::LineDecoder;
use pretty_assertions::assert_eq;

fn decode_all(chunks: &[&[u8]]) -> (Vec<String>, Option<String>) {
    let mut decoder = LineDecoder::new();
    let mut lines = Vec::new();
    for chunk in chunks {
        lines.extend(decoder.push(chunk));
    }
    (lines, decoder.finish())
}

#[test]
fn lines_split_across_chunks_are_joined() {
    let mut decoder = LineDecoder::new();
    assert!(decoder.push(b"ab").is_empty());
    assert_eq!(decoder.push(b"cd\nef"), vec!["abcd".to_string()]);
    assert_eq!(decoder.pending(), "ef");
    assert_eq!(decoder.push(b"\ngh"), vec!["ef".to_string()]);
    assert_eq!(decoder.pending(), "gh");

    // Terminated by a newline: the tail becomes a line.
    assert_eq!(decoder.push(b"\n"), vec!["gh".to_string()]);
    assert_eq!(decoder.finish(), None);
}

#[test]
fn dangling_partial_line_is_discarded_at_end() {
    let (lines, tail) = decode_all(&[b"ab", b"cd\nef", b"\ngh"]);
    assert_eq!(lines, vec!["abcd".to_string(), "ef".to_string()]);
    assert_eq!(tail.as_deref(), Some("gh"));
}

#[test]
fn one_chunk_may_complete_several_lines() {
    let (lines, tail) = decode_all(&[b"one\ntwo\n\nthree\n"]);
    assert_eq!(
        lines,
        vec![
            "one".to_string(),
            "two".to_string(),
            String::new(),
            "three".to_string()
        ]
    );
    assert_eq!(tail, None);
}

#[test]
fn multibyte_characters_split_across_chunks_survive() {
    let text = "héllo → wörld ✓\n";
    let bytes = text.as_bytes();
    // Split inside the three-byte arrow.
    let arrow_at = text.find('→').unwrap() + 1;
    let (lines, tail) = decode_all(&[&bytes[..arrow_at], &bytes[arrow_at..]]);
    assert_eq!(lines, vec!["héllo → wörld ✓".to_string()]);
    assert_eq!(tail, None);
}

#[test]
fn output_is_independent_of_chunk_boundaries() {
    let body = "data: {\"type\":\"log\",\"message\":\"ünïcode\"}\n\ndata: {\"type\":\"result\",\"data\":{\"a\":\"✓\"}}\ntrailing";
    let bytes = body.as_bytes();
    let (expected, expected_tail) = decode_all(&[bytes]);
    assert_eq!(expected.len(), 3);
    assert_eq!(expected_tail.as_deref(), Some("trailing"));

    for first_cut in 0..=bytes.len() {
        for chunk_len in [1, 2, 3, 7] {
            let mut chunks: Vec<&[u8]> = vec![&bytes[..first_cut]];
            chunks.extend(bytes[first_cut..].chunks(chunk_len));
            let (lines, tail) = decode_all(&chunks);
            assert_eq!(lines, expected, "cut={first_cut} len={chunk_len}");
            assert_eq!(tail, expected_tail, "cut={first_cut} len={chunk_len}");
        }
    }
}

#[test]
fn leading_byte_order_mark_is_dropped() {
    let (lines, _) = decode_all(&[b"\xEF\xBB\xBFfirst\n"]);
    assert_eq!(lines, vec!["first".to_string()]);
}

#[test]
fn invalid_bytes_become_replacement_characters() {
    let (lines, _) = decode_all(&[b"bad \xFF byte\n"]);
    assert_eq!(lines, vec!["bad \u{FFFD} byte".to_string()]);
}

#[test]
fn truncated_character_at_end_is_part_of_the_discarded_tail() {
    let (lines, tail) = decode_all(&[b"ok\n\xE2\x86"]);
    assert_eq!(lines, vec!["ok".to_string()]);
    assert_eq!(tail.as_deref(), Some("\u{FFFD}"));
}
