use std::sync::LazyLock;

use onig::{Regex, RegexOptions, Syntax};

use crate::styled::{RunCursor, StyledText};

static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::with_options(
        r"&#?[a-zA-Z0-9]+?;",
        RegexOptions::REGEX_OPTION_IGNORECASE,
        Syntax::default(),
    )
    .expect("Invalid entity regex")
});

// 0x10FFFF
const MAX_HEX_DIGITS: usize = 6;
// 1114111
const MAX_DEC_DIGITS: usize = 7;

/// A character reference found in some text, with its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMatch<'a> {
    pub start: usize,
    pub len: usize,
    pub raw: &'a str,
}

/// Finds all the non-overlapping character references in `text`, left to right.
pub fn find_entities(text: &str) -> Vec<EntityMatch<'_>> {
    ENTITY_REGEX
        .find_iter(text)
        .map(|(start, end)| EntityMatch {
            start,
            len: end - start,
            raw: &text[start..end],
        })
        .collect()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" | "AMP" => '&',
        "lt" | "LT" => '<',
        "gt" | "GT" => '>',
        "quot" | "QUOT" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "laquo" => '«',
        "raquo" => '»',
        "middot" => '·',
        "bull" => '•',
        "deg" => '°',
        "times" => '×',
        "divide" => '÷',
        "euro" => '€',
        "cent" => '¢',
        "pound" => '£',
        "yen" => '¥',
        "sect" => '§',
        "para" => '¶',
        "shy" => '\u{00AD}',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        _ => return None,
    };
    Some(c)
}

fn numeric_entity(digits: &str, radix: u32, max_digits: usize) -> Option<char> {
    if digits.is_empty()
        || digits.len() > max_digits
        || !digits.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return None;
    }
    let code = u32::from_str_radix(digits, radix).ok()?;
    if code == 0 {
        return None;
    }
    // Rejects surrogates and anything past 0x10FFFF
    char::from_u32(code)
}

/// Decodes a single character reference such as `&amp;`, `&#39;` or `&#x27;`.
///
/// Names are case-sensitive like in HTML: only `&AMP;`, `&LT;`, `&GT;` and `&QUOT;` have an
/// uppercase form. Returns `None` for anything unknown or malformed.
pub fn decode_entity(raw: &str) -> Option<char> {
    let body = raw.strip_prefix('&')?.strip_suffix(';')?;
    match body.strip_prefix('#') {
        Some(num) => {
            if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                numeric_entity(hex, 16, MAX_HEX_DIGITS)
            } else {
                numeric_entity(num, 10, MAX_DEC_DIGITS)
            }
        }
        None => named_entity(body),
    }
}

/// Replaces every character reference in the styled text with the character it stands for.
///
/// Matches are all found up front on the finished text. Each replacement shrinks the text so
/// the match positions after it are shifted back by the running offset.
/// Unknown references are left as they are.
///
/// Matches come sorted, so the run lookup carries on from the previous replacement.
pub fn decode_entities<S>(mut text: StyledText<S>) -> StyledText<S> {
    let plain = text.plain_text();
    let mut offset = 0;
    let mut cursor = RunCursor::default();
    let mut buf = [0u8; 4];

    for m in find_entities(&plain) {
        let Some(decoded) = decode_entity(m.raw) else {
            continue;
        };
        let start = m.start - offset;
        cursor = text.replace_range(cursor, start..start + m.len, decoded.encode_utf8(&mut buf));
        offset += m.len - decoded.len_utf8();
    }

    text.drop_empty_runs();
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styled::StyledRun;

    fn single(s: &str) -> StyledText<()> {
        [StyledRun::new(s, ())].into_iter().collect()
    }

    #[test]
    fn can_decode_named_and_numeric_references() {
        let inputs = vec![
            ("&amp;", Some('&')),
            ("&lt;", Some('<')),
            ("&gt;", Some('>')),
            ("&quot;", Some('"')),
            ("&apos;", Some('\'')),
            ("&#39;", Some('\'')),
            ("&#x27;", Some('\'')),
            ("&#X27;", Some('\'')),
            ("&#x1F600;", Some('😀')),
            ("&nbsp;", Some('\u{00A0}')),
            ("&unknownref;", None),
            ("&#0;", None),
            ("&#xD800;", None),
            ("&#x110000;", None),
            ("&#12345678;", None),
            ("&#xZZ;", None),
            ("&#+65;", None),
            ("&AMP;", Some('&')),
            ("&QUOT;", Some('"')),
            ("&Lt;", None),
            ("&NBSP;", None),
            ("amp;", None),
        ];

        for (input, expected) in inputs {
            assert_eq!(decode_entity(input), expected, "{input}");
        }
    }

    #[test]
    fn finds_matches_with_byte_offsets() {
        let found = find_entities("a &lt; b &#X41; é&gt;");
        assert_eq!(
            found,
            vec![
                EntityMatch {
                    start: 2,
                    len: 4,
                    raw: "&lt;"
                },
                EntityMatch {
                    start: 9,
                    len: 6,
                    raw: "&#X41;"
                },
                EntityMatch {
                    start: 18,
                    len: 4,
                    raw: "&gt;"
                },
            ]
        );
    }

    #[test]
    fn does_not_match_incomplete_references() {
        assert!(find_entities("AT&T & &; &#; &amp").is_empty());
    }

    #[test]
    fn decoding_shrinks_and_shifts_later_matches() {
        let decoded = decode_entities(single("AT&amp;T &lt;3"));
        assert_eq!(decoded.plain_text(), "AT&T <3");
        assert_eq!(decoded.len(), "AT&amp;T &lt;3".len() - 4 - 3);
    }

    #[test]
    fn unknown_reference_does_not_shift_offsets() {
        let decoded = decode_entities(single("&unknownref;&amp;x&foo;&gt;"));
        assert_eq!(decoded.plain_text(), "&unknownref;&x&foo;>");
    }

    #[test]
    fn decoding_twice_changes_nothing() {
        let once = decode_entities(single("AT&amp;T &#39;q&#39;"));
        assert_eq!(once.plain_text(), "AT&T 'q'");
        let twice = decode_entities(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn styles_are_kept_per_run() {
        let text: StyledText<u8> = [
            StyledRun::new("a&amp;b", 1),
            StyledRun::new("&quot;c&quot;", 2),
            StyledRun::new("&#x1F600;", 3),
            StyledRun::new("d&lt;", 4),
        ]
        .into_iter()
        .collect();
        let decoded = decode_entities(text);
        assert_eq!(
            decoded.runs(),
            &[
                StyledRun::new("a&b", 1),
                StyledRun::new("\"c\"", 2),
                StyledRun::new("😀", 3),
                StyledRun::new("d<", 4),
            ]
        );
    }

    #[test]
    fn many_runs_with_references() {
        const RUNS: usize = 40_000;
        let text: StyledText<usize> = (0..RUNS).map(|i| StyledRun::new("a&lt;", i)).collect();
        let decoded = decode_entities(text);
        assert_eq!(decoded.runs().len(), RUNS);
        assert_eq!(decoded.len(), 2 * RUNS);
        assert!(
            decoded
                .iter()
                .enumerate()
                .all(|(i, run)| run.text == "a<" && run.style == i)
        );
    }

    #[test]
    fn references_split_across_runs_are_cleaned_up() {
        let text: StyledText<u8> = [
            StyledRun::new("x&a", 1),
            StyledRun::new("mp;", 2),
            StyledRun::new("&lt;y", 3),
        ]
        .into_iter()
        .collect();
        let decoded = decode_entities(text);
        assert_eq!(
            decoded.runs(),
            &[StyledRun::new("x&", 1), StyledRun::new("<y", 3)]
        );
    }
}
