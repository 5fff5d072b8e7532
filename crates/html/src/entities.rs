/// Decode character references the way a browser does for the entities that
/// show up in edited rich text.
///
/// Contract:
/// - Named references come from `NAMED`; a terminating `;` is required except
///   for the legacy names in `LEGACY`, which also decode bare (`&amp` → `&`).
/// - In attribute values a bare legacy name followed by an ASCII alphanumeric
///   or `=` is left alone (`href="?a=1&copy=2"` keeps `&copy`).
/// - Numeric references (`&#215;`, `&#xD7;`) decode with or without `;`.
///   Zero, surrogates and values above U+10FFFF become U+FFFD; 0x80..=0x9F map
///   through the windows-1252 table.
/// - Anything else passes through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    decode(s, false)
}

pub(crate) fn decode_attribute(s: &str) -> String {
    decode(s, true)
}

const NAMED: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{00A0}"),
    ("copy", "\u{00A9}"),
    ("reg", "\u{00AE}"),
    ("trade", "\u{2122}"),
    ("hellip", "\u{2026}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("ldquo", "\u{201C}"),
    ("rdquo", "\u{201D}"),
    ("laquo", "\u{00AB}"),
    ("raquo", "\u{00BB}"),
    ("middot", "\u{00B7}"),
    ("bull", "\u{2022}"),
    ("times", "\u{00D7}"),
    ("divide", "\u{00F7}"),
    ("deg", "\u{00B0}"),
    ("euro", "\u{20AC}"),
    ("pound", "\u{00A3}"),
    ("yen", "\u{00A5}"),
    ("cent", "\u{00A2}"),
    ("sect", "\u{00A7}"),
    ("para", "\u{00B6}"),
    ("shy", "\u{00AD}"),
];

const LEGACY: &[&str] = &["amp", "lt", "gt", "quot", "nbsp", "copy", "reg"];

const MAX_NAME_LEN: usize = 8;

// 0x80..=0x9F; zero entries keep the code point as-is.
const WINDOWS_1252: [u32; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160, 0x2039,
    0x0152, 0, 0x017D, 0, 0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, 0x02DC,
    0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

fn decode(s: &str, in_attribute: bool) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    let mut i = 0;

    while let Some(rel) = memchr::memchr(b'&', &bytes[i..]) {
        let amp = i + rel;
        let consumed = if bytes.get(amp + 1) == Some(&b'#') {
            numeric_reference(bytes, amp)
        } else {
            named_reference(s, amp, in_attribute)
        };
        match consumed {
            Some((end, decoded)) => {
                out.push_str(&s[copy_start..amp]);
                out.push_str(&decoded);
                copy_start = end;
                i = end;
            }
            None => i = amp + 1,
        }
    }

    out.push_str(&s[copy_start..]);
    out
}

fn named_reference(s: &str, amp: usize, in_attribute: bool) -> Option<(usize, String)> {
    let bytes = s.as_bytes();
    let start = amp + 1;
    let mut end = start;
    while end < bytes.len() && end - start < MAX_NAME_LEN && bytes[end].is_ascii_alphanumeric() {
        end += 1;
    }
    let name = &s[start..end];

    if bytes.get(end) == Some(&b';') {
        if let Some((_, value)) = NAMED.iter().find(|(n, _)| *n == name) {
            return Some((end + 1, (*value).to_string()));
        }
    }

    // Bare legacy names match on the longest legacy prefix, as browsers do
    // for `&ampx` → `&x`.
    let legacy = LEGACY
        .iter()
        .filter(|n| name.starts_with(**n))
        .max_by_key(|n| n.len())?;
    let after = start + legacy.len();
    if in_attribute
        && bytes
            .get(after)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'=')
    {
        return None;
    }
    let value = NAMED.iter().find(|(n, _)| n == legacy)?.1;
    log::trace!(target: "html::entities", "bare legacy reference &{legacy}");
    Some((after, value.to_string()))
}

fn numeric_reference(bytes: &[u8], amp: usize) -> Option<(usize, String)> {
    let (digits_start, radix) = match bytes.get(amp + 2) {
        Some(b'x') | Some(b'X') => (amp + 3, 16),
        _ => (amp + 2, 10),
    };
    let mut end = digits_start;
    let mut value: u32 = 0;
    let mut overflow = false;
    while let Some(d) = bytes.get(end).and_then(|b| (*b as char).to_digit(radix)) {
        value = match value.checked_mul(radix).and_then(|v| v.checked_add(d)) {
            Some(v) => v,
            None => {
                overflow = true;
                value
            }
        };
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    if bytes.get(end) == Some(&b';') {
        end += 1;
    }

    let ch = if overflow {
        char::REPLACEMENT_CHARACTER
    } else {
        resolve_code_point(value)
    };
    Some((end, ch.to_string()))
}

fn resolve_code_point(value: u32) -> char {
    if (0x80..=0x9F).contains(&value) {
        let mapped = WINDOWS_1252[(value - 0x80) as usize];
        if mapped != 0 {
            return char::from_u32(mapped).unwrap_or(char::REPLACEMENT_CHARACTER);
        }
    }
    if value == 0 {
        return char::REPLACEMENT_CHARACTER;
    }
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_references_in_editor_text() {
        assert_eq!(decode_entities("Fish &amp; chips"), "Fish & chips");
        assert_eq!(decode_entities("&lt;p&gt; stays text"), "<p> stays text");
        assert_eq!(decode_entities("say &quot;cheese&quot;"), "say \"cheese\"");
        assert_eq!(decode_entities("it&apos;s"), "it's");
        assert_eq!(decode_entities("no&nbsp;break"), "no\u{00A0}break");
        assert_eq!(decode_entities("and so on&hellip;"), "and so on\u{2026}");
    }

    #[test]
    fn non_ascii_text_is_copied_untouched() {
        assert_eq!(decode_entities("Größe 10×20"), "Größe 10×20");
        assert_eq!(decode_entities("日本 &amp; 中国"), "日本 & 中国");
    }

    #[test]
    fn decode_entities_decodes_numeric_with_and_without_semicolon() {
        assert_eq!(decode_entities("&#215;"), "×");
        assert_eq!(decode_entities("&#xD7;"), "×");
        assert_eq!(decode_entities("&#215 x"), "× x");
        assert_eq!(decode_entities("&#XD7"), "×");
    }

    #[test]
    fn decode_entities_replaces_invalid_code_points() {
        assert_eq!(decode_entities("&#0;"), "\u{FFFD}");
        assert_eq!(decode_entities("&#xD800;"), "\u{FFFD}");
        assert_eq!(decode_entities("&#x110000;"), "\u{FFFD}");
        assert_eq!(decode_entities("&#99999999999;"), "\u{FFFD}");
    }

    #[test]
    fn decode_entities_maps_c1_controls_through_windows_1252() {
        assert_eq!(decode_entities("&#128;"), "€");
        assert_eq!(decode_entities("&#x93;quoted&#x94;"), "\u{201C}quoted\u{201D}");
        assert_eq!(decode_entities("&#x81;"), "\u{81}");
    }

    #[test]
    fn decode_entities_bare_legacy_names() {
        assert_eq!(decode_entities("&amp"), "&");
        assert_eq!(decode_entities("loose &amp space"), "loose & space");
        assert_eq!(decode_entities("&copy2024"), "\u{00A9}2024");
        assert_eq!(decode_entities("&hellip"), "&hellip");
    }

    #[test]
    fn unknown_or_malformed_references_pass_through() {
        assert_eq!(decode_entities("x &madeup; y"), "x &madeup; y");
        for s in ["&", "&&", "&;", "&#;", "&#x;"] {
            assert_eq!(decode_entities(s), s);
        }
        assert_eq!(decode_entities("&#xQQ;&lt;"), "&#xQQ;<");
    }

    #[test]
    fn decode_attribute_keeps_legacy_name_before_alnum_or_equals() {
        assert_eq!(decode_attribute("?a=1&copy=2"), "?a=1&copy=2");
        assert_eq!(decode_attribute("?a=1&copyx"), "?a=1&copyx");
        assert_eq!(decode_attribute("x &amp y"), "x & y");
        assert_eq!(decode_attribute("&copy;=2"), "\u{00A9}=2");
    }

    #[test]
    fn decoding_is_stable_on_adversarial_inputs() {
        let noisy = "&#123456789".repeat(100);
        let out = decode_entities(&noisy);
        assert_eq!(out.chars().count(), 100);
        for s in ["&", "&&", "&;", "&#;", "&#x;", "&unknown;"] {
            assert_eq!(decode_entities(s), s);
        }
    }
}
