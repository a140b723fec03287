//! Display-width accounting for card titles.
//!
//! Width is counted in "units" from the UTF-8 length of each code point: three-byte code points
//! (most CJK) count 1.5, everything else counts its byte length. This is not a Unicode
//! east-asian-width table and must not be turned into one; card layouts are tuned to it.

/// Unit budget for card titles.
pub const TITLE_BUDGET: f64 = 19.0;

/// Marker appended to truncated text. Not counted against the budget.
pub const ELLIPSIS: &str = "..";

pub fn char_units(c: char) -> f64 {
    match c.len_utf8() {
        3 => 1.5,
        n => n as f64,
    }
}

pub fn text_units(text: &str) -> f64 {
    text.chars().map(char_units).sum()
}

/// Longest prefix of `text` within `max_units`, plus [`ELLIPSIS`] if anything was cut.
///
/// Text that already ends in the marker with a fitting stem is returned unchanged, which makes
/// the operation idempotent.
pub fn truncate(text: &str, max_units: f64) -> String {
    if let Some(stem) = text.strip_suffix(ELLIPSIS)
        && text_units(stem) <= max_units
    {
        return text.to_string();
    }

    let mut used = 0.0;
    for (idx, c) in text.char_indices() {
        let w = char_units(c);
        if used + w > max_units {
            let mut out = String::with_capacity(idx + ELLIPSIS.len());
            out.push_str(&text[..idx]);
            out.push_str(ELLIPSIS);
            return out;
        }
        used += w;
    }
    text.to_string()
}

pub fn truncate_title(title: &str) -> String {
    truncate(title, TITLE_BUDGET)
}

/// Fullwidth rendering of a player name.
///
/// Printable ASCII moves to the U+FF01 block and space to U+3000. Halfwidth katakana, the
/// halfwidth symbols U+FFE8..=U+FFEE and the narrow currency/sign characters `¢ £ ¬ ¯ ¦ ¥ ₩`
/// map to their wide forms. Halfwidth Hangul jamo and everything else is kept.
pub fn widen(text: &str) -> String {
    text.chars().map(widen_char).collect()
}

const HALFWIDTH_KATAKANA: [char; 63] = [
    '。', '「', '」', '、', '・', 'ヲ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ッ', 'ー',
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ン', '\u{3099}',
    '\u{309A}',
];

const HALFWIDTH_SYMBOLS: [char; 7] = ['│', '←', '↑', '→', '↓', '■', '○'];

fn widen_char(c: char) -> char {
    match c {
        ' ' => '\u{3000}',
        '!'..='~' => char::from_u32(u32::from(c) + 0xFEE0).unwrap_or(c),
        '¢' => '\u{FFE0}',
        '£' => '\u{FFE1}',
        '¬' => '\u{FFE2}',
        '¯' => '\u{FFE3}',
        '¦' => '\u{FFE4}',
        '¥' => '\u{FFE5}',
        '₩' => '\u{FFE6}',
        '\u{FF61}'..='\u{FF9F}' => HALFWIDTH_KATAKANA[(u32::from(c) - 0xFF61) as usize],
        '\u{FFE8}'..='\u{FFEE}' => HALFWIDTH_SYMBOLS[(u32::from(c) - 0xFFE8) as usize],
        _ => c,
    }
}

/// Characters separated by single spaces (`"ABC"` -> `"A B C"`).
pub fn spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/width.rs"]
mod tests;
