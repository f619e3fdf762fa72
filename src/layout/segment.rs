//! Caption segmentation: split long caption lines and share out their time
//! windows proportionally.
//!
//! Used when building a document from per-scene captions and durations, so
//! each displayed line fits the canvas and holds the screen for a share of
//! its scene proportional to its length.

use crate::foundation::clock::TimelineSpan;

/// Longest caption line, in characters, before splitting kicks in.
pub const MAX_LINE_CHARS: usize = 25;

/// Split delimiters in priority order: sentence enders first, then pauses.
const SPLIT_PRIORITY: [char; 11] = ['。', '！', '？', '，', ',', '：', ':', '、', '；', ';', ' '];

/// Placeholder emitted for captions that are empty after cleaning.
const EMPTY_PLACEHOLDER: &str = "[无内容]";

/// Split `text` into fragments no longer than `max_chars` characters.
///
/// Prefers breaking just after a delimiter from [`SPLIT_PRIORITY`]; falls
/// back to a hard split at the character limit.
pub fn split_long_phrase(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return vec![text.to_string()];
    }

    for delim in SPLIT_PRIORITY {
        // Rightmost delimiter strictly inside the window.
        if let Some(pos) = chars[..max_chars].iter().rposition(|&c| c == delim) {
            if pos > 0 {
                let head: String = chars[..=pos].iter().collect();
                let tail: String = chars[pos + 1..].iter().collect();
                let mut out = vec![head.trim().to_string()];
                out.extend(split_long_phrase(tail.trim(), max_chars));
                return out;
            }
        }
    }

    let head: String = chars[..max_chars].iter().collect();
    let tail: String = chars[max_chars..].iter().collect();
    let mut out = vec![head.trim().to_string()];
    out.extend(split_long_phrase(tail.trim(), max_chars));
    out
}

/// Whether a character is decorative punctuation stripped from captions.
fn is_decorative(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}'   // CJK symbols and punctuation
        | '\u{FF00}'..='\u{FFEF}' // fullwidth forms
        | '\u{2000}'..='\u{206F}' // general punctuation
    ) || matches!(
        c,
        '!' | '"' | '#' | '$' | '%' | '&' | '\'' | '(' | ')' | '*' | '+' | '-' | '.' | '/'
            | '<' | '=' | '>' | '?' | '@' | '\\' | '^' | '_' | '`' | '{' | '|' | '}' | '~'
    )
}

fn clean(text: &str) -> String {
    text.chars().filter(|&c| !is_decorative(c)).collect::<String>().trim().to_string()
}

/// Segment scene captions into display lines with proportional time windows.
///
/// Each caption owns the window `[cursor, cursor + duration)`; its fragments
/// divide that window proportionally to their character counts, the last
/// fragment absorbing rounding remainder so windows stay contiguous.
/// Returns paired, same-length span and text vectors starting at `start_us`.
pub fn segment_captions(
    captions: &[String],
    durations_us: &[u64],
    start_us: u64,
) -> (Vec<TimelineSpan>, Vec<String>) {
    let mut texts = Vec::new();
    let mut durations = Vec::new();

    for (text, &total) in captions.iter().zip(durations_us) {
        let fragments: Vec<String> = split_long_phrase(text, MAX_LINE_CHARS)
            .iter()
            .map(|p| clean(p))
            .filter(|p| !p.is_empty())
            .collect();

        if fragments.is_empty() {
            texts.push(EMPTY_PLACEHOLDER.to_string());
            durations.push(total);
            continue;
        }

        let total_chars: u64 = fragments.iter().map(|f| f.chars().count() as u64).sum();
        let mut accumulated = 0u64;
        let last = fragments.len() - 1;
        for (i, fragment) in fragments.into_iter().enumerate() {
            // Flooring keeps the running sum within the window, so the last
            // fragment's remainder can never underflow.
            let share = if i == last {
                total - accumulated
            } else {
                total * fragment.chars().count() as u64 / total_chars
            };
            accumulated += share;
            texts.push(fragment);
            durations.push(share);
        }
    }

    let mut spans = Vec::with_capacity(durations.len());
    let mut cursor = start_us;
    for d in durations {
        spans.push(TimelineSpan {
            start: crate::foundation::clock::Micros(cursor),
            end: crate::foundation::clock::Micros(cursor + d.max(1)),
        });
        cursor += d.max(1);
    }
    (spans, texts)
}
