//! Text shortening for table cells.

use std::borrow::Cow;

/// Appended to shortened text.
pub const ELLIPSIS: &str = "…";

/// Shorten `text` to at most `max_len` characters plus [`ELLIPSIS`].
///
/// Length is counted in Unicode scalar values, so a multi-byte character is
/// never split. Text that already fits is borrowed unchanged.
///
/// ```
/// use atelier_present::truncate;
///
/// assert_eq!(truncate("Spring sale", 6), "Spring…");
/// assert_eq!(truncate("Short", 10), "Short");
/// ```
pub fn truncate(text: &str, max_len: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_len) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            let mut short = String::with_capacity(cut + ELLIPSIS.len());
            short.push_str(&text[..cut]);
            short.push_str(ELLIPSIS);
            Cow::Owned(short)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_length_is_borrowed() {
        assert!(matches!(truncate("abcde", 5), Cow::Borrowed("abcde")));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(truncate("crème brûlée", 5), "crème…");
        assert_eq!(truncate("日本語のテキスト", 3), "日本語…");
    }

    #[test]
    fn zero_length_leaves_only_ellipsis() {
        assert_eq!(truncate("abc", 0), ELLIPSIS);
        assert_eq!(truncate("", 0), "");
    }
}
