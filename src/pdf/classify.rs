//! Text-sufficiency policy deciding TEXT vs IMAGE routing.
//!
//! This single predicate is the entire routing policy. It deliberately does
//! not look at page count, language, or encoding.

/// Default minimum number of extractable characters for TEXT routing.
pub const DEFAULT_TEXT_THRESHOLD: usize = 100;

/// Routing decision for a document's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Enough extractable text; route to a text model.
    Text,
    /// Scan-like document; route to a vision model over page images.
    Image,
}

/// Classifies extracted text against the threshold.
///
/// `Text` iff the trimmed text is non-empty and its character count is at
/// least `threshold`. Empty or whitespace-only text is always insufficient,
/// including at threshold 0, since there is nothing to extract from.
pub fn classify(text: &str, threshold: usize) -> ContentKind {
    if has_extractable_text(text, threshold) {
        ContentKind::Text
    } else {
        ContentKind::Image
    }
}

pub(crate) fn has_extractable_text(text: &str, threshold: usize) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_when_trimmed_length_meets_threshold() {
        assert_eq!(classify("a".repeat(100).as_str(), 100), ContentKind::Text);
        assert_eq!(classify("short", 5), ContentKind::Text);
        assert_eq!(classify("  padded  ", 6), ContentKind::Text);
    }

    #[test]
    fn image_when_below_threshold() {
        assert_eq!(classify("short", 6), ContentKind::Image);
        assert_eq!(classify("a".repeat(99).as_str(), 100), ContentKind::Image);
    }

    #[test]
    fn empty_and_whitespace_are_always_image() {
        // Stricter rule: even threshold 0 never accepts empty input.
        assert_eq!(classify("", 0), ContentKind::Image);
        assert_eq!(classify("   \n\t ", 0), ContentKind::Image);
        assert_eq!(classify("", 1), ContentKind::Image);
        assert_eq!(classify(" \x0C ", 50), ContentKind::Image);
    }

    #[test]
    fn threshold_zero_accepts_any_nonempty_text() {
        assert_eq!(classify("x", 0), ContentKind::Text);
    }

    #[test]
    fn length_is_counted_in_characters() {
        // Multi-byte characters count once each.
        assert_eq!(classify("日本語テキスト", 7), ContentKind::Text);
        assert_eq!(classify("日本語テキスト", 8), ContentKind::Image);
    }
}
