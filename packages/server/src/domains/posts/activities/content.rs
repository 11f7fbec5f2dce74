use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

const WORDS_PER_MINUTE: usize = 200;

/// URL-safe slug: lower-cased, runs of non-alphanumerics collapsed to one
/// hyphen, no leading or trailing hyphens.
///
/// ```
/// use mindbridge_core::domains::posts::slugify;
/// assert_eq!(slugify("  Anxiety & You: 5 Tips! "), "anxiety-you-5-tips");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// "N min read" for an HTML body, at 200 words per minute, never below 1
pub fn estimate_read_time(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, " ");
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("--Already--Hyphenated--"), "already-hyphenated");
        assert_eq!(slugify("Self-Care 101: A Guide"), "self-care-101-a-guide");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Thérapie"), "caf-th-rapie");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let samples = [
            "Hello World",
            "  Mixed CASE & symbols!! ",
            "émoji 🙂 test",
            "already-a-slug",
            "",
            "---",
        ];
        for sample in samples {
            let once = slugify(sample);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_read_time_counts_words_not_tags() {
        let short = "<p>one two three</p>";
        assert_eq!(estimate_read_time(short), "1 min read");

        let long = format!("<p>{}</p>", "word ".repeat(401));
        assert_eq!(estimate_read_time(&long), "3 min read");

        assert_eq!(estimate_read_time(""), "1 min read");
    }
}
