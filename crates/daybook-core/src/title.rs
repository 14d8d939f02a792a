use std::sync::OnceLock;

use regex::Regex;

/// In-title marker elevating a task or habit to priority status.
pub const PRIORITY_GLYPH: char = '🎯';

/// Metadata parsed out of a free-text title. Derived on demand, never
/// stored; the title string a user typed is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMeta {
    pub base_title: String,
    pub tags: Vec<String>,
    pub priority: bool,
}

/// Split a title into display words, `#tags` and a priority flag.
///
/// Tokens containing the priority glyph set the flag and lose the glyph; a
/// token starting with `#` becomes a tag once characters outside `[#\w-]`
/// are stripped and more than the `#` remains, and otherwise vanishes
/// entirely. Everything else joins the base title.
#[must_use]
pub fn parse_title(raw: &str) -> TitleMeta {
    let mut meta = TitleMeta::default();
    let mut base_words: Vec<String> = Vec::new();

    for token in raw.split_whitespace() {
        let mut word = token.to_string();

        if word.contains(PRIORITY_GLYPH) {
            meta.priority = true;
            word = word
                .replace(PRIORITY_GLYPH, "")
                .trim()
                .to_string();
            if word.is_empty() {
                continue;
            }
        }

        if word.starts_with('#') {
            if let Some(tag) = clean_tag_token(&word) {
                meta.tags.push(tag);
            }
            continue;
        }

        base_words.push(word);
    }

    meta.base_title = base_words.join(" ");
    meta
}

fn clean_tag_token(token: &str) -> Option<String> {
    static TAG_CHARSET: OnceLock<Option<Regex>> = OnceLock::new();
    let charset = TAG_CHARSET
        .get_or_init(|| Regex::new(r"[^#\w-]").ok())
        .as_ref()?;

    let cleaned = charset.replace_all(token, "");
    if cleaned.chars().count() > 1 {
        Some(cleaned.into_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_title, PRIORITY_GLYPH};

    #[test]
    fn plain_title_passes_through() {
        let meta = parse_title("Buy milk");
        assert_eq!(meta.base_title, "Buy milk");
        assert!(meta.tags.is_empty());
        assert!(!meta.priority);
    }

    #[test]
    fn glyph_and_tag_are_extracted() {
        let meta = parse_title("Finish report 🎯 #work");
        assert_eq!(meta.base_title, "Finish report");
        assert_eq!(meta.tags, vec!["#work".to_string()]);
        assert!(meta.priority);
    }

    #[test]
    fn glyph_attached_to_a_word_keeps_the_word() {
        let meta = parse_title("Ship🎯 the release");
        assert_eq!(meta.base_title, "Ship the release");
        assert!(meta.priority);
    }

    #[test]
    fn tags_keep_word_chars_and_hyphens_only() {
        let meta = parse_title("review #to-do! #a,b");
        assert_eq!(meta.base_title, "review");
        assert_eq!(meta.tags, vec!["#to-do".to_string(), "#ab".to_string()]);
    }

    #[test]
    fn degenerate_tag_tokens_vanish() {
        // Cleanup leaves a bare '#': neither a tag nor a title word.
        let meta = parse_title("run #! 🎯# laps");
        assert_eq!(meta.base_title, "run laps");
        assert!(meta.tags.is_empty());
        assert!(meta.priority);
    }

    #[test]
    fn base_title_never_leaks_markers() {
        let meta = parse_title("🎯 deep #focus work 🎯 #deep-work now");
        assert!(!meta.base_title.contains('#'));
        assert!(!meta.base_title.contains(PRIORITY_GLYPH));
        assert_eq!(meta.base_title, "deep work now");
        assert_eq!(
            meta.tags,
            vec!["#focus".to_string(), "#deep-work".to_string()]
        );
    }

    #[test]
    fn tag_case_is_preserved_for_display() {
        let meta = parse_title("gym #Health");
        assert_eq!(meta.tags, vec!["#Health".to_string()]);
    }
}
