//! Locale tags the catalog loaders recognise.
//!
//! Folder names outside this list still load; they just produce a warning so a
//! typo like `en_US` is caught early.

/// Common BCP 47 language and language-region tags, ASCII-sorted for binary
/// search.
pub(crate) static LOCALES: &[&str] = &[
    "ar", "ar-EG", "ar-SA", "bg", "bg-BG", "ca", "ca-ES", "cs", "cs-CZ", "da", "da-DK", "de",
    "de-AT", "de-CH", "de-DE", "el", "el-GR", "en", "en-AU", "en-CA", "en-GB", "en-IE", "en-IN",
    "en-NZ", "en-US", "es", "es-AR", "es-CL", "es-ES", "es-MX", "et", "et-EE", "fi", "fi-FI",
    "fr", "fr-BE", "fr-CA", "fr-CH", "fr-FR", "he", "he-IL", "hi", "hi-IN", "hr", "hr-HR", "hu",
    "hu-HU", "id", "id-ID", "it", "it-CH", "it-IT", "ja", "ja-JP", "ko", "ko-KR", "lt", "lt-LT",
    "lv", "lv-LV", "ms", "ms-MY", "nb", "nb-NO", "nl", "nl-BE", "nl-NL", "pl", "pl-PL", "pt",
    "pt-BR", "pt-PT", "ro", "ro-MD", "ro-RO", "ru", "ru-RU", "sk", "sk-SK", "sl", "sl-SI", "sr",
    "sr-RS", "sv", "sv-SE", "th", "th-TH", "tr", "tr-TR", "uk", "uk-UA", "vi", "vi-VN", "zh",
    "zh-CN", "zh-HK", "zh-TW",
];

/// True when the tag appears in the recognised list.
pub(crate) fn is_known_locale_tag(tag: &str) -> bool {
    LOCALES.binary_search(&tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_sorted_for_binary_search() {
        assert!(LOCALES.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn shipped_locales_are_recognised() {
        assert!(is_known_locale_tag("en-US"));
        assert!(is_known_locale_tag("ro-RO"));
        assert!(!is_known_locale_tag("en_US"));
    }
}
