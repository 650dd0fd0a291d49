use frontdesk_core::{Language, Persona};
use whatlang::{Detector, Lang};

/// Detects the input language within the persona's allowed set.
///
/// Unicode-block checks run before the statistical classifier: any Sinhala
/// codepoint forces `si`, then any Tamil codepoint forces `ta`. Short
/// inputs routinely confuse the classifier for these scripts; the block
/// check is unambiguous. Detection is infallible and defaults to English.
pub struct LanguageDetector {
    persona: Persona,
    classifier: Detector,
}

impl LanguageDetector {
    pub fn new(persona: Persona) -> Self {
        let allowlist = persona.allowed_languages().iter().map(to_whatlang).collect();
        Self { persona, classifier: Detector::with_allowlist(allowlist) }
    }

    pub fn detect(&self, text: &str) -> Language {
        if self.allows(Language::Si) && text.chars().any(is_sinhala) {
            return Language::Si;
        }
        if self.allows(Language::Ta) && text.chars().any(is_tamil) {
            return Language::Ta;
        }

        self.classifier
            .detect_lang(text)
            .and_then(from_whatlang)
            .filter(|language| self.allows(*language))
            .unwrap_or(Language::En)
    }

    fn allows(&self, language: Language) -> bool {
        self.persona.allowed_languages().contains(&language)
    }
}

fn to_whatlang(language: &Language) -> Lang {
    match language {
        Language::En => Lang::Eng,
        Language::Ta => Lang::Tam,
        Language::Si => Lang::Sin,
    }
}

fn from_whatlang(lang: Lang) -> Option<Language> {
    match lang {
        Lang::Eng => Some(Language::En),
        Lang::Tam => Some(Language::Ta),
        Lang::Sin => Some(Language::Si),
        _ => None,
    }
}

fn is_sinhala(ch: char) -> bool {
    ('\u{0D80}'..='\u{0DFF}').contains(&ch)
}

fn is_tamil(ch: char) -> bool {
    ('\u{0B80}'..='\u{0BFF}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use frontdesk_core::{Language, Persona};

    use super::LanguageDetector;

    #[test]
    fn sinhala_codepoint_overrides_classifier() {
        let detector = LanguageDetector::new(Persona::Insurance);
        // Mostly-English text with a single Sinhala character still routes
        // to the Sinhala template.
        let detected = detector.detect("what is the premium for ජීවිත insurance");
        assert_eq!(detected, Language::Si);
    }

    #[test]
    fn tamil_codepoint_overrides_classifier() {
        let detector = LanguageDetector::new(Persona::Insurance);
        let detected = detector.detect("காப்பீட்டு திட்டங்கள் பற்றி சொல்லுங்கள்");
        assert_eq!(detected, Language::Ta);
    }

    #[test]
    fn sinhala_wins_over_tamil_when_both_present() {
        let detector = LanguageDetector::new(Persona::Insurance);
        let detected = detector.detect("ජීවිත காப்பீடு");
        assert_eq!(detected, Language::Si);
    }

    #[test]
    fn plain_english_detects_as_english() {
        let detector = LanguageDetector::new(Persona::Insurance);
        let detected = detector.detect("What life insurance policies do you offer?");
        assert_eq!(detected, Language::En);
    }

    #[test]
    fn ceramics_persona_always_returns_english() {
        let detector = LanguageDetector::new(Persona::Ceramics);
        assert_eq!(detector.detect("ජීවිත රක්ෂණය"), Language::En);
        assert_eq!(detector.detect("order Legna Castano tile"), Language::En);
    }

    #[test]
    fn empty_input_defaults_to_english() {
        let detector = LanguageDetector::new(Persona::Insurance);
        assert_eq!(detector.detect(""), Language::En);
    }
}
