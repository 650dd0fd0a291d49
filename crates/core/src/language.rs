use serde::{Deserialize, Serialize};

/// Languages the assistants can answer in. The detector only ever returns a
/// member of the active persona's `allowed_languages` set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ta,
    Si,
}

impl Language {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ta => "ta",
            Self::Si => "si",
        }
    }
}

/// The two businesses served by this codebase. The persona decides which
/// languages are detected, which prompt templates exist, and whether the
/// order-confirmation and image-forwarding side branches are available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Ceramics,
    Insurance,
}

impl Persona {
    pub fn allowed_languages(&self) -> &'static [Language] {
        match self {
            Self::Ceramics => &[Language::En],
            Self::Insurance => &[Language::En, Language::Ta, Language::Si],
        }
    }

    /// Seed assistant message shown when a chat session opens.
    pub fn greeting(&self) -> &'static str {
        match self {
            Self::Ceramics => {
                "Hey there! Welcome to Niro Ceramic Group - your go-to place for all \
                 things tiles, mosaics, and more! Drop your question, and let's explore together!"
            }
            Self::Insurance => {
                "Hello and welcome! You're in the right place to explore Ceylinco Life. \
                 Just ask your question, and let's dive into the details!"
            }
        }
    }

    /// Default completion model when `[llm].model` is not configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Ceramics => "llama3-8b-8192",
            Self::Insurance => "llama3-70b-8192",
        }
    }

    /// Default response-length bound when `[llm].max_tokens` is not
    /// configured. The ceramics flow keeps replies short to stay inside the
    /// hosted API's token limits.
    pub fn default_max_tokens(&self) -> u32 {
        match self {
            Self::Ceramics => 500,
            Self::Insurance => 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Language, Persona};

    #[test]
    fn ceramics_persona_is_english_only() {
        assert_eq!(Persona::Ceramics.allowed_languages(), &[Language::En]);
    }

    #[test]
    fn insurance_persona_supports_three_languages() {
        let langs = Persona::Insurance.allowed_languages();
        assert!(langs.contains(&Language::En));
        assert!(langs.contains(&Language::Ta));
        assert!(langs.contains(&Language::Si));
    }

    #[test]
    fn per_persona_model_defaults() {
        assert_eq!(Persona::Ceramics.default_model(), "llama3-8b-8192");
        assert_eq!(Persona::Insurance.default_max_tokens(), 1024);
    }
}
