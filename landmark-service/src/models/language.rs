/// Reply languages the prompts can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Turkish,
    #[default]
    English,
    German,
    French,
    Spanish,
    Italian,
    Japanese,
    Chinese,
}

const LANGUAGES: [(&str, Language); 8] = [
    ("tr", Language::Turkish),
    ("en", Language::English),
    ("de", Language::German),
    ("fr", Language::French),
    ("es", Language::Spanish),
    ("it", Language::Italian),
    ("ja", Language::Japanese),
    ("zh", Language::Chinese),
];

impl Language {
    /// Unknown or missing codes fall back to English.
    pub fn from_code(code: Option<&str>) -> Self {
        let Some(code) = code.map(str::trim) else {
            return Language::default();
        };

        LANGUAGES
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|(_, lang)| *lang)
            .unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        LANGUAGES
            .iter()
            .find(|(_, lang)| *lang == self)
            .map(|(c, _)| *c)
            .unwrap_or("en")
    }

    /// Name used inside prompts ("Respond in ...").
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Turkish => "Türkçe",
            Language::English => "English",
            Language::German => "German",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::Chinese => "Chinese",
        }
    }
}
