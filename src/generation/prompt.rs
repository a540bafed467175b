//! Prompt construction for article generation.
//!
//! Pure string templating; the output must stay stable because downstream
//! behavior (title-on-first-line) depends on the instructions given here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Technical,
    Friendly,
}

impl Tone {
    fn instruction(&self) -> &'static str {
        match self {
            Tone::Professional => "professional and informative",
            Tone::Casual => "casual and conversational",
            Tone::Technical => "technical and precise",
            Tone::Friendly => "friendly and approachable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthBand {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthBand {
    /// Approximate character-count range requested from the model.
    fn char_range(&self) -> (u32, u32) {
        match self {
            LengthBand::Short => (600, 800),
            LengthBand::Medium => (1200, 1600),
            LengthBand::Long => (2400, 3200),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationPrompt {
    pub keyword: String,
    pub tone: Tone,
    pub length: LengthBand,
    pub include_introduction: bool,
    pub include_conclusion: bool,
    pub include_sources: bool,
}

impl GenerationPrompt {
    pub fn for_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            tone: Tone::default(),
            length: LengthBand::default(),
            include_introduction: true,
            include_conclusion: true,
            include_sources: false,
        }
    }
}

/// Build the single instruction block sent to every provider.
pub fn build_prompt(prompt: &GenerationPrompt) -> String {
    let (min_chars, max_chars) = prompt.length.char_range();

    let mut lines = vec![
        format!("Write a blog article about \"{}\".", prompt.keyword),
        format!("Tone: {}.", prompt.tone.instruction()),
        format!(
            "Target length: approximately {}-{} characters.",
            min_chars, max_chars
        ),
    ];

    if prompt.include_introduction {
        lines.push("Open with a short introduction that frames the topic.".to_string());
    }
    if prompt.include_conclusion {
        lines.push("Close with a conclusion section.".to_string());
    }
    if prompt.include_sources {
        lines.push("List the sources you drew on at the end.".to_string());
    }

    lines.push("Put the article title alone on the first line, then the body.".to_string());
    lines.push("Format the body with Markdown headings.".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_is_stable() {
        let prompt = GenerationPrompt::for_keyword("rust async");
        let expected = "\
Write a blog article about \"rust async\".
Tone: professional and informative.
Target length: approximately 1200-1600 characters.
Open with a short introduction that frames the topic.
Close with a conclusion section.
Put the article title alone on the first line, then the body.
Format the body with Markdown headings.";
        assert_eq!(build_prompt(&prompt), expected);
    }

    #[test]
    fn test_optional_sections_toggle() {
        let mut prompt = GenerationPrompt::for_keyword("seo");
        prompt.include_introduction = false;
        prompt.include_conclusion = false;
        prompt.include_sources = true;

        let built = build_prompt(&prompt);
        assert!(!built.contains("introduction"));
        assert!(!built.contains("conclusion"));
        assert!(built.contains("List the sources"));
    }

    #[test]
    fn test_length_bands() {
        let mut prompt = GenerationPrompt::for_keyword("k");
        prompt.length = LengthBand::Short;
        assert!(build_prompt(&prompt).contains("600-800"));
        prompt.length = LengthBand::Long;
        assert!(build_prompt(&prompt).contains("2400-3200"));
    }

    #[test]
    fn test_tone_wording() {
        let mut prompt = GenerationPrompt::for_keyword("k");
        prompt.tone = Tone::Technical;
        assert!(build_prompt(&prompt).contains("Tone: technical and precise."));
    }
}
