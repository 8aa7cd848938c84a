//! Classification of free text that is not a recognized command.

/// Substrings that make a message a greeting rather than a city name.
///
/// Matched against the trimmed, lower-cased text, so the capitalized entry
/// only documents the greeting, it never matches on its own.
pub const GREETINGS: &[&str] = &["Привіт", "привіт", "hi", "hello", "вітаю", "доброго дня"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    City(String),
    /// Unknown `/command`, left unanswered.
    Ignore,
}

pub fn classify(text: &str) -> Intent {
    let text = text.trim().to_lowercase();

    if text.starts_with('/') {
        return Intent::Ignore;
    }

    if GREETINGS.iter().any(|greet| text.contains(greet)) {
        return Intent::Greeting;
    }

    Intent::City(text)
}
