//! Shared constants used across the application

/// Assistant text used when a successful response carries no candidate text.
pub const FALLBACK_REPLY: &str = "I apologize, but I couldn't generate a response.";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Prompts offered on the welcome screen and by `Alt+1`..`Alt+4`.
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Explain quantum computing in simple terms",
    "Write a creative story about a time traveler",
    "What are the best practices for React development?",
    "How does artificial intelligence work?",
];

/// Description used when a failed request produced an empty error message.
pub const GENERIC_ERROR_DESCRIPTION: &str = "An error occurred while fetching the response";
