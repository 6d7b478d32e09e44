//! URL utilities for building generative-language endpoints
//!
//! Base URLs come from config files and environment variables, so they may
//! carry trailing slashes. These helpers keep the final endpoint free of
//! doubled separators.

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use gemchat::utils::url::normalize_base_url;
///
/// assert_eq!(
///     normalize_base_url("https://generativelanguage.googleapis.com/v1beta/"),
///     "https://generativelanguage.googleapis.com/v1beta"
/// );
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Build the `generateContent` endpoint for a model.
///
/// The model id may be given bare (`gemini-1.5-flash`) or in resource form
/// (`models/gemini-1.5-flash`). The credential is not part of the returned
/// URL; it is attached as a query parameter by the client.
///
/// # Examples
///
/// ```
/// use gemchat::utils::url::generate_content_url;
///
/// assert_eq!(
///     generate_content_url("https://generativelanguage.googleapis.com/v1beta", "gemini-1.5-flash"),
///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
/// );
/// ```
pub fn generate_content_url(base_url: &str, model: &str) -> String {
    let model = model.trim().trim_start_matches('/');
    let model = model.strip_prefix("models/").unwrap_or(model);
    format!(
        "{}/models/{}:generateContent",
        normalize_base_url(base_url),
        model
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://example.com/v1beta"),
            "https://example.com/v1beta"
        );
        assert_eq!(
            normalize_base_url("https://example.com/v1beta///"),
            "https://example.com/v1beta"
        );
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url("http://127.0.0.1:8080/v1beta/", "gemini-pro"),
            "http://127.0.0.1:8080/v1beta/models/gemini-pro:generateContent"
        );

        // Resource-style model names are accepted as-is
        assert_eq!(
            generate_content_url("http://127.0.0.1:8080/v1beta", "models/gemini-pro"),
            "http://127.0.0.1:8080/v1beta/models/gemini-pro:generateContent"
        );

        // Stray whitespace from config files
        assert_eq!(
            generate_content_url("http://127.0.0.1:8080", " gemini-pro "),
            "http://127.0.0.1:8080/models/gemini-pro:generateContent"
        );
    }
}
