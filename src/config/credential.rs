//! API key input validation.

/// Prefix every OpenAI secret key starts with.
pub const API_KEY_PREFIX: &str = "sk-";

/// Validate a candidate API key typed by the user.
///
/// Returns the reason to show when the input is rejected.
pub fn validate_api_key(input: &str) -> Result<(), &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("API key is required");
    }
    if !trimmed.starts_with(API_KEY_PREFIX) {
        return Err("API key must start with \"sk-\"");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_key() {
        assert!(validate_api_key("sk-abc123").is_ok());
        assert!(validate_api_key("sk-proj-XYZ").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(validate_api_key(""), Err("API key is required"));
        assert_eq!(validate_api_key("   \t "), Err("API key is required"));
    }

    #[test]
    fn test_rejects_missing_prefix() {
        assert_eq!(
            validate_api_key("pk-abc"),
            Err("API key must start with \"sk-\"")
        );
        assert!(validate_api_key("SK-abc").is_err());
        assert!(validate_api_key("abc sk-").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert!(validate_api_key("  sk-abc  ").is_ok());
    }
}
