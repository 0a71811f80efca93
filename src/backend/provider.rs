//! Provider selection from configured API keys.

/// Everything needed to construct a client for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub name: &'static str,
    pub base_url: &'static str,
    pub model: &'static str,
    pub api_key: String,
}

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-4o";

/// Reject keys that are empty, template leftovers, or too short to be real.
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || key.contains("your_key") || key.contains("sk-proj-XXX") || key.len() < 20
}

/// Pick a provider from the configured keys. Groq wins when both keys are
/// usable; `None` when neither is.
pub fn select_provider(groq_key: Option<&str>, openai_key: Option<&str>) -> Option<ProviderProfile> {
    if let Some(key) = groq_key.filter(|k| !is_placeholder_key(k)) {
        return Some(ProviderProfile {
            name: "GROQ",
            base_url: GROQ_BASE_URL,
            model: GROQ_MODEL,
            api_key: key.trim().to_string(),
        });
    }
    if let Some(key) = openai_key.filter(|k| !is_placeholder_key(k)) {
        return Some(ProviderProfile {
            name: "OPENAI",
            base_url: OPENAI_BASE_URL,
            model: OPENAI_MODEL,
            api_key: key.trim().to_string(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const REAL_KEY: &str = "gsk_0123456789abcdefghijklmnop";
    const OTHER_KEY: &str = "sk-0123456789abcdefghijklmnop";

    #[test]
    fn placeholder_keys_are_rejected() {
        assert!(is_placeholder_key(""));
        assert!(is_placeholder_key("   "));
        assert!(is_placeholder_key("your_key_here"));
        assert!(is_placeholder_key("sk-proj-XXXXXXXX-padding-to-length"));
        assert!(is_placeholder_key("short"));
        assert!(!is_placeholder_key(REAL_KEY));
    }

    #[test]
    fn groq_wins_when_both_keys_are_usable() {
        let profile = select_provider(Some(REAL_KEY), Some(OTHER_KEY)).unwrap();
        assert_eq!(profile.name, "GROQ");
        assert_eq!(profile.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn openai_is_the_second_choice() {
        let profile = select_provider(Some("your_key"), Some(OTHER_KEY)).unwrap();
        assert_eq!(profile.name, "OPENAI");
        assert_eq!(profile.model, "gpt-4o");
        assert_eq!(profile.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn no_usable_key_means_no_provider() {
        assert_eq!(select_provider(None, None), None);
        assert_eq!(select_provider(Some(""), Some("short")), None);
    }
}
