//! # Detail Lookup
//!
//! Extracts the deployed build identifier from a host's banner text. The
//! extraction contract is fixed: the label `Build:`, optional whitespace, the
//! value, and the `<br>` terminator. Square brackets framing the value belong
//! to the banner, not the identifier, and are stripped.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::traits::StatusProbe;

fn build_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Build:\s*(.*?)\s*<br>").expect("invalid build pattern"))
}

/// Pull the build identifier out of banner text. First match wins; an absent
/// label yields the empty string, never an error.
pub fn extract_build(text: &str) -> String {
    build_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .to_string()
        })
        .unwrap_or_default()
}

/// Fetch a host's banner and extract the build identifier. Transport failures
/// degrade to an empty detail; "no detail available" is a recoverable outcome.
pub async fn lookup(probe: &dyn StatusProbe, host: &str) -> String {
    match probe.host_banner(host).await {
        Ok(banner) => extract_build(&banner),
        Err(err) => {
            tracing::warn!("Banner fetch from host '{host}' failed: {err:#}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_build() {
        let text = "SUCCESS: ServerName\nBuild: 20210314.1.2730-new-cool-ui-feature<br>\nServer IP: 172.0.0.1";
        assert_eq!(extract_build(text), "20210314.1.2730-new-cool-ui-feature");
    }

    #[test]
    fn test_extract_bracketed_build() {
        let text = "Build: [20210314.1.2730-new-cool-ui-feature]<br>";
        assert_eq!(extract_build(text), "20210314.1.2730-new-cool-ui-feature");
    }

    #[test]
    fn test_extract_first_match_wins() {
        let text = "Build: 1.0.0<br> something Build: 2.0.0<br>";
        assert_eq!(extract_build(text), "1.0.0");
    }

    #[test]
    fn test_extract_missing_label_is_empty() {
        assert_eq!(extract_build("SUCCESS: ServerName"), "");
        assert_eq!(extract_build(""), "");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let text = "Build: 1.2.3<br>";
        let once = extract_build(text);
        assert_eq!(extract_build(&once), "");
        assert_eq!(once, "1.2.3");
    }
}
