//! # Response Formatter
//!
//! Renders an aggregate report (or the help/fallback templates) into the reply
//! text handed to the chat transport. Output order follows the configured
//! region list, never report iteration order.

use crate::domain::config::{QueryConfig, RegionConfig};
use crate::domain::types::{AggregateReport, RegionResult, ReplyPayload};
use crate::strings::messages;

/// Visual indicator for a variant label. Total and case-insensitive:
/// anything that is not blue or green gets the unrecognized marker.
pub fn indicator(label: &str) -> &'static str {
    match label.to_lowercase().as_str() {
        "blue" => "🔵",
        "green" => "🟢",
        _ => "🪿",
    }
}

/// Render the status reply: greeting plus one line per configured region.
pub fn format_status(
    invoker: &str,
    regions: &[RegionConfig],
    report: &AggregateReport,
    query: &QueryConfig,
) -> ReplyPayload {
    let mut text = messages::greeting(invoker);

    for region in regions {
        // The aggregate invariant guarantees an entry per region; degrade to
        // an unresolved line rather than panic if it is ever violated.
        let fallback = RegionResult::unresolved(&region.name);
        let result = report.get(&region.name).unwrap_or(&fallback);

        text.push_str(&messages::status_line(
            &result.region,
            indicator(result.state.label()),
            result.state.label(),
            &result.build,
            &query.release_base_url,
        ));
    }

    ReplyPayload {
        text,
        accent: Some(query.accent.clone()),
    }
}

/// Render the static help reply.
pub fn format_help(invoker: &str, query: &QueryConfig) -> ReplyPayload {
    ReplyPayload {
        text: format!("{}{}", messages::greeting(invoker), messages::HELP),
        accent: Some(query.accent.clone()),
    }
}

/// Render the fallback reply for unrecognized commands.
pub fn format_fallback(invoker: &str, query: &QueryConfig) -> ReplyPayload {
    ReplyPayload {
        text: format!("{}{}", messages::greeting(invoker), messages::FALLBACK),
        accent: Some(query.accent.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::VariantHosts;
    use crate::domain::types::VariantState;

    fn regions() -> Vec<RegionConfig> {
        ["site1", "site2"]
            .iter()
            .map(|name| RegionConfig {
                name: name.to_string(),
                endpoint: format!("https://{name}.domain.com/get"),
                hosts: VariantHosts {
                    blue: format!("blue.{name}.domain.com"),
                    green: format!("green.{name}.domain.com"),
                },
            })
            .collect()
    }

    #[test]
    fn test_indicator_total_and_case_insensitive() {
        assert_eq!(indicator("blue"), "🔵");
        assert_eq!(indicator("BLUE"), "🔵");
        assert_eq!(indicator("green"), "🟢");
        assert_eq!(indicator("Green"), "🟢");
        assert_eq!(indicator("Unknown"), "🪿");
        assert_eq!(indicator(""), "🪿");
        assert_eq!(indicator("purple"), "🪿");
    }

    #[test]
    fn test_status_lines_follow_config_order() {
        let mut report = AggregateReport::new();
        report.insert(
            "site2".to_string(),
            RegionResult {
                region: "site2".to_string(),
                state: VariantState::Blue,
                build: "2.0.0".to_string(),
                failed: false,
            },
        );
        report.insert(
            "site1".to_string(),
            RegionResult {
                region: "site1".to_string(),
                state: VariantState::Green,
                build: "1.0.0".to_string(),
                failed: false,
            },
        );

        let reply = format_status("Bob", &regions(), &report, &QueryConfig::default());
        let site1_at = reply.text.find("site1").unwrap();
        let site2_at = reply.text.find("site2").unwrap();
        assert!(site1_at < site2_at);
        assert!(reply.text.contains("Hello Bob"));
        assert!(reply.text.contains("🟢"));
        assert!(
            reply
                .text
                .contains("[1.0.0](https://deploy.app.com/releases/1.0.0)")
        );
        assert_eq!(reply.accent.as_deref(), Some("#4af030"));
    }

    #[test]
    fn test_missing_report_entry_degrades_to_unresolved_line() {
        let reply = format_status(
            "Bob",
            &regions(),
            &AggregateReport::new(),
            &QueryConfig::default(),
        );
        assert_eq!(reply.text.matches("🪿").count(), 2);
    }

    #[test]
    fn test_help_and_fallback_are_personalized() {
        let query = QueryConfig::default();
        assert!(format_help("Ada", &query).text.contains("Hello Ada"));
        assert!(format_fallback("Ada", &query).text.contains("Hello Ada"));
        assert!(format_fallback("Ada", &query).text.contains("help"));
    }
}
