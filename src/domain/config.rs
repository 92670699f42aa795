use serde::Deserialize;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    pub regions: Vec<RegionConfig>,
    #[serde(default)]
    pub query: QueryConfig,
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One independently-operated deployment region: the balancer endpoint that
/// reports its active farm, plus the two hosts it can be serving from.
#[derive(Debug, Deserialize, Clone)]
pub struct RegionConfig {
    pub name: String,
    pub endpoint: String,
    pub hosts: VariantHosts,
}

/// The blue/green host pair behind a region's balancer.
#[derive(Debug, Deserialize, Clone)]
pub struct VariantHosts {
    pub blue: String,
    pub green: String,
}

/// Settings applied to every status-query cycle.
#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    /// Upper bound on one region's classify+lookup pipeline, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Base URL the build identifier is linked against in replies.
    #[serde(default = "default_release_base_url")]
    pub release_base_url: String,
    /// Accent color attached to outgoing replies, opaque to the core.
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_release_base_url() -> String {
    "https://deploy.app.com/releases".to_string()
}

fn default_accent() -> String {
    "#4af030".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            release_base_url: default_release_base_url(),
            accent: default_accent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
services:
  matrix:
    username: lookout
    password: secret
    homeserver: https://matrix.example.org
    display_name: lookout

regions:
  - name: site1
    endpoint: https://api1.domain.com/get
    hosts:
      blue: ServerBlue1.domain.com
      green: ServerGreen1.domain.com
  - name: site2
    endpoint: https://api2.domain.com/get
    hosts:
      blue: ServerBlue2.domain.com
      green: ServerGreen2.domain.com

query:
  timeout_secs: 5
"#;

    #[test]
    fn test_parse_sample_config() {
        let config: AppConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[0].name, "site1");
        assert_eq!(config.regions[1].hosts.green, "ServerGreen2.domain.com");
        assert_eq!(config.query.timeout_secs, 5);
        assert_eq!(
            config.query.release_base_url,
            "https://deploy.app.com/releases"
        );
        assert_eq!(config.query.accent, "#4af030");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let config: AppConfig = serde_yaml::from_str(&content).unwrap();
        assert_eq!(config.services.matrix.username, "lookout");
    }

    #[test]
    fn test_query_section_optional() {
        let trimmed = SAMPLE.replace("query:\n  timeout_secs: 5\n", "");
        let config: AppConfig = serde_yaml::from_str(&trimmed).unwrap();
        assert_eq!(config.query.timeout_secs, 10);
    }
}
