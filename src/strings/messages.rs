//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.

pub const HELP: &str = concat!(
    "Only one operation is available for now\n",
    "* `active_node` or `!an` - display each site's active node and deployed build\n",
);

pub const FALLBACK: &str = "Try to use 'help' with the bot name\n";

pub fn greeting(name: &str) -> String {
    format!("Hello {name}\n")
}

pub fn status_line(
    region: &str,
    indicator: &str,
    variant: &str,
    build: &str,
    release_base_url: &str,
) -> String {
    format!("{region} is {indicator} {variant} Build [{build}]({release_base_url}/{build})\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_links_build() {
        let line = status_line(
            "site1",
            "🟢",
            "Green",
            "1.0.0",
            "https://deploy.app.com/releases",
        );
        assert_eq!(
            line,
            "site1 is 🟢 Green Build [1.0.0](https://deploy.app.com/releases/1.0.0)\n"
        );
    }
}
