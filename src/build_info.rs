//! Build metadata
//!
//! `build.rs` stamps a build number and UTC timestamp into the environment;
//! both fall back to placeholders when the crate is built without it.

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version and build stamp of the running binary
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: VERSION,
            build_number: parse_build_number(option_env!("MEALPLAN_BUILD_NUMBER")),
            build_timestamp: option_env!("MEALPLAN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }

    /// One line, e.g. `mealplan 1.0.0 (build 12, 2026-10-18T09:00:00Z)`
    pub fn summary(&self) -> String {
        format!(
            "{} {} (build {}, {})",
            self.name, self.version, self.build_number, self.build_timestamp
        )
    }
}

fn parse_build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Startup banner on stderr; stdout carries the MCP transport
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("Meal Planner - recipes, meal plans and grocery lists");
    eprintln!("  {}", info.summary());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_number() {
        assert_eq!(parse_build_number(Some("42")), 42);
        assert_eq!(parse_build_number(Some(" 7\n")), 7);
        assert_eq!(parse_build_number(Some("4x")), 0);
        assert_eq!(parse_build_number(None), 0);
    }

    #[test]
    fn test_summary() {
        let info = BuildInfo {
            name: "mealplan",
            version: "1.0.0",
            build_number: 12,
            build_timestamp: "2026-10-18T09:00:00Z",
        };
        assert_eq!(info.summary(), "mealplan 1.0.0 (build 12, 2026-10-18T09:00:00Z)");
    }
}
