use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use super::{LoggerFormat, LoggerLevel};

/// Logger configuration, usually a section of the daemon config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` expression, e.g. `"info"` or `"topo_core=debug,info"`.
    pub level: LoggerLevel,
    /// Print the event target (module path).
    pub with_targets: bool,
    /// Include the enclosing span chain in JSON output.
    ///
    /// Deployment attempts run inside a span carrying the attempt id.
    pub with_spans: bool,
    /// ANSI colors for text output; ignored when stdout is not a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            with_spans: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Whether text output should be colored right now.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = LoggerConfig::default();

        assert_eq!(config.format, LoggerFormat::Text);
        assert_eq!(config.level.as_str(), "info");
        assert!(config.with_targets);
        assert!(config.with_spans);
        assert!(config.use_color);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: LoggerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.format, LoggerFormat::default());
        assert_eq!(config.level.as_str(), LoggerLevel::default().as_str());
    }

    #[test]
    fn reads_yaml_section() {
        let yaml = "format: json\nlevel: topo_core=debug,info\nwithSpans: false\n";
        let config: LoggerConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "topo_core=debug,info");
        assert!(!config.with_spans);
        assert!(config.with_targets);
    }

    #[test]
    fn invalid_level_fails_deserialization() {
        let err = serde_yaml::from_str::<LoggerConfig>("level: topo_core=loud\n").unwrap_err();
        assert!(err.to_string().contains("topo_core=loud"));
    }

    #[test]
    fn color_requires_opt_in() {
        let config = LoggerConfig {
            use_color: false,
            ..Default::default()
        };
        assert!(!config.should_use_color());
    }
}
