//! Console configuration.
//!
//! The host owns a [`ConsoleConfig`] and hands it to the console, which
//! treats it as immutable. Loaded from `console.toml`; every field is
//! optional and falls back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Color, parse_hex_color};
use crate::error::{ConsoleError, Result};
use crate::severity::Severity;

/// Which characters a command name may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Alphanumeric characters only.
    #[default]
    Strict,
    /// Anything except whitespace.
    Relaxed,
}

impl NamePolicy {
    /// Whether `name` is acceptable under this policy.
    pub fn accepts(self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self {
            Self::Strict => name.chars().all(char::is_alphanumeric),
            Self::Relaxed => !name.chars().any(char::is_whitespace),
        }
    }
}

/// Colors used when rendering console output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleTheme {
    /// Regular output.
    pub message: String,
    /// Warnings (ambiguous or unknown commands, mirrored warnings).
    pub warning: String,
    /// Errors (argument, invocation and mirrored errors).
    pub error: String,
    /// Input prompt.
    pub prompt: String,
}

impl Default for ConsoleTheme {
    fn default() -> Self {
        Self {
            message: "#FFFFFF".to_string(),
            warning: "#FFEB04".to_string(),
            error: "#FF0000".to_string(),
            prompt: "#00FF00".to_string(),
        }
    }
}

impl ConsoleTheme {
    pub fn message_color(&self) -> Color {
        parse_hex_color(&self.message).unwrap_or(Color::WHITE)
    }

    pub fn warning_color(&self) -> Color {
        parse_hex_color(&self.warning).unwrap_or(Color::YELLOW)
    }

    pub fn error_color(&self) -> Color {
        parse_hex_color(&self.error).unwrap_or(Color::RED)
    }

    pub fn prompt_color(&self) -> Color {
        parse_hex_color(&self.prompt).unwrap_or(Color::GREEN)
    }

    /// Color for a line of the given severity.
    pub fn color_for(&self, severity: Severity) -> Color {
        match severity {
            Severity::Message => self.message_color(),
            Severity::Warning => self.warning_color(),
            Severity::Error => self.error_color(),
        }
    }

    /// `text` wrapped in a rich-text color tag for its severity.
    pub fn markup(&self, text: &str, severity: Severity) -> String {
        format!("<color={}>{text}</color>", self.color_for(severity).to_hex(true))
    }
}

/// Options consumed by the command core and the console session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub theme: ConsoleTheme,

    /// Print the command listing when the console is enabled.
    pub print_help_on_enable: bool,
    /// Print the command listing after `clear`.
    pub print_help_on_clear: bool,
    /// Clear the display when the console is enabled.
    pub clear_on_enable: bool,

    /// Admit private commands into registry builds.
    pub allow_private_commands: bool,
    /// Character rule applied to command names at build time.
    pub name_policy: NamePolicy,

    /// Keep mirroring log records while the console is disabled.
    pub intercept_when_disabled: bool,
    /// Mirror info/debug/trace records.
    pub intercept_messages: bool,
    /// Mirror warn records.
    pub intercept_warnings: bool,
    /// Mirror error records.
    pub intercept_errors: bool,
    /// Append the source location to mirrored messages.
    pub include_location_on_message: bool,
    /// Append the source location to mirrored warnings and errors.
    pub include_location_on_errors: bool,

    /// Shown when a command returns no value.
    pub void_command_feedback: String,
    /// Joins collection elements on output.
    pub collection_separator_output: String,
    /// Splits array arguments on input.
    pub collection_separator_input: char,

    /// Prompt printed before each input echo.
    pub prompt: String,
    /// Maximum number of retained history entries.
    pub history_limit: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            theme: ConsoleTheme::default(),
            print_help_on_enable: true,
            print_help_on_clear: true,
            clear_on_enable: true,
            allow_private_commands: false,
            name_policy: NamePolicy::Strict,
            intercept_when_disabled: false,
            intercept_messages: false,
            intercept_warnings: true,
            intercept_errors: true,
            include_location_on_message: false,
            include_location_on_errors: true,
            void_command_feedback: "Command executed successfully".to_string(),
            collection_separator_output: ", ".to_string(),
            collection_separator_input: ',',
            prompt: "> ".to_string(),
            history_limit: 100,
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded console config from {}", path.display());
        Ok(config)
    }

    /// Reject settings the dispatcher cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.collection_separator_input.is_whitespace() {
            return Err(ConsoleError::Config(
                "collection_separator_input must not be whitespace".to_string(),
            ));
        }
        if self.void_command_feedback.is_empty() {
            return Err(ConsoleError::Config(
                "void_command_feedback must not be empty".to_string(),
            ));
        }
        if self.history_limit == 0 {
            return Err(ConsoleError::Config(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a mirrored log record of this severity is shown.
    pub fn intercepts(&self, severity: Severity) -> bool {
        match severity {
            Severity::Message => self.intercept_messages,
            Severity::Warning => self.intercept_warnings,
            Severity::Error => self.intercept_errors,
        }
    }

    /// Whether a mirrored log record of this severity carries its location.
    pub fn includes_location(&self, severity: Severity) -> bool {
        match severity {
            Severity::Message => self.include_location_on_message,
            Severity::Warning | Severity::Error => self.include_location_on_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let cfg = ConsoleConfig::default();
        assert_eq!(cfg.void_command_feedback, "Command executed successfully");
        assert_eq!(cfg.collection_separator_output, ", ");
        assert_eq!(cfg.collection_separator_input, ',');
        assert!(!cfg.allow_private_commands);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn markup_uses_theme_color() {
        let theme = ConsoleTheme::default();
        assert_eq!(
            theme.markup("careful", Severity::Warning),
            "<color=#FFEB04FF>careful</color>"
        );
        let custom = ConsoleTheme {
            error: "#AA000080".to_string(),
            ..ConsoleTheme::default()
        };
        assert_eq!(custom.markup("x", Severity::Error), "<color=#AA000080>x</color>");
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = ConsoleConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ConsoleConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg = ConsoleConfig::from_toml_str(
            r##"
            void_command_feedback = "ok"
            collection_separator_input = ";"
            name_policy = "relaxed"

            [theme]
            error = "#AA0000"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.void_command_feedback, "ok");
        assert_eq!(cfg.collection_separator_input, ';');
        assert_eq!(cfg.name_policy, NamePolicy::Relaxed);
        assert_eq!(cfg.theme.error_color(), Color::rgb(0xAA, 0, 0));
        assert_eq!(cfg.theme.warning_color(), Color::rgb(0xFF, 0xEB, 0x04));
    }

    #[test]
    fn whitespace_delimiter_rejected() {
        let err = ConsoleConfig::from_toml_str("collection_separator_input = \" \"").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn empty_void_feedback_rejected() {
        let err = ConsoleConfig::from_toml_str("void_command_feedback = \"\"").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ConsoleConfig::from_toml_str("prompt = [").unwrap_err();
        assert!(matches!(err, ConsoleError::TomlParse(_)));
    }

    #[test]
    fn bad_theme_color_falls_back() {
        let theme = ConsoleTheme {
            message: "white".to_string(),
            ..ConsoleTheme::default()
        };
        assert_eq!(theme.message_color(), Color::WHITE);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ConsoleConfig::load("/definitely/not/here/console.toml").unwrap_err();
        assert!(matches!(err, ConsoleError::Io(_)));
    }

    #[test]
    fn strict_policy() {
        assert!(NamePolicy::Strict.accepts("Add2"));
        assert!(!NamePolicy::Strict.accepts("get_array"));
        assert!(!NamePolicy::Strict.accepts("two words"));
        assert!(!NamePolicy::Strict.accepts(""));
    }

    #[test]
    fn relaxed_policy() {
        assert!(NamePolicy::Relaxed.accepts("get_array"));
        assert!(NamePolicy::Relaxed.accepts("scene-dump"));
        assert!(!NamePolicy::Relaxed.accepts("two words"));
        assert!(!NamePolicy::Relaxed.accepts("tab\tname"));
    }

    #[test]
    fn intercept_flags() {
        let cfg = ConsoleConfig::default();
        assert!(!cfg.intercepts(Severity::Message));
        assert!(cfg.intercepts(Severity::Warning));
        assert!(cfg.includes_location(Severity::Error));
        assert!(!cfg.includes_location(Severity::Message));
    }
}
