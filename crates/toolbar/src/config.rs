//! Feature configuration for the toolbar extensions.
//!
//! Every option is enumerated and defaulted here once. A config can be built
//! in code (`ToolbarConfig::default()` plus field updates) or loaded from
//! TOML; either way [`ToolbarConfig::validate`] runs before registration.
use crate::controls::ALL_CONTROL_NAMES;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BaseButtons {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub link: bool,
}

impl Default for BaseButtons {
    fn default() -> Self {
        Self {
            bold: true,
            italic: true,
            underline: true,
            strikethrough: true,
            link: true,
        }
    }
}

impl BaseButtons {
    /// `(control name, enabled)` in toolbar order.
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("bold", self.bold),
            ("italic", self.italic),
            ("underline", self.underline),
            ("strikethrough", self.strikethrough),
            ("link", self.link),
        ]
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BlockFormats {
    pub heading1: bool,
    pub heading2: bool,
    pub heading3: bool,
    pub heading4: bool,
    pub heading5: bool,
    pub heading6: bool,
    pub paragraph: bool,
    pub quote: bool,
}

impl Default for BlockFormats {
    fn default() -> Self {
        Self {
            heading1: true,
            heading2: true,
            heading3: true,
            heading4: true,
            heading5: true,
            heading6: true,
            paragraph: true,
            quote: true,
        }
    }
}

impl BlockFormats {
    pub fn entries(&self) -> [(&'static str, bool); 8] {
        [
            ("heading1", self.heading1),
            ("heading2", self.heading2),
            ("heading3", self.heading3),
            ("heading4", self.heading4),
            ("heading5", self.heading5),
            ("heading6", self.heading6),
            ("paragraph", self.paragraph),
            ("quote", self.quote),
        ]
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolbarConfig {
    pub base: BaseButtons,
    /// Options of the `fontName` select. Absent or empty disables it.
    pub font_family_list: Option<Vec<String>>,
    pub font_size: bool,
    pub block_formats: BlockFormats,
    pub indent_outdent: bool,
    pub subscript_superscript: bool,
    pub lists: bool,
    pub alignment: bool,
    /// Upper/lowercase transforms and the horizontal rule.
    pub extras: bool,
    pub undo_redo: bool,
    /// Icon markup by control name.
    pub icon_overrides: BTreeMap<String, String>,
    /// CSS `max-width` applied to the toolbar element.
    pub max_width: Option<String>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            base: BaseButtons::default(),
            font_family_list: None,
            font_size: false,
            block_formats: BlockFormats::default(),
            indent_outdent: true,
            subscript_superscript: true,
            lists: true,
            alignment: true,
            extras: true,
            undo_redo: true,
            icon_overrides: BTreeMap::new(),
            max_width: None,
        }
    }
}

impl ToolbarConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: ToolbarConfig =
            toml::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in self.icon_overrides.keys() {
            if !ALL_CONTROL_NAMES.contains(&name.as_str()) {
                return Err(ConfigError::UnknownIconOverride(name.clone()));
            }
        }
        if let Some(fonts) = &self.font_family_list {
            if let Some(index) = fonts.iter().position(|f| f.trim().is_empty()) {
                return Err(ConfigError::BlankFontName { index });
            }
        }
        if self.max_width.as_deref().is_some_and(|w| w.trim().is_empty()) {
            return Err(ConfigError::BlankMaxWidth);
        }
        Ok(())
    }

    /// Font list when the `fontName` select is enabled.
    pub fn font_names(&self) -> Option<&[String]> {
        self.font_family_list
            .as_deref()
            .filter(|fonts| !fonts.is_empty())
    }

    pub fn icon_override(&self, name: &str) -> Option<&str> {
        self.icon_overrides.get(name).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    UnknownIconOverride(String),
    BlankFontName { index: usize },
    BlankMaxWidth,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(message) => write!(f, "invalid toolbar config: {message}"),
            ConfigError::UnknownIconOverride(name) => {
                write!(f, "icon override for unknown control '{name}'")
            }
            ConfigError::BlankFontName { index } => {
                write!(f, "font_family_list entry {index} is blank")
            }
            ConfigError::BlankMaxWidth => f.write_str("max_width is blank"),
        }
    }
}

impl std::error::Error for ConfigError {}
