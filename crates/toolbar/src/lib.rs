//! Formatting toolbar extensions: validated configuration, the control
//! table, title translation and registration with the host editor.
mod config;
mod controls;
mod locale;
mod registry;

pub use crate::config::{BaseButtons, BlockFormats, ConfigError, ToolbarConfig};
pub use crate::controls::{
    ALL_CONTROL_NAMES, ComponentToolbarItem, ControlAction, ControlEvent, ControlSpec, FONT_SIZES,
    InlineSpanType, UNWRAP_SPAN_COMMAND, default_icon, select_icon,
};
pub use crate::locale::{BUILTIN_LOCALES, Catalog, KEY_PREFIX, Localizer, NoTranslations, title};
pub use crate::registry::{CommandRegistry, HOST_DEFAULT_BUTTONS, MemoryRegistry, register_toolbar};
