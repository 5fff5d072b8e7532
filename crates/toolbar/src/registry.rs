//! Registration of the toolbar extensions with the host editor.
use crate::config::{ConfigError, ToolbarConfig};
use crate::controls::{
    ControlAction, ControlSpec, FONT_SIZES, InlineSpanType, UNWRAP_SPAN_COMMAND, default_icon,
    select_icon,
};
use crate::locale::{Localizer, title};
use editor::TextTransform;

/// The host's toolbar/command registry.
pub trait CommandRegistry {
    fn register(&mut self, control: ControlSpec);
    fn remove(&mut self, name: &str);
    fn set_max_width(&mut self, value: &str);
    fn add_command(&mut self, name: &str);
    fn add_component_type(&mut self, component_type: InlineSpanType);
}

/// Base buttons every host toolbar starts with.
pub const HOST_DEFAULT_BUTTONS: [&str; 5] = ["bold", "italic", "underline", "strikethrough", "link"];

/// In-memory registry, seeded like a fresh host toolbar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryRegistry {
    pub controls: Vec<ControlSpec>,
    pub max_width: Option<String>,
    pub commands: Vec<String>,
    pub component_types: Vec<InlineSpanType>,
}

impl MemoryRegistry {
    pub fn with_host_defaults() -> Self {
        let mut registry = Self::default();
        for name in HOST_DEFAULT_BUTTONS {
            let command = if name == "link" { "createLink" } else { name };
            registry.controls.push(ControlSpec::button(
                name,
                format!("<b>{name}</b>"),
                name.to_string(),
                ControlAction::Exec {
                    command: command.to_string(),
                    argument: None,
                },
            ));
        }
        registry
    }

    pub fn names(&self) -> Vec<&str> {
        self.controls.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn control(&self, name: &str) -> Option<&ControlSpec> {
        self.controls.iter().find(|c| c.name == name)
    }
}

impl CommandRegistry for MemoryRegistry {
    fn register(&mut self, control: ControlSpec) {
        match self.controls.iter_mut().find(|c| c.name == control.name) {
            Some(existing) => *existing = control,
            None => self.controls.push(control),
        }
    }

    fn remove(&mut self, name: &str) {
        self.controls.retain(|c| c.name != name);
    }

    fn set_max_width(&mut self, value: &str) {
        self.max_width = Some(value.to_string());
    }

    fn add_command(&mut self, name: &str) {
        if !self.commands.iter().any(|c| c == name) {
            self.commands.push(name.to_string());
        }
    }

    fn add_component_type(&mut self, component_type: InlineSpanType) {
        self.component_types.retain(|t| t.name != component_type.name);
        self.component_types.push(component_type);
    }
}

struct Registrar<'a, R: ?Sized> {
    config: &'a ToolbarConfig,
    registry: &'a mut R,
    localizer: &'a dyn Localizer,
    registered: Vec<ControlSpec>,
}

impl<R: CommandRegistry + ?Sized> Registrar<'_, R> {
    fn icon(&self, name: &str, fallback: Option<&str>) -> String {
        self.config
            .icon_override(name)
            .or(fallback)
            .or_else(|| default_icon(name))
            .map(str::to_string)
            .unwrap_or_else(|| format!("<div>{name}</div>"))
    }

    fn push(&mut self, control: ControlSpec) {
        log::debug!(target: "toolbar", "registering {}", control.name);
        self.registered.push(control.clone());
        self.registry.register(control);
    }

    fn exec_button(&mut self, name: &str, command: &str, fallback_icon: Option<&str>) {
        let icon = self.icon(name, fallback_icon);
        let control = ControlSpec::button(
            name,
            icon,
            title(self.localizer, name),
            ControlAction::Exec {
                command: command.to_string(),
                argument: None,
            },
        );
        self.push(control);
    }

    fn format_button(&mut self, name: &str) {
        let (tag, label) = match name {
            "paragraph" => ("p", "\u{00B6}".to_string()),
            "quote" => ("blockquote", "QUOTE".to_string()),
            heading => {
                let level = heading.trim_start_matches("heading");
                // Only heading1..heading6 reach this arm.
                (heading_tag(level), format!("H{level}"))
            }
        };
        let icon = self
            .config
            .icon_override(name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("<div>{label}</div>"));
        let control = ControlSpec::button(
            name,
            icon,
            title(self.localizer, name),
            ControlAction::Exec {
                command: "formatBlock".to_string(),
                argument: Some(tag.to_string()),
            },
        )
        .with_attribute("tag", name);
        self.push(control);
    }

    fn transform_button(&mut self, name: &str, transform: TextTransform) {
        let icon = self.icon(name, None);
        let control = ControlSpec::button(
            name,
            icon,
            title(self.localizer, name),
            ControlAction::TextTransform(transform),
        );
        self.push(control);
    }
}

fn heading_tag(level: &str) -> &'static str {
    match level {
        "1" => "h1",
        "2" => "h2",
        "3" => "h3",
        "4" => "h4",
        "5" => "h5",
        _ => "h6",
    }
}

/// Validates `config`, then applies it to `registry`. Returns the controls
/// that were registered, in toolbar order.
pub fn register_toolbar<R: CommandRegistry + ?Sized>(
    config: &ToolbarConfig,
    registry: &mut R,
    localizer: &dyn Localizer,
) -> Result<Vec<ControlSpec>, ConfigError> {
    config.validate()?;
    let mut r = Registrar {
        config,
        registry,
        localizer,
        registered: Vec::new(),
    };

    if let Some(width) = &config.max_width {
        r.registry.set_max_width(width);
    }
    for (name, enabled) in config.base.entries() {
        if !enabled {
            log::debug!(target: "toolbar", "removing host button {name}");
            r.registry.remove(name);
        }
    }
    for (name, enabled) in config.base.entries() {
        if enabled {
            let command = if name == "link" { "createLink" } else { name };
            r.exec_button(name, command, None);
        }
    }

    if let Some(fonts) = config.font_names() {
        let icon = config.icon_override("fontName").map(str::to_string).unwrap_or_else(|| {
            select_icon(fonts.iter().map(|font| (None, font.as_str())))
        });
        let control = ControlSpec::select("fontName", icon, title(localizer, "fontName"));
        r.push(control);
    }
    if config.font_size {
        let icon = config.icon_override("fontSize").map(str::to_string).unwrap_or_else(|| {
            select_icon(FONT_SIZES.iter().map(|(value, label)| (Some(*value), *label)))
        });
        let control = ControlSpec::select("fontSize", icon, title(localizer, "fontSize"));
        r.push(control);
    }

    for (name, enabled) in config.block_formats.entries() {
        if enabled {
            r.format_button(name);
        }
    }

    if config.indent_outdent {
        r.exec_button("indent", "indent", None);
        r.exec_button("outdent", "outdent", None);
    }
    if config.subscript_superscript {
        r.exec_button("subscript", "subscript", Some("<div>X<sub>2</sub></div>"));
        r.exec_button("superscript", "superscript", Some("<div>X<sup>2</sup></div>"));
    }
    if config.extras {
        r.transform_button("uppercase", TextTransform::Uppercase);
        r.transform_button("lowercase", TextTransform::Lowercase);
    }
    if config.lists {
        r.exec_button("olist", "insertOrderedList", None);
        r.exec_button("ulist", "insertUnorderedList", None);
    }
    if config.alignment {
        for name in ["justifyLeft", "justifyCenter", "justifyRight", "justifyFull"] {
            r.exec_button(name, name, None);
        }
    }
    if config.extras {
        r.exec_button("line", "insertHorizontalRule", Some("<b>&#8213;</b>"));
    }
    if config.undo_redo {
        r.exec_button("undo", "undo", None);
        r.exec_button("redo", "redo", None);
    }

    let wrap_icon = r.icon("wrapSpan", None);
    let wrap = ControlSpec::button("wrapSpan", wrap_icon, title(localizer, "wrapSpan"), ControlAction::WrapSpan);
    r.push(wrap);
    r.registry.add_command(UNWRAP_SPAN_COMMAND);
    r.registry
        .add_component_type(InlineSpanType::new(title(localizer, "unwrapSpan")));

    Ok(r.registered)
}
