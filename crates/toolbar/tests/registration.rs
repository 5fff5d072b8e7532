use editor::TextTransform;
use std::path::PathBuf;
use toolbar::{
    Catalog, ControlAction, ControlEvent, ControlSpec, MemoryRegistry, NoTranslations, ToolbarConfig,
    UNWRAP_SPAN_COMMAND, register_toolbar,
};

fn load(name: &str) -> ToolbarConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"));
    ToolbarConfig::from_toml_str(&text).unwrap()
}

fn names(controls: &[ControlSpec]) -> Vec<&str> {
    controls.iter().map(|c| c.name.as_str()).collect()
}

fn exec_of(registry: &MemoryRegistry, name: &str) -> (String, Option<String>) {
    match &registry.control(name).unwrap().action {
        ControlAction::Exec { command, argument } => (command.clone(), argument.clone()),
        other => panic!("{name} is not an exec control: {other:?}"),
    }
}

#[test]
fn default_config_registers_full_table_in_order() {
    let mut registry = MemoryRegistry::with_host_defaults();
    let registered =
        register_toolbar(&ToolbarConfig::default(), &mut registry, &NoTranslations).unwrap();
    let registered = names(&registered);
    assert_eq!(
        registered,
        vec![
            "bold", "italic", "underline", "strikethrough", "link", "heading1", "heading2",
            "heading3", "heading4", "heading5", "heading6", "paragraph", "quote", "indent",
            "outdent", "subscript", "superscript", "uppercase", "lowercase", "olist", "ulist",
            "justifyLeft", "justifyCenter", "justifyRight", "justifyFull", "line", "undo",
            "redo", "wrapSpan",
        ]
    );
    assert_eq!(registry.names(), registered);
    assert_eq!(registry.max_width, None);
    assert_eq!(registry.commands, vec![UNWRAP_SPAN_COMMAND.to_string()]);
    assert_eq!(registry.component_types.len(), 1);
}

#[test]
fn default_commands_and_icons() {
    let mut registry = MemoryRegistry::with_host_defaults();
    register_toolbar(&ToolbarConfig::default(), &mut registry, &NoTranslations).unwrap();

    assert_eq!(exec_of(&registry, "link"), ("createLink".to_string(), None));
    assert_eq!(
        exec_of(&registry, "heading2"),
        ("formatBlock".to_string(), Some("h2".to_string()))
    );
    assert_eq!(
        exec_of(&registry, "quote"),
        ("formatBlock".to_string(), Some("blockquote".to_string()))
    );
    assert_eq!(exec_of(&registry, "olist").0, "insertOrderedList");
    assert_eq!(exec_of(&registry, "line").0, "insertHorizontalRule");

    assert_eq!(registry.control("bold").unwrap().icon, "<b>B</b>");
    assert_eq!(registry.control("heading1").unwrap().icon, "<div>H1</div>");
    assert_eq!(registry.control("quote").unwrap().icon, "<div>QUOTE</div>");
    assert_eq!(
        registry.control("subscript").unwrap().icon,
        "<div>X<sub>2</sub></div>"
    );
    assert_eq!(registry.control("wrapSpan").unwrap().icon, "<div>wrapSpan</div>");
    assert_eq!(
        registry.control("uppercase").unwrap().action,
        ControlAction::TextTransform(TextTransform::Uppercase)
    );
    assert_eq!(
        registry.control("wrapSpan").unwrap().action,
        ControlAction::WrapSpan
    );
    assert_eq!(
        registry.control("paragraph").unwrap().attributes,
        vec![("tag".to_string(), "paragraph".to_string())]
    );
    // Untranslated titles are the keys.
    assert_eq!(registry.control("justifyFull").unwrap().title, "justifyFull");
}

#[test]
fn fixture_config_applies_toggles_fonts_and_overrides() {
    let config = load("full.toml");
    let mut registry = MemoryRegistry::with_host_defaults();
    let registered = register_toolbar(&config, &mut registry, &Catalog::english()).unwrap();
    let registered = names(&registered);

    assert_eq!(registry.max_width.as_deref(), Some("36rem"));
    assert!(registry.control("strikethrough").is_none());
    assert!(registry.control("link").is_none());
    assert!(!registered.contains(&"heading5"));
    assert_eq!(&registered[..5], &["bold", "italic", "underline", "fontName", "fontSize"]);

    let font_name = registry.control("fontName").unwrap();
    assert_eq!(font_name.event, ControlEvent::Change);
    assert_eq!(
        font_name.action,
        ControlAction::Select {
            command: "fontName".to_string()
        }
    );
    assert!(font_name.icon.contains("<option>Times New Roman</option>"));
    assert_eq!(font_name.title, "Font name");

    let font_size = registry.control("fontSize").unwrap();
    assert!(font_size.icon.contains(r#"<option value="1">xx-small</option>"#));
    assert!(font_size.icon.contains(r#"<option value="7">xx-large</option>"#));

    assert_eq!(registry.control("bold").unwrap().icon, "<strong>B</strong>");
    assert_eq!(registry.control("bold").unwrap().title, "Bold");
    assert_eq!(registry.control("paragraph").unwrap().icon, "<div>P</div>");
    assert_eq!(registry.control("wrapSpan").unwrap().icon, "<span>[ ]</span>");

    let span_type = &registry.component_types[0];
    assert_eq!(span_type.toolbar[2].title.as_deref(), Some("Unwrap span"));
}

#[test]
fn disabled_groups_register_nothing() {
    let config = ToolbarConfig {
        indent_outdent: false,
        subscript_superscript: false,
        lists: false,
        alignment: false,
        extras: false,
        undo_redo: false,
        ..ToolbarConfig::default()
    };
    let mut registry = MemoryRegistry::default();
    let registered = register_toolbar(&config, &mut registry, &NoTranslations).unwrap();
    let registered = names(&registered);
    for name in ["indent", "subscript", "uppercase", "olist", "justifyLeft", "line", "undo"] {
        assert!(!registered.contains(&name), "{name}");
    }
    assert_eq!(registered.last(), Some(&"wrapSpan"));
    assert_eq!(registry.commands, vec![UNWRAP_SPAN_COMMAND.to_string()]);
}

#[test]
fn invalid_config_registers_nothing() {
    let config = ToolbarConfig {
        max_width: Some(String::new()),
        ..ToolbarConfig::default()
    };
    let mut registry = MemoryRegistry::with_host_defaults();
    let before = registry.clone();
    assert!(register_toolbar(&config, &mut registry, &NoTranslations).is_err());
    assert_eq!(registry, before);
}

#[test]
fn german_catalog_titles_controls_and_component_toolbar() {
    let mut registry = MemoryRegistry::with_host_defaults();
    register_toolbar(&ToolbarConfig::default(), &mut registry, &Catalog::german()).unwrap();

    assert_eq!(registry.control("bold").unwrap().title, "Fett");
    assert_eq!(registry.control("heading2").unwrap().title, "Überschrift 2");
    let span_type = &registry.component_types[0];
    let unwrap_item = span_type
        .toolbar
        .iter()
        .find(|item| item.command == UNWRAP_SPAN_COMMAND)
        .unwrap();
    assert_eq!(unwrap_item.title.as_deref(), Some("Span entfernen"));
}
