//! Toolbar control descriptions handed to the host registry.
use editor::TextTransform;
use html::{Node, outer_html};

/// Every control name this crate can register, in toolbar order.
pub const ALL_CONTROL_NAMES: &[&str] = &[
    "bold",
    "italic",
    "underline",
    "strikethrough",
    "link",
    "fontName",
    "fontSize",
    "heading1",
    "heading2",
    "heading3",
    "heading4",
    "heading5",
    "heading6",
    "paragraph",
    "quote",
    "indent",
    "outdent",
    "subscript",
    "superscript",
    "uppercase",
    "lowercase",
    "olist",
    "ulist",
    "justifyLeft",
    "justifyCenter",
    "justifyRight",
    "justifyFull",
    "line",
    "undo",
    "redo",
    "wrapSpan",
];

/// Component command that replaces a selected span with its children.
pub const UNWRAP_SPAN_COMMAND: &str = "unwrap-span";

/// `execCommand` sizes 1..=7 and their labels.
pub const FONT_SIZES: [(&str, &str); 7] = [
    ("1", "xx-small"),
    ("2", "x-small"),
    ("3", "small"),
    ("4", "medium"),
    ("5", "large"),
    ("6", "x-large"),
    ("7", "xx-large"),
];

const SELECT_STYLE: &str = "height:1.8rem;color:inherit;";
const SELECT_CLASS: &str = "gjs-field gjs-field-select";
const SELECT_BUTTON_STYLE: &str = "padding: 0 4px 2px;";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    Click,
    Change,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    /// `execCommand(command, argument)`.
    Exec {
        command: String,
        argument: Option<String>,
    },
    /// A select whose value is read back from `queryCommandValue` and
    /// applied with `execCommand(command, value)`.
    Select { command: String },
    TextTransform(TextTransform),
    WrapSpan,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlSpec {
    pub name: String,
    /// Icon markup.
    pub icon: String,
    pub title: String,
    pub event: ControlEvent,
    /// Extra attributes for the button element, after `title`.
    pub attributes: Vec<(String, String)>,
    pub action: ControlAction,
}

impl ControlSpec {
    pub fn button(name: &str, icon: String, title: String, action: ControlAction) -> Self {
        Self {
            name: name.to_string(),
            icon,
            title,
            event: ControlEvent::Click,
            attributes: Vec::new(),
            action,
        }
    }

    pub fn select(name: &str, icon: String, title: String) -> Self {
        Self {
            name: name.to_string(),
            icon,
            title,
            event: ControlEvent::Change,
            attributes: vec![("style".to_string(), SELECT_BUTTON_STYLE.to_string())],
            action: ControlAction::Select {
                command: name.to_string(),
            },
        }
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }
}

/// Built-in icon markup for `name`, if it has one.
pub fn default_icon(name: &str) -> Option<&'static str> {
    let icon = match name {
        "bold" => "<b>B</b>",
        "italic" => "<i>I</i>",
        "underline" => "<u>U</u>",
        "strikethrough" => "<s>S</s>",
        "link" => "\u{1F517}",
        "heading1" => "<div>H1</div>",
        "heading2" => "<div>H2</div>",
        "heading3" => "<div>H3</div>",
        "heading4" => "<div>H4</div>",
        "heading5" => "<div>H5</div>",
        "heading6" => "<div>H6</div>",
        "paragraph" => "\u{00B6}",
        "quote" => "\u{275D}",
        "indent" => "\u{27A1}\u{FE0F}",
        "outdent" => "\u{2B05}\u{FE0F}",
        "subscript" => "X<sub>2</sub>",
        "superscript" => "X<sup>2</sup>",
        "uppercase" => "<div>ABC</div>",
        "lowercase" => "<div>abc</div>",
        "olist" => "1.",
        "ulist" => "\u{2022}",
        "justifyLeft" => "\u{2B05}",
        "justifyCenter" => "\u{2194}",
        "justifyRight" => "\u{27A1}",
        "justifyFull" => "\u{2195}",
        "line" => "\u{2015}",
        "undo" => "\u{21B6}",
        "redo" => "\u{21B7}",
        _ => return None,
    };
    Some(icon)
}

/// `<select>` icon markup with one `<option>` per `(value, label)`; a `None`
/// value omits the attribute so the label doubles as the value.
pub fn select_icon<'a>(options: impl IntoIterator<Item = (Option<&'a str>, &'a str)>) -> String {
    let mut select = Node::element("select")
        .with_attr("style", SELECT_STYLE)
        .with_attr("class", SELECT_CLASS);
    for (value, label) in options {
        let mut option = Node::element("option");
        if let Some(value) = value {
            option.set_attr("value", value);
        }
        select = select.with_child(option.with_child(Node::text(label)));
    }
    outer_html(&select)
}

/// Component type the host assigns to spans created by the wrap action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineSpanType {
    pub name: String,
    pub tag: String,
    pub draggable: bool,
    pub droppable: bool,
    pub editable: bool,
    pub stylable: bool,
    pub toolbar: Vec<ComponentToolbarItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentToolbarItem {
    pub command: String,
    pub label: String,
    pub title: Option<String>,
}

impl InlineSpanType {
    pub const NAME: &'static str = "inline-span";

    pub fn new(unwrap_title: String) -> Self {
        let item = |command: &str, label: &str, title: Option<String>| ComponentToolbarItem {
            command: command.to_string(),
            label: label.to_string(),
            title,
        };
        Self {
            name: Self::NAME.to_string(),
            tag: editor::INLINE_STYLE_TAG.to_string(),
            draggable: true,
            droppable: false,
            editable: true,
            stylable: true,
            toolbar: vec![
                item("move", r#"<i class="fa fa-arrows-alt"></i>"#, None),
                item("tlb-clone", r#"<i class="fa fa-clone"></i>"#, None),
                item(
                    UNWRAP_SPAN_COMMAND,
                    r#"<i class="fa fa-ban"></i>"#,
                    Some(unwrap_title),
                ),
                item("tlb-delete", r#"<i class="fa fa-trash"></i>"#, None),
            ],
        }
    }

    /// `true` for `span` elements carrying the marker class.
    pub fn matches(node: &Node) -> bool {
        node.is_element_named(editor::INLINE_STYLE_TAG) && node.has_class(editor::MARKER_CLASS)
    }
}
