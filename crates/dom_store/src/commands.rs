//! Formatting-command state behind `CommandHost`.
//!
//! Toggle commands flip a `"true"`/`"false"` state, value commands remember
//! their last argument, and action commands are only logged. Unknown commands
//! are refused, as `document.execCommand` does.
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CommandKind {
    Toggle,
    Value,
    Action,
}

fn command_kind(name: &str) -> Option<CommandKind> {
    let kind = match name {
        "bold" | "italic" | "underline" | "strikethrough" | "subscript" | "superscript"
        | "insertOrderedList" | "insertUnorderedList" | "justifyLeft" | "justifyCenter"
        | "justifyRight" | "justifyFull" => CommandKind::Toggle,
        "fontName" | "fontSize" | "formatBlock" | "createLink" => CommandKind::Value,
        "indent" | "outdent" | "insertHorizontalRule" | "undo" | "redo" => CommandKind::Action,
        _ => return None,
    };
    Some(kind)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutedCommand {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct CommandState {
    values: HashMap<String, String>,
    log: Vec<ExecutedCommand>,
}

impl CommandState {
    pub(crate) fn exec(&mut self, name: &str, value: Option<&str>) -> bool {
        let Some(kind) = command_kind(name) else {
            log::debug!(target: "dom_store", "unsupported command {name}");
            return false;
        };
        match kind {
            CommandKind::Toggle => {
                let on = self.values.get(name).is_some_and(|v| v == "true");
                self.values
                    .insert(name.to_string(), if on { "false" } else { "true" }.to_string());
            }
            CommandKind::Value => {
                if let Some(value) = value {
                    self.values.insert(name.to_string(), value.to_string());
                }
            }
            CommandKind::Action => {}
        }
        self.log.push(ExecutedCommand {
            name: name.to_string(),
            value: value.map(str::to_string),
        });
        true
    }

    pub(crate) fn query(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    pub(crate) fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    pub(crate) fn log(&self) -> &[ExecutedCommand] {
        &self.log
    }
}
