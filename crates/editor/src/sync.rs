//! Toolbar select controls bound to queryable formatting commands.
use crate::host::CommandHost;

/// Value the host reports when a command has no determinate state.
const INDETERMINATE: &str = "false";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolbarControlState {
    pub name: String,
    pub current_value: Option<String>,
}

impl ToolbarControlState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_value: None,
        }
    }
}

/// Reads the selection's computed value for the control's command.
///
/// Returns `true` when the control changed. A missing or `"false"` value
/// leaves the control as it was.
pub fn refresh<H: CommandHost + ?Sized>(control: &mut ToolbarControlState, host: &H) -> bool {
    match host.query_command_value(&control.name) {
        Some(value) if value != INDETERMINATE => {
            if control.current_value.as_deref() == Some(value.as_str()) {
                return false;
            }
            log::trace!(target: "editor::sync", "{} -> {value}", control.name);
            control.current_value = Some(value);
            true
        }
        _ => false,
    }
}

/// Executes the control's command with its current value.
pub fn apply<H: CommandHost + ?Sized>(control: &ToolbarControlState, host: &mut H) -> bool {
    let ok = host.exec_command(&control.name, control.current_value.as_deref());
    if !ok {
        log::debug!(target: "editor::sync", "host refused {}", control.name);
    }
    ok
}
