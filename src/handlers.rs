//! Bus handlers connecting host events to the editor engine.
use crate::ControlStates;
use bus::{EditorEvent, EventHandler, HandlerError};
use editor::{
    CommandHost, ComponentTree, Outcome, RangeHost, ToolbarControlState, apply,
    apply_text_transform, normalize_selected, refresh, toggle_wrap, unwrap,
};
use std::collections::BTreeMap;
use toolbar::{ControlAction, UNWRAP_SPAN_COMMAND};

fn host_error(err: impl std::error::Error) -> HandlerError {
    HandlerError::Host(err.to_string())
}

fn report(action: &str, outcome: Outcome) {
    match outcome {
        Outcome::Applied => log::debug!(target: "rte_extensions", "{action}: applied"),
        Outcome::Skipped(reason) => log::debug!(target: "rte_extensions", "{action}: {reason}"),
    }
}

fn apply_control<H: CommandHost>(state: &ToolbarControlState, host: &mut H) -> Result<(), HandlerError> {
    if apply(state, host) {
        Ok(())
    } else {
        Err(HandlerError::Host(format!("command {} refused", state.name)))
    }
}

/// Normalizes the newly selected block on every selection change.
pub(crate) struct NormalizeOnSelect;

impl<H: ComponentTree> EventHandler<H> for NormalizeOnSelect {
    fn name(&self) -> &str {
        "normalize-on-select"
    }

    fn handle(&mut self, event: &EditorEvent, host: &mut H) -> Result<(), HandlerError> {
        let EditorEvent::SelectionChanged { selected } = event else {
            return Ok(());
        };
        let outcome = normalize_selected(host, selected.as_ref()).map_err(host_error)?;
        report("normalize", outcome);
        Ok(())
    }
}

/// Runs toolbar controls and component commands, and keeps select controls
/// in sync with the selection.
pub(crate) struct ToolbarActions {
    pub(crate) actions: BTreeMap<String, ControlAction>,
    pub(crate) states: ControlStates,
}

impl ToolbarActions {
    fn run<H>(&self, name: &str, host: &mut H) -> Result<(), HandlerError>
    where
        H: ComponentTree + RangeHost + CommandHost,
    {
        let action = self.actions.get(name).ok_or_else(|| HandlerError::Unknown {
            kind: "control",
            name: name.to_string(),
        })?;
        match action {
            ControlAction::Exec { command, argument } => {
                if !host.exec_command(command, argument.as_deref()) {
                    return Err(HandlerError::Host(format!("command {command} refused")));
                }
            }
            ControlAction::Select { .. } => {
                if let Some(state) = self.states.borrow().get(name) {
                    apply_control(state, host)?;
                }
            }
            ControlAction::TextTransform(transform) => {
                let outcome = apply_text_transform(host, *transform).map_err(host_error)?;
                report(name, outcome);
            }
            ControlAction::WrapSpan => {
                let outcome = toggle_wrap(host).map_err(host_error)?;
                report(name, outcome);
            }
        }
        Ok(())
    }

    fn refresh_all<H: CommandHost>(&self, host: &H) {
        for state in self.states.borrow_mut().values_mut() {
            refresh(state, host);
        }
    }
}

impl<H> EventHandler<H> for ToolbarActions
where
    H: ComponentTree + RangeHost + CommandHost,
{
    fn name(&self) -> &str {
        "toolbar-actions"
    }

    fn handle(&mut self, event: &EditorEvent, host: &mut H) -> Result<(), HandlerError> {
        match event {
            EditorEvent::SelectionChanged { .. } | EditorEvent::Refresh => {
                self.refresh_all(host);
                Ok(())
            }
            EditorEvent::ToolbarAction { name } => self.run(name, host),
            EditorEvent::ControlChanged { name, value } => {
                let mut states = self.states.borrow_mut();
                let state = states.get_mut(name).ok_or_else(|| HandlerError::Unknown {
                    kind: "control",
                    name: name.clone(),
                })?;
                state.current_value = value.clone();
                apply_control(state, host)
            }
            EditorEvent::ComponentCommand { name } if name == UNWRAP_SPAN_COMMAND => {
                let outcome = unwrap(host).map_err(host_error)?;
                report(name, outcome);
                Ok(())
            }
            EditorEvent::ComponentCommand { name } => {
                log::trace!(target: "rte_extensions", "component command {name} left to host");
                Ok(())
            }
        }
    }
}
