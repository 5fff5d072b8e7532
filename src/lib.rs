//! Rich-text toolbar extensions.
//!
//! [`install`] registers the configured controls with the host toolbar and
//! subscribes two handlers on the editor event bus: one normalizes paragraph
//! blocks as they get selected, the other runs toolbar controls and the
//! `unwrap-span` component command.
//!
//! ```text
//! host selection ──► SelectionChanged ──► normalize-on-select ──► host.select(new)
//!                                                 │                      │
//!                                                 └────── (no-op) ◄──────┘
//! toolbar click  ──► ToolbarAction ──► toolbar-actions ──► wrap / transform / exec
//! ```
mod handlers;

use crate::handlers::{NormalizeOnSelect, ToolbarActions};
use bus::EventBus;
use editor::{CommandHost, ComponentTree, RangeHost, ToolbarControlState};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use toolbar::{CommandRegistry, ConfigError, ControlAction, Localizer, ToolbarConfig};

pub use bus;
pub use editor;
pub use toolbar;

/// Live state of the select controls, shared with the toolbar handler.
pub type ControlStates = Rc<RefCell<BTreeMap<String, ToolbarControlState>>>;

#[derive(Debug)]
pub struct Installed {
    /// Registered control names, in toolbar order.
    pub registered: Vec<String>,
    pub controls: ControlStates,
}

pub fn install<H, R>(
    config: &ToolbarConfig,
    registry: &mut R,
    localizer: &dyn Localizer,
    bus: &mut EventBus<H>,
) -> Result<Installed, ConfigError>
where
    H: ComponentTree + RangeHost + CommandHost + 'static,
    R: CommandRegistry + ?Sized,
{
    let specs = toolbar::register_toolbar(config, registry, localizer)?;

    let mut actions = BTreeMap::new();
    let mut states = BTreeMap::new();
    let mut registered = Vec::with_capacity(specs.len());
    for spec in specs {
        if let ControlAction::Select { command } = &spec.action {
            states.insert(spec.name.clone(), ToolbarControlState::new(command.clone()));
        }
        registered.push(spec.name.clone());
        actions.insert(spec.name, spec.action);
    }
    let controls: ControlStates = Rc::new(RefCell::new(states));

    bus.subscribe(Box::new(NormalizeOnSelect));
    bus.subscribe(Box::new(ToolbarActions {
        actions,
        states: Rc::clone(&controls),
    }));
    log::debug!(
        target: "rte_extensions",
        "installed {} control(s) and {} handler(s)",
        registered.len(),
        bus.handler_count()
    );
    Ok(Installed {
        registered,
        controls,
    })
}
