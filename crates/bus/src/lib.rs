//! Typed, synchronous, run-to-completion event bus.
//!
//! Events are queued on an `mpsc` channel. [`EventBus::dispatch`] drains the
//! queue, handing every event to every subscribed handler in subscription
//! order together with a mutable borrow of the host. Events emitted while
//! dispatching (through [`EventBus::sender`] clones) are appended to the same
//! queue and handled in the same `dispatch` call.
use core_types::ComponentRef;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

pub const DEFAULT_EVENT_BUDGET: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    // Host -> core
    SelectionChanged {
        selected: Option<ComponentRef>,
    },
    // Toolbar -> core
    ToolbarAction {
        name: String,
    },
    ControlChanged {
        name: String,
        value: Option<String>,
    },
    ComponentCommand {
        name: String,
    },
    // Periodic toolbar state refresh
    Refresh,
}

impl EditorEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            EditorEvent::SelectionChanged { .. } => "selection-changed",
            EditorEvent::ToolbarAction { .. } => "toolbar-action",
            EditorEvent::ControlChanged { .. } => "control-changed",
            EditorEvent::ComponentCommand { .. } => "component-command",
            EditorEvent::Refresh => "refresh",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerError {
    /// The host refused or failed a mutation.
    Host(String),
    /// The event named a control or command the handler does not know.
    Unknown { kind: &'static str, name: String },
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Host(message) => write!(f, "host error: {message}"),
            HandlerError::Unknown { kind, name } => write!(f, "unknown {kind}: {name}"),
        }
    }
}

impl std::error::Error for HandlerError {}

pub trait EventHandler<H> {
    fn name(&self) -> &str;
    fn handle(&mut self, event: &EditorEvent, host: &mut H) -> Result<(), HandlerError>;
}

/// Adapts a closure into a named handler.
pub struct FnHandler<F> {
    name: String,
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<H, F> EventHandler<H> for FnHandler<F>
where
    F: FnMut(&EditorEvent, &mut H) -> Result<(), HandlerError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&mut self, event: &EditorEvent, host: &mut H) -> Result<(), HandlerError> {
        (self.f)(event, host)
    }
}

pub struct EventBus<H> {
    handlers: Vec<Box<dyn EventHandler<H>>>,
    evt_tx: Sender<EditorEvent>,
    evt_rx: Receiver<EditorEvent>,
    budget: usize,
}

impl<H> Default for EventBus<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> EventBus<H> {
    pub fn new() -> Self {
        Self::with_budget(DEFAULT_EVENT_BUDGET)
    }

    pub fn with_budget(budget: usize) -> Self {
        let (evt_tx, evt_rx) = mpsc::channel();
        Self {
            handlers: Vec::new(),
            evt_tx,
            evt_rx,
            budget,
        }
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler<H>>) {
        log::debug!(target: "bus", "subscribed handler {}", handler.name());
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Shareable producer end of the queue (hosts hold one of these).
    pub fn sender(&self) -> Sender<EditorEvent> {
        self.evt_tx.clone()
    }

    pub fn emit(&self, event: EditorEvent) {
        // The receiver lives in `self`, so sending cannot fail here.
        let _ = self.evt_tx.send(event);
    }

    /// Drain the queue to completion and return the number of events handled.
    ///
    /// Handler errors are logged and do not stop delivery. Once `budget`
    /// events have been handled the remaining queue is dropped with a warning.
    pub fn dispatch(&mut self, host: &mut H) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.evt_rx.try_recv() {
            if handled == self.budget {
                let dropped = 1 + self.evt_rx.try_iter().count();
                log::warn!(
                    target: "bus",
                    "event budget of {} exhausted; dropping {dropped} queued event(s)",
                    self.budget
                );
                break;
            }
            handled += 1;
            log::trace!(target: "bus", "dispatching {}", event.kind());
            for handler in self.handlers.iter_mut() {
                if let Err(err) = handler.handle(&event, host) {
                    log::warn!(
                        target: "bus",
                        "handler {} failed on {}: {err}",
                        handler.name(),
                        event.kind()
                    );
                }
            }
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ComponentId;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    fn recording(name: &str) -> Box<dyn EventHandler<Recorder>> {
        let tag = name.to_string();
        Box::new(FnHandler::new(name, move |event: &EditorEvent, host: &mut Recorder| {
            host.seen.push(format!("{tag}:{}", event.kind()));
            Ok(())
        }))
    }

    #[test]
    fn dispatch_delivers_in_subscription_order() {
        let mut bus = EventBus::new();
        bus.subscribe(recording("a"));
        bus.subscribe(recording("b"));
        bus.emit(EditorEvent::Refresh);
        bus.emit(EditorEvent::ToolbarAction {
            name: "wrapSpan".to_string(),
        });

        let mut host = Recorder::default();
        assert_eq!(bus.dispatch(&mut host), 2);
        assert_eq!(
            host.seen,
            vec![
                "a:refresh",
                "b:refresh",
                "a:toolbar-action",
                "b:toolbar-action"
            ]
        );
        assert_eq!(bus.dispatch(&mut host), 0);
    }

    #[test]
    fn events_emitted_during_dispatch_run_in_same_call() {
        let mut bus: EventBus<Recorder> = EventBus::new();
        let tx = bus.sender();
        let mut forwarded = false;
        bus.subscribe(Box::new(FnHandler::new(
            "forward",
            move |event: &EditorEvent, host: &mut Recorder| {
                host.seen.push(event.kind().to_string());
                if !forwarded {
                    forwarded = true;
                    let _ = tx.send(EditorEvent::SelectionChanged {
                        selected: Some(ComponentRef::block(ComponentId(7))),
                    });
                }
                Ok(())
            },
        )));
        bus.emit(EditorEvent::Refresh);

        let mut host = Recorder::default();
        assert_eq!(bus.dispatch(&mut host), 2);
        assert_eq!(host.seen, vec!["refresh", "selection-changed"]);
    }

    #[test]
    fn handler_error_does_not_stop_delivery() {
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(FnHandler::new(
            "failing",
            |_: &EditorEvent, _: &mut Recorder| Err(HandlerError::Host("boom".to_string())),
        )));
        bus.subscribe(recording("after"));
        bus.emit(EditorEvent::Refresh);

        let mut host = Recorder::default();
        bus.dispatch(&mut host);
        assert_eq!(host.seen, vec!["after:refresh"]);
    }

    #[test]
    fn budget_drops_runaway_feedback() {
        let mut bus: EventBus<Recorder> = EventBus::with_budget(5);
        let tx = bus.sender();
        bus.subscribe(Box::new(FnHandler::new(
            "loop",
            move |event: &EditorEvent, host: &mut Recorder| {
                host.seen.push(event.kind().to_string());
                let _ = tx.send(EditorEvent::Refresh);
                Ok(())
            },
        )));
        bus.emit(EditorEvent::Refresh);

        let mut host = Recorder::default();
        assert_eq!(bus.dispatch(&mut host), 5);
        assert_eq!(host.seen.len(), 5);
        assert_eq!(bus.dispatch(&mut host), 0);
    }

    #[test]
    fn handler_error_display() {
        let err = HandlerError::Unknown {
            kind: "control",
            name: "fontColor".to_string(),
        };
        assert_eq!(err.to_string(), "unknown control: fontColor");
    }
}
