// src/events/bus/event_bus.rs
//
// Synchronous, typed event bus.
//
// - Handlers run immediately, in subscription order, on the emitting thread
// - Every emission is recorded in a bounded log
// - A panicking handler is logged and skipped; the rest still run

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Number of emissions kept in the in-memory log
const EVENT_LOG_CAPACITY: usize = 256;

/// Coordination point between services and the application layer.
///
/// Services emit facts ("token deployed", "mint failed"); the application
/// layer subscribes to turn them into notifications for the webview.
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

/// A logged emission
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Subscribe to a specific event type
    ///
    /// ```ignore
    /// bus.subscribe::<TokenDeployed, _>(|event| {
    ///     log::info!("deployed {}", event.address);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        match self.handlers.write() {
            Ok(mut handlers) => handlers.entry(TypeId::of::<E>()).or_default().push(wrapped),
            Err(_) => log::error!("Handler registry poisoned; subscription dropped"),
        }
    }

    /// Emit an event to every subscriber of its type
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let Ok(handlers) = self.handlers.read() else {
            log::error!("Handler registry poisoned; {} not delivered", event.event_type());
            return;
        };
        let event_handlers = handlers.get(&TypeId::of::<E>());
        let handler_count = event_handlers.map(|h| h.len()).unwrap_or(0);

        let entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        };
        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            entry.event_type,
            entry.event_id,
            entry.handler_count
        );
        if let Ok(mut log) = self.event_log.write() {
            if log.len() == EVENT_LOG_CAPACITY {
                log.pop_front();
            }
            log.push_back(entry);
        }

        if let Some(handlers) = event_handlers {
            for (idx, handler) in handlers.iter().enumerate() {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler(&event as &dyn Any);
                }));

                if result.is_err() {
                    log::error!("Handler {} for {} panicked", idx, event.event_type());
                }
            }
        }
    }

    /// Snapshot of recent emissions, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear_event_log(&self) {
        if let Ok(mut log) = self.event_log.write() {
            log.clear();
        }
    }

    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        self.handlers
            .read()
            .map(|handlers| handlers.get(&TypeId::of::<E>()).map(|h| h.len()).unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same registry and log
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_log: Arc::clone(&self.event_log),
        }
    }
}
