//! Change notifications broadcast by the store.
//!
//! Consumers register a callback with [`Observers::subscribe`] and keep the
//! returned [`SubscriptionId`] to detach later. Callbacks run synchronously,
//! in subscription order, after the state change has been applied.

use std::fmt;

use crate::models::{ProjectId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ProjectCreated {
        project_id: ProjectId,
        title: String,
    },
    ProjectUpdated {
        project_id: ProjectId,
    },
    ProjectDeleted {
        project_id: ProjectId,
        title: String,
        removed_tasks: usize,
    },
    TaskAdded {
        project_id: ProjectId,
        task_id: TaskId,
        title: String,
    },
    TaskUpdated {
        project_id: ProjectId,
        task_id: TaskId,
    },
    TaskDeleted {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

impl StoreEvent {
    /// Short confirmation suitable for a transient notification.
    pub fn message(&self) -> &'static str {
        match self {
            StoreEvent::ProjectCreated { .. } => "Project created successfully",
            StoreEvent::ProjectUpdated { .. } => "Project updated successfully",
            StoreEvent::ProjectDeleted { .. } => "Project deleted successfully",
            StoreEvent::TaskAdded { .. } => "Task added successfully",
            StoreEvent::TaskUpdated { .. } => "Task updated successfully",
            StoreEvent::TaskDeleted { .. } => "Task deleted successfully",
        }
    }

    pub fn project_id(&self) -> &ProjectId {
        match self {
            StoreEvent::ProjectCreated { project_id, .. }
            | StoreEvent::ProjectUpdated { project_id }
            | StoreEvent::ProjectDeleted { project_id, .. }
            | StoreEvent::TaskAdded { project_id, .. }
            | StoreEvent::TaskUpdated { project_id, .. }
            | StoreEvent::TaskDeleted { project_id, .. } => project_id,
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&StoreEvent)>;

#[derive(Default)]
pub struct Observers {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &StoreEvent) {
        tracing::info!(project_id = %event.project_id(), "{}", event.message());
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn updated(id: &str) -> StoreEvent {
        StoreEvent::ProjectUpdated {
            project_id: ProjectId::from(id),
        }
    }

    #[test]
    fn test_subscribers_receive_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let first = Rc::clone(&seen);
        observers.subscribe(move |e| first.borrow_mut().push(format!("a:{}", e.project_id())));
        let second = Rc::clone(&seen);
        observers.subscribe(move |e| second.borrow_mut().push(format!("b:{}", e.project_id())));

        observers.emit(&updated("p1"));

        assert_eq!(*seen.borrow(), vec!["a:p1", "b:p1"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();

        let counter = Rc::clone(&count);
        let id = observers.subscribe(move |_| *counter.borrow_mut() += 1);

        observers.emit(&updated("p1"));
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.emit(&updated("p1"));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_messages() {
        let event = StoreEvent::TaskDeleted {
            project_id: ProjectId::from("p"),
            task_id: TaskId::from("t"),
        };
        assert_eq!(event.message(), "Task deleted successfully");
        assert_eq!(event.to_string(), "Task deleted successfully");
    }
}
