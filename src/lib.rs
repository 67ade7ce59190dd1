//! In-memory project and task tracker.
//!
//! [`ProjectStore`] is the single source of truth: it owns every project
//! (each embedding its tasks), applies all mutations, and broadcasts a
//! [`StoreEvent`] after each one. The `services` module holds call-site
//! validation and read-side views on top of it.

pub mod clock;
pub mod config;
pub mod events;
pub mod logging;
pub mod models;
pub mod sample_data;
pub mod services;
pub mod store;

pub use events::{StoreEvent, SubscriptionId};
pub use models::{
    CalendarEvent, CalendarEventKind, NewProject, NewTask, Project, ProjectId, ProjectPatch,
    ProjectStatus, Task, TaskId, TaskPatch, TaskStatus,
};
pub use store::{ProjectStore, StoreError};
