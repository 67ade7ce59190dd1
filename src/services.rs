pub mod projects;
pub mod queries;
pub mod tasks;
