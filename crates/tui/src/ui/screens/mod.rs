pub mod dashboard;
pub mod entry;
pub mod history;
