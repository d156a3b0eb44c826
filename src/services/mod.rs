pub mod definition_loader;
pub mod grading;
pub mod grading_session;
pub mod numbering;
pub mod report;
pub mod statistics;
