pub mod grading;
pub mod numbering;
pub mod question_group;
pub mod report;
pub mod stats;
pub mod types;
