pub mod comment;
pub mod metrics;
pub mod project;
pub mod root;
pub mod task;
pub mod user;
