pub mod config;
pub mod entry;
pub mod status;
pub mod streak;
pub mod targets;
pub mod track;
