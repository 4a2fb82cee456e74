pub mod browser;
pub mod commands;
pub mod github;
pub mod page;
pub mod runtime;
