//! 应用层
//!
//! 命令解析与插件编排

pub mod command;
pub mod plugin;
pub mod service;

pub use command::Command;
pub use plugin::PromptInjector;
pub use service::{AddOutcome, InjectionService};
