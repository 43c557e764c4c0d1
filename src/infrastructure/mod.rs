//! 基础设施层
//!
//! 外部系统交互：日志、持久化存储

pub mod logger;
pub mod store;

pub use store::SqliteKvStore;
