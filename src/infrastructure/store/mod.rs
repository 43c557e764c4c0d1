//! 持久化存储实现

mod sqlite;

pub use sqlite::SqliteKvStore;
