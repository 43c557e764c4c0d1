//! 存储接口定义
//!
//! 对宿主提供的键值存储能力的抽象接口，支持内存和SQLite实现

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

mod memory;

pub use memory::MemoryKvStore;

/// 键值存储接口
///
/// 宿主运行时为插件提供按字符串键的异步读写能力。
/// 键不存在返回 `Ok(None)`，不作为错误处理。
#[async_trait]
pub trait KvStore: Send + Sync {
    /// 读取键对应的值
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// 写入键值（完全覆盖）
    async fn put(&self, key: &str, value: Value) -> Result<()>;

    /// 删除键
    ///
    /// 删除不存在的键不是错误
    async fn delete(&self, key: &str) -> Result<()>;
}
