//! 内存存储实现
//!
//! 默认的存储实现，数据仅在内存中，重启后丢失

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::KvStore;

/// 内存键值存储
///
/// 适合测试和无需持久化的场景
#[derive(Default)]
pub struct MemoryKvStore {
    entries: DashMap<String, Value>,
}

impl MemoryKvStore {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前键数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryKvStore::new();

        assert!(store.get("missing").await.unwrap().is_none());

        store.put("k1", json!({"a": 1})).await.unwrap();
        assert_eq!(store.get("k1").await.unwrap(), Some(json!({"a": 1})));

        // 覆盖写
        store.put("k1", json!({"a": 2})).await.unwrap();
        assert_eq!(store.get("k1").await.unwrap(), Some(json!({"a": 2})));

        store.delete("k1").await.unwrap();
        assert!(store.get("k1").await.unwrap().is_none());

        // 删除不存在的键不是错误
        store.delete("k1").await.unwrap();
    }
}
