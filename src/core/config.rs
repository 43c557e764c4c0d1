//! 配置管理
//!
//! 插件配置由宿主运行时下发，白名单变更需要写回宿主

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::errors::{InjectorError, Result};

/// 默认任务模板
pub const DEFAULT_TASK_TEMPLATE: &str = "\n[Current Task]\n{content}\n";

/// 默认知识模板
pub const DEFAULT_KNOWLEDGE_TEMPLATE: &str = "\n[Additional Knowledge]\n{content}\n";

/// 插件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// 是否开启白名单模式
    pub whitelist_mode: bool,

    /// 白名单（统一会话标识或群ID）
    pub whitelist: Vec<String>,

    /// 未指定轮次时的默认生效轮次
    pub default_turns: u32,

    /// 单条注入允许的最大轮次，超出时截断
    pub max_turns_limit: u32,

    /// 每个会话允许的最大注入条目数
    pub max_injections_per_session: usize,

    /// 任务注入文本模板，`{content}` 为内容占位符
    pub task_prompt_template: String,

    /// 知识注入文本模板，`{content}` 为内容占位符
    pub knowledge_prompt_template: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            whitelist_mode: false,
            whitelist: Vec::new(),
            default_turns: 10,
            max_turns_limit: 50,
            max_injections_per_session: 5,
            task_prompt_template: DEFAULT_TASK_TEMPLATE.to_string(),
            knowledge_prompt_template: DEFAULT_KNOWLEDGE_TEMPLATE.to_string(),
        }
    }
}

impl PluginConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.default_turns == 0 {
            return Err(InjectorError::ValidationError(
                "default_turns must be greater than 0".to_string(),
            ));
        }
        if self.max_turns_limit == 0 {
            return Err(InjectorError::ValidationError(
                "max_turns_limit must be greater than 0".to_string(),
            ));
        }
        if self.max_injections_per_session == 0 {
            return Err(InjectorError::ValidationError(
                "max_injections_per_session must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 配置句柄
///
/// 对宿主配置对象的共享引用，支持读取、变更和写回。
/// 无文件路径的句柄（测试、纯内存场景）跳过写回。
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<PluginConfig>>,
    path: Option<PathBuf>,
}

impl ConfigHandle {
    /// 创建纯内存配置句柄
    pub fn in_memory(config: PluginConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path: None,
        }
    }

    /// 从 YAML 文件加载配置
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = tokio::fs::read_to_string(&path).await?;
        let config: PluginConfig = serde_yaml::from_str(&text)?;
        config.validate()?;

        Ok(Self {
            inner: Arc::new(RwLock::new(config)),
            path: Some(path),
        })
    }

    /// 读取配置快照
    pub async fn get(&self) -> PluginConfig {
        self.inner.read().await.clone()
    }

    /// 变更配置，返回闭包的结果
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PluginConfig) -> R,
    {
        let mut config = self.inner.write().await;
        f(&mut config)
    }

    /// 写回配置文件
    ///
    /// 纯内存句柄直接返回成功
    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let config = self.inner.read().await;
        let text = serde_yaml::to_string(&*config)?;
        tokio::fs::write(path, text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PluginConfig::default();

        assert!(!config.whitelist_mode);
        assert!(config.whitelist.is_empty());
        assert_eq!(config.default_turns, 10);
        assert_eq!(config.max_turns_limit, 50);
        assert_eq!(config.max_injections_per_session, 5);
        assert!(config.task_prompt_template.contains("{content}"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let config = PluginConfig {
            default_turns: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PluginConfig {
            max_injections_per_session: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_yaml() {
        // 缺省字段取默认值
        let config: PluginConfig =
            serde_yaml::from_str("whitelist_mode: true\ndefault_turns: 3\n").unwrap();

        assert!(config.whitelist_mode);
        assert_eq!(config.default_turns, 3);
        assert_eq!(config.max_turns_limit, 50);
    }

    #[tokio::test]
    async fn test_handle_update_and_get() {
        let handle = ConfigHandle::in_memory(PluginConfig::default());

        handle
            .update(|c| c.whitelist.push("qq:123".to_string()))
            .await;

        let config = handle.get().await;
        assert_eq!(config.whitelist, vec!["qq:123".to_string()]);

        // 无路径句柄写回为空操作
        handle.save().await.unwrap();
    }
}
