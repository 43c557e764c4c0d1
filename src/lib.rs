//! 提示词注入插件
//!
//! 在有限的对话轮次内，向发往模型提供商的 system prompt
//! 中临时注入"当前任务"与"附加知识"提示词：
//! - 注入以会话为单位存储，轮次耗尽自动清理
//! - 可选的白名单模式限制使用范围
//! - 宿主键值存储、配置与 LLM 请求钩子以窄接口建模
//!
//! # 架构分层
//!
//! - `core`: 核心层，领域模型与宿主协作接口
//! - `infrastructure`: 基础设施层，日志与持久化存储
//! - `application`: 应用层，命令处理与插件编排

// 核心层
pub mod core;

// 基础设施层
pub mod infrastructure;

// 应用层
pub mod application;

// 错误类型
pub mod errors;

// 重新导出核心类型
pub use self::core::config::{ConfigHandle, PluginConfig};
pub use self::core::event::{ChatEvent, ProviderRequest};
pub use self::core::injection::{InjectionEntry, InjectionKind, SessionRecord};
pub use self::core::store::{KvStore, MemoryKvStore};

// 重新导出基础设施类型
pub use infrastructure::logger;
pub use infrastructure::store::SqliteKvStore;

// 重新导出应用类型
pub use application::command::Command;
pub use application::plugin::PromptInjector;
pub use application::service::{AddOutcome, InjectionService};

pub use errors::InjectorError;

/// 插件版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
