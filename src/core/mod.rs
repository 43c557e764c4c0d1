//! 核心层
//!
//! 领域模型、宿主协作接口与插件配置

pub mod config;
pub mod event;
pub mod injection;
pub mod store;

pub use config::{ConfigHandle, PluginConfig};
pub use event::{ChatEvent, ProviderRequest};
pub use injection::{InjectionEntry, InjectionKind, SessionRecord};
pub use store::{KvStore, MemoryKvStore};
