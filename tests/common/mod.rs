//! 测试工具和辅助函数
#![allow(dead_code)]

use prompt_injector::{ChatEvent, PluginConfig, PromptInjector};

/// 创建白名单模式关闭的默认测试配置
pub fn test_config() -> PluginConfig {
    PluginConfig::default()
}

/// 创建开启白名单模式的测试配置
pub fn whitelist_config(listed: &[&str]) -> PluginConfig {
    PluginConfig {
        whitelist_mode: true,
        whitelist: listed.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// 创建测试用的私聊事件
pub fn test_event(origin: &str) -> ChatEvent {
    ChatEvent::private(origin, "tester")
}

/// 创建基于内存存储的测试插件
pub fn test_plugin(config: PluginConfig) -> PromptInjector {
    PromptInjector::with_memory_store(config)
}
