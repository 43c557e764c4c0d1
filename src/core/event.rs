//! 消息事件与 LLM 请求模型
//!
//! 对宿主运行时传入的会话事件和出站 LLM 请求的最小建模

use serde::{Deserialize, Serialize};

/// 会话事件
///
/// 宿主运行时在每条消息、每次 LLM 请求时传入。
/// `unified_msg_origin` 是宿主分配的统一会话标识。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEvent {
    pub unified_msg_origin: String,
    pub group_id: Option<String>,
    pub sender_id: String,
    pub is_admin: bool,
}

impl ChatEvent {
    /// 创建私聊事件
    pub fn private(origin: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            unified_msg_origin: origin.into(),
            group_id: None,
            sender_id: sender_id.into(),
            is_admin: false,
        }
    }

    /// 创建群聊事件
    pub fn group(
        origin: impl Into<String>,
        group_id: impl Into<String>,
        sender_id: impl Into<String>,
    ) -> Self {
        Self {
            unified_msg_origin: origin.into(),
            group_id: Some(group_id.into()),
            sender_id: sender_id.into(),
            is_admin: false,
        }
    }

    /// 标记发送者为管理员
    pub fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// 生成基于会话的存储键
    pub fn storage_key(&self) -> String {
        format!("injection_{}", self.unified_msg_origin)
    }
}

/// 出站 LLM 请求
///
/// 宿主在发送给模型提供商前允许插件修改 system prompt
#[derive(Debug, Clone, Default)]
pub struct ProviderRequest {
    pub system_prompt: Option<String>,
}

impl ProviderRequest {
    /// 创建带初始 system prompt 的请求
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: Some(prompt.into()),
        }
    }

    /// 追加注入文本：已有 system prompt 则追加，否则直接设置
    pub fn append_system_prompt(&mut self, text: &str) {
        match &mut self.system_prompt {
            Some(prompt) => prompt.push_str(text),
            None => self.system_prompt = Some(text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key() {
        let event = ChatEvent::private("qq:123456", "user-1");
        assert_eq!(event.storage_key(), "injection_qq:123456");
    }

    #[test]
    fn test_group_event() {
        let event = ChatEvent::group("qq:group:42", "g42", "user-1");
        assert_eq!(event.group_id.as_deref(), Some("g42"));
        assert!(!event.is_admin);
        assert!(event.as_admin().is_admin);
    }

    #[test]
    fn test_append_system_prompt() {
        let mut req = ProviderRequest::default();
        req.append_system_prompt("[Task]\nfoo");
        assert_eq!(req.system_prompt.as_deref(), Some("[Task]\nfoo"));

        let mut req = ProviderRequest::with_system_prompt("base");
        req.append_system_prompt("\nextra");
        assert_eq!(req.system_prompt.as_deref(), Some("base\nextra"));
    }
}
