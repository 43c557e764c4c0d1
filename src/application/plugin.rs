//! 插件主入口
//!
//! 命令分发、权限检查与 LLM 请求钩子

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::core::config::{ConfigHandle, PluginConfig};
use crate::core::event::{ChatEvent, ProviderRequest};
use crate::core::injection::InjectionKind;
use crate::core::store::{KvStore, MemoryKvStore};
use crate::infrastructure::store::SqliteKvStore;

use super::command::{clamp_turns, split_turns, Command};
use super::service::{AddOutcome, InjectionService};

/// 提示词注入插件
///
/// 封装命令处理与 LLM 请求钩子，提供简洁的宿主接入 API
pub struct PromptInjector {
    service: InjectionService,
    config: ConfigHandle,
}

impl PromptInjector {
    /// 创建插件，使用指定的存储
    pub fn with_store(config: ConfigHandle, store: Arc<dyn KvStore>) -> Self {
        let service = InjectionService::new(store, config.clone());
        Self { service, config }
    }

    /// 创建插件，使用内存存储
    pub fn with_memory_store(config: PluginConfig) -> Self {
        Self::with_store(
            ConfigHandle::in_memory(config),
            Arc::new(MemoryKvStore::new()),
        )
    }

    /// 创建插件，使用指定路径的 SQLite 存储
    pub fn with_sqlite<P: AsRef<Path>>(config: ConfigHandle, db_path: P) -> Result<Self> {
        let store = Arc::new(SqliteKvStore::new(db_path)?);
        Ok(Self::with_store(config, store))
    }

    /// 获取注入服务引用
    pub fn service(&self) -> &InjectionService {
        &self.service
    }

    /// 处理一条消息中的命令
    ///
    /// 非命令文本返回 `Ok(None)`；命令的处理结果以
    /// 用户可读的回复文本返回，包括各类失败场景
    pub async fn handle_command(
        &self,
        event: &ChatEvent,
        text: &str,
    ) -> Result<Option<String>> {
        let Some(command) = Command::parse(text) else {
            return Ok(None);
        };

        let reply = match command {
            Command::Set { kind, args } => self.handle_set(event, kind, &args).await?,
            Command::Show => self.handle_show(event).await?,
            Command::Clear => self.handle_clear(event).await?,
            Command::AddWhitelist => self.handle_add_whitelist(event).await?,
        };

        Ok(Some(reply))
    }

    /// 在 LLM 请求前注入提示词
    ///
    /// 白名单检查最先执行，未通过时不读写任何数据，轮次不扣减
    pub async fn on_llm_request(
        &self,
        event: &ChatEvent,
        req: &mut ProviderRequest,
    ) -> Result<()> {
        if !self.service.check_whitelist(event).await {
            return Ok(());
        }

        let text = self.service.build_injection_text(event).await?;
        if text.is_empty() {
            return Ok(());
        }

        req.append_system_prompt(&text);
        info!(
            session = %event.unified_msg_origin,
            injected_len = text.len(),
            "injecting prompt for session"
        );
        Ok(())
    }

    /// 设置当前任务 / 附加知识提示词
    async fn handle_set(
        &self,
        event: &ChatEvent,
        kind: InjectionKind,
        args: &str,
    ) -> Result<String> {
        if !self.service.check_whitelist(event).await {
            return Ok(WHITELIST_REJECT.to_string());
        }

        let (parsed_turns, content) = split_turns(args);
        if content.is_empty() {
            return Ok(format!(
                "❌ 缺少注入内容。用法：/set_{} [轮次] <内容>",
                match kind {
                    InjectionKind::Task => "task",
                    InjectionKind::Knowledge => "know",
                }
            ));
        }

        let config = self.config.get().await;
        let turns = parsed_turns.unwrap_or(config.default_turns);
        let (turns, clamped) = clamp_turns(turns, config.max_turns_limit);

        match self.service.add_injection(event, kind, content, turns).await? {
            AddOutcome::CapExceeded { max } => Ok(format!(
                "❌ 注入条目已达上限 ({})。请先清除部分条目。",
                max
            )),
            AddOutcome::Added { turns } => {
                let name = match kind {
                    InjectionKind::Task => "当前任务",
                    InjectionKind::Knowledge => "附加知识",
                };
                let mut reply = String::new();
                if clamped {
                    reply.push_str(&format!("⚠️ 轮次参数超出范围，已调整为 {}。\n", turns));
                }
                reply.push_str(&format!(
                    "✅ {}已注入，将在接下来的 {} 轮对话中生效。",
                    name, turns
                ));
                Ok(reply)
            }
        }
    }

    /// 查看当前生效的注入信息
    async fn handle_show(&self, event: &ChatEvent) -> Result<String> {
        if !self.service.check_whitelist(event).await {
            return Ok(WHITELIST_REJECT.to_string());
        }

        let injections = self.service.list_injections(event).await?;
        if injections.is_empty() {
            return Ok("📭 当前会话没有生效的注入信息。".to_string());
        }

        let mut lines = vec!["📋 当前注入信息：".to_string()];
        for (i, entry) in injections.iter().enumerate() {
            lines.push(format!(
                "{}. {} (剩余 {}/{} 轮): {}",
                i + 1,
                entry.kind.label(),
                entry.turns_left,
                entry.original_turns,
                entry.content
            ));
        }
        Ok(lines.join("\n"))
    }

    /// 清除当前所有注入
    async fn handle_clear(&self, event: &ChatEvent) -> Result<String> {
        if !self.service.check_whitelist(event).await {
            return Ok(WHITELIST_REJECT.to_string());
        }

        self.service.clear_injections(event).await?;
        Ok("🗑️ 已清除所有注入信息。".to_string())
    }

    /// （管理员）将当前会话加入白名单
    async fn handle_add_whitelist(&self, event: &ChatEvent) -> Result<String> {
        if !event.is_admin {
            return Ok("❌ 仅管理员可以操作白名单。".to_string());
        }

        let sid = event.unified_msg_origin.clone();
        let added = self
            .config
            .update(|config| {
                if config.whitelist.contains(&sid) {
                    false
                } else {
                    config.whitelist.push(sid);
                    true
                }
            })
            .await;

        if added {
            self.config.save().await?;
            Ok(format!(
                "✅ 已将会话 {} 加入白名单。",
                event.unified_msg_origin
            ))
        } else {
            Ok("⚠️ 该会话已在白名单中。".to_string())
        }
    }
}

/// 白名单拒绝回复
const WHITELIST_REJECT: &str = "❌ 当前会话不在白名单中，无法使用注入功能。";
