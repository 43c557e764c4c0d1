//! 注入服务
//!
//! 管理会话注入记录：白名单检查、条目增删查，
//! 以及每次 LLM 请求前的文本构造与轮次扣减

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::core::config::{ConfigHandle, DEFAULT_KNOWLEDGE_TEMPLATE, DEFAULT_TASK_TEMPLATE};
use crate::core::event::ChatEvent;
use crate::core::injection::{InjectionEntry, InjectionKind, SessionRecord};
use crate::core::store::KvStore;

/// 内容占位符
const CONTENT_PLACEHOLDER: &str = "{content}";

/// 添加注入条目的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// 添加成功，返回实际生效轮次
    Added { turns: u32 },
    /// 条目数已达会话上限
    CapExceeded { max: usize },
}

/// 注入服务
pub struct InjectionService {
    store: Arc<dyn KvStore>,
    config: ConfigHandle,
}

impl InjectionService {
    /// 创建注入服务
    pub fn new(store: Arc<dyn KvStore>, config: ConfigHandle) -> Self {
        Self { store, config }
    }

    /// 检查白名单。如果未开启白名单模式，直接通过。
    pub async fn check_whitelist(&self, event: &ChatEvent) -> bool {
        let config = self.config.get().await;
        if !config.whitelist_mode {
            return true;
        }

        if config.whitelist.contains(&event.unified_msg_origin) {
            return true;
        }
        match &event.group_id {
            Some(group_id) => config.whitelist.contains(group_id),
            None => false,
        }
    }

    /// 添加注入条目
    ///
    /// 达到 `max_injections_per_session` 上限时不写存储，直接返回失败
    pub async fn add_injection(
        &self,
        event: &ChatEvent,
        kind: InjectionKind,
        content: impl Into<String>,
        turns: u32,
    ) -> Result<AddOutcome> {
        let key = event.storage_key();
        let mut record = self.load_record(&key).await?;

        let max = self.config.get().await.max_injections_per_session;
        if record.len() >= max {
            return Ok(AddOutcome::CapExceeded { max });
        }

        debug!(key = %key, kind = %kind, turns, "adding injection entry");
        record
            .injections
            .push(InjectionEntry::new(kind, content, turns));
        self.save_record(&key, &record).await?;

        Ok(AddOutcome::Added { turns })
    }

    /// 列出当前生效的注入条目
    pub async fn list_injections(&self, event: &ChatEvent) -> Result<Vec<InjectionEntry>> {
        let record = self.load_record(&event.storage_key()).await?;
        Ok(record.injections)
    }

    /// 清除会话的所有注入
    pub async fn clear_injections(&self, event: &ChatEvent) -> Result<()> {
        self.store.delete(&event.storage_key()).await
    }

    /// 构造注入文本并推进轮次倒计时
    ///
    /// 唯一会变更状态的读路径：每个 `turns_left > 0` 的条目
    /// 将内容写入对应类型的缓冲区并扣减一轮，扣减后仍为正的条目保留；
    /// 已经归零的条目不产生文本，直接丢弃。
    /// 处理后持久化过滤结果，列表为空时删除整条记录。
    pub async fn build_injection_text(&self, event: &ChatEvent) -> Result<String> {
        let key = event.storage_key();
        let Some(value) = self.store.get(&key).await? else {
            return Ok(String::new());
        };

        let mut record: SessionRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                warn!(key = %key, error = %e, "stored injection record is malformed, ignoring");
                return Ok(String::new());
            }
        };

        if record.is_empty() {
            return Ok(String::new());
        }

        let mut task_contents: Vec<String> = Vec::new();
        let mut know_contents: Vec<String> = Vec::new();
        let mut active: Vec<InjectionEntry> = Vec::new();

        for mut entry in record.injections.drain(..) {
            if !entry.is_active() {
                // 已耗尽的条目不产生文本，直接丢弃
                continue;
            }

            match entry.kind {
                InjectionKind::Task => task_contents.push(entry.content.clone()),
                InjectionKind::Knowledge => know_contents.push(entry.content.clone()),
            }

            entry.turns_left -= 1;
            if entry.turns_left > 0 {
                active.push(entry);
            }
        }

        let config = self.config.get().await;
        let mut text = String::new();

        if !task_contents.is_empty() {
            text.push_str(&render_template(
                &config.task_prompt_template,
                DEFAULT_TASK_TEMPLATE,
                &task_contents.join("\n"),
            ));
        }
        if !know_contents.is_empty() {
            text.push_str(&render_template(
                &config.knowledge_prompt_template,
                DEFAULT_KNOWLEDGE_TEMPLATE,
                &know_contents.join("\n"),
            ));
        }

        if active.is_empty() {
            debug!(key = %key, "all injections expired, removing session record");
            self.store.delete(&key).await?;
        } else {
            let record = SessionRecord { injections: active };
            self.save_record(&key, &record).await?;
        }

        Ok(text)
    }

    /// 加载会话记录，不存在或损坏时视为空记录
    async fn load_record(&self, key: &str) -> Result<SessionRecord> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(SessionRecord::new());
        };

        match serde_json::from_value(value) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(key = %key, error = %e, "stored injection record is malformed, ignoring");
                Ok(SessionRecord::new())
            }
        }
    }

    /// 持久化会话记录
    async fn save_record(&self, key: &str, record: &SessionRecord) -> Result<()> {
        self.store.put(key, serde_json::to_value(record)?).await
    }
}

/// 模板占位符替换
///
/// 模板缺少 `{content}` 占位符时回退到固定默认格式
fn render_template(template: &str, fallback: &str, content: &str) -> String {
    if template.contains(CONTENT_PLACEHOLDER) {
        template.replace(CONTENT_PLACEHOLDER, content)
    } else {
        fallback.replace(CONTENT_PLACEHOLDER, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        assert_eq!(
            render_template("<<{content}>>", DEFAULT_TASK_TEMPLATE, "abc"),
            "<<abc>>"
        );
    }

    #[test]
    fn test_render_template_fallback() {
        // 占位符缺失时使用默认格式
        assert_eq!(
            render_template("no placeholder here", DEFAULT_TASK_TEMPLATE, "abc"),
            "\n[Current Task]\nabc\n"
        );
    }
}
