//! 注入领域实体
//!
//! 定义注入条目与会话记录

use serde::{Deserialize, Serialize};

/// 注入类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionKind {
    /// 当前任务
    Task,
    /// 附加知识
    Knowledge,
}

impl std::str::FromStr for InjectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(InjectionKind::Task),
            "knowledge" | "know" => Ok(InjectionKind::Knowledge),
            _ => Err(format!("Unknown injection kind: {}", s)),
        }
    }
}

impl std::fmt::Display for InjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InjectionKind::Task => write!(f, "task"),
            InjectionKind::Knowledge => write!(f, "knowledge"),
        }
    }
}

impl InjectionKind {
    /// 显示用的中文标签
    pub fn label(&self) -> &'static str {
        match self {
            InjectionKind::Task => "📌 任务",
            InjectionKind::Knowledge => "📚 知识",
        }
    }
}

/// 注入条目
///
/// 每个条目带有剩余生效轮次，轮次耗尽后被移除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionEntry {
    #[serde(rename = "type")]
    pub kind: InjectionKind,
    pub content: String,
    pub turns_left: u32,
    pub original_turns: u32,
    pub created_at: i64,
}

impl InjectionEntry {
    /// 创建新的注入条目
    pub fn new(kind: InjectionKind, content: impl Into<String>, turns: u32) -> Self {
        Self {
            kind,
            content: content.into(),
            turns_left: turns,
            original_turns: turns,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// 条目是否仍然生效
    pub fn is_active(&self) -> bool {
        self.turns_left > 0
    }
}

/// 会话注入记录
///
/// 以会话为单位存储在 KV 存储中，条目列表为空时整条记录被删除
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    pub injections: Vec<InjectionEntry>,
}

impl SessionRecord {
    /// 创建空记录
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录中是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.injections.is_empty()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.injections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injection_kind_parse() {
        assert_eq!("task".parse::<InjectionKind>().unwrap(), InjectionKind::Task);
        assert_eq!(
            "knowledge".parse::<InjectionKind>().unwrap(),
            InjectionKind::Knowledge
        );
        assert_eq!(
            "know".parse::<InjectionKind>().unwrap(),
            InjectionKind::Knowledge
        );
        assert!("prompt".parse::<InjectionKind>().is_err());
    }

    #[test]
    fn test_entry_creation() {
        let entry = InjectionEntry::new(InjectionKind::Task, "翻译文档", 3);

        assert_eq!(entry.kind, InjectionKind::Task);
        assert_eq!(entry.content, "翻译文档");
        assert_eq!(entry.turns_left, 3);
        assert_eq!(entry.original_turns, 3);
        assert!(entry.is_active());
    }

    #[test]
    fn test_entry_expired() {
        let mut entry = InjectionEntry::new(InjectionKind::Knowledge, "背景资料", 1);
        entry.turns_left = 0;
        assert!(!entry.is_active());
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let mut record = SessionRecord::new();
        record
            .injections
            .push(InjectionEntry::new(InjectionKind::Task, "整理会议纪要", 2));

        let value = serde_json::to_value(&record).unwrap();
        // 字段名与存储格式保持一致
        assert_eq!(value["injections"][0]["type"], "task");
        assert_eq!(value["injections"][0]["turns_left"], 2);

        let loaded: SessionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.injections[0].content, "整理会议纪要");
    }
}
