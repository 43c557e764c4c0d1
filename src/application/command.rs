//! 命令解析
//!
//! 解析聊天消息中的插件命令与轮次参数

use crate::core::injection::InjectionKind;

/// 插件命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 设置注入（set_task / set_know），参数待进一步解析
    Set { kind: InjectionKind, args: String },
    /// 查看当前注入
    Show,
    /// 清除当前注入
    Clear,
    /// （管理员）将当前会话加入白名单
    AddWhitelist,
}

impl Command {
    /// 从消息文本解析命令
    ///
    /// 允许可选的 `/` 前缀；非命令文本返回 `None`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text.strip_prefix('/').unwrap_or(text);

        let (name, args) = match text.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (text, ""),
        };

        // set_task / set_know（含 set_knowledge 别名）
        if let Some(kind) = name
            .strip_prefix("set_")
            .and_then(|k| k.parse::<InjectionKind>().ok())
        {
            return Some(Command::Set {
                kind,
                args: args.to_string(),
            });
        }

        match name {
            "show_injections" => Some(Command::Show),
            "clear_injections" => Some(Command::Clear),
            "add_whitelist" => Some(Command::AddWhitelist),
            _ => None,
        }
    }
}

/// 从自由文本中拆出轮次参数
///
/// 轮次可以作为开头或结尾的整数 token 出现；开头优先。
/// 只有单个 token 时整体视为内容（歧义回退），不解析轮次。
pub fn split_turns(args: &str) -> (Option<u32>, String) {
    let trimmed = args.trim();
    let mut tokens = trimmed.split_whitespace();

    let Some(first) = tokens.next() else {
        return (None, String::new());
    };
    if tokens.next().is_none() {
        // 单 token 始终是内容
        return (None, trimmed.to_string());
    }

    if let Ok(n) = first.parse::<u32>() {
        let rest = trimmed[first.len()..].trim_start();
        return (Some(n), rest.to_string());
    }

    if let Some(last) = trimmed.split_whitespace().last() {
        if let Ok(n) = last.parse::<u32>() {
            let front = trimmed[..trimmed.len() - last.len()].trim_end();
            return (Some(n), front.to_string());
        }
    }

    (None, trimmed.to_string())
}

/// 将轮次限制到 `1..=max` 区间
///
/// 返回 (生效轮次, 是否被调整)
pub fn clamp_turns(turns: u32, max: u32) -> (u32, bool) {
    if turns == 0 {
        (1, true)
    } else if turns > max {
        (max, true)
    } else {
        (turns, false)
    }
}
