//! 交互式演示
//!
//! 在本地命令行中模拟宿主运行时：命令行输入作为聊天消息，
//! 非命令输入触发一次模拟的 LLM 请求并打印将要发送的 system prompt

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use prompt_injector::{
    logger, ChatEvent, ConfigHandle, MemoryKvStore, PluginConfig, PromptInjector,
    ProviderRequest,
};

const BASE_SYSTEM_PROMPT: &str = "你是一个乐于助人的聊天助手。";

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => ConfigHandle::load(&path).await?,
        Err(_) => ConfigHandle::in_memory(PluginConfig::default()),
    };

    let plugin = match std::env::var("STORE_TYPE").as_deref() {
        Ok("sqlite") => {
            let db_path =
                std::env::var("DB_PATH").unwrap_or_else(|_| "injections.db".to_string());
            info!(db_path = %db_path, "using sqlite store");
            PromptInjector::with_sqlite(config, db_path)?
        }
        _ => PromptInjector::with_store(config, Arc::new(MemoryKvStore::new())),
    };

    // 本地演示会话，发送者视为管理员
    let event = ChatEvent::private("cli:demo", "local-user").as_admin();

    println!("prompt-injector {} 交互演示", prompt_injector::VERSION);
    println!("命令：/set_task /set_know /show_injections /clear_injections /add_whitelist");
    println!("其他输入模拟一轮 LLM 请求；Ctrl-D 退出。");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(reply) = plugin.handle_command(&event, line).await? {
            println!("{}", reply);
            continue;
        }
        if line.starts_with('/') {
            println!("❓ 未知命令：{}", line);
            continue;
        }

        // 模拟一次出站 LLM 请求
        let mut req = ProviderRequest::with_system_prompt(BASE_SYSTEM_PROMPT);
        plugin.on_llm_request(&event, &mut req).await?;
        println!("---- system prompt ----");
        println!("{}", req.system_prompt.as_deref().unwrap_or(""));
        println!("-----------------------");
    }

    Ok(())
}
