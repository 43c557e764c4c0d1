//! 标准化错误处理
//!
//! 定义插件专用的错误类型

use thiserror::Error;

/// 插件主要错误类型
#[derive(Error, Debug)]
pub enum InjectorError {
    /// 存储相关错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 输入验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<std::io::Error> for InjectorError {
    fn from(err: std::io::Error) -> Self {
        InjectorError::StorageError(err.to_string())
    }
}

impl From<serde_yaml::Error> for InjectorError {
    fn from(err: serde_yaml::Error) -> Self {
        InjectorError::ConfigError(err.to_string())
    }
}

/// 插件结果类型别名
pub type Result<T> = std::result::Result<T, InjectorError>;
