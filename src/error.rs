//! 错误处理模块 (修复原则：明确抛出异常)

use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    // === 语法错误：携带出错行号（从 1 开始） ===
    #[error("Missing = in the environment variable declaration: {text}")]
    MissingEquals { line: usize, text: String },

    #[error("Whitespace characters are not supported after the variable name: {name}")]
    TrailingWhitespaceAfterName { line: usize, name: String },

    #[error("Invalid character in variable name: {name}")]
    InvalidVariableName { line: usize, name: String },

    #[error("Whitespace characters are not supported before the value: {value}")]
    LeadingWhitespaceInValue { line: usize, value: String },

    // === 解析器（resolver）错误 ===
    #[error("Issue expanding a command ({0})")]
    CommandExpansionFailed(String),

    #[error("Resolving commands requires a shell process facility: {0}")]
    MissingCapability(String),

    // === 外围错误 ===
    #[error("文件IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("文件不存在: {0}")]
    FileNotFound(PathBuf),

    #[error("变量未找到: {0}")]
    NotFound(String),

    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("命令未找到: {0}")]
    CommandNotFound(String),

    #[error("命令执行失败: {0}")]
    CommandExecutionFailed(String),
}

/// 错误分类，便于调用方按种类匹配而不关心携带的数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingEquals,
    TrailingWhitespaceAfterName,
    InvalidVariableName,
    LeadingWhitespaceInValue,
    CommandExpansionFailed,
    MissingCapability,
    Io,
    FileNotFound,
    NotFound,
    Json,
    Config,
    CommandNotFound,
    CommandExecutionFailed,
}

impl EnvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvError::MissingEquals { .. } => ErrorKind::MissingEquals,
            EnvError::TrailingWhitespaceAfterName { .. } => ErrorKind::TrailingWhitespaceAfterName,
            EnvError::InvalidVariableName { .. } => ErrorKind::InvalidVariableName,
            EnvError::LeadingWhitespaceInValue { .. } => ErrorKind::LeadingWhitespaceInValue,
            EnvError::CommandExpansionFailed(_) => ErrorKind::CommandExpansionFailed,
            EnvError::MissingCapability(_) => ErrorKind::MissingCapability,
            EnvError::Io(_) => ErrorKind::Io,
            EnvError::FileNotFound(_) => ErrorKind::FileNotFound,
            EnvError::NotFound(_) => ErrorKind::NotFound,
            EnvError::Json(_) => ErrorKind::Json,
            EnvError::Config(_) => ErrorKind::Config,
            EnvError::CommandNotFound(_) => ErrorKind::CommandNotFound,
            EnvError::CommandExecutionFailed(_) => ErrorKind::CommandExecutionFailed,
        }
    }

    /// 语法错误所在的行号
    pub fn line(&self) -> Option<usize> {
        match self {
            EnvError::MissingEquals { line, .. }
            | EnvError::TrailingWhitespaceAfterName { line, .. }
            | EnvError::InvalidVariableName { line, .. }
            | EnvError::LeadingWhitespaceInValue { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// 报告错误，支持详细/安静模式
    /// verbose = true: 详细错误链
    /// verbose = false: 关键信息，安静模式
    pub fn report(&self, verbose: bool) {
        if verbose {
            eprintln!("❌ 错误: {}", self);

            if let Some(line) = self.line() {
                eprintln!("  └─ 位置: 第 {} 行", line);
            }

            // thiserror 支持自动的 source() 链
            if let Some(source) = self.source() {
                eprintln!("  └─ 原因: {}", source);
                let mut current = source.source();
                while let Some(next) = current {
                    eprintln!("     └─ {}", next);
                    current = next.source();
                }
            }
        } else {
            match self {
                EnvError::NotFound(key) => eprintln!("未找到变量: {}", key),
                EnvError::Io(err) => eprintln!("文件错误: {}", err),
                EnvError::FileNotFound(path) => eprintln!("文件不存在: {}", path.display()),
                _ => eprintln!("错误: {}", self),
            }
        }
    }
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, EnvError>;
