//! 核心数据结构定义 (表达原则：用数据结构表达逻辑)

use indexmap::IndexMap;

/// 环境变量映射：键唯一，保留首次插入顺序
pub type EnvMap = IndexMap<String, String>;

/// 一行 `NAME=VALUE` 声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    /// 所在行号（从 1 开始）
    pub line: usize,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            line,
        }
    }
}

/// 输出格式类型
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    ENV,
    JSON,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "j" => OutputFormat::JSON,
            _ => OutputFormat::ENV,
        }
    }
}
