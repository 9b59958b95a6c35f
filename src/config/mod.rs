//! 配置层：文件格式解析与工具自身的配置

pub mod format;
pub mod settings;
