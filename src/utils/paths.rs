//! 跨平台路径处理工具 (传统原则：常识性接口设计)

use crate::error::{EnvError, Result};
use std::path::{Path, PathBuf};

/// 项目级配置文件名
pub const PROJECT_CONFIG_FILE: &str = ".envresolve.toml";

/// 用户级配置文件：`<config_dir>/envresolve/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("envresolve").join("config.toml"))
}

/// 项目级配置文件：`./.envresolve.toml`
pub fn project_config_path() -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    Ok(current_dir.join(PROJECT_CONFIG_FILE))
}

/// 检查文件是否存在
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// 读取文件内容，返回错误时提供详细信息
pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(EnvError::FileNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|e| {
        EnvError::Io(std::io::Error::new(
            e.kind(),
            format!("读取文件 {} 失败: {}", path.display(), e),
        ))
    })
}
