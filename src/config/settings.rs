//! 工具配置 (`.envresolve.toml`)
//!
//! 查找顺序：显式路径 > `./.envresolve.toml` > `<config_dir>/envresolve/config.toml` > 默认值

use crate::error::{EnvError, Result};
use crate::resolver::{Commands, Resolver, Variables};
use crate::utils::executor::{ProcessRunner, ShellRunner};
use crate::utils::paths::{self, file_exists, read_file};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 可注册的内置解析器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    Variables,
    Commands,
}

/// 配置选项
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// 默认 .env 文件
    pub file: PathBuf,
    /// 解析器注册顺序；命令替换在变量展开之前，展开后的文本不会再被当作命令执行
    pub resolvers: Vec<ResolverKind>,
    /// 命令替换时子进程是否继承当前环境
    pub inherit_env: bool,
    /// 命令替换使用的 shell
    pub shell: Option<String>,
    /// 是否详细输出
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: PathBuf::from(".env"),
            resolvers: vec![ResolverKind::Commands, ResolverKind::Variables],
            inherit_env: true,
            shell: None,
            verbose: false,
        }
    }
}

impl Settings {
    /// 从 TOML 文本解析
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EnvError::Config(e.to_string()))
    }

    /// 读取指定配置文件（必须存在）
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        toml::from_str(&content)
            .map_err(|e| EnvError::Config(format!("{}: {}", path.display(), e)))
    }

    /// 按查找顺序加载配置
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = [Some(paths::project_config_path()?), paths::user_config_path()];
        for path in candidates.into_iter().flatten() {
            if file_exists(&path) {
                tracing::debug!(path = %path.display(), "using config file");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// 按配置构建解析器列表
    pub fn build_resolvers(&self) -> Vec<Box<dyn Resolver>> {
        self.build_resolvers_with(Arc::new(self.shell_runner()))
    }

    /// 按配置构建解析器列表，命令替换使用给定的进程执行器
    pub fn build_resolvers_with(&self, runner: Arc<dyn ProcessRunner>) -> Vec<Box<dyn Resolver>> {
        self.resolvers
            .iter()
            .map(|kind| -> Box<dyn Resolver> {
                match kind {
                    ResolverKind::Variables => Box::new(Variables::new()),
                    ResolverKind::Commands => Box::new(Commands::with_shared(runner.clone())),
                }
            })
            .collect()
    }

    fn shell_runner(&self) -> ShellRunner {
        let runner = ShellRunner::new().inherit_env(self.inherit_env);
        match &self.shell {
            Some(shell) => runner.shell(shell.clone()),
            None => runner,
        }
    }
}
