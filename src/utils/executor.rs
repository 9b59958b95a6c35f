//! 跨平台命令执行器
//!
//! - [`ShellRunner`]：通过 shell 执行命令行并捕获输出（命令替换使用）
//! - [`CommandExecutor`]：直接执行子进程并继承标准流（run 命令使用）
//!
//! Windows 使用 `cmd /C`，Unix 使用 `sh -c`

use crate::error::{EnvError, Result};
use crate::types::EnvMap;
use std::io::ErrorKind as IoErrorKind;
use std::process::{Command, Stdio};

/// 子进程捕获的输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// 进程执行能力
///
/// 接收完整命令行与环境映射，返回捕获的 stdout/stderr；
/// 非零退出码必须返回 `CommandExpansionFailed`，携带 stderr。
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command_line: &str, env: &EnvMap) -> Result<ProcessOutput>;
}

/// 以系统 shell 执行命令行
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    inherit_env: bool,
}

impl Default for ShellRunner {
    fn default() -> Self {
        let shell = if cfg!(target_os = "windows") { "cmd" } else { "sh" };
        Self {
            shell: shell.to_string(),
            inherit_env: true,
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定 shell 程序
    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// 是否继承当前进程的环境变量（映射中的值始终覆盖继承值）
    pub fn inherit_env(mut self, inherit_env: bool) -> Self {
        self.inherit_env = inherit_env;
        self
    }

    fn command(&self, command_line: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        if cfg!(target_os = "windows") {
            cmd.arg("/C");
        } else {
            cmd.arg("-c");
        }
        cmd.arg(command_line);
        cmd
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command_line: &str, env: &EnvMap) -> Result<ProcessOutput> {
        let mut cmd = self.command(command_line);

        if !self.inherit_env {
            cmd.env_clear();
        }
        // 传入的是映射的副本，子进程无法修改内存中的映射
        cmd.envs(env.iter());

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::trace!(shell = %self.shell, command_line, "spawning shell");

        let output = cmd.output().map_err(|e| {
            if e.kind() == IoErrorKind::NotFound {
                EnvError::MissingCapability(format!("{}: {}", self.shell, e))
            } else {
                EnvError::CommandExpansionFailed(e.to_string())
            }
        })?;

        let captured = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            tracing::debug!(status = ?output.status.code(), "shell exited unsuccessfully");
            return Err(EnvError::CommandExpansionFailed(captured.stderr));
        }

        Ok(captured)
    }
}

/// 跨平台命令执行器
pub struct CommandExecutor;

impl CommandExecutor {
    /// 执行命令并注入环境变量
    ///
    /// # 参数
    /// - `command`: 命令和参数，如 `["python", "app.py"]`
    /// - `env_vars`: 要注入的环境变量（覆盖继承的变量）
    ///
    /// # 返回
    /// 子进程的退出码
    pub fn exec_with_env(command: &[String], env_vars: &EnvMap) -> Result<i32> {
        let Some((program, args)) = command.split_first() else {
            return Err(EnvError::CommandExecutionFailed("命令不能为空".to_string()));
        };

        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.envs(env_vars.iter());

        // 继承标准流
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = cmd.status().map_err(|e| {
            EnvError::CommandNotFound(format!(
                "{}: {} (请确保命令在 PATH 中或使用完整路径)",
                program, e
            ))
        })?;

        Ok(status.code().unwrap_or(1))
    }
}
