//! 命令替换解析器：`$(COMMAND)`
//!
//! 匹配到的记号交给 shell 以 `echo <记号>` 执行，用捕获的 stdout（去掉结尾换行）替换。
//! 前置奇数个反斜杠表示转义：去掉一个反斜杠后原样输出，不执行任何命令。

use super::Resolver;
use crate::error::{EnvError, Result};
use crate::types::EnvMap;
use crate::utils::executor::{ProcessRunner, ShellRunner};
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// 反斜杠串 + `$(` + 可选命令（字母开头，可带不含括号的参数）+ `)`
static COMMAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<backslashes>\\*)\$\((?P<cmd>[A-Za-z][A-Za-z0-9_]*(?:\s[^()]*)?)?\)")
        .expect("command pattern is valid")
});

#[derive(Clone)]
pub struct Commands {
    runner: Option<Arc<dyn ProcessRunner>>,
}

impl Default for Commands {
    fn default() -> Self {
        Self::new()
    }
}

impl Commands {
    /// 使用系统 shell
    pub fn new() -> Self {
        Self::with_runner(ShellRunner::new())
    }

    pub fn with_runner(runner: impl ProcessRunner + 'static) -> Self {
        Self::with_shared(Arc::new(runner))
    }

    /// 多个解析器共用同一个执行器
    pub fn with_shared(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner: Some(runner),
        }
    }

    /// 没有进程执行能力：出现需要执行的替换时返回 `MissingCapability`
    pub fn unavailable() -> Self {
        Self { runner: None }
    }

    fn expand(&self, value: &str, env: &EnvMap) -> Result<String> {
        let mut out = String::with_capacity(value.len());
        let mut cursor = 0usize;

        for caps in COMMAND_PATTERN.captures_iter(value) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            let backslashes = caps.name("backslashes").map_or(0, |m| m.len());

            out.push_str(&value[cursor..token.start()]);
            cursor = token.end();

            if backslashes % 2 == 1 {
                out.push_str(&token.as_str()[1..]);
                continue;
            }

            out.push_str(&self.substitute(token.as_str(), env)?);
        }

        out.push_str(&value[cursor..]);
        Ok(out)
    }

    fn substitute(&self, token: &str, env: &EnvMap) -> Result<String> {
        let Some(runner) = &self.runner else {
            return Err(EnvError::MissingCapability(format!(
                "no process runner configured for {token}"
            )));
        };

        tracing::debug!(token, "expanding command");
        let output = runner.run(&format!("echo {token}"), env)?;

        Ok(output.stdout.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Resolver for Commands {
    fn resolve(&self, value: &str, env: &EnvMap) -> Result<String> {
        if !value.contains('$') {
            return Ok(value.to_string());
        }
        self.expand(value, env)
    }
}
