//! 变量展开解析器：`$NAME` 与 `${NAME}`
//!
//! 从已累积的映射中取值，未定义的变量保留原样（交给子进程的 shell 展开）。
//! 奇数个反斜杠表示转义，去掉一个反斜杠后原样输出；`$(` 留给命令解析器处理。

use super::Resolver;
use crate::error::Result;
use crate::types::EnvMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct Variables;

impl Variables {
    pub fn new() -> Self {
        Self
    }

    fn expand(&self, value: &str, env: &EnvMap) -> String {
        let bytes = value.as_bytes();
        let mut out = String::with_capacity(value.len());
        let mut cursor = 0usize;
        let mut idx = 0usize;

        while idx < bytes.len() {
            if bytes[idx] != b'$' {
                idx += 1;
                continue;
            }

            let Some((name_start, name_end, token_end)) = parse_placeholder(value, idx) else {
                idx += 1;
                continue;
            };

            let mut backslashes = 0usize;
            while idx - backslashes > cursor && bytes[idx - backslashes - 1] == b'\\' {
                backslashes += 1;
            }
            let token_start = idx - backslashes;

            out.push_str(&value[cursor..token_start]);
            if backslashes % 2 == 1 {
                out.push_str(&value[token_start + 1..token_end]);
            } else {
                out.push_str(&value[token_start..idx]);
                let name = &value[name_start..name_end];
                match env.get(name) {
                    Some(resolved) => out.push_str(resolved),
                    None => {
                        tracing::debug!(name, "undefined variable kept verbatim");
                        out.push_str(&value[idx..token_end]);
                    }
                }
            }

            cursor = token_end;
            idx = token_end;
        }

        out.push_str(&value[cursor..]);
        out
    }
}

impl Resolver for Variables {
    fn resolve(&self, value: &str, env: &EnvMap) -> Result<String> {
        if !value.contains('$') {
            return Ok(value.to_string());
        }
        Ok(self.expand(value, env))
    }
}

/// 返回 (名称起点, 名称终点, 占位符终点)
fn parse_placeholder(input: &str, start: usize) -> Option<(usize, usize, usize)> {
    let bytes = input.as_bytes();
    if start + 1 >= bytes.len() {
        return None;
    }

    if bytes[start + 1] == b'{' {
        let name_start = start + 2;
        let mut end = name_start;
        while end < bytes.len() && bytes[end] != b'}' {
            end += 1;
        }

        if end >= bytes.len() || !is_valid_name(&bytes[name_start..end]) {
            return None;
        }

        return Some((name_start, end, end + 1));
    }

    let name_start = start + 1;
    if !is_name_start(bytes[name_start]) {
        return None;
    }

    let mut name_end = name_start + 1;
    while name_end < bytes.len() && is_name_char(bytes[name_end]) {
        name_end += 1;
    }

    Some((name_start, name_end, name_end))
}

fn is_valid_name(name: &[u8]) -> bool {
    match name.split_first() {
        Some((first, rest)) => is_name_start(*first) && rest.iter().copied().all(is_name_char),
        None => false,
    }
}

fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
