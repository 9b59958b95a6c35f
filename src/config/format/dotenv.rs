//! .env 格式解析器 (简单原则：透明的文本解析)

use crate::error::{EnvError, Result};
use crate::types::{Declaration, EnvMap};

/// .env 格式解析器
pub struct DotenvParser;

impl DotenvParser {
    /// 解析 .env 文件内容
    ///
    /// 规则：
    /// - 跳过空行
    /// - 格式：`[export ]NAME=VALUE`
    /// - NAME 必须匹配 `[A-Za-z_][A-Za-z0-9_]*`
    /// - VALUE 不能以空白开头，内部空白原样保留
    /// - 第一个 `=` 分隔名称与值，值中可以继续出现 `=`
    ///
    /// 返回的值未去除引号，见 [`strip_quotes`]。
    ///
    /// # Errors
    ///
    /// Returns the first malformed declaration, with its line number.
    pub fn parse(content: &str) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line_num = idx + 1;

            if raw_line.trim().is_empty() {
                continue;
            }

            let line = strip_export(raw_line.trim_start());

            let Some((name, value)) = line.split_once('=') else {
                return Err(EnvError::MissingEquals {
                    line: line_num,
                    text: raw_line.to_string(),
                });
            };

            validate_name(name, line_num)?;

            if value.starts_with(char::is_whitespace) {
                return Err(EnvError::LeadingWhitespaceInValue {
                    line: line_num,
                    value: value.to_string(),
                });
            }

            declarations.push(Declaration::new(name, value, line_num));
        }

        Ok(declarations)
    }

    /// 序列化映射为 .env 格式
    ///
    /// 含空白或会被误去引号的值会加上双引号，再次解析时得到原值。
    #[must_use]
    pub fn serialize(env: &EnvMap) -> String {
        env.iter()
            .map(|(key, value)| {
                if needs_quotes(value) {
                    format!("{key}=\"{value}\"")
                } else {
                    format!("{key}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 去掉一对匹配的外层引号（单引号或双引号），只处理一次，不做转义
pub fn strip_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '\'' || first == '"') => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}

/// `export` 关键字后必须跟空白
fn strip_export(line: &str) -> &str {
    match line.strip_prefix("export") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

fn validate_name(name: &str, line: usize) -> Result<()> {
    let trimmed = name.trim_end();

    // 名称后紧跟空白：`FOO =BAR`
    if trimmed.len() != name.len() {
        if !trimmed.is_empty() && !trimmed.contains(char::is_whitespace) {
            return Err(EnvError::TrailingWhitespaceAfterName {
                line,
                name: trimmed.to_string(),
            });
        }
        return Err(EnvError::InvalidVariableName {
            line,
            name: trimmed.to_string(),
        });
    }

    if !is_valid_name(name) {
        return Err(EnvError::InvalidVariableName {
            line,
            name: name.to_string(),
        });
    }

    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}

fn needs_quotes(value: &str) -> bool {
    value.contains(char::is_whitespace) || strip_quotes(value).len() != value.len()
}
