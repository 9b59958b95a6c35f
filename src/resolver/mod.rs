//! 值解析器 (resolver) 链
//!
//! 每个解析器接收当前值与已累积的环境映射，返回新值；
//! 按注册顺序依次执行，前一个的输出是后一个的输入。

use crate::error::Result;
use crate::types::EnvMap;

pub mod commands;
pub mod variables;

pub use commands::Commands;
pub use variables::Variables;

/// 值转换单元
pub trait Resolver: Send + Sync {
    fn resolve(&self, value: &str, env: &EnvMap) -> Result<String>;
}

/// 任意 `Fn(&str, &EnvMap) -> Result<String>` 都可以作为解析器
impl<F> Resolver for F
where
    F: Fn(&str, &EnvMap) -> Result<String> + Send + Sync,
{
    fn resolve(&self, value: &str, env: &EnvMap) -> Result<String> {
        self(value, env)
    }
}

/// 有序解析器列表，构造后不再调整顺序
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// 依次执行所有解析器；任一失败即中止
    pub fn resolve(&self, value: &str, env: &EnvMap) -> Result<String> {
        let mut current = value.to_string();
        for (idx, resolver) in self.resolvers.iter().enumerate() {
            current = resolver.resolve(&current, env)?;
            tracing::trace!(resolver = idx, value = %current, "resolver applied");
        }
        Ok(current)
    }
}

impl From<Vec<Box<dyn Resolver>>> for ResolverChain {
    fn from(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self::new(resolvers)
    }
}
