//! 环境变量存储 (模块原则：清晰分离的存储逻辑)
//!
//! 文件文本 → 语法解析 → 去引号 → 解析器链 → 有序映射

use crate::config::format::dotenv::{DotenvParser, strip_quotes};
use crate::error::Result;
use crate::resolver::{Resolver, ResolverChain};
use crate::types::EnvMap;
use crate::utils::paths::read_file;
use std::fmt;
use std::path::Path;

/// 从 .env 文件加载的环境变量集合
#[derive(Default)]
pub struct DotEnv {
    env: EnvMap,
    chain: ResolverChain,
}

impl fmt::Debug for DotEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DotEnv")
            .field("keys", &self.env.keys().collect::<Vec<_>>())
            .field("resolvers", &self.chain.len())
            .finish()
    }
}

impl DotEnv {
    /// 创建实例；给定路径时立即加载
    pub fn new(path: Option<&Path>, resolvers: Vec<Box<dyn Resolver>>) -> Result<Self> {
        let mut dotenv = Self::with_resolvers(resolvers);
        if let Some(path) = path {
            dotenv.load(path)?;
        }
        Ok(dotenv)
    }

    /// 不加载文件，只注册解析器
    pub fn with_resolvers(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self {
            env: EnvMap::new(),
            chain: ResolverChain::new(resolvers),
        }
    }

    /// 加载文件，不使用任何解析器
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Some(path.as_ref()), Vec::new())
    }

    /// 从内存中的文本加载
    pub fn from_content(content: &str, resolvers: Vec<Box<dyn Resolver>>) -> Result<Self> {
        let mut dotenv = Self::with_resolvers(resolvers);
        dotenv.load_str(content)?;
        Ok(dotenv)
    }

    /// 读取文件并合并到现有映射（同名覆盖）
    ///
    /// 返回本次加载的声明数。失败时现有映射保持不变。
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading dotenv file");
        let content = read_file(path)?;
        self.load_str(&content)
    }

    /// 解析文本并合并到现有映射（同名覆盖）
    pub fn load_str(&mut self, content: &str) -> Result<usize> {
        let declarations = DotenvParser::parse(content)?;

        // 在副本上解析，全部成功后才提交
        let mut staged = self.env.clone();
        for declaration in &declarations {
            let value = self
                .chain
                .resolve(strip_quotes(&declaration.value), &staged)?;
            tracing::trace!(name = %declaration.name, line = declaration.line, "declaration resolved");
            staged.insert(declaration.name.clone(), value);
        }

        self.env = staged;
        tracing::debug!(count = declarations.len(), total = self.env.len(), "dotenv loaded");
        Ok(declarations.len())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.env.contains_key(name)
    }

    /// 有序快照
    pub fn to_array(&self) -> EnvMap {
        self.env.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.env.len()
    }

    pub fn is_empty(&self) -> bool {
        self.env.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.env)?)
    }

    pub fn to_dotenv(&self) -> String {
        DotenvParser::serialize(&self.env)
    }
}
