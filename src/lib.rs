//! envresolve - .env 文件解析与值解析器链
//!
//! 文件文本经语法解析、去引号后，依次通过注册的解析器（变量展开、命令替换等），
//! 最终得到有序的环境变量映射。

pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod store;
pub mod types;
pub mod utils;

// 重新导出常用类型
pub use store::DotEnv;
pub use error::{EnvError, ErrorKind, Result};
pub use resolver::{Commands, Resolver, ResolverChain, Variables};
pub use types::{Declaration, EnvMap, OutputFormat};
