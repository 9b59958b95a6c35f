//! CLI 参数定义

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// envresolve - .env 文件解析与值解析工具
#[derive(Parser, Debug)]
#[command(
    name = "envresolve",
    version,
    about = ".env 文件解析与值解析工具",
    long_about = "解析 .env 文件，依次应用变量展开与命令替换，输出或注入最终的环境变量"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// .env 文件路径（默认取配置中的 file）
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 不使用任何解析器，只去除引号
    #[arg(long, global = true)]
    pub raw: bool,

    /// 禁用命令替换
    #[arg(long, global = true)]
    pub no_commands: bool,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 获取环境变量
    Get {
        /// 变量名称
        key: String,
    },

    /// 检查变量是否存在（通过退出码）
    Has {
        /// 变量名称
        key: String,
    },

    /// 列出环境变量
    List {
        /// 输出格式 (env/json)
        #[arg(short = 'F', long, default_value = "env")]
        format: String,
    },

    /// 只检查语法，不执行解析器
    Check,

    /// 运行命令并注入环境变量
    Run {
        /// 要执行的命令
        #[arg(required = true, last = true)]
        command: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["envresolve", "get", "FOO", "--file", "app.env", "--raw"]);
        assert_eq!(cli.file, Some(PathBuf::from("app.env")));
        assert!(cli.raw);
        assert!(matches!(cli.command, Commands::Get { ref key } if key == "FOO"));
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::parse_from(["envresolve", "run", "--", "sh", "-c", "echo $FOO"]);
        match cli.command {
            Commands::Run { command } => assert_eq!(command, vec!["sh", "-c", "echo $FOO"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
