//! envresolve 主程序入口
//!
//! 设计原则：
//! - 入口代码简洁，逻辑委托给库
//! - 安静模式：默认无输出，成功静默
//! - 错误处理：详细/安静错误模式，通过 --verbose 切换

use clap::Parser;
use envresolve::cli::{Cli, Commands};
use envresolve::config::format::dotenv::DotenvParser;
use envresolve::config::settings::{ResolverKind, Settings};
use envresolve::utils::executor::CommandExecutor;
use envresolve::utils::paths::read_file;
use envresolve::{DotEnv, EnvError, OutputFormat, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let settings = match init_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("配置初始化失败: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(settings.verbose);

    if let Err(e) = run_command(&cli, &settings) {
        e.report(settings.verbose);
        std::process::exit(1);
    }
}

/// 加载配置并用命令行参数覆盖
fn init_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::discover(cli.config.as_deref())?;

    if let Some(file) = &cli.file {
        settings.file = file.clone();
    }
    if cli.raw {
        settings.resolvers.clear();
    }
    if cli.no_commands {
        settings.resolvers.retain(|kind| *kind != ResolverKind::Commands);
    }
    settings.verbose |= cli.verbose;

    Ok(settings)
}

/// 日志输出到 stderr，级别由 ENVRESOLVE_LOG 控制
fn init_logging(verbose: bool) {
    let default_level = if verbose { "envresolve=debug" } else { "envresolve=warn" };
    let filter = EnvFilter::try_from_env("ENVRESOLVE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(settings: &Settings) -> Result<DotEnv> {
    DotEnv::new(Some(settings.file.as_path()), settings.build_resolvers())
}

/// 运行具体命令
fn run_command(cli: &Cli, settings: &Settings) -> Result<()> {
    match &cli.command {
        Commands::Get { key } => {
            let dotenv = load(settings)?;
            match dotenv.get(key) {
                Some(value) => println!("{}", value),
                None => return Err(EnvError::NotFound(key.clone())),
            }
        }

        Commands::Has { key } => {
            let dotenv = load(settings)?;
            if !dotenv.has(key) {
                std::process::exit(1);
            }
        }

        Commands::List { format } => {
            let dotenv = load(settings)?;
            match OutputFormat::from(format.as_str()) {
                OutputFormat::ENV => {
                    if !dotenv.is_empty() {
                        println!("{}", dotenv.to_dotenv());
                    }
                }
                OutputFormat::JSON => println!("{}", dotenv.to_json()?),
            }
        }

        Commands::Check => {
            let content = read_file(&settings.file)?;
            let declarations = DotenvParser::parse(&content)?;
            if settings.verbose {
                println!("✓ {} 个声明，语法正确", declarations.len());
            }
        }

        Commands::Run { command } => {
            let dotenv = load(settings)?;
            let exit_code = CommandExecutor::exec_with_env(command, &dotenv.to_array())?;

            // 退出码透传
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
