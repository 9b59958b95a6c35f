//! 从文件加载的集成测试

use envresolve::config::settings::Settings;
use envresolve::utils::executor::{ProcessOutput, ProcessRunner, ShellRunner};
use envresolve::{Commands, DotEnv, EnvMap, ErrorKind, Resolver, Result};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 在临时目录中写入 .env 文件
fn write_env(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn load_err(content: &str) -> envresolve::EnvError {
    let (_dir, path) = write_env(content);
    DotEnv::from_path(&path).unwrap_err()
}

/// 固定日期的假进程
struct FixedDate;

impl ProcessRunner for FixedDate {
    fn run(&self, command_line: &str, _env: &EnvMap) -> Result<ProcessOutput> {
        assert_eq!(command_line, "echo $(date '+%Y-%m-%d')");
        Ok(ProcessOutput {
            stdout: "2026-10-14\n".to_string(),
            stderr: String::new(),
        })
    }
}

mod loading {
    use super::*;

    #[test]
    fn test_new_without_file_is_empty() {
        let dotenv = DotEnv::new(None, Vec::new()).unwrap();
        assert!(dotenv.to_array().is_empty());
    }

    #[test]
    fn test_load_file() {
        let (_dir, path) = write_env("FOO=BAR");
        let mut dotenv = DotEnv::default();
        dotenv.load(&path).unwrap();

        assert!(dotenv.has("FOO"));
        assert_eq!(dotenv.get("FOO"), Some("BAR"));
    }

    #[test]
    fn test_construct_with_file() {
        let (_dir, path) = write_env("FOO=BAR\n");
        let dotenv = DotEnv::new(Some(path.as_path()), Vec::new()).unwrap();
        assert_eq!(dotenv.get("FOO"), Some("BAR"));
    }

    #[test]
    fn test_construct_with_resolver() {
        let (_dir, path) = write_env("FOO=BAR");
        let resolvers: Vec<Box<dyn Resolver>> =
            vec![Box::new(|value: &str, _: &EnvMap| -> Result<String> {
                Ok(value.to_lowercase())
            })];
        let dotenv = DotEnv::new(Some(path.as_path()), resolvers).unwrap();
        assert_eq!(dotenv.get("FOO"), Some("bar"));
    }

    #[test]
    fn test_empty_file() {
        let (_dir, path) = write_env("");
        let dotenv = DotEnv::from_path(&path).unwrap();
        assert!(dotenv.to_array().is_empty());
    }

    #[test]
    fn test_export_prefix() {
        let (_dir, path) = write_env("export FOO=BAR");
        assert_eq!(DotEnv::from_path(&path).unwrap().get("FOO"), Some("BAR"));
    }

    #[test]
    fn test_values_with_whitespace_and_quotes() {
        let (_dir, path) = write_env("A=BAR BAZ\nB='BAR BAZ'\nC=\"BAR BAZ\"\r\n");
        let dotenv = DotEnv::from_path(&path).unwrap();
        for key in ["A", "B", "C"] {
            assert_eq!(dotenv.get(key), Some("BAR BAZ"), "key {key}");
        }
    }

    #[test]
    fn test_later_declarations_overwrite() {
        let (_dir, path) = write_env("A=1\nB=2\nA=3");
        let snapshot = DotEnv::from_path(&path).unwrap().to_array();
        let pairs: Vec<_> = snapshot
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_load_twice_merges() {
        let (_dir, first) = write_env("A=1");
        let (_dir2, second) = write_env("A=2\nB=3");

        let mut dotenv = DotEnv::from_path(&first).unwrap();
        dotenv.load(&second).unwrap();
        assert_eq!(dotenv.get("A"), Some("2"));
        assert_eq!(dotenv.get("B"), Some("3"));
    }
}

mod diagnostics {
    use super::*;

    #[test]
    fn test_missing_equals() {
        let err = load_err("FOO");
        assert_eq!(err.kind(), ErrorKind::MissingEquals);
        assert_eq!(
            err.to_string(),
            "Missing = in the environment variable declaration: FOO"
        );
    }

    #[test]
    fn test_whitespace_after_name() {
        let err = load_err("FOO =BAR");
        assert_eq!(err.kind(), ErrorKind::TrailingWhitespaceAfterName);
        assert_eq!(
            err.to_string(),
            "Whitespace characters are not supported after the variable name: FOO"
        );
    }

    #[test]
    fn test_whitespace_inside_name() {
        let err = load_err("FOO BAR=BAZ");
        assert_eq!(err.kind(), ErrorKind::InvalidVariableName);
        assert_eq!(err.to_string(), "Invalid character in variable name: FOO BAR");
    }

    #[test]
    fn test_whitespace_before_value() {
        let err = load_err("FOO= BAR");
        assert_eq!(err.kind(), ErrorKind::LeadingWhitespaceInValue);
        assert_eq!(
            err.to_string(),
            "Whitespace characters are not supported before the value:  BAR"
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DotEnv::from_path(dir.path().join("missing.env")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}

mod command_substitution {
    use super::*;

    #[test]
    fn test_date_with_fake_process() {
        let (_dir, path) = write_env("FOO=$(date '+%Y-%m-%d')");
        let resolvers: Vec<Box<dyn Resolver>> = vec![Box::new(Commands::with_runner(FixedDate))];
        let dotenv = DotEnv::new(Some(path.as_path()), resolvers).unwrap();
        assert_eq!(dotenv.get("FOO"), Some("2026-10-14"));
    }

    #[test]
    fn test_escaped_command_is_literal() {
        let (_dir, path) = write_env("FOO=\\$(date)");
        let resolvers: Vec<Box<dyn Resolver>> = vec![Box::new(Commands::unavailable())];
        let dotenv = DotEnv::new(Some(path.as_path()), resolvers).unwrap();
        assert_eq!(dotenv.get("FOO"), Some("$(date)"));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_shell_substitution() {
        let (_dir, path) = write_env("GREETING=say $(echo hello)\nLITERAL='\\$(echo hi)'");
        let resolvers: Vec<Box<dyn Resolver>> = vec![Box::new(Commands::new())];
        let dotenv = DotEnv::new(Some(path.as_path()), resolvers).unwrap();
        assert_eq!(dotenv.get("GREETING"), Some("say hello"));
        assert_eq!(dotenv.get("LITERAL"), Some("$(echo hi)"));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_shell_sees_earlier_declarations() {
        let (_dir, path) = write_env("NAME=world\nMSG=$(printf $NAME)");
        let resolvers: Vec<Box<dyn Resolver>> = vec![Box::new(Commands::new())];
        let dotenv = DotEnv::new(Some(path.as_path()), resolvers).unwrap();
        assert_eq!(dotenv.get("MSG"), Some("world"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_shell_aborts_load() {
        let (_dir, path) = write_env("KEEP=1");
        let (_dir2, path2) = write_env("NEW=1\nBAD=$(date)");

        let runner = ShellRunner::new().shell("false");
        let resolvers: Vec<Box<dyn Resolver>> = vec![Box::new(Commands::with_runner(runner))];
        let mut dotenv = DotEnv::new(Some(path.as_path()), resolvers).unwrap();

        let err = dotenv.load(&path2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CommandExpansionFailed);
        assert!(!dotenv.has("NEW"));
        assert_eq!(dotenv.get("KEEP"), Some("1"));
    }
}

#[cfg(unix)]
mod default_chain {
    use super::*;

    fn load_default(content: &str) -> DotEnv {
        let (_dir, path) = write_env(content);
        DotEnv::new(Some(path.as_path()), Settings::default().build_resolvers()).unwrap()
    }

    #[test]
    fn test_escaped_command_stays_literal_when_referenced() {
        let dotenv = load_default("A=\\$(echo pwned)\nB=$A\nC=prefix-${A}");
        assert_eq!(dotenv.get("A"), Some("$(echo pwned)"));
        assert_eq!(dotenv.get("B"), Some("$(echo pwned)"));
        assert_eq!(dotenv.get("C"), Some("prefix-$(echo pwned)"));
    }

    #[test]
    fn test_shell_variables_inside_command() {
        let dotenv = load_default("NAME=world\nGREETING=$(echo hello $NAME)\nX=$(echo $HOME)");
        assert_eq!(dotenv.get("GREETING"), Some("hello world"));
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(dotenv.get("X"), Some(home.as_str()));
        }
    }

    #[test]
    fn test_commands_then_variables() {
        let dotenv = load_default("HOST=db\nURL=pg://$HOST/$(echo app)");
        assert_eq!(dotenv.get("URL"), Some("pg://db/app"));
    }
}
