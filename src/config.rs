use crate::error::ConfigError;
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库 TOML 文件路径
    pub data_file: String,
    /// 每页题目数量
    pub questions_per_page: usize,
    /// 写操作是否回写题库文件
    pub persist_writes: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 抽题随机种子（为空时使用系统熵）
    pub quiz_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: "trivia.toml".to_string(),
            questions_per_page: 10,
            persist_writes: true,
            verbose_logging: false,
            quiz_seed: None,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值回退到默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_file: std::env::var("TRIVIA_DATA_FILE").unwrap_or(default.data_file),
            questions_per_page: lenient_var("QUESTIONS_PER_PAGE")
                .unwrap_or(default.questions_per_page),
            persist_writes: lenient_var("PERSIST_WRITES").unwrap_or(default.persist_writes),
            verbose_logging: lenient_var("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            quiz_seed: lenient_var("QUIZ_SEED").or(default.quiz_seed),
        }
    }

    /// 从环境变量读取配置，遇到无法解析的值时报错
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        Ok(Self {
            data_file: std::env::var("TRIVIA_DATA_FILE").unwrap_or(default.data_file),
            questions_per_page: parse_var("QUESTIONS_PER_PAGE", "usize")?
                .unwrap_or(default.questions_per_page),
            persist_writes: parse_var("PERSIST_WRITES", "bool")?
                .unwrap_or(default.persist_writes),
            verbose_logging: parse_var("VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            quiz_seed: parse_var("QUIZ_SEED", "u64")?.or(default.quiz_seed),
        })
    }
}

fn lenient_var<T: FromStr>(var_name: &str) -> Option<T> {
    std::env::var(var_name).ok().and_then(|v| v.parse().ok())
}

fn parse_var<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_size() {
        let config = Config::default();
        assert_eq!(config.questions_per_page, 10);
        assert!(config.persist_writes);
        assert!(config.quiz_seed.is_none());
    }

    #[test]
    fn test_parse_var_reports_bad_value() {
        std::env::set_var("TRIVIA_TEST_BAD_PAGE_SIZE", "ten");
        let result: Result<Option<usize>, _> = parse_var("TRIVIA_TEST_BAD_PAGE_SIZE", "usize");
        std::env::remove_var("TRIVIA_TEST_BAD_PAGE_SIZE");

        match result {
            Err(ConfigError::EnvVarParseFailed { value, .. }) => assert_eq!(value, "ten"),
            other => panic!("应当解析失败: {:?}", other),
        }
    }

    #[test]
    fn test_try_from_env_rejects_bad_flag() {
        std::env::set_var("VERBOSE_LOGGING", "sometimes");
        let strict = Config::try_from_env();
        let lenient = Config::from_env();
        std::env::remove_var("VERBOSE_LOGGING");

        match strict {
            Err(ConfigError::EnvVarParseFailed { var_name, .. }) => {
                assert_eq!(var_name, "VERBOSE_LOGGING")
            }
            other => panic!("应当解析失败: {:?}", other),
        }
        assert!(!lenient.verbose_logging);
    }

    #[test]
    fn test_parse_var_absent_is_none() {
        let result: Option<u64> = parse_var("TRIVIA_TEST_UNSET_VAR", "u64").unwrap();
        assert!(result.is_none());
    }
}
