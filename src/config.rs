use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError, FileError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 课程 JSON 文件路径（原地读写）
    pub courses_file: String,
    /// 失败课程记录文件
    pub failure_log_file: String,
    /// 每条记录处理完成后的等待秒数
    pub request_delay_secs: f64,
    /// 是否覆盖已解析的课程
    pub overwrite: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            courses_file: "courses.json".to_string(),
            failure_log_file: "failed_courses.txt".to_string(),
            request_delay_secs: 1.0,
            overwrite: false,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    /// 在默认配置之上叠加环境变量
    pub fn from_env() -> AppResult<Self> {
        Self::default().overlay_env()
    }

    /// 从 TOML 文件加载配置，缺省项使用默认值，之后再叠加环境变量
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let path_str = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(&path_str, e))?;
        let config: Config = toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path_str,
            source,
        })?;
        config.overlay_env()
    }

    fn overlay_env(self) -> AppResult<Self> {
        let config = Self {
            courses_file: env_string("COURSES_FILE").unwrap_or(self.courses_file),
            failure_log_file: env_string("FAILURE_LOG_FILE").unwrap_or(self.failure_log_file),
            request_delay_secs: env_parse("REQUEST_DELAY_SECS", "f64")?
                .unwrap_or(self.request_delay_secs),
            overwrite: env_parse("OVERWRITE", "bool")?.unwrap_or(self.overwrite),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            llm_api_key: env_string("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: env_string("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: env_string("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
        };
        config.validate()?;
        Ok(config)
    }

    /// 检查配置取值
    pub fn validate(&self) -> AppResult<()> {
        if !self.request_delay_secs.is_finite() || self.request_delay_secs < 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "request_delay_secs".to_string(),
                reason: format!("必须是非负数, 实际为 {}", self.request_delay_secs),
            }
            .into());
        }
        Ok(())
    }

    /// 记录之间的等待时间
    pub fn request_delay(&self) -> Duration {
        Duration::from_secs_f64(self.request_delay_secs)
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok()
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}
