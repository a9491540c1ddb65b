use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// HTML 解析错误
    #[error("HTML错误: {0}")]
    Html(#[from] HtmlError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 模型输出解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// HTML 解析错误
#[derive(Debug, Error)]
pub enum HtmlError {
    /// 片段没有可解析的根节点
    #[error("HTML 片段缺少根容器: {fragment}")]
    Structural { fragment: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyCompletion { model: String },
}

/// 模型输出解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// 返回文本不是合法的字面量
    #[error("无法解析LLM返回的字面量 (响应: {response}): {reason}")]
    Literal { response: String, reason: String },
    /// 列表首元素不是 '&' 或 '|'
    #[error("非法的运算符: {found}")]
    InvalidOperator { found: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析或序列化失败
    #[error("JSON处理失败 ({path}): {source}")]
    JsonFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置值不合法
    #[error("配置项 {name} 不合法: {reason}")]
    InvalidValue { name: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 处理错误
    pub fn json_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::File(FileError::JsonFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建字面量解析错误
    pub fn literal_parse_failed(response: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Parse(ParseError::Literal {
            response: response.into(),
            reason: reason.into(),
        })
    }

    /// 创建非法运算符错误
    pub fn invalid_operator(found: impl Into<String>) -> Self {
        AppError::Parse(ParseError::InvalidOperator {
            found: found.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
