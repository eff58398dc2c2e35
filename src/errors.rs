use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkgateError {
    Validation(String),
    MalformedInput(String),
    NotFound(String),
    TokenConflict(String),
    TokenExhausted(String),
    StorageConfig(String),
    StorageConnection(String),
    StorageOperation(String),
    Serialization(String),
    FileOperation(String),
}

impl LinkgateError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkgateError::Validation(_) => "E001",
            LinkgateError::MalformedInput(_) => "E002",
            LinkgateError::NotFound(_) => "E003",
            LinkgateError::TokenConflict(_) => "E004",
            LinkgateError::TokenExhausted(_) => "E005",
            LinkgateError::StorageConfig(_) => "E006",
            LinkgateError::StorageConnection(_) => "E007",
            LinkgateError::StorageOperation(_) => "E008",
            LinkgateError::Serialization(_) => "E009",
            LinkgateError::FileOperation(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkgateError::Validation(_) => "Validation Error",
            LinkgateError::MalformedInput(_) => "Malformed Input",
            LinkgateError::NotFound(_) => "Resource Not Found",
            LinkgateError::TokenConflict(_) => "Token Conflict",
            LinkgateError::TokenExhausted(_) => "Token Generation Exhausted",
            LinkgateError::StorageConfig(_) => "Storage Configuration Error",
            LinkgateError::StorageConnection(_) => "Storage Connection Error",
            LinkgateError::StorageOperation(_) => "Storage Operation Error",
            LinkgateError::Serialization(_) => "Serialization Error",
            LinkgateError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkgateError::Validation(msg)
            | LinkgateError::MalformedInput(msg)
            | LinkgateError::NotFound(msg)
            | LinkgateError::TokenConflict(msg)
            | LinkgateError::TokenExhausted(msg)
            | LinkgateError::StorageConfig(msg)
            | LinkgateError::StorageConnection(msg)
            | LinkgateError::StorageOperation(msg)
            | LinkgateError::Serialization(msg)
            | LinkgateError::FileOperation(msg) => msg,
        }
    }

    /// 请求因该错误终止时使用的 HTTP 状态码
    ///
    /// Validation 与 NotFound 以 200 加正文的形式返回
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkgateError::Validation(_) | LinkgateError::NotFound(_) => StatusCode::OK,
            LinkgateError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            LinkgateError::TokenConflict(_) => StatusCode::CONFLICT,
            LinkgateError::TokenExhausted(_)
            | LinkgateError::StorageConfig(_)
            | LinkgateError::StorageConnection(_)
            | LinkgateError::StorageOperation(_)
            | LinkgateError::Serialization(_)
            | LinkgateError::FileOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为存储层错误
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            LinkgateError::StorageConfig(_)
                | LinkgateError::StorageConnection(_)
                | LinkgateError::StorageOperation(_)
                | LinkgateError::Serialization(_)
                | LinkgateError::FileOperation(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkgateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkgateError {}

// 便捷的构造函数
impl LinkgateError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkgateError::Validation(msg.into())
    }

    pub fn malformed_input<T: Into<String>>(msg: T) -> Self {
        LinkgateError::MalformedInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkgateError::NotFound(msg.into())
    }

    pub fn token_conflict<T: Into<String>>(msg: T) -> Self {
        LinkgateError::TokenConflict(msg.into())
    }

    pub fn token_exhausted<T: Into<String>>(msg: T) -> Self {
        LinkgateError::TokenExhausted(msg.into())
    }

    pub fn storage_config<T: Into<String>>(msg: T) -> Self {
        LinkgateError::StorageConfig(msg.into())
    }

    pub fn storage_connection<T: Into<String>>(msg: T) -> Self {
        LinkgateError::StorageConnection(msg.into())
    }

    pub fn storage_operation<T: Into<String>>(msg: T) -> Self {
        LinkgateError::StorageOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkgateError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkgateError::FileOperation(msg.into())
    }
}

impl From<std::io::Error> for LinkgateError {
    fn from(err: std::io::Error) -> Self {
        LinkgateError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkgateError {
    fn from(err: serde_json::Error) -> Self {
        LinkgateError::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for LinkgateError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() {
            LinkgateError::StorageConnection(err.to_string())
        } else {
            LinkgateError::StorageOperation(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkgateError>;
