//! URL 验证模块
//!
//! 仅做目标 URL 的语法校验，不做 DNS 解析或连通性检查

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// 协议 + 带点域名或点分四段地址 + 可选端口 + 可选路径或查询串
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?:(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+(?:[a-z]{2,6}\.?|[a-z0-9-]{2,}\.?)",
        r"|[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})",
        r"(?::[0-9]+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("URL pattern is a valid regex")
});

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http, https, ftp and ftps are allowed",
                proto
            ),
            Self::InvalidFormat(url) => write!(f, "Invalid URL format: {}", url),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证 URL 格式
///
/// 检查项目：
/// 1. URL 不为空
/// 2. 协议是 http / https / ftp / ftps（大小写不敏感）
/// 3. 主机是带点的域名或 IPv4 形式的地址，可带端口、路径或查询串
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let scheme = url.split_once("://").map(|(scheme, _)| scheme.to_ascii_lowercase());
    match scheme {
        Some(scheme) if ALLOWED_SCHEMES.contains(&scheme.as_str()) => {}
        Some(scheme) => return Err(UrlValidationError::InvalidProtocol(scheme)),
        None => {
            let proto = url.split(':').next().unwrap_or_default().to_ascii_lowercase();
            return Err(UrlValidationError::InvalidProtocol(proto));
        }
    }

    if !URL_PATTERN.is_match(url) {
        return Err(UrlValidationError::InvalidFormat(url.to_string()));
    }

    Ok(())
}

/// 目标 URL 校验器
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlValidator;

impl UrlValidator {
    /// `url` 可作为目标地址时返回 `true`，拒绝原因记录在 debug 日志中
    pub fn validate(&self, url: &str) -> bool {
        match validate_url(url) {
            Ok(()) => true,
            Err(e) => {
                debug!("URL rejected: {}", e);
                false
            }
        }
    }
}
