use std::fmt;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验错误（缺失或格式不正确）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 引用的记录不存在
    #[error("记录不存在: {entity} #{id}")]
    NotFound { entity: &'static str, id: i64 },
    /// 请求体不是预期的编码
    #[error("不支持的请求格式: {detail}")]
    UnsupportedMedia { detail: String },
    /// 存储层错误（写入已回滚）
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 校验失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// 必填字段缺失
    Missing,
    /// 请求本身不成立（如页码非正数、引用了不存在的分类）
    Malformed(String),
    /// 字段存在但取值不合法
    Invalid(String),
}

/// 输入校验错误
///
/// 携带出错的字段名，边界层据此生成描述性信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    /// 必填字段缺失
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: ValidationReason::Missing,
        }
    }

    /// 请求不成立
    pub fn malformed(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: ValidationReason::Malformed(detail.into()),
        }
    }

    /// 字段取值不合法
    pub fn invalid(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: ValidationReason::Invalid(detail.into()),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.reason == ValidationReason::Missing
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            ValidationReason::Missing => write!(f, "缺少必填字段 '{}'", self.field),
            ValidationReason::Malformed(detail) => {
                write!(f, "请求参数 '{}' 有误: {}", self.field, detail)
            }
            ValidationReason::Invalid(detail) => {
                write!(f, "字段 '{}' 不合法: {}", self.field, detail)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 存储层错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 锁被污染（持锁线程 panic）
    #[error("存储锁不可用 ({operation})")]
    LockPoisoned { operation: &'static str },
    /// 题目 id 已用尽
    #[error("题目 id 已达上限，无法分配新 id")]
    IdSpaceExhausted,
    /// 持久化写入失败
    #[error("持久化失败 ({path}): {source}")]
    PersistFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
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
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建题目不存在错误
    pub fn question_not_found(id: i64) -> Self {
        AppError::NotFound {
            entity: "question",
            id,
        }
    }

    /// 创建分类不存在错误
    pub fn category_not_found(id: i64) -> Self {
        AppError::NotFound {
            entity: "category",
            id,
        }
    }

    /// 创建请求格式错误
    pub fn unsupported_media(detail: impl Into<String>) -> Self {
        AppError::UnsupportedMedia {
            detail: detail.into(),
        }
    }

    /// 创建持久化失败错误
    pub fn persist_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Storage(StorageError::PersistFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 映射到 HTTP 状态码
    ///
    /// 缺失字段和不成立的请求为 400，取值不合法为 422
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(e) => match e.reason {
                ValidationReason::Missing | ValidationReason::Malformed(_) => 400,
                ValidationReason::Invalid(_) => 422,
            },
            AppError::NotFound { .. } => 404,
            AppError::UnsupportedMedia { .. } => 415,
            AppError::Storage(_) | AppError::Config(_) => 500,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            AppError::from(ValidationError::missing("searchTerm")).status_code(),
            400
        );
        assert_eq!(
            AppError::from(ValidationError::invalid("searchTerm", "空白")).status_code(),
            422
        );
        assert_eq!(
            AppError::from(ValidationError::malformed("page", "必须为正整数")).status_code(),
            400
        );
        assert_eq!(AppError::question_not_found(7).status_code(), 404);
        assert_eq!(AppError::unsupported_media("not json").status_code(), 415);
        assert_eq!(
            AppError::persist_failed("trivia.toml", std::io::Error::other("disk full"))
                .status_code(),
            500
        );
    }

    #[test]
    fn test_error_message_carries_context() {
        let err = AppError::question_not_found(42);
        assert!(err.to_string().contains("42"));

        let err = AppError::from(ValidationError::missing("answer"));
        assert!(err.to_string().contains("answer"));
    }
}
