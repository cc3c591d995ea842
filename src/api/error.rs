// ==========================================
// 化学品库存供应跟踪系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换Repository错误为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<RepositoryError>
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, key } => {
                ApiError::NotFound(format!("{} (key={})", entity, key))
            }
            RepositoryError::DeserializationError(msg) | RepositoryError::SerializationError(msg) => {
                ApiError::InternalError(format!("文档编解码失败: {}", msg))
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        // NotFound错误转换
        let repo_err = RepositoryError::NotFound {
            entity: "Snapshot".to_string(),
            key: "2026-01-20".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Snapshot"));
                assert!(msg.contains("2026-01-20"));
            }
            _ => panic!("Expected NotFound"),
        }

        // 查询错误转换
        let repo_err = RepositoryError::DatabaseQueryError("no such table".to_string());
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::DatabaseError(msg) => assert!(msg.contains("no such table")),
            _ => panic!("Expected DatabaseError"),
        }
    }
}
