// ==========================================
// 化学品库存供应跟踪系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod document_repo;
pub mod error;

// 重导出核心仓储
pub use document_repo::{DocumentRepository, DOCUMENT_KEY};
pub use error::{RepositoryError, RepositoryResult};
