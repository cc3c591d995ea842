// ==========================================
// 化学品库存供应跟踪系统 - 站点文档仓储
// ==========================================
// 职责: 管理 document_kv 表中站点 JSON 文档的读写
// 存储: key-value JSON 文档 (SQLite document_kv 表)
// 红线: 不含业务逻辑;读取时应用一次旧版迁移 (存储边界规范化)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::document::{SiteDocument, StoredSiteDocument};
use crate::engine::migration::MigrationEngine;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// 站点文档存储键
pub const DOCUMENT_KEY: &str = "site_document";

// ==========================================
// DocumentRepository - 站点文档仓储
// ==========================================
/// 站点文档仓储
/// 职责: 站点文档的加载与保存,屏蔽数据库细节
/// 说明: 旧版化学品形态在读取路径上由迁移引擎一次性升级,
///       仓储之上的调用方只会看到当前形态
pub struct DocumentRepository {
    conn: Arc<Mutex<Connection>>,
    migration: MigrationEngine,
}

impl DocumentRepository {
    /// 创建新的 DocumentRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            migration: MigrationEngine::new(),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            migration: MigrationEngine::new(),
        }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Schema 初始化
    // ==========================================

    /// 初始化 document_kv 表 (幂等)
    pub fn init_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS document_kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )?;
        Ok(())
    }

    // ==========================================
    // 文档读写
    // ==========================================

    /// 加载站点文档
    ///
    /// # 返回
    /// - Ok(SiteDocument): 迁移后的当前形态文档;键不存在时返回空文档
    /// - Err: 数据库或解析错误
    pub fn load_document(&self) -> RepositoryResult<SiteDocument> {
        let raw = {
            let conn = self.get_conn()?;
            conn.query_row(
                "SELECT value FROM document_kv WHERE key = ?1",
                params![DOCUMENT_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?
        };

        let raw = match raw {
            Some(value) => value,
            None => {
                debug!("站点文档不存在,返回空文档");
                return Ok(SiteDocument::default());
            }
        };

        let stored: StoredSiteDocument = serde_json::from_str(&raw)
            .map_err(|e| RepositoryError::DeserializationError(e.to_string()))?;

        // 存储边界规范化: 旧版形态一次性升级
        Ok(self.migration.migrate_document(stored))
    }

    /// 保存站点文档 (INSERT OR REPLACE)
    pub fn save_document(&self, document: &SiteDocument) -> RepositoryResult<()> {
        let payload = serde_json::to_string(document)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO document_kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            "#,
            params![DOCUMENT_KEY, payload],
        )?;

        Ok(())
    }
}
