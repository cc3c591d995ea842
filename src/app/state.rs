// ==========================================
// 化学品库存供应跟踪系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ChemicalApi, DashboardApi, SnapshotApi};
use crate::db::open_sqlite_connection;
use crate::repository::document_repo::DocumentRepository;

/// 应用状态
///
/// 包含所有API实例和共享资源,由外层壳作为全局状态持有
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 化学品API
    pub chemical_api: Arc<ChemicalApi>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,

    /// 历史快照API
    pub snapshot_api: Arc<SnapshotApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享数据库连接并应用统一 PRAGMA
    /// 2. 初始化文档仓储与表结构
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // 初始化文档仓储
        let repo = Arc::new(DocumentRepository::from_connection(conn));
        repo.init_schema()
            .map_err(|e| format!("无法初始化文档存储: {}", e))?;

        // 创建API实例
        let chemical_api = Arc::new(ChemicalApi::new(repo.clone()));
        let dashboard_api = Arc::new(DashboardApi::new(repo.clone()));
        let snapshot_api = Arc::new(SnapshotApi::new(repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            chemical_api,
            dashboard_api,
            snapshot_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 CHEM_SUPPLY_TRACKER_DB_PATH > 用户数据目录 > 当前目录回退
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("CHEM_SUPPLY_TRACKER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./chem_supply_tracker.db");

    // 尝试获取用户数据目录
    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("chem-supply-tracker-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("chem-supply-tracker");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("chem_supply_tracker.db");
    }

    path.to_string_lossy().to_string()
}
