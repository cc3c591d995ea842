// ==========================================
// 化学品库存供应跟踪系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (推演引擎为纯函数,人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{SegmentKind, SupplyStatus};

// 领域实体
pub use domain::{
    ChemicalRecord, DerivedChemical, ImportShipment, PortfolioSummary, PortfolioView,
    SiteConfig, SiteDocument, SnapshotRecord, StoredChemicalRecord, TimelineSegment,
};

// 引擎
pub use engine::{MigrationEngine, PortfolioEngine, ProjectionEngine};

// API
pub use api::{ApiError, ApiResult, ChemicalApi, DashboardApi, SnapshotApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "化学品库存供应跟踪系统";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
