// ==========================================
// 化学品库存供应跟踪系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供外层壳 (桌面命令/HTTP/CLI) 调用
// ==========================================

pub mod chemical_api;
pub mod dashboard_api;
pub mod error;
pub mod snapshot_api;

// 重导出核心类型
pub use chemical_api::{ChemicalApi, ChemicalPatch, NewChemicalInput};
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult};
pub use snapshot_api::SnapshotApi;
