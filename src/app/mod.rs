// ==========================================
// 化学品库存供应跟踪系统 - 应用层
// ==========================================
// 职责: 组装仓储与API,供外层壳接入
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
