// ==========================================
// 化学品库存供应跟踪系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,纯函数,无 I/O
// 红线: 引擎不碰存储,所有输入显式传参 (含基准日期)
// ==========================================

pub mod migration;
pub mod portfolio;
pub mod projection;

// 重导出核心引擎
pub use migration::MigrationEngine;
pub use portfolio::PortfolioEngine;
pub use projection::ProjectionEngine;
