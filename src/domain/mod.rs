// ==========================================
// 化学品库存供应跟踪系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型与读模型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod chemical;
pub mod document;
pub mod portfolio;
pub mod timeline;
pub mod types;

// 重导出核心类型
pub use chemical::{
    parse_calendar_date, ChemicalRecord, ImportShipment, LegacyChemicalRecord,
    StoredChemicalRecord,
};
pub use document::{
    SiteConfig, SiteDocument, SnapshotRecord, StoredSiteDocument, StoredSnapshotRecord,
    SNAPSHOT_CAP,
};
pub use portfolio::{PortfolioSummary, PortfolioView};
pub use timeline::{DerivedChemical, TimelineSegment};
pub use types::{SegmentKind, SupplyStatus};
