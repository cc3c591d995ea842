// ==========================================
// 化学品库存供应跟踪系统 - 领域类型定义
// ==========================================
// 职责: 定义供应状态、时间线段类型等分类枚举
// 红线: 状态是"等级制",不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 供应状态 (Supply Status)
// ==========================================
// 由现货可用天数阈值判定,缺口仅可抬升 Ok -> Warning
// 序列化格式: lowercase (与持久化文档一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyStatus {
    Critical, // 告急 (现货 <= 3 天)
    Warning,  // 预警 (现货 <= 10 天, 或存在供应缺口)
    Low,      // 偏低 (现货 <= 20 天)
    Ok,       // 正常
}

impl fmt::Display for SupplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplyStatus::Critical => write!(f, "critical"),
            SupplyStatus::Warning => write!(f, "warning"),
            SupplyStatus::Low => write!(f, "low"),
            SupplyStatus::Ok => write!(f, "ok"),
        }
    }
}

// ==========================================
// 时间线段类型 (Segment Kind)
// ==========================================
// 单条供应时间线由三类线段首尾相接构成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    ImmediateStock, // 现货消耗期 (厂内库存 + 本地采购)
    Import,         // 进口批次消耗期
    Gap,            // 供应缺口期 (需本地采购弥补)
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::ImmediateStock => write!(f, "immediate-stock"),
            SegmentKind::Import => write!(f, "import"),
            SegmentKind::Gap => write!(f, "gap"),
        }
    }
}
