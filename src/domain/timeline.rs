// ==========================================
// 化学品库存供应跟踪系统 - 供应时间线视图
// ==========================================
// 职责: 定义时间线段与推演结果读模型
// 用途: 引擎输出,每次计算重建,不落库
// ==========================================

use crate::domain::chemical::ChemicalRecord;
use crate::domain::types::{SegmentKind, SupplyStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// TimelineSegment - 时间线段
// ==========================================
// 约束: 同一化学品的线段按 start_day 升序首尾相接,无重叠
// 天数偏移以基准日期为原点,允许小数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    /// 线段类型 (immediate-stock / import / gap)
    pub kind: SegmentKind,

    /// 起始天数偏移 (>= 0)
    pub start_day: f64,

    /// 结束天数偏移 (>= start_day)
    pub end_day: f64,

    /// 持续天数 (= end_day - start_day)
    pub duration_days: f64,

    /// 线段覆盖数量 (单位与化学品一致;缺口段为需弥补数量)
    pub quantity: f64,

    /// 展示标签
    #[serde(default)]
    pub label: String,

    /// 预计到货日期 (仅 import 段)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<NaiveDate>,
}

// ==========================================
// DerivedChemical - 化学品推演结果
// ==========================================
// 化学品记录 + 派生指标的聚合读模型
// 约束: use_per_day == 0 时,所有天数/月数指标为 None (无界哨兵),
//       status == Ok,缺口为 0,时间线为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedChemical {
    /// 原始化学品记录 (字段平铺进输出文档)
    #[serde(flatten)]
    pub record: ChemicalRecord,

    // ===== 数量汇总 =====
    /// 有效进口总量 (仅数量 > 0 的批次)
    pub total_import_quantity: f64,
    /// 总可用量 (现货 + 进口)
    pub total_quantity: f64,
    /// 现货数量 (厂内库存 + 本地采购)
    pub immediate_quantity: f64,

    // ===== 天数指标 (None = 无界,未跟踪消耗) =====
    /// 现货可用天数
    pub immediate_days_remaining: Option<f64>,
    /// 总可用天数
    pub total_days_remaining: Option<f64>,
    /// 总可用月数 (固定 30 天/月口径,非日历月)
    pub total_months_remaining: Option<f64>,

    // ===== 状态与缺口 =====
    /// 供应状态
    pub status: SupplyStatus,
    /// 缺口总天数
    pub gap_days: f64,
    /// 缺口总数量 (缺口天数 * 日均消耗)
    pub gap_quantity: f64,

    // ===== 时间线 =====
    /// 供应时间线 (按 start_day 升序)
    pub timeline: Vec<TimelineSegment>,
    /// 时间线终点天数 (= 末段 end_day;无时间线时为 0)
    pub timeline_end_day: f64,
}

impl DerivedChemical {
    /// 是否存在供应缺口
    pub fn has_gap(&self) -> bool {
        self.gap_days > 0.0
    }
}
