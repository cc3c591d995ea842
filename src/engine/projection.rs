// ==========================================
// 化学品库存供应跟踪系统 - 供应时间线推演引擎
// ==========================================
// 职责: 对单个化学品做日粒度供应推演
// 输入: 化学品记录 (迁移后) + 基准日期
// 输出: DerivedChemical (数量汇总 + 天数指标 + 状态 + 时间线)
// 红线: 纯函数,无 I/O,不修改输入,相同输入产出相同结果
// ==========================================
// 时间线构成 (从基准日期向右推进游标):
// 1) 现货消耗段 (现货 > 0 时从第 0 天起)
// 2) 进口批次段 (有日期的按到货日稳定升序在前,无日期的按输入顺序垫后)
// 3) 缺口段 (游标尚未推进到到货日时,以本地采购弥补的空窗)
// ==========================================

use crate::domain::chemical::{ChemicalRecord, ImportShipment};
use crate::domain::timeline::{DerivedChemical, TimelineSegment};
use crate::domain::types::{SegmentKind, SupplyStatus};
use chrono::NaiveDate;

// ===== 状态阈值 (现货可用天数) =====
const CRITICAL_DAYS: f64 = 3.0; // <= 3 天 告急
const WARNING_DAYS: f64 = 10.0; // <= 10 天 预警
const LOW_DAYS: f64 = 20.0; // <= 20 天 偏低

/// 固定月长口径 (非日历月)
const DAYS_PER_MONTH: f64 = 30.0;

// ==========================================
// ProjectionEngine - 供应时间线推演引擎
// ==========================================
pub struct ProjectionEngine {
    // 无状态引擎,不需要注入依赖
}

impl ProjectionEngine {
    /// 创建新的推演引擎实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 推演单个化学品的供应时间线
    ///
    /// # 参数
    /// - `record`: 化学品记录 (必须是迁移后的当前形态)
    /// - `reference_date`: 基准日期 (当日为第 0 天;快照回放必须传快照自身日期)
    ///
    /// # 返回
    /// DerivedChemical 推演结果
    ///
    /// # 边界口径
    /// - use_per_day == 0: 未跟踪消耗,天数指标全部无界 (None),状态 Ok,
    ///   无缺口,时间线为空
    /// - 数量 <= 0 的批次: 不计入汇总,不进时间线
    /// - 到货日早于基准日期: 按第 0 天处理 (过期在途视为已可用)
    /// - 现货为 0: 不产生现货段,游标停留在第 0 天
    pub fn project_chemical(
        &self,
        record: &ChemicalRecord,
        reference_date: NaiveDate,
    ) -> DerivedChemical {
        // 1. 数量汇总
        let immediate_quantity = record.immediate_quantity();
        let total_import_quantity: f64 = record
            .imports
            .iter()
            .filter(|shipment| shipment.is_effective())
            .map(|shipment| shipment.quantity)
            .sum();
        let total_quantity = immediate_quantity + total_import_quantity;

        // 2. 未跟踪消耗: 短路返回无界结果
        if record.use_per_day <= 0.0 {
            return DerivedChemical {
                record: record.clone(),
                total_import_quantity,
                total_quantity,
                immediate_quantity,
                immediate_days_remaining: None,
                total_days_remaining: None,
                total_months_remaining: None,
                status: SupplyStatus::Ok,
                gap_days: 0.0,
                gap_quantity: 0.0,
                timeline: Vec::new(),
                timeline_end_day: 0.0,
            };
        }

        let use_per_day = record.use_per_day;

        // 3. 现货可用天数
        let immediate_days = immediate_quantity / use_per_day;

        // 4. 构建时间线 (游标 = 距基准日期的天数偏移)
        let mut timeline: Vec<TimelineSegment> = Vec::new();
        let mut cursor = 0.0_f64;
        let mut total_gap_days = 0.0_f64;
        let mut total_gap_quantity = 0.0_f64;

        // 4a. 现货消耗段: 现货为 0 时不产生段,游标停留在第 0 天
        if immediate_quantity > 0.0 {
            timeline.push(TimelineSegment {
                kind: SegmentKind::ImmediateStock,
                start_day: 0.0,
                end_day: immediate_days,
                duration_days: immediate_days,
                quantity: immediate_quantity,
                label: "现货库存".to_string(),
                estimated_arrival: None,
            });
            cursor = immediate_days;
        }

        // 4b. 批次处理顺序: 有日期的稳定升序在前,无日期的按输入顺序垫后
        //     (简化策略: 已知日期优先,未知日期默认排在所有已知日期之后)
        for shipment in Self::ordered_shipments(&record.imports) {
            let import_duration_days = shipment.quantity / use_per_day;

            match shipment.estimated_arrival {
                Some(arrival) => {
                    // 日历日粒度偏移,过期在途钳制到第 0 天
                    let offset_days = (arrival - reference_date).num_days();
                    let arrival_day = if offset_days > 0 {
                        offset_days as f64
                    } else {
                        0.0
                    };

                    // 游标未到到货日: 产生缺口段
                    if cursor < arrival_day {
                        let gap_span = arrival_day - cursor;
                        timeline.push(TimelineSegment {
                            kind: SegmentKind::Gap,
                            start_day: cursor,
                            end_day: arrival_day,
                            duration_days: gap_span,
                            quantity: gap_span * use_per_day,
                            label: "供应缺口".to_string(),
                            estimated_arrival: None,
                        });
                        total_gap_days += gap_span;
                        total_gap_quantity += gap_span * use_per_day;
                        cursor = arrival_day;
                    }

                    timeline.push(TimelineSegment {
                        kind: SegmentKind::Import,
                        start_day: cursor,
                        end_day: cursor + import_duration_days,
                        duration_days: import_duration_days,
                        quantity: shipment.quantity,
                        label: shipment.label.clone(),
                        estimated_arrival: Some(arrival),
                    });
                    cursor += import_duration_days;
                }
                None => {
                    // 无日期批次: 视为恰好在需要时到货,不做缺口判定
                    timeline.push(TimelineSegment {
                        kind: SegmentKind::Import,
                        start_day: cursor,
                        end_day: cursor + import_duration_days,
                        duration_days: import_duration_days,
                        quantity: shipment.quantity,
                        label: shipment.label.clone(),
                        estimated_arrival: None,
                    });
                    cursor += import_duration_days;
                }
            }
        }

        // 5. 总量天数指标
        let total_days = total_quantity / use_per_day;
        let total_months = total_days / DAYS_PER_MONTH;

        // 6. 状态判定
        let status = self.classify_status(immediate_days, total_gap_days);

        DerivedChemical {
            record: record.clone(),
            total_import_quantity,
            total_quantity,
            immediate_quantity,
            immediate_days_remaining: Some(immediate_days),
            total_days_remaining: Some(total_days),
            total_months_remaining: Some(total_months),
            status,
            gap_days: total_gap_days,
            gap_quantity: total_gap_quantity,
            timeline,
            timeline_end_day: cursor,
        }
    }

    // ==========================================
    // 批次排序
    // ==========================================

    /// 计算批次处理顺序
    ///
    /// 仅保留数量 > 0 的批次;有到货日期的按日期稳定升序
    /// (同日期保持输入顺序),无日期的按输入顺序整体垫后
    fn ordered_shipments(imports: &[ImportShipment]) -> Vec<&ImportShipment> {
        let mut dated: Vec<&ImportShipment> = Vec::new();
        let mut undated: Vec<&ImportShipment> = Vec::new();

        for shipment in imports.iter().filter(|s| s.is_effective()) {
            if shipment.estimated_arrival.is_some() {
                dated.push(shipment);
            } else {
                undated.push(shipment);
            }
        }

        // Vec::sort_by_key 为稳定排序,同日期保持输入顺序
        dated.sort_by_key(|shipment| shipment.estimated_arrival);

        dated.into_iter().chain(undated).collect()
    }

    // ==========================================
    // 状态判定 (等级制)
    // ==========================================

    /// 按现货可用天数判定供应状态
    ///
    /// 阈值 (闭区间上界):
    /// - <= 3 天  -> Critical
    /// - <= 10 天 -> Warning
    /// - <= 20 天 -> Low
    /// - 其他     -> Ok
    ///
    /// 缺口抬升: 存在缺口且状态为 Ok 时抬升为 Warning,
    /// 缺口本身不会把状态抬升到 Warning 之上
    fn classify_status(&self, immediate_days: f64, gap_days: f64) -> SupplyStatus {
        let base = if immediate_days <= CRITICAL_DAYS {
            SupplyStatus::Critical
        } else if immediate_days <= WARNING_DAYS {
            SupplyStatus::Warning
        } else if immediate_days <= LOW_DAYS {
            SupplyStatus::Low
        } else {
            SupplyStatus::Ok
        };

        if gap_days > 0.0 && base == SupplyStatus::Ok {
            SupplyStatus::Warning
        } else {
            base
        }
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new()
    }
}
