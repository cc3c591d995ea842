// ==========================================
// 化学品库存供应跟踪系统 - 库存总览聚合引擎
// ==========================================
// 职责: 对化学品集合逐条推演并产出汇总视图
// 输入: 化学品集合 (迁移后) + 基准日期
// 输出: PortfolioView (全量结果 + 计数 + 告警/缺口清单)
// 红线: 聚合引擎不排序,输入顺序即输出顺序
//       (顺序承载用户自定义展示优先级,紧急度排序是视图层职责)
// ==========================================

use crate::domain::chemical::ChemicalRecord;
use crate::domain::portfolio::{PortfolioSummary, PortfolioView};
use crate::domain::timeline::DerivedChemical;
use crate::domain::types::SupplyStatus;
use crate::engine::projection::ProjectionEngine;
use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::instrument;

// ==========================================
// PortfolioEngine - 库存总览聚合引擎
// ==========================================
pub struct PortfolioEngine {
    projection: ProjectionEngine,
}

impl PortfolioEngine {
    /// 创建新的聚合引擎实例
    pub fn new() -> Self {
        Self {
            projection: ProjectionEngine::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 推演全部化学品并聚合
    ///
    /// # 参数
    /// - `records`: 化学品集合 (顺序保持)
    /// - `reference_date`: 基准日期 (全部记录共用)
    ///
    /// # 返回
    /// PortfolioView;空输入产出全零计数与空列表
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn project_all(
        &self,
        records: &[ChemicalRecord],
        reference_date: NaiveDate,
    ) -> PortfolioView {
        let items: Vec<DerivedChemical> = records
            .iter()
            .map(|record| self.projection.project_chemical(record, reference_date))
            .collect();

        let mut summary = PortfolioSummary {
            total: items.len(),
            ..PortfolioSummary::default()
        };

        for item in &items {
            match item.status {
                SupplyStatus::Critical => summary.critical += 1,
                SupplyStatus::Warning => summary.warning += 1,
                SupplyStatus::Low => summary.low += 1,
                SupplyStatus::Ok => summary.ok += 1,
            }
            if item.has_gap() {
                summary.with_gaps += 1;
            }
        }

        let critical_items = Self::filter_by_status(&items, SupplyStatus::Critical);
        let warning_items = Self::filter_by_status(&items, SupplyStatus::Warning);
        let gap_items: Vec<DerivedChemical> = items
            .iter()
            .filter(|item| item.has_gap())
            .cloned()
            .collect();

        PortfolioView {
            items,
            summary,
            critical_items,
            warning_items,
            gap_items,
        }
    }

    // ==========================================
    // 视图层排序辅助
    // ==========================================

    /// 采购紧急度排序 (视图层口径,聚合结果本身不排序)
    ///
    /// 按现货可用天数升序;无界 (未跟踪消耗) 排在最后
    pub fn sort_by_procurement_urgency(items: &mut [DerivedChemical]) {
        items.sort_by(|a, b| {
            match (a.immediate_days_remaining, b.immediate_days_remaining) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }

    /// 按状态过滤 (顺序保持)
    fn filter_by_status(items: &[DerivedChemical], status: SupplyStatus) -> Vec<DerivedChemical> {
        items
            .iter()
            .filter(|item| item.status == status)
            .cloned()
            .collect()
    }
}

impl Default for PortfolioEngine {
    fn default() -> Self {
        Self::new()
    }
}
