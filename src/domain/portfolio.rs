// ==========================================
// 化学品库存供应跟踪系统 - 库存总览视图
// ==========================================
// 职责: 定义全量推演的汇总读模型
// 红线: 列表顺序保持输入顺序 (用户自定义展示优先级),
//       任何紧急度排序都是视图层职责
// ==========================================

use crate::domain::timeline::DerivedChemical;
use serde::{Deserialize, Serialize};

// ==========================================
// PortfolioSummary - 总览计数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// 化学品总数
    pub total: usize,
    /// 告急数量
    pub critical: usize,
    /// 预警数量
    pub warning: usize,
    /// 偏低数量
    pub low: usize,
    /// 正常数量
    pub ok: usize,
    /// 存在供应缺口的数量
    pub with_gaps: usize,
}

// ==========================================
// PortfolioView - 库存总览
// ==========================================
// 全部列表均保持输入顺序,空输入产出全零计数与空列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    /// 全量推演结果 (输入顺序)
    pub items: Vec<DerivedChemical>,

    /// 汇总计数
    pub summary: PortfolioSummary,

    /// 告急清单 (过滤,顺序保持)
    pub critical_items: Vec<DerivedChemical>,

    /// 预警清单 (过滤,顺序保持)
    pub warning_items: Vec<DerivedChemical>,

    /// 缺口清单 (gap_days > 0,顺序保持,驱动采购建议)
    pub gap_items: Vec<DerivedChemical>,
}
