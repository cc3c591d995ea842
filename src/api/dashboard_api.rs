// ==========================================
// 化学品库存供应跟踪系统 - 驾驶舱 API
// ==========================================
// 职责: 封装推演引擎,提供当前总览、指定日期总览与快照回放
// 架构: API 层 → 引擎层 (PortfolioEngine),存储只读
// 红线: 引擎保持纯函数,"今天"只在本层解析一次后显式传入
// ==========================================

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::portfolio::PortfolioView;
use crate::domain::timeline::DerivedChemical;
use crate::engine::portfolio::PortfolioEngine;
use crate::repository::document_repo::DocumentRepository;

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责：
/// 1. 当前库存总览 (基准日期 = 今天)
/// 2. 指定基准日期的总览 (确定性重算)
/// 3. 历史快照回放 (基准日期 = 快照自身日期)
/// 4. 采购建议清单 (缺口项按紧急度排序,视图层口径)
pub struct DashboardApi {
    repo: Arc<DocumentRepository>,
    portfolio_engine: PortfolioEngine,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - repo: 站点文档仓储
    pub fn new(repo: Arc<DocumentRepository>) -> Self {
        Self {
            repo,
            portfolio_engine: PortfolioEngine::new(),
        }
    }

    // ==========================================
    // 总览接口
    // ==========================================

    /// 当前库存总览 (基准日期 = 今天)
    pub fn get_portfolio(&self) -> ApiResult<PortfolioView> {
        let today = Local::now().date_naive();
        self.get_portfolio_at(today)
    }

    /// 指定基准日期的库存总览
    ///
    /// # 参数
    /// - reference_date: 基准日期 (当日为第 0 天)
    pub fn get_portfolio_at(&self, reference_date: NaiveDate) -> ApiResult<PortfolioView> {
        let document = self.repo.load_document()?;
        let view = self
            .portfolio_engine
            .project_all(&document.chemicals, reference_date);

        debug!(
            reference_date = %reference_date,
            total = view.summary.total,
            critical = view.summary.critical,
            "库存总览推演完成"
        );
        Ok(view)
    }

    /// 历史快照回放
    ///
    /// # 参数
    /// - date: 快照日期 ("YYYY-MM-DD")
    ///
    /// # 说明
    /// 回放使用快照自身日期作为基准日期,任何时候重放结果一致
    pub fn get_snapshot_portfolio(&self, date: &str) -> ApiResult<PortfolioView> {
        let document = self.repo.load_document()?;
        let snapshot = document
            .snapshots
            .iter()
            .find(|snapshot| snapshot.date == date)
            .ok_or_else(|| ApiError::NotFound(format!("快照不存在: {}", date)))?;

        let reference_date = NaiveDate::parse_from_str(&snapshot.date, "%Y-%m-%d")
            .map_err(|_| ApiError::InvalidInput(format!("快照日期无效: {}", snapshot.date)))?;

        Ok(self
            .portfolio_engine
            .project_all(&snapshot.chemicals, reference_date))
    }

    // ==========================================
    // 采购建议
    // ==========================================

    /// 采购建议清单
    ///
    /// 缺口项 (gap_days > 0) 按现货可用天数升序排列,
    /// 排序是本层的视图口径,聚合引擎输出本身保持输入顺序
    pub fn list_gap_recommendations(&self) -> ApiResult<Vec<DerivedChemical>> {
        let view = self.get_portfolio()?;
        let mut items = view.gap_items;
        PortfolioEngine::sort_by_procurement_urgency(&mut items);
        Ok(items)
    }
}
