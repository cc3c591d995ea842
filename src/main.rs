// ==========================================
// 化学品库存供应跟踪系统 - 控制台入口
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统
// ==========================================
// 用途: 打开站点文档库,推演当前库存总览并输出摘要
// 前端壳 (桌面/Web) 通过库模式接入 AppState
// ==========================================

use chem_supply_tracker::app::{get_default_db_path, AppState};

fn main() {
    // 初始化日志系统
    chem_supply_tracker::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", chem_supply_tracker::APP_NAME);
    tracing::info!("系统版本: {}", chem_supply_tracker::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    let app_state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };

    // 推演当前库存总览
    let view = match app_state.dashboard_api.get_portfolio() {
        Ok(view) => view,
        Err(e) => {
            tracing::error!("库存总览推演失败: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "库存总览: 共 {} 项 | 告急 {} | 预警 {} | 偏低 {} | 正常 {} | 含缺口 {}",
        view.summary.total,
        view.summary.critical,
        view.summary.warning,
        view.summary.low,
        view.summary.ok,
        view.summary.with_gaps
    );

    for item in &view.critical_items {
        tracing::warn!(
            "告急: {} (现货可用 {:.1} 天)",
            item.record.name,
            item.immediate_days_remaining.unwrap_or(0.0)
        );
    }

    for item in &view.gap_items {
        tracing::warn!(
            "缺口: {} (缺口 {:.1} 天, 需本地采购 {:.1} {})",
            item.record.name,
            item.gap_days,
            item.gap_quantity,
            item.record.unit
        );
    }
}
