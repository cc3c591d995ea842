// ==========================================
// PortfolioEngine 引擎集成测试
// ==========================================
// 测试目标: 验证全量推演聚合与顺序保持
// 覆盖范围: 汇总计数/告警清单/缺口清单/空集合/视图层排序
// ==========================================


use chem_supply_tracker::domain::types::SupplyStatus;
use chem_supply_tracker::engine::PortfolioEngine;
use chrono::Duration;
use test_helpers::{create_test_chemical, date, dated_shipment};

/// 统一基准日期
fn reference_date() -> chrono::NaiveDate {
    date(2026, 1, 20)
}

// ==========================================
// 测试用例 1: 场景 D - 汇总计数
// ==========================================

#[test]
fn test_scenario_d_summary_counts() {
    let engine = PortfolioEngine::new();
    let records = vec![
        // 告急: 现货 3 天
        create_test_chemical("C001", "纯碱", 30.0, 0.0, 10.0, vec![]),
        // 预警 + 缺口: 现货 10 天,进口 12 天后才到
        create_test_chemical(
            "C002",
            "烧碱",
            100.0,
            0.0,
            10.0,
            vec![dated_shipment(50.0, reference_date() + Duration::days(12), "")],
        ),
        // 正常: 现货 30 天
        create_test_chemical("C003", "盐酸", 300.0, 0.0, 10.0, vec![]),
    ];

    let view = engine.project_all(&records, reference_date());

    assert_eq!(view.summary.total, 3);
    assert_eq!(view.summary.critical, 1);
    assert_eq!(view.summary.warning, 1);
    assert_eq!(view.summary.low, 0);
    assert_eq!(view.summary.ok, 1);
    assert_eq!(view.summary.with_gaps, 1);

    // 输入顺序保持
    let ids: Vec<_> = view.items.iter().map(|item| item.record.id.as_str()).collect();
    assert_eq!(ids, vec!["C001", "C002", "C003"]);

    assert_eq!(view.critical_items.len(), 1);
    assert_eq!(view.critical_items[0].record.id, "C001");
    assert_eq!(view.warning_items.len(), 1);
    assert_eq!(view.warning_items[0].record.id, "C002");
    assert_eq!(view.gap_items.len(), 1);
    assert_eq!(view.gap_items[0].record.id, "C002");
}

// ==========================================
// 测试用例 2: 空集合
// ==========================================

#[test]
fn test_empty_collection() {
    let engine = PortfolioEngine::new();

    let view = engine.project_all(&[], reference_date());

    assert_eq!(view.summary.total, 0);
    assert_eq!(view.summary.critical, 0);
    assert_eq!(view.summary.warning, 0);
    assert_eq!(view.summary.low, 0);
    assert_eq!(view.summary.ok, 0);
    assert_eq!(view.summary.with_gaps, 0);
    assert!(view.items.is_empty());
    assert!(view.critical_items.is_empty());
    assert!(view.warning_items.is_empty());
    assert!(view.gap_items.is_empty());
}

// ==========================================
// 测试用例 3: 清单顺序保持输入顺序
// ==========================================

#[test]
fn test_filtered_lists_preserve_input_order() {
    let engine = PortfolioEngine::new();
    // 两个告急项,故意按非紧急度顺序排列 (C101 比 C102 更宽裕)
    let records = vec![
        create_test_chemical("C101", "甲", 25.0, 0.0, 10.0, vec![]),
        create_test_chemical("C102", "乙", 5.0, 0.0, 10.0, vec![]),
    ];

    let view = engine.project_all(&records, reference_date());

    assert_eq!(view.summary.critical, 2);
    let ids: Vec<_> = view
        .critical_items
        .iter()
        .map(|item| item.record.id.as_str())
        .collect();
    assert_eq!(ids, vec!["C101", "C102"], "聚合引擎不得按紧急度重排");
}

// ==========================================
// 测试用例 4: 视图层采购紧急度排序
// ==========================================

#[test]
fn test_sort_by_procurement_urgency() {
    let engine = PortfolioEngine::new();
    let records = vec![
        create_test_chemical(
            "C201",
            "甲",
            80.0,
            0.0,
            10.0,
            vec![dated_shipment(50.0, reference_date() + Duration::days(15), "")],
        ),
        create_test_chemical(
            "C202",
            "乙",
            20.0,
            0.0,
            10.0,
            vec![dated_shipment(50.0, reference_date() + Duration::days(15), "")],
        ),
    ];

    let view = engine.project_all(&records, reference_date());
    assert_eq!(view.gap_items.len(), 2);

    // 聚合输出保持输入顺序
    assert_eq!(view.gap_items[0].record.id, "C201");

    // 视图层排序后,现货更紧张的排在前
    let mut items = view.gap_items.clone();
    PortfolioEngine::sort_by_procurement_urgency(&mut items);
    assert_eq!(items[0].record.id, "C202");
    assert_eq!(items[1].record.id, "C201");
}

// ==========================================
// 测试用例 5: 状态与项目一一对应
// ==========================================

#[test]
fn test_items_carry_projection_results() {
    let engine = PortfolioEngine::new();
    let records = vec![
        create_test_chemical("C301", "未跟踪", 100.0, 0.0, 0.0, vec![]),
        create_test_chemical("C302", "偏低", 150.0, 0.0, 10.0, vec![]),
    ];

    let view = engine.project_all(&records, reference_date());

    assert_eq!(view.items[0].status, SupplyStatus::Ok);
    assert_eq!(view.items[0].immediate_days_remaining, None);
    assert_eq!(view.items[1].status, SupplyStatus::Low);
    assert_eq!(view.items[1].immediate_days_remaining, Some(15.0));
}
