// ==========================================
// DocumentRepository 仓储集成测试
// ==========================================
// 测试目标: 验证站点文档的读写与存储边界迁移
// 覆盖范围: 空库/往返读写/旧版文档读取迁移/重复保存覆盖
// ==========================================


use chem_supply_tracker::domain::document::{SiteDocument, SnapshotRecord};
use chem_supply_tracker::repository::document_repo::DOCUMENT_KEY;
use chrono::Duration;
use rusqlite::params;
use test_helpers::{create_test_chemical, create_test_store, date, dated_shipment};

// ==========================================
// 测试用例 1: 空库返回空文档
// ==========================================

#[test]
fn test_load_missing_document_returns_empty() {
    let (_temp_file, repo) = create_test_store();

    let document = repo.load_document().unwrap();

    assert!(document.chemicals.is_empty());
    assert!(document.snapshots.is_empty());
    assert!(document.config.shifts.is_empty());
}

// ==========================================
// 测试用例 2: 往返读写
// ==========================================

#[test]
fn test_save_and_load_round_trip() {
    let (_temp_file, repo) = create_test_store();

    let mut document = SiteDocument::default();
    document.config.shifts.insert("一号线".to_string(), 3);
    document.chemicals.push(create_test_chemical(
        "C001",
        "纯碱",
        100.0,
        20.0,
        10.0,
        vec![dated_shipment(50.0, date(2026, 2, 1), "月初到货")],
    ));
    document.snapshots.push(SnapshotRecord {
        date: "2026-01-10".to_string(),
        chemicals: document.chemicals.clone(),
        config: document.config.clone(),
    });

    repo.save_document(&document).unwrap();
    let loaded = repo.load_document().unwrap();

    assert_eq!(loaded, document, "往返读写后文档应保持一致");
}

#[test]
fn test_save_overwrites_previous_document() {
    let (_temp_file, repo) = create_test_store();

    let mut first = SiteDocument::default();
    first
        .chemicals
        .push(create_test_chemical("C001", "甲", 10.0, 0.0, 1.0, vec![]));
    repo.save_document(&first).unwrap();

    let mut second = SiteDocument::default();
    second
        .chemicals
        .push(create_test_chemical("C002", "乙", 20.0, 0.0, 1.0, vec![]));
    repo.save_document(&second).unwrap();

    let loaded = repo.load_document().unwrap();
    assert_eq!(loaded.chemicals.len(), 1);
    assert_eq!(loaded.chemicals[0].id, "C002", "重复保存应整体覆盖");
}

// ==========================================
// 测试用例 3: 旧版文档读取时迁移
// ==========================================

#[test]
fn test_legacy_document_migrated_on_load() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let repo =
        chem_supply_tracker::repository::document_repo::DocumentRepository::new(&db_path).unwrap();
    repo.init_schema().unwrap();

    // 用独立连接直接写入旧版形态 JSON (模拟存量数据)
    let legacy_payload = r#"{
        "config": { "shifts": { "二号线": 2 } },
        "chemicals": [
            {
                "id": "L001",
                "name": "纯碱",
                "unit": "kg",
                "factoryStock": 100.0,
                "usePerDay": 10.0,
                "import": 80.0,
                "importEta": "2026-02-01T00:00:00"
            },
            {
                "id": "C002",
                "name": "盐酸",
                "unit": "bags",
                "factoryStock": 60.0,
                "imports": []
            }
        ],
        "snapshots": []
    }"#;

    {
        let conn = chem_supply_tracker::db::open_sqlite_connection(&db_path).unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO document_kv (key, value) VALUES (?1, ?2)",
            params![DOCUMENT_KEY, legacy_payload],
        )
        .unwrap();
    }

    let document = repo.load_document().unwrap();

    // 旧版记录: 构造 imports 集合 + 单位归一 + 日期截断
    let legacy = &document.chemicals[0];
    assert_eq!(legacy.unit, "bags");
    assert_eq!(legacy.imports.len(), 1);
    assert_eq!(legacy.imports[0].quantity, 80.0);
    assert_eq!(legacy.imports[0].estimated_arrival, Some(date(2026, 2, 1)));

    // 当前形态记录原样保留
    let current = &document.chemicals[1];
    assert_eq!(current.id, "C002");
    assert!(current.imports.is_empty());

    // 配置原样保留
    assert_eq!(document.config.shifts.get("二号线"), Some(&2));

    // 再保存一轮后读取,结果保持稳定 (迁移只发生一次)
    repo.save_document(&document).unwrap();
    let reloaded = repo.load_document().unwrap();
    assert_eq!(reloaded, document);
}

// ==========================================
// 测试用例 4: 推演引擎与仓储协同
// ==========================================

#[test]
fn test_loaded_document_projects_cleanly() {
    let (_temp_file, repo) = create_test_store();

    let reference = date(2026, 1, 20);
    let mut document = SiteDocument::default();
    document.chemicals.push(create_test_chemical(
        "C001",
        "纯碱",
        30.0,
        0.0,
        10.0,
        vec![dated_shipment(100.0, reference + Duration::days(5), "")],
    ));
    repo.save_document(&document).unwrap();

    let loaded = repo.load_document().unwrap();
    let engine = chem_supply_tracker::engine::PortfolioEngine::new();
    let view = engine.project_all(&loaded.chemicals, reference);

    assert_eq!(view.summary.total, 1);
    assert_eq!(view.summary.critical, 1);
    assert_eq!(view.items[0].gap_days, 2.0);
}
