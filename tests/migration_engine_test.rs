// ==========================================
// MigrationEngine 引擎集成测试
// ==========================================
// 测试目标: 验证旧版化学品形态到当前形态的一次性升级
// 覆盖范围: 旧版构造/单位归一/幂等性/存储形态判别/整文档迁移
// ==========================================


use chem_supply_tracker::domain::chemical::StoredChemicalRecord;
use chem_supply_tracker::domain::document::StoredSiteDocument;
use chem_supply_tracker::engine::MigrationEngine;
use test_helpers::date;

// ==========================================
// 测试用例 1: 旧版形态构造 imports 集合
// ==========================================

#[test]
fn test_legacy_with_positive_import() {
    let engine = MigrationEngine::new();
    let raw = r#"{
        "id": "L001",
        "name": "纯碱",
        "unit": "kg",
        "factoryStock": 100.0,
        "localPurchase": 20.0,
        "usePerDay": 10.0,
        "import": 80.0,
        "importEta": "2026-02-01"
    }"#;

    let stored: StoredChemicalRecord = serde_json::from_str(raw).unwrap();
    assert!(
        matches!(stored, StoredChemicalRecord::Legacy(_)),
        "无 imports 字段应判别为旧版形态"
    );

    let migrated = engine.migrate_record(stored);

    assert_eq!(migrated.id, "L001");
    assert_eq!(migrated.unit, "bags", "kg 应归一为 bags");
    assert_eq!(migrated.imports.len(), 1, "旧 import > 0 应构造单元素集合");
    assert_eq!(migrated.imports[0].quantity, 80.0);
    assert_eq!(migrated.imports[0].estimated_arrival, Some(date(2026, 2, 1)));
    assert_eq!(migrated.imports[0].label, "");
    assert_eq!(migrated.factory_stock, 100.0);
    assert_eq!(migrated.local_purchase, 20.0);
}

#[test]
fn test_legacy_with_zero_import() {
    let engine = MigrationEngine::new();
    let raw = r#"{
        "id": "L002",
        "name": "盐酸",
        "unit": "bags",
        "factoryStock": 50.0,
        "import": 0.0,
        "importEta": "2026-02-01"
    }"#;

    let stored: StoredChemicalRecord = serde_json::from_str(raw).unwrap();
    let migrated = engine.migrate_record(stored);

    assert!(migrated.imports.is_empty(), "旧 import <= 0 应产出空集合");
}

#[test]
fn test_legacy_missing_fields_default() {
    let engine = MigrationEngine::new();
    // 最小旧版文档: 缺失字段按 0 / None / 缺省单位容错
    let raw = r#"{ "id": "L003", "name": "双氧水" }"#;

    let stored: StoredChemicalRecord = serde_json::from_str(raw).unwrap();
    let migrated = engine.migrate_record(stored);

    assert_eq!(migrated.unit, "bags");
    assert_eq!(migrated.factory_stock, 0.0);
    assert_eq!(migrated.local_purchase, 0.0);
    assert_eq!(migrated.use_per_day, 0.0);
    assert!(migrated.imports.is_empty());
    assert_eq!(migrated.notes, "");
}

// ==========================================
// 测试用例 2: 当前形态只做单位归一
// ==========================================

#[test]
fn test_current_record_only_unit_normalized() {
    let engine = MigrationEngine::new();
    // 有 imports 字段 (哪怕为空) 即当前形态,旧字段探测不再发生
    let raw = r#"{
        "id": "C001",
        "name": "烧碱",
        "unit": "kg",
        "factoryStock": 10.0,
        "imports": []
    }"#;

    let stored: StoredChemicalRecord = serde_json::from_str(raw).unwrap();
    assert!(matches!(stored, StoredChemicalRecord::Current(_)));

    let migrated = engine.migrate_record(stored);
    assert_eq!(migrated.unit, "bags");
    assert!(migrated.imports.is_empty(), "当前形态不得重建 imports");
}

#[test]
fn test_current_record_with_datetime_arrival_truncated() {
    let engine = MigrationEngine::new();
    // 存量文档日期可能带时间后缀,按日历日截断
    let raw = r#"{
        "id": "C002",
        "name": "硫酸",
        "unit": "bags",
        "imports": [
            { "quantity": 40.0, "estimatedArrival": "2026-02-05T08:30:00", "label": "月初" }
        ]
    }"#;

    let stored: StoredChemicalRecord = serde_json::from_str(raw).unwrap();
    let migrated = engine.migrate_record(stored);

    assert_eq!(
        migrated.imports[0].estimated_arrival,
        Some(date(2026, 2, 5)),
        "时间后缀应截断到日历日"
    );
}

// ==========================================
// 测试用例 3: 幂等性
// ==========================================

#[test]
fn test_migration_idempotent() {
    let engine = MigrationEngine::new();
    let raw = r#"{
        "id": "L004",
        "name": "纯碱",
        "unit": "kg",
        "factoryStock": 100.0,
        "usePerDay": 10.0,
        "import": 80.0,
        "importEta": "2026-02-01"
    }"#;

    let stored: StoredChemicalRecord = serde_json::from_str(raw).unwrap();
    let once = engine.migrate_record(stored);
    let twice = engine.migrate_record(StoredChemicalRecord::Current(once.clone()));

    assert_eq!(once, twice, "migrate(migrate(x)) 必须等于 migrate(x)");
}

// ==========================================
// 测试用例 4: 整文档迁移覆盖快照
// ==========================================

#[test]
fn test_document_migration_covers_snapshots() {
    let engine = MigrationEngine::new();
    let raw = r#"{
        "config": { "shifts": { "一号线": 3 } },
        "chemicals": [
            { "id": "L005", "name": "甲", "unit": "kg", "import": 30.0 }
        ],
        "snapshots": [
            {
                "date": "2026-01-10",
                "chemicals": [
                    { "id": "L005", "name": "甲", "unit": "kg", "import": 50.0, "importEta": "2026-01-25" }
                ],
                "config": { "shifts": {} }
            }
        ]
    }"#;

    let stored: StoredSiteDocument = serde_json::from_str(raw).unwrap();
    let document = engine.migrate_document(stored);

    assert_eq!(document.config.shifts.get("一号线"), Some(&3));

    assert_eq!(document.chemicals.len(), 1);
    assert_eq!(document.chemicals[0].unit, "bags");
    assert_eq!(document.chemicals[0].imports.len(), 1);
    assert_eq!(document.chemicals[0].imports[0].quantity, 30.0);

    // 快照内的化学品同样走迁移口径
    assert_eq!(document.snapshots.len(), 1);
    let snapshot_chemical = &document.snapshots[0].chemicals[0];
    assert_eq!(snapshot_chemical.unit, "bags");
    assert_eq!(snapshot_chemical.imports.len(), 1);
    assert_eq!(snapshot_chemical.imports[0].quantity, 50.0);
    assert_eq!(
        snapshot_chemical.imports[0].estimated_arrival,
        Some(date(2026, 1, 25))
    );
}
