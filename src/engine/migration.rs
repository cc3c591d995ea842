// ==========================================
// 化学品库存供应跟踪系统 - 旧版迁移引擎
// ==========================================
// 职责: 将旧版化学品形态升级为当前形态 (存储边界读取时应用)
// 红线: 迁移幂等,单向升级,不回写旧字段
// ==========================================
// 输入: StoredChemicalRecord / StoredSiteDocument
// 输出: ChemicalRecord / SiteDocument (仅当前形态)
// ==========================================

use crate::domain::chemical::{ChemicalRecord, ImportShipment, StoredChemicalRecord};
use crate::domain::document::{SiteDocument, SnapshotRecord, StoredSiteDocument};
use tracing::debug;

// ==========================================
// MigrationEngine - 旧版迁移引擎
// ==========================================
pub struct MigrationEngine {
    // 无状态引擎,不需要注入依赖
}

impl MigrationEngine {
    /// 创建新的迁移引擎实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 迁移单条化学品记录
    ///
    /// 规则:
    /// - 当前形态 (存在 imports 字段,哪怕为空): 仅做单位归一,其余原样返回
    /// - 旧版形态: 旧 import 数量 > 0 时构造单元素 imports 集合,
    ///   否则 imports 为空;旧字段丢弃;同样做单位归一
    ///
    /// 无错误分支: 缺失/畸形字段已在解码层按 0 / None / "bags" 容错
    pub fn migrate_record(&self, stored: StoredChemicalRecord) -> ChemicalRecord {
        match stored {
            StoredChemicalRecord::Current(mut record) => {
                record.unit = Self::normalize_unit(record.unit);
                record
            }
            StoredChemicalRecord::Legacy(legacy) => {
                debug!(chemical_id = %legacy.id, "迁移旧版化学品记录");

                let imports = if legacy.import_quantity > 0.0 {
                    vec![ImportShipment {
                        quantity: legacy.import_quantity,
                        estimated_arrival: legacy.import_eta,
                        label: String::new(),
                    }]
                } else {
                    Vec::new()
                };

                ChemicalRecord {
                    id: legacy.id,
                    name: legacy.name,
                    category: legacy.category,
                    unit: Self::normalize_unit(legacy.unit),
                    factory_stock: legacy.factory_stock,
                    local_purchase: legacy.local_purchase,
                    use_per_day: legacy.use_per_day,
                    imports,
                    notes: legacy.notes,
                    last_updated: legacy.last_updated,
                }
            }
        }
    }

    /// 迁移整份站点文档
    ///
    /// 化学品集合与每份快照内的化学品集合都走同一迁移口径,
    /// 存储层之上的所有读取方只会看到当前形态
    pub fn migrate_document(&self, stored: StoredSiteDocument) -> SiteDocument {
        let chemicals = stored
            .chemicals
            .into_iter()
            .map(|record| self.migrate_record(record))
            .collect();

        let snapshots = stored
            .snapshots
            .into_iter()
            .map(|snapshot| SnapshotRecord {
                date: snapshot.date,
                chemicals: snapshot
                    .chemicals
                    .into_iter()
                    .map(|record| self.migrate_record(record))
                    .collect(),
                config: snapshot.config,
            })
            .collect();

        SiteDocument {
            config: stored.config,
            chemicals,
            snapshots,
        }
    }

    // ==========================================
    // 单位归一
    // ==========================================

    /// 单位归一: 旧值 "kg" 统一为 "bags",其余原样保留
    pub fn normalize_unit(unit: String) -> String {
        if unit == "kg" {
            "bags".to_string()
        } else {
            unit
        }
    }
}

impl Default for MigrationEngine {
    fn default() -> Self {
        Self::new()
    }
}
