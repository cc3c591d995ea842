// ==========================================
// 化学品库存供应跟踪系统 - 站点文档模型
// ==========================================
// 职责: 定义持久化文档形态 (配置 + 化学品集合 + 历史快照)
// 约束: 快照集合按写入顺序最多保留 90 份,最旧先淘汰
// ==========================================

use crate::domain::chemical::{ChemicalRecord, StoredChemicalRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 快照保留上限 (按写入顺序,最旧先淘汰)
pub const SNAPSHOT_CAP: usize = 90;

// ==========================================
// SiteConfig - 站点配置
// ==========================================
// 产线名称 -> 班次数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default)]
    pub shifts: BTreeMap<String, i64>,
}

// ==========================================
// SnapshotRecord - 历史快照
// ==========================================
// 某一日期的化学品集合与配置的冻结副本,用于历史对比回放
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    /// 快照日期 ("YYYY-MM-DD",写入端校验)
    pub date: String,

    /// 化学品集合冻结副本
    #[serde(default)]
    pub chemicals: Vec<ChemicalRecord>,

    /// 配置冻结副本
    #[serde(default)]
    pub config: SiteConfig,
}

// ==========================================
// SiteDocument - 站点文档 (迁移后形态)
// ==========================================
// 存储层的唯一文档实体,读取时已完成旧版迁移
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    #[serde(default)]
    pub config: SiteConfig,

    #[serde(default)]
    pub chemicals: Vec<ChemicalRecord>,

    #[serde(default)]
    pub snapshots: Vec<SnapshotRecord>,
}

// ==========================================
// 存储形态 (迁移前)
// ==========================================
// 仅用于存储边界解码,化学品条目可能是新旧任一形态

/// 历史快照 (迁移前形态)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSnapshotRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub chemicals: Vec<StoredChemicalRecord>,
    #[serde(default)]
    pub config: SiteConfig,
}

/// 站点文档 (迁移前形态)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSiteDocument {
    #[serde(default)]
    pub config: SiteConfig,
    #[serde(default)]
    pub chemicals: Vec<StoredChemicalRecord>,
    #[serde(default)]
    pub snapshots: Vec<StoredSnapshotRecord>,
}
