// ==========================================
// 化学品库存供应跟踪系统 - 化学品 API
// ==========================================
// 职责: 化学品增删改查、集合重排、班次配置维护
// 红线: 引擎不做输入校验,所有用户输入在本层校验
// ==========================================

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::chemical::{ChemicalRecord, ImportShipment};
use crate::domain::document::SiteConfig;
use crate::engine::migration::MigrationEngine;
use crate::repository::document_repo::DocumentRepository;

// ==========================================
// 输入 DTO
// ==========================================

/// 新建化学品输入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChemicalInput {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub factory_stock: f64,
    #[serde(default)]
    pub local_purchase: f64,
    #[serde(default)]
    pub use_per_day: f64,
    #[serde(default)]
    pub imports: Vec<ImportShipment>,
    #[serde(default)]
    pub notes: String,
}

/// 化学品字段级更新 (None = 不变更;覆盖行内快捷编辑与整表单编辑两种场景)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub factory_stock: Option<f64>,
    pub local_purchase: Option<f64>,
    pub use_per_day: Option<f64>,
    pub imports: Option<Vec<ImportShipment>>,
    pub notes: Option<String>,
}

// ==========================================
// ChemicalApi - 化学品 API
// ==========================================

/// 化学品API
///
/// 职责：
/// 1. 化学品集合查询
/// 2. 化学品创建 (生成 id)、字段级更新、删除
/// 3. 集合重排 (顺序承载展示优先级)
/// 4. 班次配置维护
pub struct ChemicalApi {
    repo: Arc<DocumentRepository>,
}

impl ChemicalApi {
    /// 创建新的ChemicalApi实例
    ///
    /// # 参数
    /// - repo: 站点文档仓储
    pub fn new(repo: Arc<DocumentRepository>) -> Self {
        Self { repo }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询化学品集合 (存储顺序)
    pub fn list_chemicals(&self) -> ApiResult<Vec<ChemicalRecord>> {
        let document = self.repo.load_document()?;
        Ok(document.chemicals)
    }

    /// 查询单个化学品
    ///
    /// # 参数
    /// - chemical_id: 化学品ID
    pub fn get_chemical(&self, chemical_id: &str) -> ApiResult<ChemicalRecord> {
        let document = self.repo.load_document()?;
        document
            .chemicals
            .into_iter()
            .find(|record| record.id == chemical_id)
            .ok_or_else(|| ApiError::NotFound(format!("化学品不存在: {}", chemical_id)))
    }

    /// 查询站点配置
    pub fn get_site_config(&self) -> ApiResult<SiteConfig> {
        let document = self.repo.load_document()?;
        Ok(document.config)
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 创建化学品
    ///
    /// # 参数
    /// - input: 新建输入 (name 必填非空)
    ///
    /// # 返回
    /// - Ok(ChemicalRecord): 已落库的完整记录 (含生成的 id)
    /// - Err(ApiError::InvalidInput): 名称为空
    pub fn create_chemical(&self, input: NewChemicalInput) -> ApiResult<ChemicalRecord> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("化学品名称不能为空".to_string()));
        }

        let unit = if input.unit.trim().is_empty() {
            "bags".to_string()
        } else {
            MigrationEngine::normalize_unit(input.unit.trim().to_string())
        };

        let record = ChemicalRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category: input.category.trim().to_string(),
            unit,
            factory_stock: input.factory_stock,
            local_purchase: input.local_purchase,
            use_per_day: input.use_per_day,
            imports: input.imports,
            notes: input.notes,
            last_updated: Self::now_stamp(),
        };

        let mut document = self.repo.load_document()?;
        document.chemicals.push(record.clone());
        self.repo.save_document(&document)?;

        info!(chemical_id = %record.id, name = %record.name, "创建化学品");
        Ok(record)
    }

    /// 字段级更新化学品 (id 不可变更)
    ///
    /// # 参数
    /// - chemical_id: 化学品ID
    /// - patch: 字段级更新 (None 字段不变更)
    pub fn update_chemical(
        &self,
        chemical_id: &str,
        patch: ChemicalPatch,
    ) -> ApiResult<ChemicalRecord> {
        if let Some(name) = patch.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ApiError::InvalidInput("化学品名称不能为空".to_string()));
            }
        }

        let mut document = self.repo.load_document()?;
        let record = document
            .chemicals
            .iter_mut()
            .find(|record| record.id == chemical_id)
            .ok_or_else(|| ApiError::NotFound(format!("化学品不存在: {}", chemical_id)))?;

        if let Some(name) = patch.name {
            record.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            record.category = category.trim().to_string();
        }
        if let Some(unit) = patch.unit {
            record.unit = MigrationEngine::normalize_unit(unit.trim().to_string());
        }
        if let Some(factory_stock) = patch.factory_stock {
            record.factory_stock = factory_stock;
        }
        if let Some(local_purchase) = patch.local_purchase {
            record.local_purchase = local_purchase;
        }
        if let Some(use_per_day) = patch.use_per_day {
            record.use_per_day = use_per_day;
        }
        if let Some(imports) = patch.imports {
            record.imports = imports;
        }
        if let Some(notes) = patch.notes {
            record.notes = notes;
        }
        record.last_updated = Self::now_stamp();

        let updated = record.clone();
        self.repo.save_document(&document)?;

        debug!(chemical_id = %chemical_id, "更新化学品");
        Ok(updated)
    }

    /// 删除化学品
    ///
    /// # 参数
    /// - chemical_id: 化学品ID
    pub fn delete_chemical(&self, chemical_id: &str) -> ApiResult<()> {
        let mut document = self.repo.load_document()?;
        let before = document.chemicals.len();
        document.chemicals.retain(|record| record.id != chemical_id);

        if document.chemicals.len() == before {
            return Err(ApiError::NotFound(format!("化学品不存在: {}", chemical_id)));
        }

        self.repo.save_document(&document)?;
        info!(chemical_id = %chemical_id, "删除化学品");
        Ok(())
    }

    /// 集合重排
    ///
    /// # 参数
    /// - ordered_ids: 新顺序的化学品ID列表,必须是现有集合的完整排列
    ///
    /// # 说明
    /// 顺序承载用户自定义展示优先级,引擎与聚合层永远按此顺序输出
    pub fn reorder_chemicals(&self, ordered_ids: &[String]) -> ApiResult<()> {
        let mut document = self.repo.load_document()?;

        if ordered_ids.len() != document.chemicals.len() {
            return Err(ApiError::InvalidInput(format!(
                "重排ID数量不匹配: 期望 {},实际 {}",
                document.chemicals.len(),
                ordered_ids.len()
            )));
        }

        let unique: HashSet<&str> = ordered_ids.iter().map(String::as_str).collect();
        if unique.len() != ordered_ids.len() {
            return Err(ApiError::InvalidInput("重排ID列表存在重复".to_string()));
        }

        let mut reordered = Vec::with_capacity(document.chemicals.len());
        for id in ordered_ids {
            let position = document
                .chemicals
                .iter()
                .position(|record| &record.id == id)
                .ok_or_else(|| ApiError::InvalidInput(format!("重排ID不存在: {}", id)))?;
            reordered.push(document.chemicals.remove(position));
        }
        document.chemicals = reordered;

        self.repo.save_document(&document)?;
        debug!(count = ordered_ids.len(), "化学品集合重排");
        Ok(())
    }

    /// 更新班次配置 (产线名称 -> 班次数)
    ///
    /// # 参数
    /// - shifts: 完整班次映射 (整体替换)
    pub fn update_shift_config(&self, shifts: BTreeMap<String, i64>) -> ApiResult<SiteConfig> {
        for (line, count) in &shifts {
            if *count < 0 {
                return Err(ApiError::InvalidInput(format!(
                    "班次数不能为负: {} = {}",
                    line, count
                )));
            }
        }

        let mut document = self.repo.load_document()?;
        document.config.shifts = shifts;
        let config = document.config.clone();
        self.repo.save_document(&document)?;

        debug!("更新班次配置");
        Ok(config)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 生成更新时间戳 (展示用)
    fn now_stamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
