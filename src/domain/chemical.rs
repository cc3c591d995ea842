// ==========================================
// 化学品库存供应跟踪系统 - 化学品领域模型
// ==========================================
// 职责: 定义化学品记录与进口批次实体
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================
// 字段命名: 持久化文档为 camelCase (serde rename)
// 容错口径: 数值字段缺失按 0,字符串缺失按空串
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// 单位缺省值
fn default_unit() -> String {
    "bags".to_string()
}

// ==========================================
// 日期容错解析
// ==========================================

/// 解析日历日期 (日历日粒度,忽略时分秒)
///
/// # 参数
/// - `raw`: 日期字符串,允许 "YYYY-MM-DD" 或带时间后缀的 ISO 时间戳
///
/// # 返回
/// - Some(NaiveDate): 解析成功,已归一到当日零点
/// - None: 空串或无法解析
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // 仅取日期部分,丢弃 "T.." / " .." 时间后缀
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// serde 辅助: 可选日期字段的容错反序列化
///
/// 存量文档中的日期可能带有时间部分,统一截断到日历日
fn de_opt_calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_calendar_date))
}

// ==========================================
// ImportShipment - 进口批次
// ==========================================
// 用途: 化学品的在途进口批次,数量 <= 0 视为不存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportShipment {
    /// 批次数量 (单位与所属化学品一致)
    #[serde(default)]
    pub quantity: f64,

    /// 预计到货日期 (缺失 = 到货顺序未定)
    #[serde(default, deserialize_with = "de_opt_calendar_date")]
    pub estimated_arrival: Option<NaiveDate>,

    /// 批次标签 (展示用,可为空)
    #[serde(default)]
    pub label: String,
}

impl ImportShipment {
    /// 批次是否有效 (数量为正才参与汇总与时间线)
    pub fn is_effective(&self) -> bool {
        self.quantity > 0.0
    }
}

// ==========================================
// ChemicalRecord - 化学品记录 (当前形态)
// ==========================================
// 用途: 持久化主实体,引擎层只读
// 约束: id 创建时生成,之后不可变更
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalRecord {
    // ===== 主键 =====
    #[serde(default)]
    pub id: String, // 化学品唯一标识 (UUID,创建时生成)

    // ===== 基础信息 =====
    #[serde(default)]
    pub name: String, // 化学品名称 (创建时必填非空)
    #[serde(default)]
    pub category: String, // 类别
    #[serde(default = "default_unit")]
    pub unit: String, // 计量单位 (旧值 "kg" 读取时归一为 "bags")

    // ===== 现货库存 =====
    #[serde(default)]
    pub factory_stock: f64, // 厂内库存
    #[serde(default)]
    pub local_purchase: f64, // 本地采购量

    // ===== 消耗口径 =====
    #[serde(default)]
    pub use_per_day: f64, // 日均消耗 (0 = 未跟踪消耗,天数指标全部无界)

    // ===== 进口批次 =====
    // 无 serde default: 字段缺失即旧版形态,由存储边界做迁移判定
    pub imports: Vec<ImportShipment>,

    // ===== 描述字段 (不参与计算) =====
    #[serde(default)]
    pub notes: String, // 备注
    #[serde(default)]
    pub last_updated: String, // 最近更新时间 (展示用)
}

impl ChemicalRecord {
    /// 现货数量 (厂内库存 + 本地采购,零提前期可用)
    pub fn immediate_quantity(&self) -> f64 {
        self.factory_stock + self.local_purchase
    }
}

// ==========================================
// LegacyChemicalRecord - 化学品记录 (旧版形态)
// ==========================================
// 旧版形态: 单一 import 数量 + importEta 日期,无 imports 集合
// 仅在存储边界解码时出现,迁移后不再流转
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyChemicalRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub factory_stock: f64,
    #[serde(default)]
    pub local_purchase: f64,
    #[serde(default)]
    pub use_per_day: f64,

    /// 旧版单一进口数量
    #[serde(default, rename = "import")]
    pub import_quantity: f64,

    /// 旧版进口预计到货日期
    #[serde(default, rename = "importEta", deserialize_with = "de_opt_calendar_date")]
    pub import_eta: Option<NaiveDate>,

    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub last_updated: String,
}

// ==========================================
// StoredChemicalRecord - 存储形态判别
// ==========================================
// 红线: 新旧形态在存储边界一次性判别,禁止散落在调用点做字段探测
// 判别依据: 存在 imports 字段 (哪怕为空数组) 即当前形态
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredChemicalRecord {
    /// 当前形态 (imports 集合)
    Current(ChemicalRecord),
    /// 旧版形态 (单一 import/importEta)
    Legacy(LegacyChemicalRecord),
}
