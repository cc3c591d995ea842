// ==========================================
// 化学品库存供应跟踪系统 - 历史快照 API
// ==========================================
// 职责: 快照保存/查询/删除,日期格式校验,保留上限淘汰
// 约束: 快照日期必须为 "YYYY-MM-DD" 且是有效日历日;
//       同日期重复保存原位替换;超过上限按写入顺序淘汰最旧
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::document::{SnapshotRecord, SNAPSHOT_CAP};
use crate::repository::document_repo::DocumentRepository;

// ==========================================
// SnapshotApi - 历史快照 API
// ==========================================

/// 历史快照API
///
/// 职责：
/// 1. 保存当前化学品集合与配置的冻结副本
/// 2. 快照列表/单份查询
/// 3. 快照删除
/// 4. 保留上限管理 (最多 90 份,最旧先淘汰)
pub struct SnapshotApi {
    repo: Arc<DocumentRepository>,
}

impl SnapshotApi {
    /// 创建新的SnapshotApi实例
    ///
    /// # 参数
    /// - repo: 站点文档仓储
    pub fn new(repo: Arc<DocumentRepository>) -> Self {
        Self { repo }
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 保存快照
    ///
    /// # 参数
    /// - date: 快照日期 ("YYYY-MM-DD")
    ///
    /// # 返回
    /// - Ok(SnapshotRecord): 已落库的快照
    /// - Err(ApiError::InvalidInput): 日期格式非法
    ///
    /// # 说明
    /// - 同日期已存在时原位替换 (保留原写入位置)
    /// - 超过保留上限时按写入顺序淘汰最旧快照
    pub fn save_snapshot(&self, date: &str) -> ApiResult<SnapshotRecord> {
        Self::validate_snapshot_date(date)?;

        let mut document = self.repo.load_document()?;
        let snapshot = SnapshotRecord {
            date: date.to_string(),
            chemicals: document.chemicals.clone(),
            config: document.config.clone(),
        };

        match document
            .snapshots
            .iter_mut()
            .find(|existing| existing.date == date)
        {
            Some(existing) => {
                *existing = snapshot.clone();
                debug!(date = %date, "快照同日期替换");
            }
            None => {
                document.snapshots.push(snapshot.clone());
            }
        }

        // 保留上限: 按写入顺序淘汰最旧
        while document.snapshots.len() > SNAPSHOT_CAP {
            let evicted = document.snapshots.remove(0);
            info!(date = %evicted.date, "快照超过保留上限,淘汰最旧");
        }

        self.repo.save_document(&document)?;
        info!(date = %date, "保存快照");
        Ok(snapshot)
    }

    /// 删除快照
    ///
    /// # 参数
    /// - date: 快照日期
    pub fn delete_snapshot(&self, date: &str) -> ApiResult<()> {
        let mut document = self.repo.load_document()?;
        let before = document.snapshots.len();
        document.snapshots.retain(|snapshot| snapshot.date != date);

        if document.snapshots.len() == before {
            return Err(ApiError::NotFound(format!("快照不存在: {}", date)));
        }

        self.repo.save_document(&document)?;
        info!(date = %date, "删除快照");
        Ok(())
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询快照日期列表 (写入顺序)
    pub fn list_snapshot_dates(&self) -> ApiResult<Vec<String>> {
        let document = self.repo.load_document()?;
        Ok(document
            .snapshots
            .iter()
            .map(|snapshot| snapshot.date.clone())
            .collect())
    }

    /// 查询单份快照
    ///
    /// # 参数
    /// - date: 快照日期
    pub fn get_snapshot(&self, date: &str) -> ApiResult<SnapshotRecord> {
        let document = self.repo.load_document()?;
        document
            .snapshots
            .into_iter()
            .find(|snapshot| snapshot.date == date)
            .ok_or_else(|| ApiError::NotFound(format!("快照不存在: {}", date)))
    }

    // ==========================================
    // 日期校验
    // ==========================================

    /// 校验快照日期: 形如 "YYYY-MM-DD" 且是有效日历日
    ///
    /// 形式校验 (长度/分隔符/数字位) 与日历校验 (chrono 解析) 都通过才合法,
    /// 回放时快照日期要直接作为基准日期,必须可解析
    fn validate_snapshot_date(date: &str) -> ApiResult<()> {
        let bytes = date.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });

        if !well_formed || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(ApiError::InvalidInput(format!(
                "快照日期格式非法 (期望 YYYY-MM-DD): {}",
                date
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_snapshot_date() {
        assert!(SnapshotApi::validate_snapshot_date("2026-01-20").is_ok());
        assert!(SnapshotApi::validate_snapshot_date("2026-1-20").is_err());
        assert!(SnapshotApi::validate_snapshot_date("2026/01/20").is_err());
        assert!(SnapshotApi::validate_snapshot_date("2026-13-45").is_err());
        assert!(SnapshotApi::validate_snapshot_date("").is_err());
        assert!(SnapshotApi::validate_snapshot_date("2026-01-20T00:00:00").is_err());
    }
}
