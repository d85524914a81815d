// ==========================================
// 库存清单合并工具 - 导入会话
// ==========================================
// 职责: 单次上传的状态机与内存数据持有
// 红线: 新上传无条件丢弃旧会话的全部内存数据
// ==========================================

use crate::domain::item::{AggregatedItem, ColumnRoleMapping, DecodedSheet};
use crate::domain::types::ImportStatus;
use crate::engine::aggregation::AggregationSummary;
use crate::engine::unit_conflict::UnitConflict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// ConsolidationResult - 一次汇总的完整输出
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationResult {
    pub items: Vec<AggregatedItem>,
    pub summary: AggregationSummary,
    pub unit_conflicts: Vec<UnitConflict>,
    pub elapsed_ms: u64,
}

// ==========================================
// ImportSession - 导入会话
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportSession {
    pub upload_id: Option<Uuid>,
    pub status: ImportStatus,
    pub sheet: Option<DecodedSheet>,
    pub mapping: Option<ColumnRoleMapping>,
    pub result: Option<ConsolidationResult>,
    pub error_message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self {
            upload_id: None,
            status: ImportStatus::Idle,
            sheet: None,
            mapping: None,
            result: None,
            error_message: None,
            started_at: None,
        }
    }
}

/// 状态转换失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: ImportStatus,
    pub to: ImportStatus,
}

impl ImportSession {
    /// 开始新上传：清空旧数据，返回新的 upload_id（解码完成前保持 IDLE）
    pub fn begin_upload(&mut self) -> Uuid {
        let upload_id = Uuid::new_v4();
        *self = ImportSession {
            upload_id: Some(upload_id),
            started_at: Some(Utc::now()),
            ..ImportSession::default()
        };
        upload_id
    }

    /// 是否仍是指定上传（被新上传覆盖后返回 false）
    pub fn is_current(&self, upload_id: Uuid) -> bool {
        self.upload_id == Some(upload_id)
    }

    /// IDLE → MAPPING（解码成功）
    pub fn attach_sheet(&mut self, sheet: DecodedSheet) {
        self.sheet = Some(sheet);
        self.status = ImportStatus::Mapping;
    }

    /// MAPPING → PROCESSING
    pub fn start_processing(&mut self, mapping: ColumnRoleMapping) -> Result<(), InvalidTransition> {
        if self.status != ImportStatus::Mapping || self.sheet.is_none() {
            return Err(InvalidTransition {
                from: self.status,
                to: ImportStatus::Processing,
            });
        }
        self.mapping = Some(mapping);
        self.status = ImportStatus::Processing;
        Ok(())
    }

    /// PROCESSING → SUCCESS
    pub fn complete(&mut self, result: ConsolidationResult) {
        self.result = Some(result);
        self.error_message = None;
        self.status = ImportStatus::Success;
    }

    /// 任意状态 → ERROR（中止本次运行）
    pub fn fail(&mut self, message: impl Into<String>) {
        self.result = None;
        self.error_message = Some(message.into());
        self.status = ImportStatus::Error;
    }

    /// ERROR → IDLE（需重新上传）
    pub fn retry(&mut self) -> Result<(), InvalidTransition> {
        if self.status != ImportStatus::Error {
            return Err(InvalidTransition {
                from: self.status,
                to: ImportStatus::Idle,
            });
        }
        self.reset();
        Ok(())
    }

    /// 任意状态 → IDLE，并丢弃全部数据
    pub fn reset(&mut self) {
        *self = ImportSession::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> DecodedSheet {
        DecodedSheet {
            file_name: "a.csv".to_string(),
            headers: vec!["item".to_string(), "qty".to_string()],
            records: Vec::new(),
        }
    }

    fn mapping() -> ColumnRoleMapping {
        ColumnRoleMapping::new("item", "qty", crate::domain::item::UnitColumn::None)
    }

    #[test]
    fn test_begin_upload_discards_previous_state() {
        let mut session = ImportSession::default();
        let first = session.begin_upload();
        session.attach_sheet(sheet());
        session.fail("boom");

        let second = session.begin_upload();

        assert_ne!(first, second);
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
        assert_eq!(session.status, ImportStatus::Idle);
        assert!(session.sheet.is_none());
        assert!(session.error_message.is_none());
    }

    #[test]
    fn test_processing_requires_sheet() {
        let mut session = ImportSession::default();
        let err = session.start_processing(mapping()).unwrap_err();
        assert_eq!(err.from, ImportStatus::Idle);

        session.begin_upload();
        assert!(session.start_processing(mapping()).is_err());

        session.attach_sheet(sheet());
        assert_eq!(session.status, ImportStatus::Mapping);
        assert!(session.start_processing(mapping()).is_ok());
        assert_eq!(session.status, ImportStatus::Processing);
    }

    #[test]
    fn test_retry_only_from_error() {
        let mut session = ImportSession::default();
        assert!(session.retry().is_err());

        session.fail("no items");
        assert!(session.retry().is_ok());
        assert_eq!(session.status, ImportStatus::Idle);
        assert!(session.error_message.is_none());
        assert!(session.upload_id.is_none());
    }
}
