// ==========================================
// 库存清单合并工具 - 合并会话API
// ==========================================
// 职责: 上传 → 列映射确认 → 汇总 → 导出 的会话编排
// 红线: 新上传无条件丢弃旧会话；过期上传的解码结果直接丢弃
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfigReader;
use crate::domain::item::{ColumnRoleMapping, DecodedSheet};
use crate::domain::session::{ConsolidationResult, ImportSession};
use crate::domain::types::{ExportFormat, ImportStatus};
use crate::export::{render_text_table, table_rows, to_csv_string, to_tsv_string, TableRow};
use crate::i18n;
use crate::importer::{
    ColumnGuesser, ColumnGuesserImpl, ImportResult, ItemImporter, ItemImporterImpl,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 上传解码后的列映射提议
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingProposal {
    /// 上传ID（确认映射前被新上传取代则失效）
    pub upload_id: Uuid,
    /// 文件名
    pub file_name: String,
    /// 表头（已去重）
    pub headers: Vec<String>,
    /// 数据行数（不含空白行）
    pub row_count: usize,
    /// 按表头猜测的默认映射
    pub suggested_mapping: Option<ColumnRoleMapping>,
}

/// 合并会话API
pub struct ConsolidationApi {
    importer: ItemImporterImpl,
    guesser: ColumnGuesserImpl,
    csv_file_name: String,
    pasted_file_name: String,
    session: Mutex<ImportSession>,
}

impl Default for ConsolidationApi {
    fn default() -> Self {
        Self::new(
            ItemImporterImpl::default(),
            ColumnGuesserImpl::default(),
            "aggregated_inventory.csv",
            "pasted_data.txt",
        )
    }
}

impl ConsolidationApi {
    pub fn new(
        importer: ItemImporterImpl,
        guesser: ColumnGuesserImpl,
        csv_file_name: impl Into<String>,
        pasted_file_name: impl Into<String>,
    ) -> Self {
        Self {
            importer,
            guesser,
            csv_file_name: csv_file_name.into(),
            pasted_file_name: pasted_file_name.into(),
            session: Mutex::new(ImportSession::default()),
        }
    }

    /// 按配置创建（关键字 / 文件命名）
    pub fn from_config<C: ImportConfigReader + ?Sized>(config: &C) -> Self {
        Self::new(
            ItemImporterImpl::default(),
            ColumnGuesserImpl::from_config(config),
            config.csv_file_name(),
            config.pasted_file_name(),
        )
    }

    fn lock_session(&self) -> ApiResult<MutexGuard<'_, ImportSession>> {
        self.session
            .lock()
            .map_err(|e| ApiError::InternalError(format!("会话锁获取失败: {}", e)))
    }

    // ==========================================
    // 上传
    // ==========================================

    /// 上传文件（按扩展名选择解析器）
    pub async fn upload_file<P: AsRef<Path> + Send>(&self, path: P) -> ApiResult<MappingProposal> {
        let upload_id = self.lock_session()?.begin_upload();
        let decoded = self.importer.load_file(path).await;
        self.finish_upload(upload_id, decoded)
    }

    /// 上传内存字节流
    pub async fn upload_bytes(&self, bytes: Vec<u8>, file_name: &str) -> ApiResult<MappingProposal> {
        let upload_id = self.lock_session()?.begin_upload();
        let decoded = self.importer.load_bytes(bytes, file_name).await;
        self.finish_upload(upload_id, decoded)
    }

    /// 上传粘贴文本（作为 pasted_data.txt 解码）
    pub async fn upload_text(&self, text: &str) -> ApiResult<MappingProposal> {
        if text.trim().is_empty() {
            return Err(ApiError::InvalidInput(i18n::t("errors.blank_text")));
        }
        let file_name = self.pasted_file_name.clone();
        self.upload_bytes(text.as_bytes().to_vec(), &file_name).await
    }

    /// 解码结束：仅当前上传可写入会话
    fn finish_upload(
        &self,
        upload_id: Uuid,
        decoded: ImportResult<DecodedSheet>,
    ) -> ApiResult<MappingProposal> {
        let mut session = self.lock_session()?;
        if !session.is_current(upload_id) {
            warn!(upload_id = %upload_id, "上传已被新的上传取代，丢弃解码结果");
            return Err(ApiError::StaleUpload {
                upload_id: upload_id.to_string(),
            });
        }

        match decoded {
            Ok(sheet) => {
                let proposal = MappingProposal {
                    upload_id,
                    file_name: sheet.file_name.clone(),
                    headers: sheet.headers.clone(),
                    row_count: sheet.row_count(),
                    suggested_mapping: self.guesser.guess(&sheet.headers),
                };
                session.attach_sheet(sheet);
                info!(
                    upload_id = %upload_id,
                    file_name = %proposal.file_name,
                    rows = proposal.row_count,
                    "上传解码完成，等待列映射"
                );
                Ok(proposal)
            }
            Err(e) => {
                warn!(upload_id = %upload_id, error = %e, "上传解码失败");
                session.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    // ==========================================
    // 列映射确认 + 汇总
    // ==========================================

    /// 确认列映射并执行汇总
    ///
    /// # 返回
    /// - Ok(ConsolidationResult): 会话进入 SUCCESS
    /// - Err(InvalidInput): 映射引用了不存在的列（会话保持 MAPPING）
    /// - Err(EmptyResult): 没有有效条目（会话进入 ERROR）
    #[instrument(skip(self))]
    pub fn confirm_mapping(&self, mapping: ColumnRoleMapping) -> ApiResult<ConsolidationResult> {
        let mut session = self.lock_session()?;

        if let Some(sheet) = session.sheet.as_ref() {
            if let Err((role, column)) = mapping.validate(&sheet.headers) {
                return Err(ApiError::InvalidInput(format!(
                    "{} ({})",
                    i18n::t_with_args("errors.invalid_mapping", &[("column", column.as_str())]),
                    role
                )));
            }
        }

        session.start_processing(mapping.clone())?;

        let outcome = match session.sheet.as_ref() {
            Some(sheet) => self.importer.consolidate(sheet, &mapping),
            None => return Err(ApiError::InternalError(i18n::t("errors.no_file"))),
        };

        match outcome {
            Ok(result) => {
                session.complete(result.clone());
                Ok(result)
            }
            Err(e) => {
                session.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    // ==========================================
    // 结果与导出
    // ==========================================

    /// 最近一次成功的汇总结果
    pub fn result(&self) -> ApiResult<ConsolidationResult> {
        self.lock_session()?
            .result
            .clone()
            .ok_or_else(|| ApiError::NotFound(i18n::t("errors.no_result")))
    }

    /// "Combined N raw rows into M unique items."
    pub fn summary_message(&self) -> ApiResult<String> {
        let result = self.result()?;
        let rows = result.summary.validated_rows.to_string();
        let items = result.summary.unique_items.to_string();
        Ok(i18n::t_with_args(
            "results.summary",
            &[("rows", rows.as_str()), ("items", items.as_str())],
        ))
    }

    pub fn export(&self, format: ExportFormat) -> ApiResult<String> {
        let result = self.result()?;
        Ok(match format {
            ExportFormat::Table => render_text_table(&result.items),
            ExportFormat::Csv => to_csv_string(&result.items),
            ExportFormat::Tsv => to_tsv_string(&result.items),
        })
    }

    pub fn export_csv(&self) -> ApiResult<String> {
        self.export(ExportFormat::Csv)
    }

    /// 剪贴板文本
    pub fn export_tsv(&self) -> ApiResult<String> {
        self.export(ExportFormat::Tsv)
    }

    pub fn render_table(&self) -> ApiResult<String> {
        self.export(ExportFormat::Table)
    }

    pub fn table_rows(&self) -> ApiResult<Vec<TableRow>> {
        Ok(table_rows(&self.result()?.items))
    }

    /// 写出 CSV 文件
    ///
    /// # 参数
    /// - path: 目标路径；None 时写到当前目录下的默认文件名
    pub async fn save_csv(&self, path: Option<&Path>) -> ApiResult<PathBuf> {
        let target = match path {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(&self.csv_file_name),
        };
        let content = self.export_csv()?;

        tokio::fs::write(&target, content)
            .await
            .map_err(|e| ApiError::FileWriteError(format!("{}: {}", target.display(), e)))?;

        info!(path = %target.display(), "CSV 已保存");
        Ok(target)
    }

    pub fn csv_file_name(&self) -> &str {
        &self.csv_file_name
    }

    // ==========================================
    // 会话状态
    // ==========================================

    pub fn status(&self) -> ApiResult<ImportStatus> {
        Ok(self.lock_session()?.status)
    }

    pub fn last_error(&self) -> ApiResult<Option<String>> {
        Ok(self.lock_session()?.error_message.clone())
    }

    pub fn current_upload_id(&self) -> ApiResult<Option<Uuid>> {
        Ok(self.lock_session()?.upload_id)
    }

    /// 任意状态 → IDLE
    pub fn reset(&self) -> ApiResult<()> {
        self.lock_session()?.reset();
        Ok(())
    }

    /// ERROR → IDLE
    pub fn retry(&self) -> ApiResult<()> {
        self.lock_session()?.retry()?;
        Ok(())
    }
}
