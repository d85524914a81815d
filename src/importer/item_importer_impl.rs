// ==========================================
// 库存清单合并工具 - 条目导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到汇总结果
// 流程: 读取 → 解码 → [用户列映射] → 归一化 → 汇总 → 单位冲突诊断
// ==========================================

use crate::domain::item::{ColumnRoleMapping, DecodedSheet};
use crate::domain::session::ConsolidationResult;
use crate::engine::aggregation::AggregationEngine;
use crate::engine::unit_conflict::UnitConflictDetector;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{file_extension, is_supported_file, UniversalFileParser};
use crate::importer::item_importer_trait::{FileParser, ItemImporter, ItemNormalizer};
use crate::importer::item_normalizer::ItemNormalizer as DefaultItemNormalizer;
use crate::perf::PerfGuard;
use async_trait::async_trait;
use std::path::Path;
use tracing::{info, instrument, warn};

// ==========================================
// ItemImporterImpl - 条目导入器实现
// ==========================================
pub struct ItemImporterImpl {
    // 导入组件
    file_parser: Box<dyn FileParser>,
    normalizer: Box<dyn ItemNormalizer>,

    // 汇总与诊断
    aggregation: AggregationEngine,
    conflict_detector: UnitConflictDetector,
}

impl ItemImporterImpl {
    /// 创建新的 ItemImporter 实例
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - normalizer: 条目归一化器
    pub fn new(file_parser: Box<dyn FileParser>, normalizer: Box<dyn ItemNormalizer>) -> Self {
        Self {
            file_parser,
            normalizer,
            aggregation: AggregationEngine::new(),
            conflict_detector: UnitConflictDetector,
        }
    }
}

impl Default for ItemImporterImpl {
    fn default() -> Self {
        Self::new(Box::new(UniversalFileParser), Box::new(DefaultItemNormalizer))
    }
}

#[async_trait]
impl ItemImporter for ItemImporterImpl {
    #[instrument(skip(self, file_path))]
    async fn load_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<DecodedSheet> {
        let path = file_path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        // 先校验扩展名，避免读取不支持的大文件
        if !is_supported_file(&file_name) {
            return Err(ImportError::UnsupportedFormat(file_extension(&file_name)));
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
            _ => ImportError::from(e),
        })?;

        self.load_bytes(bytes, &file_name).await
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn load_bytes(&self, bytes: Vec<u8>, file_name: &str) -> ImportResult<DecodedSheet> {
        let sheet = self.file_parser.parse_bytes(&bytes, file_name)?;

        info!(
            file_name = %sheet.file_name,
            columns = sheet.headers.len(),
            rows = sheet.row_count(),
            "文件解码完成"
        );
        Ok(sheet)
    }

    #[instrument(skip(self, sheet), fields(file_name = %sheet.file_name))]
    fn consolidate(
        &self,
        sheet: &DecodedSheet,
        mapping: &ColumnRoleMapping,
    ) -> ImportResult<ConsolidationResult> {
        let perf = PerfGuard::new("consolidate");

        let validated = self.normalizer.normalize(&sheet.records, mapping)?;
        let items = self.aggregation.aggregate(&validated);
        let summary = self.aggregation.summarize(&validated, &items);

        let unit_conflicts = self.conflict_detector.detect(&validated);
        for conflict in &unit_conflicts {
            warn!(
                id = %conflict.id,
                row_number = conflict.row_number,
                kept_unit = %conflict.kept_unit,
                ignored_unit = %conflict.ignored_unit,
                "单位不一致，沿用首个单位"
            );
        }

        info!(
            raw_rows = sheet.row_count(),
            validated_rows = summary.validated_rows,
            unique_items = summary.unique_items,
            unit_conflicts = unit_conflicts.len(),
            "汇总完成"
        );

        Ok(ConsolidationResult {
            items,
            summary,
            unit_conflicts,
            elapsed_ms: perf.elapsed_ms(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::UnitColumn;
    use std::io::Write;
    use tempfile::Builder;

    fn mapping(unit: Option<&str>) -> ColumnRoleMapping {
        ColumnRoleMapping {
            description_col: "Item".to_string(),
            quantity_col: "Qty".to_string(),
            unit_col: unit
                .map(|u| UnitColumn::Column(u.to_string()))
                .unwrap_or(UnitColumn::None),
        }
    }

    #[tokio::test]
    async fn test_load_file_and_consolidate() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "Item,Qty,Unit\nSteel Bolt,5,pcs\n steel  bolt ,3,box\nNut,2,\n"
        )
        .unwrap();

        let importer = ItemImporterImpl::default();
        let sheet = importer.load_file(file.path()).await.unwrap();
        assert_eq!(sheet.row_count(), 3);

        let result = importer.consolidate(&sheet, &mapping(Some("Unit"))).unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].id, "steel bolt");
        assert_eq!(result.items[0].total_quantity, 8.0);
        assert_eq!(result.items[0].unit, "pcs");
        assert_eq!(result.summary.validated_rows, 3);
        assert_eq!(result.unit_conflicts.len(), 1);
        assert_eq!(result.unit_conflicts[0].ignored_unit, "box");
    }

    #[tokio::test]
    async fn test_load_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ItemImporterImpl::default()
            .load_file(dir.path().join("missing.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_load_file_unsupported_extension() {
        let file = Builder::new().suffix(".pdf").tempfile().unwrap();
        let err = ItemImporterImpl::default()
            .load_file(file.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ref ext) if ext == "pdf"));
    }

    #[tokio::test]
    async fn test_consolidate_empty_result() {
        let importer = ItemImporterImpl::default();
        let sheet = importer
            .load_bytes(b"Item,Qty\nBolt,abc\n,5\n".to_vec(), "a.csv")
            .await
            .unwrap();

        let err = importer.consolidate(&sheet, &mapping(None)).unwrap_err();
        assert!(matches!(err, ImportError::EmptyResult(_)));
    }
}
