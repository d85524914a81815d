// ==========================================
// 库存清单合并工具 - 条目导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 解码 → [用户列映射] → 归一化 → 汇总
// ==========================================

use crate::domain::item::{ColumnRoleMapping, DecodedSheet, RawRecord, ValidatedItem};
use crate::domain::session::ConsolidationResult;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// ItemImporter Trait
// ==========================================
// 用途: 条目导入主接口
// 实现者: ItemImporterImpl
#[async_trait]
pub trait ItemImporter: Send + Sync {
    /// 读取并解码文件（唯一的异步 I/O 边界）
    ///
    /// # 返回
    /// - Ok(DecodedSheet): 表头 + 行记录（第一个工作表）
    /// - Err: 解码失败（格式不支持 / 无数据行 / 读取错误）
    async fn load_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<DecodedSheet>;

    /// 解码内存中的字节流
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - file_name: 原始文件名（用于按扩展名选择解析器）
    async fn load_bytes(&self, bytes: Vec<u8>, file_name: &str) -> ImportResult<DecodedSheet>;

    /// 按列映射归一化并汇总（同步，纯内存）
    ///
    /// # 返回
    /// - Ok(ConsolidationResult): 汇总结果
    /// - Err(EmptyResult): 没有任何有效条目
    fn consolidate(
        &self,
        sheet: &DecodedSheet,
        mapping: &ColumnRoleMapping,
    ) -> ImportResult<ConsolidationResult>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 字节流 → 表头 + 行记录
// 实现者: CsvParser, TextParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析字节流
    ///
    /// # 返回
    /// - Ok(DecodedSheet): 至少一行数据
    /// - Err: 格式错误 / 无数据行
    fn parse_bytes(&self, bytes: &[u8], file_name: &str) -> ImportResult<DecodedSheet>;
}

// ==========================================
// ColumnGuesser Trait
// ==========================================
// 用途: 按表头名称给出默认列映射（用户可修改）
// 实现者: ColumnGuesserImpl
pub trait ColumnGuesser: Send + Sync {
    /// 猜测列映射
    ///
    /// # 返回
    /// - Some(mapping): 表头非空
    /// - None: 没有任何表头
    fn guess(&self, headers: &[String]) -> Option<ColumnRoleMapping>;
}

// ==========================================
// ItemNormalizer Trait
// ==========================================
// 用途: 行记录 → 校验后条目
// 实现者: ItemNormalizerImpl
pub trait ItemNormalizer: Send + Sync {
    /// 归一化
    ///
    /// # 规则
    /// - 描述为假值 → 丢弃
    /// - 数量既非数值也无数字前缀 → 丢弃
    /// - 输出顺序与输入一致
    ///
    /// # 返回
    /// - Err(EmptyResult): 全部丢弃
    fn normalize(
        &self,
        records: &[RawRecord],
        mapping: &ColumnRoleMapping,
    ) -> ImportResult<Vec<ValidatedItem>>;
}
