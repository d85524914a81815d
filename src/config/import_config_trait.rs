// ==========================================
// 库存清单合并工具 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager
pub trait ImportConfigReader: Send + Sync {
    // ===== 列映射猜测 =====

    /// 描述列关键字
    ///
    /// # 默认值
    /// - ["desc", "item", "name", "product"]
    fn description_keywords(&self) -> Vec<String>;

    /// 数量列关键字
    ///
    /// # 默认值
    /// - ["qty", "quantity", "count", "amount"]
    fn quantity_keywords(&self) -> Vec<String>;

    /// 单位列关键字
    ///
    /// # 默认值
    /// - ["unit", "uom"]
    fn unit_keywords(&self) -> Vec<String>;

    // ===== 文件命名 =====

    /// CSV 导出文件名（默认 aggregated_inventory.csv）
    fn csv_file_name(&self) -> String;

    /// 粘贴文本的虚拟文件名（默认 pasted_data.txt）
    fn pasted_file_name(&self) -> String;

    // ===== 界面语言 =====

    /// 语言代码（"en" / "zh-CN"）
    fn locale(&self) -> String;
}
