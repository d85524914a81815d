// ==========================================
// 库存清单合并工具 - 命令行入口
// ==========================================
// 用法: inventory-consolidator <file> [--description COL] [--quantity COL]
//       [--unit COL|none] [--format table|csv|tsv] [--output PATH]
// 未指定文件或文件为 "-" 时从标准输入读取粘贴文本
// ==========================================

use anyhow::{bail, Context};
use clap::Parser;
use inventory_consolidator::app::AppState;
use inventory_consolidator::i18n::t_with_args;
use inventory_consolidator::{logging, ColumnRoleMapping, ExportFormat, MappingProposal, UnitColumn};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// 合并库存清单：按描述去重并汇总数量
#[derive(Parser, Debug)]
#[command(name = "inventory-consolidator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 输入文件（.xlsx/.xls/.csv/.txt/.tsv）；省略或 "-" 时读取标准输入
    file: Option<PathBuf>,

    /// 描述列（默认按表头猜测）
    #[arg(short, long)]
    description: Option<String>,

    /// 数量列（默认按表头猜测）
    #[arg(short, long)]
    quantity: Option<String>,

    /// 单位列，"none" 表示不使用单位
    #[arg(short, long)]
    unit: Option<String>,

    /// 输出格式
    #[arg(short, long, default_value = "table")]
    format: ExportFormat,

    /// 输出文件（默认写到标准输出）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long, env = "INVENTORY_CONSOLIDATOR_CONFIG")]
    config: Option<PathBuf>,
}

/// 用户指定的列覆盖猜测结果
fn resolve_mapping(cli: &Cli, proposal: &MappingProposal) -> anyhow::Result<ColumnRoleMapping> {
    let suggested = proposal.suggested_mapping.as_ref();

    let description_col = match (&cli.description, suggested) {
        (Some(col), _) => col.clone(),
        (None, Some(s)) => s.description_col.clone(),
        (None, None) => bail!("无法确定描述列，请使用 --description 指定"),
    };
    let quantity_col = match (&cli.quantity, suggested) {
        (Some(col), _) => col.clone(),
        (None, Some(s)) => s.quantity_col.clone(),
        (None, None) => bail!("无法确定数量列，请使用 --quantity 指定"),
    };
    let unit_col = match (&cli.unit, suggested) {
        (Some(col), _) => UnitColumn::parse(col),
        (None, Some(s)) => s.unit_col.clone(),
        (None, None) => UnitColumn::None,
    };

    Ok(ColumnRoleMapping::new(description_col, quantity_col, unit_col))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统（输出到 stderr）
    logging::init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "命令行参数");

    let state = AppState::new(cli.config.as_deref()).map_err(anyhow::Error::msg)?;
    let api = state.consolidation_api.clone();

    // ===== 上传 =====
    let proposal = match cli.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => api
            .upload_file(path)
            .await
            .with_context(|| format!("无法读取 {}", path.display()))?,
        _ => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("无法读取标准输入")?;
            api.upload_text(&text).await?
        }
    };

    let rows = proposal.row_count.to_string();
    eprintln!(
        "{}",
        t_with_args(
            "import.upload_received",
            &[("rows", rows.as_str()), ("file", proposal.file_name.as_str())]
        )
    );

    // ===== 列映射 + 汇总 =====
    let mapping = resolve_mapping(&cli, &proposal)?;
    tracing::info!(
        description = %mapping.description_col,
        quantity = %mapping.quantity_col,
        unit = %mapping.unit_col,
        "使用列映射"
    );
    let result = api.confirm_mapping(mapping)?;
    eprintln!("{}", api.summary_message()?);
    if !result.unit_conflicts.is_empty() {
        let count = result.unit_conflicts.len().to_string();
        eprintln!("{}", t_with_args("results.unit_conflicts", &[("count", count.as_str())]));
    }

    // ===== 导出 =====
    match (&cli.output, cli.format) {
        (Some(path), ExportFormat::Csv) => {
            let saved = api.save_csv(Some(path.as_path())).await?;
            let saved = saved.display().to_string();
            eprintln!("{}", t_with_args("results.saved", &[("path", saved.as_str())]));
        }
        (Some(path), format) => {
            let content = api.export(format)?;
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("无法写入 {}", path.display()))?;
        }
        (None, format) => println!("{}", api.export(format)?),
    }

    Ok(())
}
