// ==========================================
// 合并会话 API 端到端测试
// ==========================================
// 模拟调用方的完整流程: 上传 → 确认映射 → 导出 → 保存

use inventory_consolidator::api::{map_api_error, ApiError, ConsolidationApi};
use inventory_consolidator::app::AppState;
use inventory_consolidator::config::{ConfigManager, ConsolidatorConfig};
use inventory_consolidator::{ImportStatus, UnitColumn};
use std::path::PathBuf;

use test_helpers::{mapping, write_temp_file};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// 测试 CSV 文件完整流程
#[tokio::test]
async fn test_csv_file_full_flow() {
    inventory_consolidator::logging::init_test();
    let api = ConsolidationApi::default();

    // 步骤 1: 上传
    let proposal = api
        .upload_file(fixture("inventory_basic.csv"))
        .await
        .expect("上传失败");
    assert_eq!(proposal.file_name, "inventory_basic.csv");
    assert_eq!(proposal.headers, vec!["Item Description", "Qty", "UOM"]);
    assert_eq!(proposal.row_count, 7);
    assert_eq!(api.status().unwrap(), ImportStatus::Mapping);

    // 步骤 2: 使用猜测的映射
    let suggested = proposal.suggested_mapping.expect("应有默认映射");
    assert_eq!(suggested, mapping("Item Description", "Qty", Some("UOM")));

    // 步骤 3: 汇总
    let result = api.confirm_mapping(suggested).expect("汇总失败");
    assert_eq!(api.status().unwrap(), ImportStatus::Success);
    assert_eq!(result.summary.validated_rows, 5);
    assert_eq!(result.summary.unique_items, 3);
    assert_eq!(result.unit_conflicts.len(), 1);
    assert_eq!(result.unit_conflicts[0].row_number, 2);

    // 步骤 4: 导出
    assert_eq!(
        api.export_csv().unwrap(),
        "Description,Total Quantity,Unit,Occurrences\n\
         \"Steel Bolt\",8,pcs,2\n\
         \"Hex Nut\",11.5,pcs,2\n\
         \"Widget \"\"A\"\"\",2,pcs,1"
    );
    assert!(api.export_tsv().unwrap().starts_with("Item Description\tTotal Quantity"));
    assert!(api.render_table().unwrap().contains("Hex Nut"));

    // 步骤 5: 保存
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.csv");
    let saved = api.save_csv(Some(target.as_path())).await.expect("保存失败");
    let written = std::fs::read_to_string(saved).unwrap();
    assert_eq!(written, api.export_csv().unwrap());
}

/// 测试分号分隔的文本文件 + 手工映射
#[tokio::test]
async fn test_semicolon_text_file() {
    let api = ConsolidationApi::default();
    let proposal = api
        .upload_file(fixture("pasted_semicolon.txt"))
        .await
        .unwrap();
    assert_eq!(proposal.headers, vec!["Name", "Count"]);

    let result = api.confirm_mapping(mapping("Name", "Count", None)).unwrap();
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[0].description, "Cable Tie");
    assert_eq!(result.items[0].total_quantity, 150.0);
    assert_eq!(result.items[1].total_quantity, 16.0);
}

/// 测试粘贴文本（制表符）
#[tokio::test]
async fn test_pasted_text_flow() {
    let api = ConsolidationApi::default();
    let proposal = api
        .upload_text("Product\tQuantity\tUnit\nTape\t2\troll\ntape\t3\t\n")
        .await
        .unwrap();
    assert_eq!(proposal.file_name, "pasted_data.txt");

    let result = api
        .confirm_mapping(proposal.suggested_mapping.unwrap())
        .unwrap();
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].unit, "roll");
    assert_eq!(result.items[0].total_quantity, 5.0);
}

/// 测试从表格软件粘贴的数值与布尔单元格
#[tokio::test]
async fn test_pasted_text_typed_cells() {
    let api = ConsolidationApi::default();
    let proposal = api
        .upload_text("Item\tQty\nBolt\t1,200\nbolt\t300\nFALSE\t7\n")
        .await
        .unwrap();

    let result = api
        .confirm_mapping(proposal.suggested_mapping.unwrap())
        .unwrap();
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].description, "Bolt");
    assert_eq!(result.items[0].total_quantity, 1500.0);
    assert_eq!(result.items[0].occurrence_count, 2);
    assert_eq!(
        api.export_csv().unwrap(),
        "Description,Total Quantity,Unit,Occurrences\n\"Bolt\",1500,,2"
    );
}

/// 测试不支持的文件类型
#[tokio::test]
async fn test_unsupported_file_type() {
    let file = write_temp_file(".json", b"{}");
    let api = ConsolidationApi::default();

    let err = api.upload_file(file.path()).await.unwrap_err();
    assert!(matches!(err, ApiError::DecodeFailed(_)));
    assert_eq!(api.status().unwrap(), ImportStatus::Error);

    let json: serde_json::Value = serde_json::from_str(&map_api_error(&err)).unwrap();
    assert_eq!(json["code"], "DECODE_FAILED");
}

/// 测试单位列为 none 时忽略单位
#[tokio::test]
async fn test_unit_column_none() {
    let file = write_temp_file(".csv", b"Item,Qty,Unit\nBolt,1,pcs\nbolt,2,kg\n");
    let api = ConsolidationApi::default();
    api.upload_file(file.path()).await.unwrap();

    let mut chosen = mapping("Item", "Qty", Some("Unit"));
    chosen.unit_col = UnitColumn::parse("none");
    let result = api.confirm_mapping(chosen).unwrap();

    assert_eq!(result.items[0].unit, "");
    assert!(result.unit_conflicts.is_empty());
}

/// 测试配置关键字影响默认映射
#[tokio::test]
async fn test_configured_keywords_drive_guess() {
    let mut config = ConsolidatorConfig::default();
    config.quantity_keywords = vec!["pieces".to_string()];
    let state = AppState::with_config(ConfigManager::from_config(config));

    let proposal = state
        .consolidation_api
        .upload_text("Item,Total,Pieces\nBolt,99,4\n")
        .await
        .unwrap();

    let suggested = proposal.suggested_mapping.unwrap();
    assert_eq!(suggested.quantity_col, "Pieces");
}

/// 测试重置后回到 IDLE 且导出不可用
#[tokio::test]
async fn test_reset_discards_everything() {
    let api = ConsolidationApi::default();
    let proposal = api.upload_file(fixture("inventory_basic.csv")).await.unwrap();
    api.confirm_mapping(proposal.suggested_mapping.unwrap()).unwrap();

    api.reset().unwrap();

    assert_eq!(api.status().unwrap(), ImportStatus::Idle);
    assert!(api.current_upload_id().unwrap().is_none());
    assert!(matches!(api.export_csv(), Err(ApiError::NotFound(_))));
}
