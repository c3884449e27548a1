//! 命令列入口：讀取一個庫存檔案，輸出分析報表與主管摘要

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use taller_compras::report;
use taller_compras::stock_calc::StockAnalyzer;
use taller_compras::stock_core::AnalysisConfig;
use taller_compras::stock_summary::{summarize_with_config, SummaryConfig, SummaryPayload};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("uso: taller-compras <inventario.xlsx|inventario.csv>")?;

    let table = taller_compras::stock_import::load_table(&path)
        .with_context(|| format!("no se pudo leer {}", path))?;

    println!("== Datos cargados ==\n{}", report::loaded_data(&table));

    // 欄位不齊時直接結束，不輸出任何部分結果
    let result = StockAnalyzer::new(AnalysisConfig::default())
        .analyze(&table)
        .context("El Excel no tiene todas las columnas necesarias")?;

    print!("{}", report::full_report(&result));

    let payload = SummaryPayload::from_aggregation(&result.aggregation);
    match summarize_with_config(&SummaryConfig::from_env(), &payload) {
        Ok(text) => println!("== Resumen ejecutivo ==\n{}", text),
        Err(e) => println!("== Resumen ejecutivo ==\nResumen no disponible: {}", e),
    }

    Ok(())
}
