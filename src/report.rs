//! 純文字報表

use rust_decimal::Decimal;
use std::fmt::Write;

use stock_calc::{
    AnalysisResult, ClassifiedRow, CoercionWarning, DeadStockItem, Kpis, RiskAlert, TopOrder,
};
use stock_core::RawTable;

/// 缺值顯示
const MISSING: &str = "-";

fn decimal(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn optional(value: Option<Decimal>) -> String {
    value.map(decimal).unwrap_or_else(|| MISSING.to_string())
}

/// 對齊欄寬輸出表格
pub fn render_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(headers.iter().map(|h| h.as_ref()).collect()));
    let _ = writeln!(
        out,
        "{}",
        widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-")
    );
    for row in rows {
        let _ = writeln!(out, "{}", line(row.iter().map(String::as_str).collect()));
    }
    if rows.is_empty() {
        let _ = writeln!(out, "(sin filas)");
    }
    out
}

/// 上傳的原始資料
pub fn loaded_data(table: &RawTable) -> String {
    render_table(&table.headers, &table.rows)
}

/// 完整分類表（原始欄位 + 其他欄位 + 衍生欄位）
pub fn classified_table(rows: &[ClassifiedRow]) -> String {
    let mut headers: Vec<String> = stock_core::REQUIRED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .collect();
    if let Some(first) = rows.first() {
        headers.extend(first.record.extra.iter().map(|(col, _)| col.clone()));
    }
    headers.extend(
        [
            "media_3m",
            "factor_estacional",
            "consumo_previsto",
            "pedido_recomendado",
            "riesgo_rotura",
            "inmovilizado",
            "valor_inmovilizado",
        ]
        .iter()
        .map(|c| c.to_string()),
    );

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let rec = &r.record;
            let m = &r.metrics;
            let mut cells = vec![
                rec.article.clone(),
                rec.category.clone(),
                optional(rec.current_stock),
                optional(rec.min_stock),
                optional(rec.sales[0]),
                optional(rec.sales[1]),
                optional(rec.sales[2]),
                rec.month.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string()),
                optional(rec.purchase_price),
            ];
            cells.extend(rec.extra.iter().map(|(_, v)| v.clone()));
            cells.extend([
                decimal(m.average_sales),
                decimal(m.seasonal_factor),
                decimal(m.forecast),
                m.recommended_order.to_string(),
                m.stockout_risk.to_string(),
                m.dead_stock.to_string(),
                decimal(m.dead_stock_value),
            ]);
            cells
        })
        .collect();

    render_table(&headers, &body)
}

/// 自動建議
pub fn recommendations(rows: &[ClassifiedRow]) -> String {
    let headers = [
        "articulo",
        "consumo_previsto",
        "stock_actual",
        "pedido_recomendado",
        "riesgo_rotura",
        "inmovilizado",
        "valor_inmovilizado",
    ];
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.record.article.clone(),
                decimal(r.metrics.forecast),
                optional(r.record.current_stock),
                r.metrics.recommended_order.to_string(),
                r.metrics.stockout_risk.to_string(),
                r.metrics.dead_stock.to_string(),
                decimal(r.metrics.dead_stock_value),
            ]
        })
        .collect();
    render_table(&headers, &body)
}

/// 缺貨預警
pub fn risk_alerts(alerts: &[RiskAlert]) -> String {
    let body: Vec<Vec<String>> = alerts
        .iter()
        .map(|a| vec![a.article.clone(), optional(a.current_stock), decimal(a.forecast)])
        .collect();
    render_table(&["articulo", "stock_actual", "consumo_previsto"], &body)
}

/// 呆滯庫存
pub fn dead_stock(items: &[DeadStockItem]) -> String {
    let body: Vec<Vec<String>> = items
        .iter()
        .map(|d| {
            vec![
                d.article.clone(),
                optional(d.current_stock),
                decimal(d.dead_stock_value),
            ]
        })
        .collect();
    render_table(&["articulo", "stock_actual", "valor_inmovilizado"], &body)
}

/// 優先採購
pub fn top_orders(orders: &[TopOrder]) -> String {
    let body: Vec<Vec<String>> = orders
        .iter()
        .map(|o| {
            vec![
                o.article.clone(),
                o.category.clone(),
                o.recommended_order.to_string(),
                decimal(o.forecast),
                optional(o.current_stock),
            ]
        })
        .collect();
    render_table(
        &["articulo", "categoria", "pedido_recomendado", "consumo_previsto", "stock_actual"],
        &body,
    )
}

/// 關鍵指標
pub fn kpis(kpis: &Kpis) -> String {
    let month = kpis
        .month
        .map(|m| m.to_string())
        .unwrap_or_else(|| MISSING.to_string());
    format!(
        "Dinero inmovilizado en almacén (€): {:.2}\n\
         Artículos con riesgo de rotura: {}\n\
         Artículos inmovilizados: {}\n\
         Mes de referencia: {}\n",
        kpis.dead_stock_value_display(),
        kpis.risk_count,
        kpis.dead_stock_count,
        month
    )
}

/// 數值轉換警告
pub fn coercion_notice(warning: &CoercionWarning) -> String {
    let mut out = format!(
        "Aviso: {} fila(s) con valores numéricos no válidos; se tratan como vacíos.\n",
        warning.affected_rows
    );
    for issue in &warning.issues {
        let _ = writeln!(
            out,
            "  fila {} · {} = {:?}",
            issue.row + 2,
            issue.column,
            issue.value
        );
    }
    out
}

/// 完整報表（摘要除外）
pub fn full_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    if let Some(warning) = &result.coercion_warning {
        out.push_str(&coercion_notice(warning));
        out.push('\n');
    }
    let sections = [
        ("Tabla clasificada", classified_table(&result.rows)),
        ("Recomendaciones automáticas", recommendations(&result.rows)),
        ("Alertas de rotura", risk_alerts(&result.aggregation.risk_alerts)),
        ("Stock inmovilizado", dead_stock(&result.aggregation.dead_stock_items)),
        ("Prioridades de compra", top_orders(&result.aggregation.top_orders)),
        ("Indicadores", kpis(&result.aggregation.kpis)),
    ];
    for (title, body) in sections {
        let _ = writeln!(out, "== {} ==\n{}", title, body);
    }
    out
}
