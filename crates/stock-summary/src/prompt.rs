//! 摘要提示詞範本

use crate::payload::SummaryPayload;
use crate::SummaryUnavailable;

/// 系統角色
pub const SYSTEM_ROLE: &str = "Eres un asesor experto en compras e inventario de un taller \
mecánico. Respondes en español, de forma concreta y orientada a la acción.";

/// 優先採購清單上限（提示詞要求）
pub const MAX_PURCHASE_ITEMS: usize = 8;

/// 組裝使用者提示詞
pub fn build_user_prompt(payload: &SummaryPayload) -> Result<String, SummaryUnavailable> {
    let data = payload.to_json()?;
    let month = payload
        .month
        .map(|m| m.to_string())
        .unwrap_or_else(|| "sin especificar".to_string());

    Ok(format!(
        "Analiza el inventario del taller (mes de referencia: {month}).\n\
         Datos en JSON:\n{data}\n\n\
         Devuelve:\n\
         1. Los 3 principales riesgos operativos, cada uno con una acción concreta.\n\
         2. 3 oportunidades de ahorro.\n\
         3. Una lista de compras priorizada de como máximo {MAX_PURCHASE_ITEMS} artículos.\n\
         4. Una única frase final con la acción más importante."
    ))
}
