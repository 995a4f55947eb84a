use crate::core::app_log::{self, AppLog, AppLogRecord};
use serde_json::Value;

fn sink() -> Result<&'static AppLog, String> {
    app_log::installed().ok_or_else(|| "Logging not initialized".to_string())
}

#[tauri::command]
pub async fn append_log(
    level: String,
    scope: String,
    message: String,
    data: Option<Value>,
) -> Result<(), String> {
    sink()?.append(&AppLogRecord {
        ts_ms: chrono::Utc::now().timestamp_millis(),
        level,
        scope,
        message,
        data,
    })
}

#[tauri::command]
pub async fn read_logs(
    limit: Option<u32>,
    query: Option<String>,
    tail_bytes: Option<u64>,
) -> Result<Vec<AppLogRecord>, String> {
    let limit = limit.unwrap_or(500).clamp(1, 5000) as usize;
    sink()?.read(limit, query, tail_bytes)
}

#[tauri::command]
pub async fn clear_logs() -> Result<(), String> {
    sink()?.clear()
}
