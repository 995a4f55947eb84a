use crate::core::MAIN_WINDOW_LABEL;
use crate::models::WindowState;
use crate::shell::with_lifecycle;
use tauri::AppHandle;

fn lifecycle_missing() -> String {
    "Window lifecycle not initialized".to_string()
}

#[tauri::command]
pub fn show_main_window(app_handle: AppHandle) -> Result<(), String> {
    with_lifecycle(&app_handle, |lifecycle| lifecycle.show_window(MAIN_WINDOW_LABEL))
        .ok_or_else(lifecycle_missing)??;

    let _ = crate::tray_menu::refresh_tray_menu(&app_handle);
    Ok(())
}

#[tauri::command]
pub fn hide_main_window(app_handle: AppHandle) -> Result<(), String> {
    with_lifecycle(&app_handle, |lifecycle| lifecycle.hide_window(MAIN_WINDOW_LABEL))
        .ok_or_else(lifecycle_missing)??;

    let _ = crate::tray_menu::refresh_tray_menu(&app_handle);
    Ok(())
}

#[tauri::command]
pub fn toggle_main_window(app_handle: AppHandle) -> Result<Option<WindowState>, String> {
    let state = with_lifecycle(&app_handle, |lifecycle| {
        lifecycle.toggle_window(MAIN_WINDOW_LABEL)
    })
    .ok_or_else(lifecycle_missing)??;

    let _ = crate::tray_menu::refresh_tray_menu(&app_handle);
    Ok(state)
}

#[tauri::command]
pub fn main_window_state(app_handle: AppHandle) -> Result<Option<WindowState>, String> {
    with_lifecycle(&app_handle, |lifecycle| lifecycle.window_state(MAIN_WINDOW_LABEL))
        .ok_or_else(lifecycle_missing)
}

#[tauri::command]
pub fn quit_app(app_handle: AppHandle) -> Result<(), String> {
    app_handle.exit(0);
    Ok(())
}
