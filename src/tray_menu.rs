use crate::{commands, core::MAIN_WINDOW_LABEL, shell::with_lifecycle};
use tauri::{
    menu::{MenuBuilder, MenuItemBuilder},
    AppHandle, Wry,
};

const TRAY_ID: &str = "main";

fn main_window_visible(app: &AppHandle) -> bool {
    with_lifecycle(app, |lifecycle| {
        lifecycle
            .controller(MAIN_WINDOW_LABEL)
            .map(|c| crate::core::NativeWindow::is_visible(c.window()))
    })
    .flatten()
    .unwrap_or(true)
}

fn build_tray_menu(app: &AppHandle<Wry>) -> tauri::Result<tauri::menu::Menu<Wry>> {
    let visible = main_window_visible(app);

    let toggle_main = MenuItemBuilder::with_id(
        "toggle_main",
        if visible { "Hide Window" } else { "Show Window" },
    )
    .build(app)?;
    let quit = MenuItemBuilder::with_id("quit", "Quit").build(app)?;

    MenuBuilder::new(app)
        .item(&toggle_main)
        .separator()
        .item(&quit)
        .build()
}

pub fn refresh_tray_menu(app: &AppHandle<Wry>) -> tauri::Result<()> {
    let Some(tray) = app.tray_by_id(TRAY_ID) else {
        return Ok(());
    };
    let menu = build_tray_menu(app)?;
    tray.set_menu(Some(menu))?;
    Ok(())
}

/// Tray icon itself is created via `tauri.conf.json` (`app.trayIcon`).
/// This function only ensures our menu is attached/updated.
pub fn create_tray(app: &AppHandle<Wry>) -> tauri::Result<()> {
    refresh_tray_menu(app)
}

pub fn handle_menu_event(app: &AppHandle<Wry>, event: tauri::menu::MenuEvent) {
    match event.id().as_ref() {
        "toggle_main" => {
            if let Err(e) = commands::window::toggle_main_window(app.clone()) {
                log::warn!("tray toggle failed: {}", e);
            }
        }
        "quit" => app.exit(0),
        _ => {}
    }
}
