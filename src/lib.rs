pub mod core;
pub mod error;
pub mod models;

#[cfg(feature = "shell")]
mod commands;
#[cfg(feature = "shell")]
pub mod shell;
#[cfg(feature = "shell")]
mod tray_menu;

#[cfg(feature = "shell")]
pub use app::run;

#[cfg(feature = "shell")]
mod app {
    use crate::core::geometry_store::frame_key_for;
    use crate::core::{
        app_log, shell_config, AppLifecycle, JsonSettingsStore, SettingsGeometryStore,
        MAIN_WINDOW_LABEL,
    };
    use crate::models::GeometryEventKind;
    use crate::shell::{try_with_lifecycle, with_lifecycle, LifecycleState};
    use crate::{commands, tray_menu};
    use std::sync::Arc;
    use tauri::{Manager, RunEvent, WebviewUrl, WebviewWindowBuilder, WindowEvent};

    const SETTINGS_FILE_NAME: &str = "settings.json";

    fn io_error<E: std::fmt::Display>(e: E) -> Box<dyn std::error::Error> {
        Box::new(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    }

    fn setup(app: &mut tauri::App) -> Result<(), Box<dyn std::error::Error>> {
        let app_handle = app.handle().clone();
        let paths = app_handle.path();

        let config_path = paths
            .app_config_dir()
            .map_err(io_error)?
            .join(shell_config::CONFIG_FILE_NAME);
        let settings = shell_config::load_or_default(&config_path);

        let log_dir = paths.app_log_dir().map_err(io_error)?;
        app_log::init(log_dir, settings.log_level_filter()).map_err(io_error)?;
        app_log::install_panic_hook();
        log::info!("startup");

        let store = Arc::new(JsonSettingsStore::open(
            paths.app_data_dir().map_err(io_error)?.join(SETTINGS_FILE_NAME),
        ));

        let main_window = WebviewWindowBuilder::new(
            &app_handle,
            MAIN_WINDOW_LABEL,
            WebviewUrl::App("index.html".into()),
        )
        .title("Desk Shell")
        .visible(false)
        .decorations(settings.chrome.decorations)
        .transparent(settings.chrome.transparent_background)
        .shadow(settings.chrome.shadow)
        .build()?;

        let geometry = SettingsGeometryStore::with_policy(
            Arc::clone(&store),
            frame_key_for(&settings.frame_key, MAIN_WINDOW_LABEL, MAIN_WINDOW_LABEL),
            settings.geometry_policy(),
        );

        let mut lifecycle = AppLifecycle::new(app_handle.clone(), app_handle.clone(), settings);
        lifecycle.attach_window(main_window, geometry)?;
        app.manage(LifecycleState::new(lifecycle));

        // Move/resize events raised while the frame is applied are skipped by
        // `try_with_lifecycle`; they would only re-save the frame just loaded.
        with_lifecycle(&app_handle, |lifecycle| lifecycle.initialize(MAIN_WINDOW_LABEL))
            .ok_or_else(|| io_error("lifecycle state missing"))??;

        tray_menu::create_tray(&app_handle)?;
        Ok(())
    }

    fn on_window_event(window: &tauri::Window, event: &WindowEvent) {
        let app = window.app_handle();
        let label = window.label();
        match event {
            WindowEvent::Moved(_) => {
                try_with_lifecycle(app, |l| l.geometry_event(label, GeometryEventKind::Moved));
            }
            WindowEvent::Resized(_) => {
                try_with_lifecycle(app, |l| l.geometry_event(label, GeometryEventKind::Resized));
            }
            WindowEvent::CloseRequested { api, .. } if label == MAIN_WINDOW_LABEL => {
                // Keep the main window around so a dock click or the tray can bring it back.
                api.prevent_close();
                if let Some(Err(e)) = with_lifecycle(app, |l| l.hide_window(label)) {
                    log::warn!("hide on close failed: {}", e);
                }
                let _ = tray_menu::refresh_tray_menu(app);
            }
            _ => {}
        }
    }

    fn on_run_event(app_handle: &tauri::AppHandle, event: RunEvent) {
        match event {
            // `code` is only set for explicit exits (tray quit, `quit_app`).
            RunEvent::ExitRequested { api, code, .. } if code.is_none() => {
                let terminate = with_lifecycle(app_handle, |l| {
                    l.should_terminate_after_last_window_closed()
                })
                .unwrap_or(false);
                if !terminate {
                    api.prevent_exit();
                }
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen {
                has_visible_windows,
                ..
            } => {
                with_lifecycle(app_handle, |l| l.handle_reopen(has_visible_windows));
                let _ = tray_menu::refresh_tray_menu(app_handle);
            }
            RunEvent::Exit => {
                with_lifecycle(app_handle, |l| l.teardown_all());
                log::info!("exit");
            }
            _ => {}
        }
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        let app = tauri::Builder::default()
            .on_menu_event(|app, event| {
                tray_menu::handle_menu_event(app, event);
            })
            .setup(setup)
            .invoke_handler(tauri::generate_handler![
                commands::window::show_main_window,
                commands::window::hide_main_window,
                commands::window::toggle_main_window,
                commands::window::main_window_state,
                commands::window::quit_app,
                commands::logs::append_log,
                commands::logs::read_logs,
                commands::logs::clear_logs,
            ])
            .on_window_event(on_window_event)
            .build(tauri::generate_context!())
            .expect("error while building tauri application");

        app.run(on_run_event);
    }
}
