mod api_key;
mod commands;
mod config;
mod error;
mod logging;

use std::sync::Arc;

use tauri::Manager;

/// Shared application state accessible from all Tauri commands.
pub struct AppState {
    /// Stable installation identifier resolved during setup.
    pub api_key: String,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logging::init();

    tracing::info!("Starting Lumen Desktop v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .setup(|app| {
            let app_data_dir = app
                .path()
                .app_data_dir()
                .expect("Failed to resolve app data directory");

            let config_path = app_data_dir.join("config.json");

            // A provisioning failure (unreadable file, corrupt JSON, full
            // disk) must not block startup: fall back to a session-only key
            // that is not persisted.
            let api_key = match api_key::provision_api_key(&config_path) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(
                        path = %config_path.display(),
                        "API key provisioning failed, using session-only key: {}",
                        e
                    );
                    api_key::generate_api_key()
                }
            };

            app.manage(Arc::new(AppState { api_key }));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![commands::api_key::get_api_key])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
