use std::sync::Arc;

use tauri::State;

use crate::AppState;

/// Return the API key resolved during startup provisioning.
///
/// The value is captured once in `AppState`; it is never re-read from disk,
/// so later external edits to `config.json` do not affect a running app.
#[tauri::command]
pub fn get_api_key(state: State<'_, Arc<AppState>>) -> String {
    state.api_key.clone()
}
