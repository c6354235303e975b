use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

mod app;
mod domain;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::app::App;
use crate::infra::config::{load_config, resolve_config_path, AppConfig, CONFIG_FILE_NAME};
use crate::infra::http::backend::HttpBackend;
use crate::infra::http::client::HttpClientConfig;
use crate::infra::sqlite::repo::SqlitePreferences;
use crate::usecase::ports::repo::PreferenceRepository;
use crate::usecase::services::dashboard::Dashboard;

const APP_TITLE: &str = "Tech Map IT | Prototype";

fn main() {
    match default_log_path() {
        Ok(log_path) => {
            if let Err(err) = infra::logging::init(&log_path) {
                eprintln!("logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("logging disabled: {err:#}"),
    }

    launch();
}

#[cfg(feature = "desktop")]
fn launch() {
    let mut config = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title(APP_TITLE));
    match default_webview_data_dir() {
        Ok(webview_data_dir) => config = config.with_data_directory(webview_data_dir),
        Err(err) => tracing::warn!(error = %err, "using default webview data directory"),
    }

    dioxus::LaunchBuilder::desktop().with_cfg(config).launch(App);
}

#[cfg(not(feature = "desktop"))]
fn launch() {
    dioxus::launch(App);
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "techmap", "tech-map")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("preferences.sqlite"))
}

fn default_log_path() -> Result<PathBuf> {
    Ok(project_dirs()?
        .data_local_dir()
        .join("logs")
        .join("tech-map.log"))
}

fn default_config_path() -> Result<PathBuf> {
    let working_dir = std::env::current_dir().context("unable to resolve working directory")?;
    let dirs = project_dirs().ok();
    resolve_config_path(&working_dir, dirs.as_ref().map(|dirs| dirs.config_dir())).ok_or_else(
        || {
            anyhow!(
                "{CONFIG_FILE_NAME} not found in {} or the user config directory",
                working_dir.display()
            )
        },
    )
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

fn build_dashboard_with(config: AppConfig, db_path: PathBuf) -> Result<Dashboard> {
    let backend = HttpBackend::new(config, &HttpClientConfig::default())?;
    let repo = SqlitePreferences { db_path };
    repo.init().map_err(|err| anyhow!(err))?;
    Ok(Dashboard::new(Arc::new(backend), Arc::new(repo)))
}

fn build_dashboard() -> Result<Dashboard> {
    let config = load_config(&default_config_path()?)?;
    build_dashboard_with(config, default_db_path()?)
}

/// Sidebar/select option label for a 0-based page index.
fn page_label(page_index: u64) -> String {
    format!("{}", page_index + 1)
}
