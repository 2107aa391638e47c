use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::config::{load_settings, load_settings_from};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{fonts, GlossaryApp, APP_TITLE};

#[derive(Parser, Debug)]
#[command(about = "AI financial glossary desktop app")]
struct Args {
    /// Path to a glossary.toml config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured model identifier.
    #[arg(long)]
    model: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path, |name| std::env::var(name).ok())?,
        None => load_settings(),
    };
    if let Some(model) = args.model {
        settings.model = model;
    }

    let fetcher = client_core::connect(&settings).map_err(|err| {
        tracing::error!(error = %err, "refusing to start without a usable generation client");
        err
    })?;
    tracing::info!(model = %settings.model, "generation client ready");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let _worker = backend_bridge::runtime::launch(Arc::new(fetcher), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([560.0, 520.0]),
        ..Default::default()
    };
    let font_path = settings.font_path.clone();
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            fonts::install_cjk_fonts(&cc.egui_ctx, font_path.as_deref());
            Ok(Box::new(GlossaryApp::new(cmd_tx, ui_rx)))
        }),
    )
    .map_err(|err| anyhow!("desktop app exited with error: {err}"))
}
