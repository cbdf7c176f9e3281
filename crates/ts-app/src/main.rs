use anyhow::Result;
use clap::Parser;
use ts_core::ViewerConfig;

pub mod app;
pub mod cli;
pub mod export;
pub mod loader;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider les sources
    cli.warn_non_tiff();

    // 4. Charger la config + overrides CLI
    let mut config = resolve_config(&cli)?;
    if let Some(step) = cli.step {
        config.initial_step = step;
    }

    // Export offline, pas de terminal
    if let Some(dir) = cli.export.as_deref() {
        log::info!("Export vers {}", dir.display());
        return export::run_export(
            &cli.images,
            &cli.export_transforms(&config),
            dir,
            config.export_format,
        );
    }

    // 5. Initialiser le terminal ratatui
    let terminal = ratatui::init();

    // 6. Boucle principale
    let mut app_instance = app::App::new(config, cli.images);
    let result = app_instance.run(terminal);

    // 7. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    result
}

fn resolve_config(cli: &cli::Cli) -> Result<ViewerConfig> {
    if cli.config.exists() {
        ts_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ViewerConfig::default())
    }
}
