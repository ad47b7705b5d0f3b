use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload};
use vtzif_app::convert::convert;
use vtzif_core::config::load_config;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    // stdout carries TZif data, so logs go to stderr.
    let subscriber = tracing_subscriber::registry().with(filter_layer).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );
    tracing::subscriber::set_global_default(subscriber).context("install tracing subscriber")?;
    tracing_log::LogTracer::init().context("install log bridge")?;

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping warn");
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("read stdin")?;

    let data = convert(&input, &config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&data).context("write stdout")?;
    stdout.flush().context("write stdout")?;

    Ok(())
}
