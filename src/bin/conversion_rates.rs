use conversion_chart::ChartConfig;
use conversion_chart::api::DataSource;
use conversion_chart::telemetry::init_default_tracing;

fn main() -> gtk4::glib::ExitCode {
    let _ = init_default_tracing();

    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("--config") => match args.next().map(|path| load_config(&path)) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                eprintln!("{err}");
                return gtk4::glib::ExitCode::FAILURE;
            }
            None => {
                eprintln!("usage: conversion_rates [--config <file.json> | <path-or-url>]");
                return gtk4::glib::ExitCode::FAILURE;
            }
        },
        Some(source) => ChartConfig::default().with_data_source(DataSource::from_arg(source)),
        None => ChartConfig::default(),
    };

    conversion_chart::platform_gtk::run(config)
}

fn load_config(path: &str) -> Result<ChartConfig, String> {
    let body = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read config `{path}`: {err}"))?;
    ChartConfig::from_json_str(&body).map_err(|err| err.to_string())
}
