// SPDX-License-Identifier: MPL-2.0
use iced_alerts::app::{self, Flags};
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iced_alerts=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print_help();
        return Ok(());
    }

    let config_dir = match args.opt_value_from_str("--config-dir") {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Error: {err}");
            print_help();
            std::process::exit(2);
        }
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }

    app::run(Flags { config_dir })
}

fn print_help() {
    println!(
        "iced_alerts {}

USAGE:
    iced_alerts [OPTIONS]

OPTIONS:
    -h, --help                 Print this help message
        --config-dir <PATH>    Directory containing settings.toml
                               (overrides ICED_ALERTS_CONFIG_DIR)

ENVIRONMENT:
    RUST_LOG                   Log filter (default: iced_alerts=info)",
        env!("CARGO_PKG_VERSION")
    );
}
