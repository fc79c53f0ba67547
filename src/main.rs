use clap::Parser;
use tracing::error;

use geolookup::cli::Cli;
use geolookup::config::{self, LoggingConfig, StaticConfig};
use geolookup::runtime::modes::{self, Mode};
use geolookup::system::init_logging;

/// 按运行模式调整日志输出
///
/// - CLI：未指定日志文件且未设置 `RUST_LOG` 时只输出 warn 以上，避免干扰命令输出
/// - TUI：未指定日志文件时写入数据目录，终端留给界面
fn logging_for_mode(config: &StaticConfig, mode: &Mode) -> LoggingConfig {
    let mut logging = config.logging.clone();
    let to_console = logging.file.as_ref().is_none_or(|f| f.is_empty());

    match mode {
        #[cfg(feature = "cli")]
        Mode::Cli if to_console && std::env::var_os("RUST_LOG").is_none() => {
            logging.level = "warn".to_string();
        }
        #[cfg(feature = "tui")]
        Mode::Tui if to_console => {
            let path = std::path::Path::new(&config.client.data_dir).join("geolookup-tui.log");
            logging.file = Some(path.to_string_lossy().into_owned());
            logging.enable_rotation = false;
        }
        _ => {}
    }
    logging
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    config::init_config_from(cli.config.as_deref());
    let config = config::get_config();

    let mode = modes::detect_mode(&cli);

    #[cfg(feature = "tui")]
    if mode == Mode::Tui {
        std::fs::create_dir_all(&config.client.data_dir)?;
    }
    let _guard = init_logging(&logging_for_mode(&config, &mode))?;

    match mode {
        #[cfg(feature = "server")]
        Mode::Server => modes::run_server().await.inspect_err(|e| {
            error!("Server exited with error: {:#}", e);
        }),

        #[cfg(feature = "cli")]
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }

        #[cfg(feature = "tui")]
        Mode::Tui => modes::run_tui(&config).await,

        Mode::Unknown => {
            anyhow::bail!("No runtime mode available; rebuild with the `server` feature")
        }
    }
}
