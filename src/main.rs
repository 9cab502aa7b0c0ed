use clap::Parser;
use tracing::debug;

use tinylink::AppContext;
use tinylink::cli::Cli;
use tinylink::config::{get_config, init_config_from};
use tinylink::interfaces::cli::run_cli_command;
use tinylink::system::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 配置与日志必须先于任何状态容器初始化
    init_config_from(cli.config.as_deref());
    let config = get_config();
    let _log_guard = init_logging(&config);
    debug!("Using backend {}", config.api.base());

    let ctx = match AppContext::from_config(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    if let Err(e) = run_cli_command(&ctx, cli.command).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
