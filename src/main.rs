use secure_search::{AppConfig, Result, app};
use secure_search_core::Server;
use secure_search_core::logging::{LogConfig, LogFormat, LogLevel, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let level = LogLevel::from_str(&config.log_level);
    let format = LogFormat::from_str(&config.log_format);
    let _guard = LogConfig::new()
        .level(level.unwrap_or(LogLevel::Info))
        .format(format.unwrap_or(LogFormat::Json))
        .with_colors(config.debug)
        .init();

    if level.is_none() {
        warn!(log_level = %config.log_level, "unknown log level, using info");
    }
    if format.is_none() {
        warn!(log_format = %config.log_format, "unknown log format, using json");
    }

    config.validate()?;

    let router = app::from_config(&config)?;
    let addr = app::resolve_bind_address(&config).await?;
    let server = Server::bind(addr).await?;

    info!(addr = %server.local_addr()?, debug = config.debug, "starting secure search");

    server
        .serve_with_shutdown(router, async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("ctrl-c received, shutting down"),
                Err(e) => {
                    warn!(error = %e, "cannot listen for ctrl-c, serving until killed");
                    std::future::pending::<()>().await
                }
            }
        })
        .await?;

    Ok(())
}
