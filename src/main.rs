use std::{net::SocketAddr, time::Duration};

use structured_logger::{async_json::new_writer, Builder};
use tokio::{io, signal, time};

use chatat_content::{api, conf, router};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    let cfg = conf::Conf::new().unwrap_or_else(|err| panic!("config error: {}", err));

    Builder::with_level(cfg.log.level.as_str())
        .with_target_writer("*", new_writer(io::stdout()))
        .init();

    log::debug!("{:?}", cfg);

    let env = cfg.env.clone();
    let wait_secs = cfg.server.graceful_shutdown;
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.server.port));
    let (app_state, app) = router::new(cfg);

    log::info!(
        "{}@{} start {} at {}, content from {}",
        api::APP_NAME,
        api::APP_VERSION,
        env,
        &addr,
        app_state.content.base_dir().display()
    );
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal(wait_secs))
        .await?;

    Ok(())
}

async fn shutdown_signal(wait_secs: usize) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("signal received, waiting up to {}s for in-flight requests", wait_secs);

    tokio::spawn(async move {
        time::sleep(Duration::from_secs(wait_secs as u64)).await;
        log::warn!("graceful shutdown timed out, Goodbye!");
        std::process::exit(1);
    });
}
