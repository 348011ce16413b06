use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

fn load_config() -> anyhow::Result<configs::AppConfig> {
    // load .env first so RUST_LOG, CONFIG_PATH and the env fallbacks apply
    dotenv().ok();
    configs::AppConfig::load_or_env()
}

fn main() -> std::process::ExitCode {
    let cfg = load_config();
    let log_format = cfg.as_ref().map(|c| c.server.log_format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging_named(log_format);
    info!(service = "locations", event = "logger_init", "tracing subscriber initialized");

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "locations", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "locations",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "locations", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "locations",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        catalog = %cfg.catalog.locations_path.display(),
        tag_field = %cfg.catalog.tag_field,
        "locations service starting"
    );

    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(service = "locations", event = "stop", %service_id, pid, "locations service stopped");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "locations", event = "run_failed", error = %e, "server::run returned error");
                if e.downcast_ref::<server::errors::StartupError>().is_some() {
                    warn!(service = "locations", event = "startup_aborted", "refusing to serve without a complete catalog");
                }
                std::process::ExitCode::FAILURE
            }
        }
    })
}
