use anyhow::Context;
use std::env;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

use welcome_api::{
    app::{build_router, AppState},
    config,
    infrastructure::{clock::ProcessClock, logger},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 运行时长从此刻开始计算
    let clock = ProcessClock::start();

    // `welcome-api init-config [path]` 写出默认配置后退出
    let args: Vec<String> = env::args().collect();
    if args.get(1).map(String::as_str) == Some("init-config") {
        let path = args
            .get(2)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.toml"));
        config::Config::default()
            .save_to_file(&path)
            .with_context(|| format!("写入配置文件 {} 失败", path.display()))?;
        println!("已写入默认配置: {}", path.display());
        return Ok(());
    }

    let loaded = config::load_config().context("加载配置失败")?;
    let cfg = loaded.config;
    let _log_guard = logger::init_logging(&cfg.logging).context("初始化日志失败")?;

    match &loaded.source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let addr = cfg.server.socket_addr()?;
    let state = AppState::new(clock);
    let users = state.user_service.count();
    let app = build_router(state, &cfg.server);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 服务器运行在 http://{}", addr);
    info!("📖 可用的路由:");
    info!("   GET  /api        - 欢迎信息");
    info!("   GET  /health     - 健康检查");
    info!("   GET  /api/users  - 用户列表 ({} 个用户)", users);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("收到退出信号，开始优雅关闭");
}
