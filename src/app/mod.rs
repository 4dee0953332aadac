//! 应用层：路由装配与共享状态

pub mod system;
pub mod users;

use std::time::Duration;

use axum::{http::Uri, middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::core::{error::CoreError, middleware as core_middleware};
use crate::infrastructure::clock::ProcessClock;
use users::UserService;

/// 所有处理器共享的只读状态
#[derive(Debug, Clone)]
pub struct AppState {
    pub clock: ProcessClock,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(clock: ProcessClock) -> Self {
        Self {
            clock,
            user_service: UserService::seeded(),
        }
    }
}

/// 组装全部路由和中间件
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let routes = Router::new()
        .route("/api", get(system::handler::welcome))
        .route("/health", get(system::handler::health_check))
        .route("/api/users", get(users::handler::list_users))
        .fallback(not_found);

    with_middleware(routes, server).with_state(state)
}

/// 套上中间件栈，自上而下由外到内
///
/// 请求日志中间件位于最外层，TraceLayer 的 span 挂在它的 request span 之下。
pub fn with_middleware<S>(router: Router<S>, server: &ServerConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(core_middleware::request_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TimeoutLayer::new(Duration::from_secs(server.timeout_seconds)))
            .layer(CatchPanicLayer::custom(core_middleware::handle_panic)),
    )
}

async fn not_found(uri: Uri) -> CoreError {
    CoreError::NotFound(format!("路由 {} 不存在", uri.path()))
}
