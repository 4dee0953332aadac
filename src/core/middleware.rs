//! 核心中间件模块

use std::any::Any;
use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::error::CoreError;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 请求日志中间件
///
/// 为每个请求分配 request id，写入响应头并记录耗时。内层中间件
/// （包括 TraceLayer）的日志都落在同一个 `request` span 下，
/// 可以按 request id 关联。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let span = info_span!("request", request_id = %request_id);

    async move {
        let mut response = next.run(req).await;
        let status = response.status();
        let duration = start.elapsed();

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        info!(
            "{} {} - {} - {}ms - User-Agent: {:?}",
            method,
            uri,
            status,
            duration.as_millis(),
            user_agent
        );

        response
    }
    .instrument(span)
    .await
}

/// 处理器 panic 时返回 500 JSON
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(%detail, "处理器发生 panic");

    CoreError::InternalServerError("服务器内部错误".to_string()).into_response()
}
