//! HTTP streaming endpoint
//!
//! `POST /api` takes the query as the raw request body and answers with a
//! `text/event-stream` response carrying the run's events (`event: Status` /
//! `event: Message`). The response body owns the run's [`EventStream`]: when
//! the client disconnects, axum drops the body, and the run is cancelled.
//!
//! [`EventStream`]: tandem_application::EventStream

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use futures::StreamExt;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tandem_application::{CompletionService, ProcessQueryInput, ProcessQueryUseCase, RecordStore};
use tandem_domain::{ProgressEvent, Query};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared handler state
pub struct ServerState<C: CompletionService + 'static, S: RecordStore + 'static> {
    use_case: Arc<ProcessQueryUseCase<C, S>>,
    /// Parent of every run's cancellation; cancelled on shutdown
    shutdown: CancellationToken,
}

impl<C: CompletionService + 'static, S: RecordStore + 'static> Clone for ServerState<C, S> {
    fn clone(&self) -> Self {
        Self {
            use_case: Arc::clone(&self.use_case),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<C: CompletionService + 'static, S: RecordStore + 'static> ServerState<C, S> {
    pub fn new(use_case: Arc<ProcessQueryUseCase<C, S>>, shutdown: CancellationToken) -> Self {
        Self { use_case, shutdown }
    }
}

/// Build the application router.
pub fn router<C, S>(state: ServerState<C, S>) -> Router
where
    C: CompletionService + 'static,
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api", post(ask::<C, S>))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve on `addr` until `state`'s shutdown token is cancelled.
///
/// Shutdown cancels every in-flight run; their streams then close without a
/// terminal message.
pub async fn serve<C, S>(state: ServerState<C, S>, addr: SocketAddr) -> std::io::Result<()>
where
    C: CompletionService + 'static,
    S: RecordStore + 'static,
{
    let shutdown = state.shutdown.clone();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

async fn ask<C, S>(State(state): State<ServerState<C, S>>, body: Bytes) -> Response
where
    C: CompletionService + 'static,
    S: RecordStore + 'static,
{
    let Ok(text) = String::from_utf8(body.to_vec()) else {
        return (StatusCode::BAD_REQUEST, "Request body must be UTF-8 text").into_response();
    };
    let Some(query) = Query::try_new(text) else {
        return (StatusCode::BAD_REQUEST, "User message cannot be empty").into_response();
    };

    let input = ProcessQueryInput::new(query).with_cancellation(state.shutdown.child_token());
    let (stream, handle) = state.use_case.spawn(input);

    tokio::spawn(async move {
        match handle.await {
            Ok(outcome) => info!("Run finished: {:?}", outcome),
            Err(e) => warn!("Run task failed: {}", e),
        }
    });

    let events = stream
        .into_stream()
        .map(|event| Ok::<_, Infallible>(to_sse(&event)));

    Sse::new(events)
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
        .into_response()
}

/// axum splits `data` on newlines; carriage returns are not allowed in a field.
fn to_sse(event: &ProgressEvent) -> SseEvent {
    SseEvent::default()
        .event(event.kind.as_str())
        .data(event.payload.replace('\r', ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tandem_application::{CompletionError, StageServices, StoreError};
    use tandem_domain::{ExtractedFilter, FlightRecord};
    use tower::ServiceExt;

    /// Sets its flag when dropped, so a test can see an abandoned completion.
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    struct SlowCompletion {
        reply: &'static str,
        delay: Duration,
        released: Arc<AtomicBool>,
    }

    impl SlowCompletion {
        fn new(reply: &'static str, delay: Duration) -> Self {
            Self {
                reply,
                delay,
                released: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    #[async_trait]
    impl CompletionService for SlowCompletion {
        fn name(&self) -> &str {
            "slow"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            let _flag = DropFlag(Arc::clone(&self.released));
            tokio::time::sleep(self.delay).await;
            Ok(self.reply.to_string())
        }
    }

    struct EmptyStore;

    #[async_trait]
    impl RecordStore for EmptyStore {
        async fn search(&self, _filter: &ExtractedFilter) -> Result<Vec<FlightRecord>, StoreError> {
            Ok(vec![])
        }
    }

    fn app(service: Arc<SlowCompletion>, shutdown: CancellationToken) -> Router {
        let use_case =
            ProcessQueryUseCase::new(StageServices::shared(service), Arc::new(EmptyStore));
        router(ServerState::new(Arc::new(use_case), shutdown))
    }

    fn post_api(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_streams_events_until_message() {
        let service = Arc::new(SlowCompletion::new("merged answer", Duration::ZERO));
        let response = app(service, CancellationToken::new())
            .oneshot(post_api("Why is the sky blue?"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert!(text.contains("event: Status\ndata: Invoking stage A"));
        assert!(text.ends_with("event: Message\ndata: merged answer\n\n"));
        assert_eq!(text.matches("event: Message").count(), 1);
    }

    #[tokio::test]
    async fn test_blank_body_is_rejected() {
        let service = Arc::new(SlowCompletion::new("unused", Duration::ZERO));
        let response = app(service, CancellationToken::new())
            .oneshot(post_api("   "))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_only_post_is_routed() {
        let service = Arc::new(SlowCompletion::new("unused", Duration::ZERO));
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api")
            .body(Body::empty())
            .unwrap();
        let response = app(service, CancellationToken::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_client_disconnect_cancels_run() {
        let service = Arc::new(SlowCompletion::new("never", Duration::from_secs(60)));
        let released = Arc::clone(&service.released);

        let response = app(service, CancellationToken::new())
            .oneshot(post_api("Why is the sky blue?"))
            .await
            .unwrap();

        let mut body = response.into_body().into_data_stream();
        let first = body.next().await.unwrap().unwrap();
        assert!(String::from_utf8_lossy(&first).contains("event: Status"));

        // Client goes away while both stages are still waiting on completions
        drop(body);

        tokio::time::timeout(Duration::from_secs(5), async {
            while !released.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("in-flight completions should be dropped after disconnect");
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_runs() {
        let service = Arc::new(SlowCompletion::new("never", Duration::from_secs(60)));
        let shutdown = CancellationToken::new();

        let response = app(service, shutdown.clone())
            .oneshot(post_api("Why is the sky blue?"))
            .await
            .unwrap();

        shutdown.cancel();

        let body = tokio::time::timeout(
            Duration::from_secs(5),
            axum::body::to_bytes(response.into_body(), usize::MAX),
        )
        .await
        .expect("stream should close after shutdown")
        .unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("event: Message"));
    }
}
