use std::sync::Arc;

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};

use super::dispatcher::Dispatcher;
use crate::api::failure::PendingFailure;

/// Error handling middleware layer
#[derive(Clone)]
pub struct ErrorHandlingLayer {
    dispatcher: Arc<Dispatcher>,
}

impl ErrorHandlingLayer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl<S> tower::Layer<S> for ErrorHandlingLayer
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Service = ErrorHandlingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorHandlingService {
            inner,
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

/// Error handling service wrapper
#[derive(Clone)]
pub struct ErrorHandlingService<S> {
    inner: S,
    dispatcher: Arc<Dispatcher>,
}

impl<S> tower::Service<Request> for ErrorHandlingService<S>
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let dispatcher = Arc::clone(&self.dispatcher);

        Box::pin(async move {
            let path = req.uri().path().to_owned();

            let mut response = inner.call(req).await?;

            // Responses without a parked failure are left untouched
            match response.extensions_mut().remove::<PendingFailure>() {
                Some(pending) => Ok(dispatcher
                    .dispatch(pending.failure(), &path)
                    .into_response()),
                None => Ok(response),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::failure::ApiFailure;
    use crate::api::middleware::error_handling::{ErrorHandlingConfig, RecordingFailureLogger};
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    fn app(logger: Arc<RecordingFailureLogger>) -> Router {
        let dispatcher = Arc::new(Dispatcher::new(ErrorHandlingConfig::default(), logger));

        Router::new()
            .route(
                "/missing/{id}",
                get(|| async { ApiFailure::NotFound("gone".to_string()) }),
            )
            .route("/ok", get(|| async { (StatusCode::ACCEPTED, "fine") }))
            .route(
                "/teapot",
                get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }),
            )
            .layer(ErrorHandlingLayer::new(dispatcher))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_parked_failure_becomes_envelope() {
        let logger = Arc::new(RecordingFailureLogger::new());
        let req = Request::builder()
            .uri("/missing/5?verbose=true")
            .body(Body::empty())
            .unwrap();

        let response = app(logger.clone()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<PendingFailure>().is_none());

        let json = body_json(response).await;
        assert_eq!(json["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(json["message"], "gone");
        assert_eq!(json["path"], "/missing/5");
        assert_eq!(logger.records().len(), 1);
    }

    #[tokio::test]
    async fn test_other_responses_pass_through() {
        let logger = Arc::new(RecordingFailureLogger::new());

        for (uri, status) in [("/ok", StatusCode::ACCEPTED), ("/teapot", StatusCode::IM_A_TEAPOT)] {
            let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app(logger.clone()).oneshot(req).await.unwrap();
            assert_eq!(response.status(), status);
        }

        assert!(logger.records().is_empty());
    }
}
