use std::any::Any;

use poem::{
    error::ResponseError,
    get,
    http::StatusCode,
    middleware::{CatchPanic, Tracing},
    Endpoint, EndpointExt, Response, Route,
};
use thiserror::Error;

use crate::{
    core::TransformError,
    db::{SharedStore, StoreError},
    middleware::ErrorPage,
};

pub mod edit;
pub mod img;
pub mod params;
pub mod templates;
pub mod upload;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("upload failed: {0}")]
    Io(String),

    #[error("internal error: {0}")]
    Internal(String),
}

// Every failure is a server error; the error page says what went wrong.
impl ResponseError for AppError {
    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub fn app(store: SharedStore) -> impl Endpoint {
    let routes = Route::new()
        .at("/", get(upload::upload_form).post(upload::upload))
        .at("/edit", get(edit::edit))
        .at("/img", get(img::img));

    with_middleware(routes, store)
}

fn with_middleware(routes: Route, store: SharedStore) -> impl Endpoint {
    routes
        .with(ErrorPage)
        .with(CatchPanic::new().with_handler(panic_page))
        .with(Tracing)
        .data(store)
}

fn panic_page(_: Box<dyn Any + Send + 'static>) -> Response {
    templates::error_page(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// Runs an image transformation on the blocking pool.
async fn run_blocking<F>(f: F) -> Result<Vec<u8>, AppError>
where
    F: FnOnce() -> Result<Vec<u8>, TransformError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(result?)
}
