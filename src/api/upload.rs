use bytes::Bytes;
use poem::{
    handler,
    http::{header, StatusCode},
    web::{Data, Html, Multipart},
    Response, Result,
};
use tracing::info;

use super::{run_blocking, templates, AppError};
use crate::{
    core::{ingest, key_of},
    db::SharedStore,
};

const IMAGE_FIELD: &str = "image";

#[handler]
pub fn upload_form() -> Html<String> {
    templates::upload_page()
}

#[handler]
pub async fn upload(multipart: Multipart, store: Data<&SharedStore>) -> Result<Response> {
    let data = read_image(multipart).await?;
    info!(size = data.len(), "received upload");

    let ingested = run_blocking(move || ingest(&data)).await?;
    let key = key_of(&ingested);

    store
        .put(&key, Bytes::from(ingested))
        .await
        .map_err(AppError::from)?;
    info!(key = %key, "stored image");

    Ok(Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, format!("/edit?id={}", key))
        .finish())
}

async fn read_image(mut multipart: Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Io(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        return field.bytes().await.map_err(|e| AppError::Io(e.to_string()));
    }

    Err(AppError::Io(format!("missing form field `{}`", IMAGE_FIELD)))
}
