use bytes::Bytes;
use poem::{
    handler,
    web::{Data, Query},
    Response, Result,
};
use tracing::info;

use super::{params::overlay_params::ImgParams, run_blocking, AppError};
use crate::{
    core::{composite, key::is_valid_key},
    db::{SharedStore, StoreError},
};

#[handler]
pub async fn img(Query(params): Query<ImgParams>, store: Data<&SharedStore>) -> Result<Response> {
    if !is_valid_key(&params.id) {
        return Err(AppError::from(StoreError::NotFound { key: params.id }).into());
    }

    let stored = store.get(&params.id).await.map_err(AppError::from)?;

    let overlay = params.overlay();
    info!(key = %params.id, x = overlay.x, y = overlay.y, size = overlay.size, "painting bar");
    let painted = Bytes::from(run_blocking(move || composite(&stored, &overlay)).await?);

    if params.save() {
        store
            .put(&params.id, painted.clone())
            .await
            .map_err(AppError::from)?;
        info!(key = %params.id, "saved bar");
    }

    Ok(Response::builder()
        .content_type("image/jpeg")
        .body(painted))
}
