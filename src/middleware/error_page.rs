use poem::{Endpoint, IntoResponse, Request, Response, Result};
use tracing::{error, warn};

use crate::api::templates::error_page;

pub struct ErrorPageEndpoint<E>(pub E);

impl<E: Endpoint> Endpoint for ErrorPageEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let path = req.uri().path().to_string();

        match self.0.call(req).await {
            Ok(resp) => Ok(resp.into_response()),
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    error!(path = %path, status = %status, "error: {err}");
                } else {
                    warn!(path = %path, status = %status, "error: {err}");
                }

                Ok(error_page(status, &err.to_string()))
            }
        }
    }
}
