pub mod error_page;

use poem::{Endpoint, Middleware};

/// Renders every endpoint error through the error page.
pub struct ErrorPage;

impl<E: Endpoint> Middleware<E> for ErrorPage {
    type Output = error_page::ErrorPageEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        error_page::ErrorPageEndpoint(ep)
    }
}
