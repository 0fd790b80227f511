use askama::Template;
use poem::{http::StatusCode, web::Html, IntoResponse, Response};
use tracing::error;

#[derive(Template)]
#[template(path = "upload.html")]
struct UploadTemplate;

#[derive(Template)]
#[template(path = "edit.html")]
struct EditTemplate<'a> {
    id: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    message: &'a str,
}

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl.render().unwrap_or_else(|e| {
        error!("template render failed: {e}");
        format!("<pre>Template error: {e}</pre>")
    }))
}

pub fn upload_page() -> Html<String> {
    render(UploadTemplate)
}

pub fn edit_page(id: &str) -> Html<String> {
    render(EditTemplate { id })
}

pub fn error_page(status: StatusCode, message: &str) -> Response {
    render(ErrorTemplate { message })
        .with_status(status)
        .into_response()
}
