use crate::page;
use axum::response::Html;

pub async fn home_handler() -> Html<&'static str> {
    Html(page::HOME)
}
