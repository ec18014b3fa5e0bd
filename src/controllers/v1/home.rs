use actix_web::HttpResponse;

use crate::controllers::html;
use crate::middlewares::v1::session::Session;
use crate::views;

#[get("/")]
pub async fn index() -> HttpResponse {
    html(views::index())
}

/// Members-only page; visitors without a session are sent to `/login`
#[get("/home")]
pub async fn home(session: Session) -> HttpResponse {
    ::tracing::debug!(user_id = %session.user_id, "Rendering home page");

    html(views::home(&session.username))
}
