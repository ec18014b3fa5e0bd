use actix_web::HttpResponse;
use actix_web::http::header::{self, ContentType};

pub mod health;
pub mod v1;

/// `200 OK` with an HTML body
pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

/// `303 See Other`, so the browser follows a form POST with a GET
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
