use actix_web::web::ServiceConfig;

use crate::controllers;

pub fn route(app: &mut ServiceConfig) {
    // Pages
    app.service(controllers::v1::home::index);
    app.service(controllers::v1::home::home);
    // Auth
    app.service(controllers::v1::auth::signup_form);
    app.service(controllers::v1::auth::signup);
    app.service(controllers::v1::auth::login_form);
    app.service(controllers::v1::auth::login);
    app.service(controllers::v1::auth::logout);
    // Health
    app.service(controllers::health::health);
}
