//! HTTP handlers and route configuration.

mod auth;
mod health;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(web::scope("/auth").route("/login", web::post().to(auth::login)))
            // User resource - all routes require an authenticated principal
            .service(
                web::scope("/users")
                    .route("", web::post().to(users::create))
                    .route("", web::get().to(users::list))
                    .route("/all", web::get().to(users::list_all))
                    .route("/filter", web::get().to(users::filter))
                    .route("/filter/all", web::get().to(users::filter_all))
                    .route("/id/{id}", web::get().to(users::get_by_id))
                    .route("/id/{id}", web::put().to(users::update))
                    .route("/id/{id}", web::delete().to(users::delete))
                    .route("/id/{id}/upload", web::post().to(users::upload)),
            ),
    );
}
