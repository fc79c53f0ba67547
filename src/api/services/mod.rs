pub mod auth;
pub mod health;

pub use auth::{AuthService, auth_routes, login_rate_limiter};
pub use health::{AppStartTime, HealthService, health_routes};

/// `/api` 下的全部路由
pub fn api_routes() -> actix_web::Scope {
    actix_web::web::scope("/api")
        .service(auth_routes())
        .service(health_routes())
}
