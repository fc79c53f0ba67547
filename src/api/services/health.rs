use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use crate::api::types::HealthResponse;

// 应用启动时间
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        (chrono::Utc::now() - self.start_datetime)
            .num_seconds()
            .max(0) as u64
    }
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(app_start_time: web::Data<AppStartTime>) -> impl Responder {
        trace!("Received health check request");
        HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs: app_start_time.uptime_secs(),
        })
    }
}

pub fn health_routes() -> actix_web::Resource {
    web::resource("/health")
        .route(web::get().to(HealthService::health_check))
        .route(web::head().to(HealthService::health_check))
}
