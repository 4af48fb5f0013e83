use std::path::Path;

use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::web;

use crate::interfaces::handlers::{order::create_order, system::health_check};

pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: &str) {
    cfg.service(
        web::scope("/api")
            .service(create_order)
            .service(health_check),
    );

    // Pre-built storefront SPA; unmatched routes fall back to its index so
    // client-side routing keeps working.
    let index = Path::new(static_dir).join("index.html");
    cfg.service(
        Files::new("/", static_dir)
            .index_file("index.html")
            .default_handler(fn_service(move |req: ServiceRequest| {
                let index = index.clone();
                async move {
                    let (req, _) = req.into_parts();
                    let file = NamedFile::open_async(index).await?;
                    let res = file.into_response(&req);
                    Ok(ServiceResponse::new(req, res))
                }
            })),
    );
}
