use crate::{api::income, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            (60_000 / requests_per_min as u64).max(1)
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min.max(1))
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(web::resource("/dashboard").route(web::get().to(income::get_dashboard)))
            .service(
                web::scope("/income")
                    // /income/records
                    .service(
                        web::resource("/records").route(web::get().to(income::list_records)),
                    )
                    .service(web::resource("/summary").route(web::get().to(income::get_summary)))
                    .service(web::resource("/charts").route(web::get().to(income::get_charts)))
                    .service(
                        web::resource("/breakdown").route(web::get().to(income::get_breakdown)),
                    )
                    .service(web::resource("/table").route(web::get().to(income::get_table)))
                    .service(
                        web::resource("/other").route(web::get().to(income::get_other_income)),
                    )
                    .service(web::resource("/fields").route(web::get().to(income::list_fields)))
                    // /income/refresh goes back to the store, so it is rate limited
                    .service(
                        web::resource("/refresh")
                            .wrap(refresh_limiter)
                            .route(web::post().to(income::refresh)),
                    ),
            ),
    );
}
