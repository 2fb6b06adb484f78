use crate::api::{employee, leave_request};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, rate_limit: &RateLimit) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(Governor::new(rate_limit)) // rate limiting
            .configure(api_routes),
    );
}

/// Per-IP limiter allowing `requests_per_min` with an equal burst.
pub fn rate_limit(requests_per_min: u32) -> anyhow::Result<RateLimit> {
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
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {requests_per_min} per minute"))?;
    Ok(cfg)
}

/// Employee and leave routes, relative to the API prefix.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            // /employees
            .service(
                web::resource("")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /employees/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    )
    .service(
        web::scope("/leave")
            // /leave
            .service(
                web::resource("")
                    .route(web::get().to(leave_request::leave_list))
                    .route(web::post().to(leave_request::create_leave)),
            )
            // /leave/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(leave_request::get_leave))
                    .route(web::put().to(leave_request::update_leave))
                    .route(web::delete().to(leave_request::delete_leave)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::rate_limit;

    #[test]
    fn limiter_accepts_zero_and_large_rates() {
        assert!(rate_limit(0).is_ok());
        assert!(rate_limit(60).is_ok());
        assert!(rate_limit(120_000).is_ok());
    }
}
