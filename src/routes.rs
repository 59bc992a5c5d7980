use crate::{
    api::{employee, salary},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Protected routes; tokens come from the external identity service
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/employee")
                    // /employee
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employee/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/salary")
                    // /salary
                    .service(web::resource("").route(web::get().to(salary::get_latest_salaries)))
                    // /salary/history/{employee_id}
                    .service(
                        web::resource("/history/{employee_id}")
                            .route(web::get().to(salary::get_salary_history)),
                    )
                    // /salary/record/{id}
                    .service(
                        web::resource("/record/{id}")
                            .route(web::get().to(salary::get_salary_record)),
                    )
                    // /salary/{email}/exists?effective_from=dd/mm/yyyy
                    .service(
                        web::resource("/{email}/exists")
                            .route(web::get().to(salary::salary_exists)),
                    )
                    // /salary/{email}; amend and retire locate the record
                    // with ?effective_from=dd/mm/yyyy
                    .service(
                        web::resource("/{email}")
                            .route(web::post().to(salary::create_salary))
                            .route(web::get().to(salary::list_salaries_by_email))
                            .route(web::put().to(salary::update_salary))
                            .route(web::delete().to(salary::delete_salary)),
                    ),
            ),
    );
}
