use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use migration::{Migrator, MigratorTrait};
use std::io::Write; // for env_logger custom formatter

use mitra_backend::{
    config::Config,
    database::create_pool,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    Migrator::up(&pool, None)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    // Service graph. The ledger is shared by the withdrawal flow; settings
    // back both the withdrawal minimum and the invoice commission rate.
    let settings_service = SettingsService::new(pool.clone(), config.ledger.clone());
    let ledger_service = LedgerService::new(pool.clone());
    let withdrawal_service = WithdrawalService::new(
        pool.clone(),
        ledger_service.clone(),
        settings_service.clone(),
    );
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let partner_service = PartnerService::new(pool.clone());
    let partner_request_service = PartnerRequestService::new(pool.clone());
    let product_service = ProductService::new(pool.clone());
    let invoice_service = InvoiceService::new(pool.clone(), settings_service.clone());
    let survey_service = SurveyService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(partner_service.clone()))
            .app_data(web::Data::new(partner_request_service.clone()))
            .app_data(web::Data::new(ledger_service.clone()))
            .app_data(web::Data::new(withdrawal_service.clone()))
            .app_data(web::Data::new(product_service.clone()))
            .app_data(web::Data::new(invoice_service.clone()))
            .app_data(web::Data::new(survey_service.clone()))
            .app_data(web::Data::new(settings_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::partner_config)
                    .configure(handlers::ledger_config)
                    .configure(handlers::product_config)
                    .configure(handlers::invoice_config)
                    .configure(handlers::survey_config)
                    .configure(handlers::settings_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
