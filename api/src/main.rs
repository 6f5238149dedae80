use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::io::Write;
use std::sync::Arc;

use pd_api::{config, create_app, AppState, HttpSettings};
use pd_core::{BcryptPasswordHasher, OtpIssuanceConfig, OtpSessionStore};
use pd_infra::cache::{RedisClient, RedisOtpCodeStore, RedisOtpSessionStore};
use pd_infra::database::{DatabasePool, MySqlUserRepository};
use pd_infra::otp::{CodeOtpConfig, CodeOtpProvider};
use pd_infra::sms::LogSmsSender;
use pd_shared::config::LogFormat;
use pd_shared::{Environment, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(&LoggingConfig::from_env(Environment::from_env()));

    info!("Starting ProfileDesk API Server");

    let app_config = config::load()?;
    info!("Environment: {}", app_config.environment);

    let db_pool = DatabasePool::new(app_config.database.clone())
        .await
        .context("failed to connect to MySQL")?;
    db_pool
        .run_migrations()
        .await
        .context("failed to run database migrations")?;

    let redis_client = RedisClient::new(app_config.cache.clone())
        .await
        .context("failed to connect to Redis")?;

    let users = Arc::new(MySqlUserRepository::new(db_pool.get_pool().clone()));
    let provider = Arc::new(CodeOtpProvider::new(
        Arc::new(RedisOtpCodeStore::new(redis_client.clone())),
        Arc::new(LogSmsSender::new()),
        CodeOtpConfig::from(&app_config.otp),
    ));
    let sessions: Arc<dyn OtpSessionStore> =
        Arc::new(RedisOtpSessionStore::new(redis_client, &app_config.auth.session));

    let app_state = web::Data::new(AppState::new(
        users,
        provider,
        sessions,
        Arc::new(BcryptPasswordHasher::new(app_config.otp.bcrypt_cost)),
        OtpIssuanceConfig::from(&app_config.otp),
    ));

    let settings = HttpSettings::from(&app_config);
    let bind_address = app_config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &settings))
        .keep_alive(std::time::Duration::from_secs(app_config.server.keep_alive));
    if app_config.server.workers > 0 {
        server = server.workers(app_config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    db_pool.close().await;
    info!("ProfileDesk API Server stopped");
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::new().default_filter_or(config.level.as_str()));

    if !config.timestamp {
        builder.format_timestamp(None);
    }

    match config.format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "level": record.level().to_string(),
                    "target": record.target(),
                    "message": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            });
        }
        LogFormat::Compact => {
            builder.format_target(false);
        }
        LogFormat::Pretty => {}
    }

    builder.init();
}
