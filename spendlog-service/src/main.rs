use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use secrecy::Secret;
use spendlog_adapters::{
    Argon2PasswordHasher, PostgresAccountStore, PostgresExpenseStore, PostmarkEmailClient,
    TemplateMailer,
    auth::SessionConfig,
    config::{AllowedOrigins, AppSetting, constants::env},
    http::routes::AuthTtls,
};
use spendlog_core::Email;
use spendlog_service::AppService;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");
    dotenvy::dotenv().ok();

    let settings = AppSetting::load();

    // Database pool and migrations
    let database_url = std::env::var(env::DATABASE_URL_ENV_VAR)
        .unwrap_or_else(|_| panic!("{} must be set", env::DATABASE_URL_ENV_VAR));
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    sqlx::migrate!().run(&pg_pool).await?;

    // Stores
    let account_store = PostgresAccountStore::new(pg_pool.clone());
    let expense_store = PostgresExpenseStore::new(pg_pool);

    // Email transport and mailer
    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.email_client.timeout_in_millis))
        .build()?;
    let postmark_token = Secret::from(
        std::env::var(env::POSTMARK_AUTH_TOKEN_ENV_VAR)
            .unwrap_or_else(|_| panic!("{} must be set", env::POSTMARK_AUTH_TOKEN_ENV_VAR)),
    );
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(Secret::from(settings.email_client.sender.clone()))?,
        postmark_token,
        http_client,
    );
    let mailer = TemplateMailer::new(email_client, settings.app.frontend_url.clone());

    let service = AppService::new(
        account_store,
        expense_store,
        Argon2PasswordHasher::new(),
        mailer,
        SessionConfig::from_settings(),
        AuthTtls::from_settings(),
    );

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    service
        .run_standalone(listener, AllowedOrigins::from_env())
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
