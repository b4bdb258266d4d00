use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use database::Database;
use twilio_voice::{TwilioClient, VoiceConfig};
use webhook::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let addr = env::var("KLAXON_WEBHOOK_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:klaxon.db?mode=rwc".to_string());
    let account_sid = env::var("TWILIO_ACCOUNT_SID").expect("TWILIO_ACCOUNT_SID must be set");
    let auth_token = env::var("TWILIO_AUTH_TOKEN").expect("TWILIO_AUTH_TOKEN must be set");
    let caller_id = env::var("TWILIO_CALLER_ID").expect("TWILIO_CALLER_ID must be set");
    let callback_base = env::var("CALLBACK_BASE_URL").expect("CALLBACK_BASE_URL must be set");

    let mut config = VoiceConfig::new(account_sid, auth_token, caller_id, callback_base);
    if let Ok(domain) = env::var("TWILIO_SIP_DOMAIN") {
        config = config.with_sip_domain(domain);
    }

    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run migrations");

    let placer = TwilioClient::new(config).expect("Failed to build Twilio client");
    let state = AppState {
        db,
        placer: Arc::new(placer),
    };
    let app = webhook::router(state);

    let addr: SocketAddr = addr.parse().expect("Invalid KLAXON_WEBHOOK_ADDR");
    info!(%addr, "Klaxon webhook listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
