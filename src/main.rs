//! Surf Gate server binary.

use std::sync::Arc;

use tokio::net::TcpListener;

use surf_gate::adapters::http::{app_router, apply_middleware, SubscriptionAppState};
use surf_gate::adapters::store::{
    FileSubscriptionStore, InMemorySubscriptionStore, RedisSubscriptionStore,
};
use surf_gate::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use surf_gate::application::handlers::subscription::CheckoutSettings;
use surf_gate::config::{AppConfig, StoreBackend, StoreConfig};
use surf_gate::domain::webhook::StripeWebhookVerifier;
use surf_gate::ports::SubscriptionStore;
use surf_gate::telemetry;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    telemetry::init_tracing(&config.server);

    let store = build_store(&config.store).await?;

    let payment_provider = Arc::new(StripePaymentAdapter::new(
        StripeConfig::new(config.payment.stripe_api_key.clone())
            .with_base_url(config.payment.stripe_api_base_url.clone()),
    ));

    let webhook_verifier = Arc::new(
        StripeWebhookVerifier::new(config.payment.stripe_webhook_secret.clone())
            .with_require_livemode(config.payment.require_livemode),
    );

    let state = SubscriptionAppState {
        store,
        payment_provider,
        webhook_verifier,
        checkout: CheckoutSettings::new(
            config.payment.stripe_price_id.clone(),
            config.payment.app_base_url(),
        ),
    };

    let app = apply_middleware(app_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        store = ?config.store.backend,
        test_mode = config.payment.is_test_mode(),
        livemode_required = config.payment.require_livemode,
        "Surf gate listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_store(config: &StoreConfig) -> Result<Arc<dyn SubscriptionStore>, BoxError> {
    let store: Arc<dyn SubscriptionStore> = match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Arc::new(InMemorySubscriptionStore::new())
        }
        StoreBackend::File => {
            tracing::info!(path = %config.path.display(), "Using file store");
            Arc::new(FileSubscriptionStore::new(config.path.clone()))
        }
        StoreBackend::Redis => {
            let url = config.redis_url.as_deref().unwrap_or_default();
            let store = RedisSubscriptionStore::connect(url)
                .await?
                .with_namespace(config.namespace.clone());
            tracing::info!(namespace = %config.namespace, "Using Redis store");
            Arc::new(store)
        }
    };
    Ok(store)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
