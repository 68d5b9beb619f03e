//! Seed the database with demo content for local development.
//!
//! Creates a client, a store owner with an approved store and a product,
//! and one record of each content type. Idempotence comes from the unique
//! email constraint: running seed twice fails fast instead of duplicating.

use rust_decimal::Decimal;

use vila_core::{CurrencyCode, ModerationAction, ModerationStatus, Price};
use vila_server::db::classifieds::ClassifiedRepository;
use vila_server::db::create_pool;
use vila_server::db::news::NewsRepository;
use vila_server::db::products::ProductRepository;
use vila_server::db::professionals::ProfessionalRepository;
use vila_server::db::stores::StoreRepository;
use vila_server::services::auth::{AuthService, RegisterRole};
use vila_server::services::moderation::ModerationService;

use super::{CliError, database_url};

/// Password for all seeded demo accounts.
const DEMO_PASSWORD: &str = "vila-demo-2026";

/// Insert demo records.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or the demo accounts
/// already exist.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;
    let pool = create_pool(&database_url).await?;

    let auth = AuthService::new(&pool);

    let (_, client) = auth
        .register(
            "morador@example.com.br",
            DEMO_PASSWORD,
            "Maria Moradora",
            RegisterRole::Client,
        )
        .await?;
    tracing::info!(profile_id = %client.id, "seeded client profile");

    let (_, owner) = auth
        .register(
            "lojista@example.com.br",
            DEMO_PASSWORD,
            "Jose Lojista",
            RegisterRole::StoreOwner,
        )
        .await?;

    let moderation = ModerationService::new(&pool);
    let owner = moderation
        .moderate_profile(owner.id, ModerationAction::Approve)
        .await?;
    tracing::info!(profile_id = %owner.id, "seeded store owner profile (approved)");

    let store = StoreRepository::new(&pool)
        .create(owner.id, "Padaria Central", "Rua das Flores, 12")
        .await?;
    let store = moderation
        .moderate_store(store.id, ModerationAction::Approve)
        .await?;
    tracing::info!(store_id = %store.id, "seeded store (approved)");

    let product = ProductRepository::new(&pool)
        .create(
            store.id,
            "Pao frances",
            Some("Assado de hora em hora"),
            Price::new(Decimal::new(150, 2), CurrencyCode::BRL),
        )
        .await?;
    tracing::info!(product_id = %product.id, "seeded product");

    let news = NewsRepository::new(&pool)
        .create(
            client.id,
            "Portal no ar",
            "O portal da comunidade entrou em funcionamento.",
            ModerationStatus::Active,
        )
        .await?;
    tracing::info!(news_id = %news.id, "seeded news article");

    let ad = ClassifiedRepository::new(&pool)
        .create(
            client.id,
            "Bicicleta usada",
            "Aro 26, boa conservacao.",
            Some(Price::new(Decimal::new(25000, 2), CurrencyCode::BRL)),
        )
        .await?;
    let ad = moderation
        .moderate_classified(ad.id, ModerationAction::Approve)
        .await?;
    tracing::info!(classified_id = %ad.id, "seeded classified (approved)");

    let listing = ProfessionalRepository::new(&pool)
        .create(client.id, "Carlos Eletricista", "eletricista", Some("99999-0000"))
        .await?;
    let listing = moderation
        .moderate_professional(listing.id, ModerationAction::Approve)
        .await?;
    tracing::info!(professional_id = %listing.id, "seeded professional listing (approved)");

    tracing::info!("Seed complete");
    Ok(())
}
