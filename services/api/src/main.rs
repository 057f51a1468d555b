use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{
    AppState,
    jwt::{JwtConfig, JwtService},
    notifier::{Mailer, MailerConfig},
    repositories::{
        BookingRepository, HotelRepository, RoomRepository, TripRepository, UserRepository,
    },
    routes,
    routes::auth::AdminConfig,
    storage::{ImageStore, StorageConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting booking service");

    // Initialize database connection pool
    let db_config = common::database::DatabaseConfig::from_env()?;
    let pool = common::database::init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    info!("Running migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Component configuration; DATABASE_URL, JWT_SECRET, admin credentials,
    // and the image bucket are fatal when missing, mail credentials are not.
    let jwt_service = JwtService::new(JwtConfig::from_env()?);
    let admin = AdminConfig::from_env()?;
    let mailer = Mailer::new(MailerConfig::from_env())?;
    if mailer.is_enabled() {
        info!("Booking confirmation emails enabled");
    }
    let image_store = ImageStore::new(StorageConfig::from_env()?).await;

    let app_state = AppState {
        db_pool: pool.clone(),
        jwt_service,
        admin,
        mailer,
        image_store,
        user_repository: UserRepository::new(pool.clone()),
        hotel_repository: HotelRepository::new(pool.clone()),
        room_repository: RoomRepository::new(pool.clone()),
        booking_repository: BookingRepository::new(pool.clone()),
        trip_repository: TripRepository::new(pool.clone()),
    };

    info!("Booking service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Booking service listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Database pool closed, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
