use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::{Config, Environment, File};
use dotenvy::dotenv;

use inventory_api::db::{establish_connection_pool, run_migrations};
use inventory_api::models::config::ServerConfig;
use inventory_api::repository::DieselRepository;
use inventory_api::routes;
use inventory_api::uploads::drive::DriveStore;
use inventory_api::uploads::{ImageUrlResolver, Reconciler, UploadQueue};

/// How long shutdown waits for in-flight uploads.
const UPLOAD_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("admin_users"),
        )
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    std::fs::create_dir_all(&server_config.upload_dir)?;

    let repo = DieselRepository::new(pool);
    let resolver = ImageUrlResolver::new(server_config.image_base_url.clone());

    let remote = &server_config.remote_upload;
    log::info!(
        "Remote upload enabled={} credentials={} folder={:?}",
        remote.enabled,
        remote.credentials_path.display(),
        remote.folder_id()
    );
    let store = Arc::new(DriveStore::new(remote.credentials_path.clone()));
    let reconciler = Reconciler::new(repo.clone(), store, remote);
    let (queue, workers) = UploadQueue::start(reconciler, remote.queue_capacity, remote.workers);

    let bind_address = (server_config.address.clone(), server_config.port);
    let serve_uploads = server_config.serve_uploads;
    let upload_dir = server_config.upload_dir.clone();

    let repo = web::Data::new(repo);
    let queue = web::Data::new(queue);
    let resolver = web::Data::new(resolver);
    let server_config = web::Data::new(server_config);

    let server = HttpServer::new({
        let queue = queue.clone();
        move || {
            let app = App::new()
                .wrap(Logger::default())
                .app_data(repo.clone())
                .app_data(queue.clone())
                .app_data(resolver.clone())
                .app_data(server_config.clone())
                .configure(routes::configure);
            if serve_uploads {
                app.service(Files::new("/uploads", &upload_dir))
            } else {
                app
            }
        }
    })
    .bind(bind_address)?
    .run();

    let result = server.await;

    // Workers exit once the last queue handle is gone.
    drop(queue);
    if tokio::time::timeout(UPLOAD_DRAIN_TIMEOUT, workers.join())
        .await
        .is_err()
    {
        log::warn!("Upload workers did not finish within {UPLOAD_DRAIN_TIMEOUT:?}");
    }

    result
}
