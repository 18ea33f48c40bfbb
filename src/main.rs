use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use breed_match::config::{CatalogSource, Settings};
use breed_match::core::Matcher;
use breed_match::models::ScoringConfig;
use breed_match::routes::{self, AppState};
use breed_match::services::{BreedCatalog, FileCatalog, LlmClient, PostgresCatalog, QuestionCatalog};
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn build_catalog(settings: &Settings) -> io::Result<BreedCatalog> {
    match settings.catalog.source {
        CatalogSource::File => {
            let file = FileCatalog::new(&settings.catalog.path);
            info!("Using file breed catalog at {}", file.path().display());
            Ok(BreedCatalog::File(file))
        }
        CatalogSource::Postgres => {
            let postgres = PostgresCatalog::from_settings(
                &settings.database.url,
                settings.database.max_connections,
                settings.database.min_connections,
            )
            .await
            .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?;

            if let Some(seed_path) = &settings.catalog.seed_path {
                let seed = FileCatalog::new(seed_path)
                    .load_all()
                    .await
                    .map_err(|e| startup_error("Failed to read seed catalog", e))?;
                postgres
                    .upsert_breeds(&seed)
                    .await
                    .map_err(|e| startup_error("Failed to seed PostgreSQL catalog", e))?;
            }

            Ok(BreedCatalog::Postgres(postgres))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Breed Match recommendation service...");

    let catalog = Arc::new(build_catalog(&settings).await?);

    let questions = QuestionCatalog::new(&settings.catalog.questions_path);
    info!("Serving questionnaire from {}", questions.path().display());

    let llm = Arc::new(
        LlmClient::new(&settings.llm).map_err(|e| startup_error("Failed to build LLM client", e))?,
    );
    if settings.llm.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; explanation endpoints will return 503");
    }
    info!("LLM client initialized (model: {})", llm.model());

    let matcher = Matcher::new(ScoringConfig::from(&settings.scoring));

    info!("Matcher initialized with scoring config: {:?}", matcher.config());

    let app_state = AppState {
        catalog,
        questions: Arc::new(questions),
        matcher,
        llm,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
