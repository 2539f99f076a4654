use crate::{
    cli::Args,
    errors::Result,
    vars::{MAX_UPLOAD_SIZE, RESIZD_HOST, RESIZD_PORT, RESIZD_PUBLIC_BASE, init_started_at},
};
use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath},
    http::Request,
    middleware,
    routing::{delete, get, post},
};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info_span;

mod authz;
mod cli;
mod errors;
mod logger;
mod manipulations;
mod middlewares;
mod models;
mod routes;
mod store;
mod vars;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the lazily-resolved config statics
    env_setup();
    let bind = format!("{}:{}", *RESIZD_HOST, *RESIZD_PORT);
    let args = Args::parse();
    if args.healthcheck {
        cli::healthcheck::run(args, bind);
    } else if args.cleanup {
        cli::cleanup::run().await?;
    } else if args.migrate {
        store::init().await?;
        println!("Migrations applied");
    } else if let Some(name) = args.create_user {
        store::init().await?;
        let user = store::users::create(store::pool(), &name).await?;
        println!("Created user `{}` (id {}), token: {}", user.name, user.id, user.token);
    } else if let Some(name) = args.create_album {
        let owner = args
            .owner
            .ok_or(crate::fail!("--create-album requires --owner <user id>"))?;
        store::init().await?;
        let album = store::albums::create(store::pool(), &name, owner).await?;
        println!("Created album `{}` (id {}) for user {}", album.name, album.id, album.user_id);
    } else {
        web_serve(&bind).await?;
    }

    Ok(())
}

async fn web_serve(bind: &str) -> Result<()> {
    // Initialize the logger
    logger::init();
    // Connect the database and apply the schema
    store::init().await?;

    let images_dir = PathBuf::from(*RESIZD_PUBLIC_BASE).join("images");

    // Everything under /api requires a bearer token except the health check
    let api_routes = Router::new()
        .route("/image-manipulations", get(routes::manipulations::index))
        .route(
            "/image-manipulations/resize",
            post(routes::manipulations::resize).layer(DefaultBodyLimit::max(*MAX_UPLOAD_SIZE)),
        )
        .route(
            "/image-manipulations/{id}",
            get(routes::manipulations::show),
        )
        .route(
            "/image-manipulations/{id}",
            delete(routes::manipulations::destroy),
        )
        .route(
            "/albums/{album}/image-manipulations",
            get(routes::manipulations::by_album),
        )
        .route("/server/info", get(routes::server::info))
        .route_layer(middleware::from_fn(middlewares::auth));

    let app = Router::new()
        .nest("/api", api_routes)
        .route("/api/healthcheck", get(routes::healthcheck))
        // Originals and derivatives are served as-is from the images tree
        .nest_service("/images", ServeDir::new(images_dir))
        .layer(trace_layer());

    // Initialize the start time
    init_started_at();
    info!("Starting server at http://{bind}");
    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

type MyTraceLayer<M> = TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    M,
>;

fn trace_layer() -> MyTraceLayer<impl Fn(&Request<Body>) -> tracing::Span + Clone> {
    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        // The matched route path (with placeholders, e.g. /api/image-manipulations/{id})
        let matched_path = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str);

        let query = request.uri().query();

        let content_type = request
            .headers()
            .get("content-type")
            .and_then(|h| h.to_str().ok());

        info_span!(
            "http_request",
            method = %request.method(),
            matched_path = matched_path,
            query = query,
            content_type = content_type,
            status_code = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
            response_size = tracing::field::Empty,
        )
    })
}

fn env_setup() {
    if dotenvy::dotenv().is_ok() {
        info!("loaded .env file");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
