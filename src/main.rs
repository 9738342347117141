use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

mod handlers;
mod models;
mod store;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    log::info!("Seeding in-memory hotel store...");
    let store = web::Data::new(store::HotelStore::seeded());

    log::info!("Starting server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/hotels")
                    .route("", web::get().to(handlers::hotels::get_hotels))
                    .route("/sync/{id}", web::get().to(handlers::hotels::sync_delay))
                    .route("/async/{id}", web::get().to(handlers::hotels::async_delay))
                    .route("/{id}", web::put().to(handlers::hotels::replace_hotel))
                    .route("/{id}", web::patch().to(handlers::hotels::merge_hotel)),
            )
    })
    .bind(addr)?
    .run()
    .await
}
