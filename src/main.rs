mod errors;
mod handlers;
mod models;
mod store;
mod utils;

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::env;
use std::path::{Path, PathBuf};

use crate::store::EmployeeStore;
use crate::utils::upload::UploadConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let data_file =
        env::var("EMPLOYEE_DATA_FILE").unwrap_or_else(|_| "json-files/employees.json".to_string());
    let upload_dir = PathBuf::from(
        env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/images/profile_pics".to_string()),
    );

    if let Some(parent) = Path::new(&data_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::create_dir_all(&upload_dir)?;

    // A malformed backing file means the process cannot serve requests
    let store = web::Data::new(
        EmployeeStore::open(&data_file)
            .await
            .expect("Failed to load the employee backing file"),
    );
    let upload_config = web::Data::new(UploadConfig { dir: upload_dir });

    info!("Starting server at {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(upload_config.clone())
            .configure(handlers::employee::routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
