mod errors;
mod logging;
mod initialization;
mod handlers;
mod manager_power;
mod series;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::handlers::{
    get_average, get_clear_sky_and_amount, get_solar_angle, get_solar_irradiance,
    get_start, not_found, query_config,
};
use crate::initialization::{config, Config};

struct AppState {
    config: Config,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    logging::setup();
    let config = config()?;
    let web_data = web::Data::new(AppState { config: config.clone() });

    info!("starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(web_data.clone())
            .app_data(query_config())
            .wrap(Cors::permissive())
            .service(get_start)
            .service(get_solar_angle)
            .service(get_solar_irradiance)
            .service(get_clear_sky_and_amount)
            .service(get_average)
            .default_service(web::route().to(not_found))
    })
        .bind((config.web_server.bind_address.as_str(), config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
