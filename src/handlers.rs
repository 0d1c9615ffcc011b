use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use crate::errors::ApiError;
use crate::manager_power::models::Temporal;
use crate::manager_power::Power;
use crate::AppState;

const PARAMETER_NOT_SATISFIED: &str = "Parameter not satisfied.";

#[derive(Deserialize)]
struct PointParams {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Deserialize)]
struct RangeParams {
    latitude: Option<f64>,
    longitude: Option<f64>,
    start: Option<i64>,
    end: Option<i64>,
}

#[derive(Deserialize)]
struct SkyParams {
    latitude: Option<f64>,
    longitude: Option<f64>,
    mode: Option<Temporal>,
    start: Option<i64>,
    end: Option<i64>,
}

/// Returns a query extractor configuration that renders malformed
/// query strings through the uniform error envelope
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _| ApiError::Validation(err.to_string()).into())
}

fn require<T>(value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::Validation(PARAMETER_NOT_SATISFIED.to_string()))
}

#[get("/")]
pub async fn get_start() -> HttpResponse {
    HttpResponse::Ok().json(json!({"message": "App is working."}))
}

#[get("/angle")]
pub async fn get_solar_angle(data: web::Data<AppState>, params: web::Query<PointParams>) -> Result<HttpResponse, ApiError> {
    let latitude = require(params.latitude)?;
    let longitude = require(params.longitude)?;

    let merged = Power::new(&data.config.power)?
        .get_solar_angle(latitude, longitude).await?;

    Ok(HttpResponse::Ok().json(merged))
}

#[get("/irradiance")]
pub async fn get_solar_irradiance(data: web::Data<AppState>, params: web::Query<RangeParams>) -> Result<HttpResponse, ApiError> {
    let latitude = require(params.latitude)?;
    let longitude = require(params.longitude)?;
    let start = require(params.start)?;
    let end = require(params.end)?;

    let merged = Power::new(&data.config.power)?
        .get_solar_irradiance(latitude, longitude, start, end).await?;

    Ok(HttpResponse::Ok().json(merged))
}

#[get("/sky")]
pub async fn get_clear_sky_and_amount(data: web::Data<AppState>, params: web::Query<SkyParams>) -> Result<HttpResponse, ApiError> {
    let latitude = require(params.latitude)?;
    let longitude = require(params.longitude)?;
    let mode = require(params.mode)?;
    let start = require(params.start)?;
    let end = require(params.end)?;

    let merged = Power::new(&data.config.power)?
        .get_clear_sky_and_amount(mode, latitude, longitude, start, end).await?;

    Ok(HttpResponse::Ok().json(merged))
}

#[get("/average")]
pub async fn get_average(data: web::Data<AppState>, params: web::Query<RangeParams>) -> Result<HttpResponse, ApiError> {
    let latitude = require(params.latitude)?;
    let longitude = require(params.longitude)?;
    let start = require(params.start)?;
    let end = require(params.end)?;

    let result = Power::new(&data.config.power)?
        .calculate_averages(latitude, longitude, start, end).await?;

    Ok(HttpResponse::Ok().json(result))
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound("The requested resource was not found.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::initialization::{Config, PowerApi, WebServer};

    fn test_config(base_url: &str) -> Config {
        Config {
            web_server: WebServer {
                bind_address: "127.0.0.1".to_string(),
                bind_port: 0,
            },
            power: PowerApi { base_url: base_url.to_string() },
        }
    }

    macro_rules! test_app {
        ($config:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState { config: $config }))
                    .app_data(query_config())
                    .service(get_start)
                    .service(get_solar_angle)
                    .service(get_solar_irradiance)
                    .service(get_clear_sky_and_amount)
                    .service(get_average)
                    .default_service(web::route().to(not_found)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn start_route_reports_app_is_working() {
        let app = test_app!(test_config("http://127.0.0.1:1"));

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "App is working.");
    }

    #[actix_web::test]
    async fn missing_latitude_yields_bad_request_envelope() {
        let app = test_app!(test_config("http://127.0.0.1:1"));

        let req = test::TestRequest::get()
            .uri("/irradiance?longitude=38.7&start=2019&end=2020")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["reason"], "Bad request");
        assert_eq!(body["error"]["message"], "Parameter not satisfied.");
        assert_eq!(body["error"]["code"], 400);
    }

    #[actix_web::test]
    async fn unknown_sky_mode_yields_bad_request_envelope() {
        let app = test_app!(test_config("http://127.0.0.1:1"));

        let req = test::TestRequest::get()
            .uri("/sky?latitude=9.0&longitude=38.7&mode=weekly&start=2019&end=2020")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["reason"], "Bad request");
        assert_eq!(body["error"]["code"], 400);
    }

    #[actix_web::test]
    async fn unknown_route_yields_not_found_envelope() {
        let app = test_app!(test_config("http://127.0.0.1:1"));

        let req = test::TestRequest::get().uri("/weather").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["reason"], "Not found");
        assert_eq!(body["error"]["code"], 404);
    }

    #[actix_web::test]
    async fn angle_route_merges_upstream_series() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/temporal/climatology/point"))
            .and(query_param("parameters", "SG_SAA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {"parameter": {"SG_SAA": {"JAN": 10.0, "FEB": 20.0}}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/temporal/climatology/point"))
            .and(query_param("parameters", "SG_SZA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {"parameter": {"SG_SZA": {"JAN": 1.0, "FEB": 2.0}}}
            })))
            .mount(&server)
            .await;
        let app = test_app!(test_config(&server.uri()));

        let req = test::TestRequest::get()
            .uri("/angle?latitude=9.0&longitude=38.7")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["JAN"]["vertical"], 1.0);
        assert_eq!(body["JAN"]["horizontal"], 10.0);
        assert_eq!(body["FEB"]["vertical"], 2.0);
        assert_eq!(body["FEB"]["horizontal"], 20.0);
    }

    #[actix_web::test]
    async fn upstream_failure_yields_internal_server_error_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/temporal/climatology/point"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let app = test_app!(test_config(&server.uri()));

        let req = test::TestRequest::get()
            .uri("/angle?latitude=9.0&longitude=38.7")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["reason"], "Internal server error");
        assert_eq!(body["error"]["message"], "Azimuth API Failure");
        assert_eq!(body["error"]["code"], 500);
    }
}
