// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for the search and analyze endpoints
// PURPOSE: Parse requests, run the fetch/normalize/enrich pipeline, return responses

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{NearbyQuery, Place, PlaceListRequest};
use crate::services::{analyze_cafes, normalize_place, GeminiClient, GooglePlacesClient};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// GET /nearby-places
/// Search cafés around a point, normalize each result and return the
/// model's enrichment for the whole batch as one JSON array
pub async fn nearby_places(
    config: web::Data<Config>,
    query: web::Query<NearbyQuery>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = query.validate() {
        return Err(ApiError::Validation(e.to_string()));
    }

    let (lat, lon, radius) = query.resolve();

    let places_client = GooglePlacesClient::new(config.maps_api_key.clone());
    let raw_places = places_client.nearby_search(lat, lon, radius).await?;

    // The place list lives and dies with this request
    let places: Vec<Place> = raw_places
        .iter()
        .map(|raw| normalize_place(raw, places_client.api_key()))
        .collect();

    log::info!("Normalized {} places, requesting enrichment", places.len());

    let gemini = GeminiClient::new(config.gemini_api_key.clone());
    let enrichments = analyze_cafes(&gemini, &places).await?;

    Ok(HttpResponse::Ok().json(enrichments))
}

/// POST /analyze
/// Enrich a client-supplied place list directly, bypassing search.
/// Responds with a single JSON array (no streaming)
pub async fn analyze(
    config: web::Data<Config>,
    req: web::Json<PlaceListRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::Validation(e.to_string()));
    }

    let gemini = GeminiClient::new(config.gemini_api_key.clone());
    let enrichments = analyze_cafes(&gemini, &req.places).await?;

    Ok(HttpResponse::Ok().json(enrichments))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/nearby-places", web::get().to(nearby_places))
        .route("/analyze", web::post().to(analyze));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn test_config() -> Config {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 8000,
            log_level: "info".to_string(),
            maps_api_key: "maps-test-key".to_string(),
            gemini_api_key: "gemini-test-key".to_string(),
            allowed_origin: "http://localhost:5173".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_out_of_range_lat_rejected_before_upstream_call() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/nearby-places?lat=999")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid request");
        assert!(body["details"].is_string());
    }

    #[actix_web::test]
    async fn test_analyze_empty_list_returns_empty_array() {
        // No model call happens for an empty batch, so this runs offline
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_json(serde_json::json!({ "places": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_analyze_rejects_empty_place_name() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_json(serde_json::json!({
                "places": [ { "name": "", "address": "Jl. Kaliurang" } ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid request");
    }
}
