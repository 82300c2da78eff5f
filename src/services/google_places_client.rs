// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API (New) client
// PURPOSE: Handle communication with places:searchNearby for café data retrieval

use crate::errors::ApiError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Field mask sent with every nearby search
/// Keeps the response limited to exactly what the normalizer consumes
const FIELD_MASK: &str = "places.displayName,places.formattedAddress,places.rating,places.userRatingCount,places.googleMapsUri,places.websiteUri,places.regularOpeningHours,places.photos,places.priceRange,places.accessibilityOptions,places.servesBreakfast,places.servesLunch,places.servesDinner,places.servesBrunch,places.outdoorSeating,places.liveMusic,places.servesDessert,places.servesCoffee,places.goodForChildren,places.restroom,places.parkingOptions,places.paymentOptions,places.reviews,places.addressDescriptor.landmarks";

/// Google Places API client
/// DOCUMENTATION: Handles authentication and API calls to Google Places
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Base URL for the Places API (New)
    base_url: String,
}

/// Response from Places searchNearby
#[derive(Debug, Default, Deserialize)]
pub struct NearbySearchResponse {
    /// Omitted entirely by the API when there are zero results
    #[serde(default)]
    pub places: Vec<RawPlace>,
}

/// Individual raw place record from the Places API
/// DOCUMENTATION: Loosely-typed boundary schema; every field is optional
/// so decoding never fails on partial records. The normalizer turns this
/// into the strict internal Place
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPlace {
    pub display_name: Option<RawLocalizedText>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub google_maps_uri: Option<String>,
    pub website_uri: Option<String>,
    pub regular_opening_hours: Option<RawOpeningHours>,
    pub photos: Vec<RawPhoto>,
    /// Free-form currency/low/high object, passed through untouched
    pub price_range: Option<Map<String, Value>>,
    pub accessibility_options: Option<Map<String, Value>>,
    pub serves_breakfast: Option<bool>,
    pub serves_lunch: Option<bool>,
    pub serves_dinner: Option<bool>,
    pub serves_brunch: Option<bool>,
    pub outdoor_seating: Option<bool>,
    pub live_music: Option<bool>,
    pub serves_dessert: Option<bool>,
    pub serves_coffee: Option<bool>,
    pub good_for_children: Option<bool>,
    pub allows_dogs: Option<bool>,
    pub restroom: Option<bool>,
    pub good_for_groups: Option<bool>,
    pub parking_options: Option<Map<String, Value>>,
    pub payment_options: Option<Map<String, Value>>,
    pub reviews: Vec<RawReview>,
    pub address_descriptor: Option<RawAddressDescriptor>,
}

/// Localized text wrapper used by displayName
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLocalizedText {
    pub text: Option<String>,
}

/// Regular opening hours metadata
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOpeningHours {
    pub weekday_descriptions: Vec<String>,
}

/// Photo entry; `name` is an opaque resource path whose last segment is
/// the photo reference
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPhoto {
    pub name: Option<String>,
    pub author_attributions: Vec<RawAuthorAttribution>,
}

/// Photo author attribution
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAuthorAttribution {
    pub display_name: Option<String>,
    pub uri: Option<String>,
}

/// Review entry; only the original text is consumed
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReview {
    pub original_text: Option<RawLocalizedText>,
}

/// Address descriptor carrying nearby landmarks
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawAddressDescriptor {
    pub landmarks: Vec<RawLandmark>,
}

/// Nearby landmark with its category tags
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawLandmark {
    pub types: Vec<String>,
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://places.googleapis.com/v1".to_string(),
        }
    }

    /// Create a client pointed at an alternate endpoint
    #[cfg(test)]
    pub(crate) fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Get API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Perform nearby search for cafés
    /// DOCUMENTATION: Single synchronous round-trip to places:searchNearby
    ///
    /// # Arguments
    /// * `latitude` - Center point latitude
    /// * `longitude` - Center point longitude
    /// * `radius` - Search radius in meters (max 50000)
    ///
    /// # Returns
    /// Vector of RawPlace records, at most 5, ranked by popularity
    pub async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
    ) -> Result<Vec<RawPlace>, ApiError> {
        let url = format!("{}/places:searchNearby", self.base_url);
        let payload = build_search_payload(latitude, longitude, radius);

        log::debug!(
            "Places nearby search: lat={}, lon={}, radius={}",
            latitude,
            longitude,
            radius
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Places API request failed: {}", e);
                ApiError::UpstreamSearch(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Places API error {}: {}", status, body);
            return Err(ApiError::UpstreamSearch(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let api_response: NearbySearchResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Places response: {}", e);
            ApiError::UpstreamSearch(format!("Parse error: {}", e))
        })?;

        log::info!(
            "Places nearby search returned {} results",
            api_response.places.len()
        );
        Ok(api_response.places)
    }
}

/// Build the searchNearby request body
/// Fixed café filters, locale and result cap; only the circle varies
pub fn build_search_payload(latitude: f64, longitude: f64, radius: u32) -> Value {
    json!({
        "includedTypes": ["cafe", "coffee_shop"],
        "excludedPrimaryTypes": ["restaurant", "bar", "store"],
        "languageCode": "id",
        "maxResultCount": 5,
        "rankPreference": "POPULARITY",
        "locationRestriction": {
            "circle": {
                "center": {
                    "latitude": latitude,
                    "longitude": longitude
                },
                "radius": radius
            }
        }
    })
}
