// src/models/place.rs
// DOCUMENTATION: Core data structures for normalized cafés
// PURPOSE: Defines the internal Place schema and API request DTOs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Sentinel used when a place has no photo at all
pub const NO_PHOTO_SENTINEL: &str = "No photo available";

/// Sentinel used for any missing string field
pub const NOT_AVAILABLE: &str = "N/A";

/// Default search center (Yogyakarta) and radius in meters
pub const DEFAULT_LATITUDE: f64 = -7.770682552597794;
pub const DEFAULT_LONGITUDE: f64 = 110.3588946;
pub const DEFAULT_RADIUS_M: u32 = 1000;

/// Representative photo of a place
/// Always present; absence is expressed through the sentinel values,
/// so consumers never deal with an optional photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    #[serde(rename = "authorName")]
    pub author_name: String,
    #[serde(rename = "authorURL")]
    pub author_url: String,
}

impl Photo {
    /// Photo value standing in for "this place has no photo"
    pub fn unavailable() -> Self {
        Photo {
            url: NO_PHOTO_SENTINEL.to_string(),
            author_name: NOT_AVAILABLE.to_string(),
            author_url: NOT_AVAILABLE.to_string(),
        }
    }
}

impl Default for Photo {
    fn default() -> Self {
        Photo::unavailable()
    }
}

/// Flat bag of amenity flags plus two free-form mappings
/// Every boolean defaults to false when the source omits it, which
/// collapses "unknown" into "no" on purpose
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    #[serde(default)]
    pub serves_breakfast: bool,
    #[serde(default)]
    pub serves_lunch: bool,
    #[serde(default)]
    pub serves_dinner: bool,
    #[serde(default)]
    pub serves_brunch: bool,
    #[serde(default)]
    pub outdoor_seating: bool,
    #[serde(default)]
    pub live_music: bool,
    #[serde(default)]
    pub serves_dessert: bool,
    #[serde(default)]
    pub serves_coffee: bool,
    #[serde(default)]
    pub good_for_children: bool,
    #[serde(default)]
    pub allows_dogs: bool,
    #[serde(default)]
    pub restroom: bool,
    #[serde(default)]
    pub good_for_groups: bool,
    #[serde(default)]
    pub parking_options: Map<String, Value>,
    #[serde(default)]
    pub payment_methods: Map<String, Value>,
}

/// Normalized café record
/// DOCUMENTATION: One Place per search result, built once by the
/// normalizer and immutable for the rest of the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Place {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub address: String,

    /// Google rating (0-5)
    #[serde(default)]
    pub rating: Option<f64>,

    /// Number of ratings behind the score
    #[serde(default)]
    pub total_ratings: Option<u32>,

    #[serde(rename = "googleMapsURL", default)]
    pub google_maps_url: Option<String>,

    #[serde(rename = "websiteURL", default)]
    pub website_url: Option<String>,

    /// One human-readable line per weekday, may be empty
    #[serde(rename = "regularOpeningHours", default)]
    pub regular_opening_hours: Vec<String>,

    #[serde(default)]
    pub photo: Photo,

    /// Free-form currency + low/high units mapping from the source
    #[serde(rename = "priceRange", default)]
    pub price_range: Map<String, Value>,

    /// Free-form boolean mapping from the source
    #[serde(rename = "accessibilityOptions", default)]
    pub accessibility_options: Map<String, Value>,

    #[serde(default)]
    pub details: Details,

    /// Review texts, order preserved, may contain empty strings
    #[serde(default)]
    pub reviews: Vec<String>,

    /// Deduplicated nearby-landmark category tags, stored sorted
    #[serde(default)]
    pub landmarks: Vec<String>,
}

/// Query parameters for GET /nearby-places
/// DOCUMENTATION: Each parameter is optional and falls back to the
/// fixed default search center/radius
#[derive(Debug, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,

    /// Search radius in meters (Places API caps circles at 50km)
    #[validate(range(min = 1, max = 50000))]
    pub radius: Option<u32>,
}

impl NearbyQuery {
    /// Resolve the effective search parameters
    pub fn resolve(&self) -> (f64, f64, u32) {
        (
            self.lat.unwrap_or(DEFAULT_LATITUDE),
            self.lon.unwrap_or(DEFAULT_LONGITUDE),
            self.radius.unwrap_or(DEFAULT_RADIUS_M),
        )
    }
}

/// Request body for POST /analyze
/// Carries a client-supplied list of fully-formed places
#[derive(Debug, Deserialize, Validate)]
pub struct PlaceListRequest {
    #[validate]
    pub places: Vec<Place>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_unavailable_sentinels() {
        let photo = Photo::unavailable();
        assert_eq!(photo.url, "No photo available");
        assert_eq!(photo.author_name, "N/A");
        assert_eq!(photo.author_url, "N/A");
    }

    #[test]
    fn test_details_defaults_to_all_false() {
        let details: Details = serde_json::from_str("{}").unwrap();
        assert!(!details.serves_coffee);
        assert!(!details.outdoor_seating);
        assert!(!details.good_for_groups);
        assert!(details.parking_options.is_empty());
        assert!(details.payment_methods.is_empty());
    }

    #[test]
    fn test_place_serializes_with_client_field_names() {
        let place = Place {
            name: "Fore Coffee".to_string(),
            address: "Jl. Kaliurang".to_string(),
            rating: Some(4.5),
            total_ratings: Some(120),
            google_maps_url: Some("https://maps.google.com/?cid=1".to_string()),
            website_url: None,
            regular_opening_hours: vec!["Monday: 08.00-22.00".to_string()],
            photo: Photo::unavailable(),
            price_range: Map::new(),
            accessibility_options: Map::new(),
            details: Details::default(),
            reviews: vec![],
            landmarks: vec![],
        };

        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["googleMapsURL"], "https://maps.google.com/?cid=1");
        assert_eq!(json["regularOpeningHours"][0], "Monday: 08.00-22.00");
        assert_eq!(json["photo"]["authorName"], "N/A");
        assert_eq!(json["details"]["servesCoffee"], false);
        assert_eq!(json["details"]["paymentMethods"], serde_json::json!({}));
    }

    #[test]
    fn test_nearby_query_defaults() {
        let query = NearbyQuery {
            lat: None,
            lon: None,
            radius: None,
        };

        let (lat, lon, radius) = query.resolve();
        assert_eq!(lat, DEFAULT_LATITUDE);
        assert_eq!(lon, DEFAULT_LONGITUDE);
        assert_eq!(radius, 1000);
    }

    #[test]
    fn test_nearby_query_range_validation() {
        let query = NearbyQuery {
            lat: Some(120.0),
            lon: None,
            radius: None,
        };
        assert!(query.validate().is_err());

        let query = NearbyQuery {
            lat: Some(-7.77),
            lon: Some(110.35),
            radius: Some(2000),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_place_list_request_accepts_minimal_records() {
        // Clients may omit everything optional; photo and details fall
        // back to their sentinel/default values
        let body = serde_json::json!({
            "places": [
                { "name": "Kopi Klotok", "address": "Jl. Kaliurang KM 16" }
            ]
        });

        let request: PlaceListRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.places.len(), 1);
        assert_eq!(request.places[0].photo, Photo::unavailable());
        assert_eq!(request.places[0].details, Details::default());
    }
}
