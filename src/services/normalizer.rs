// src/services/normalizer.rs
// DOCUMENTATION: Raw place record to internal Place mapping
// PURPOSE: Total, pure normalization with documented defaults for every field

use crate::models::{Details, Photo, Place, NOT_AVAILABLE, NO_PHOTO_SENTINEL};
use crate::services::google_places_client::{RawPhoto, RawPlace};
use std::collections::BTreeSet;

/// Image proxy template the derived photo URL is built from
const PHOTO_URL_TEMPLATE: &str =
    "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photoreference=";

/// Normalize one raw place record into the internal schema
/// DOCUMENTATION: Pure function of the record and the caller's API key.
/// Never fails: every missing field is replaced by its documented
/// default or sentinel, so the output always has all required fields
pub fn normalize_place(raw: &RawPlace, maps_api_key: &str) -> Place {
    Place {
        name: raw
            .display_name
            .as_ref()
            .and_then(|d| d.text.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),

        address: raw
            .formatted_address
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),

        rating: raw.rating,
        total_ratings: raw.user_rating_count,
        google_maps_url: raw.google_maps_uri.clone(),
        website_url: raw.website_uri.clone(),

        regular_opening_hours: raw
            .regular_opening_hours
            .as_ref()
            .map(|h| h.weekday_descriptions.clone())
            .unwrap_or_default(),

        photo: normalize_photo(raw.photos.first(), maps_api_key),

        price_range: raw.price_range.clone().unwrap_or_default(),
        accessibility_options: raw.accessibility_options.clone().unwrap_or_default(),

        details: Details {
            serves_breakfast: raw.serves_breakfast.unwrap_or(false),
            serves_lunch: raw.serves_lunch.unwrap_or(false),
            serves_dinner: raw.serves_dinner.unwrap_or(false),
            serves_brunch: raw.serves_brunch.unwrap_or(false),
            outdoor_seating: raw.outdoor_seating.unwrap_or(false),
            live_music: raw.live_music.unwrap_or(false),
            serves_dessert: raw.serves_dessert.unwrap_or(false),
            serves_coffee: raw.serves_coffee.unwrap_or(false),
            good_for_children: raw.good_for_children.unwrap_or(false),
            allows_dogs: raw.allows_dogs.unwrap_or(false),
            restroom: raw.restroom.unwrap_or(false),
            good_for_groups: raw.good_for_groups.unwrap_or(false),
            parking_options: raw.parking_options.clone().unwrap_or_default(),
            payment_methods: raw.payment_options.clone().unwrap_or_default(),
        },

        reviews: raw
            .reviews
            .iter()
            .map(|review| {
                review
                    .original_text
                    .as_ref()
                    .and_then(|t| t.text.clone())
                    .unwrap_or_default()
            })
            .collect(),

        landmarks: collect_landmarks(raw),
    }
}

/// Derive the representative Photo from the first photo entry, if any
/// Author fields come from the first attribution and default
/// independently of whether the photo itself was found
fn normalize_photo(first_photo: Option<&RawPhoto>, maps_api_key: &str) -> Photo {
    let Some(photo) = first_photo else {
        return Photo::unavailable();
    };

    let url = photo
        .name
        .as_deref()
        .map(|name| photo_url(name, maps_api_key))
        .unwrap_or_else(|| NO_PHOTO_SENTINEL.to_string());

    let attribution = photo.author_attributions.first();

    Photo {
        url,
        author_name: attribution
            .and_then(|a| a.display_name.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        author_url: attribution
            .and_then(|a| a.uri.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

/// Build a display URL from an opaque photo resource name
/// The reference is the last path segment of the name
fn photo_url(photo_name: &str, maps_api_key: &str) -> String {
    let reference = photo_name.rsplit('/').next().unwrap_or(photo_name);
    format!("{}{}&key={}", PHOTO_URL_TEMPLATE, reference, maps_api_key)
}

/// Union of category tags across all address-descriptor landmarks
/// A BTreeSet both deduplicates and gives a stable sorted order, so
/// normalizing the same record twice is byte-identical
fn collect_landmarks(raw: &RawPlace) -> Vec<String> {
    let tags: BTreeSet<String> = raw
        .address_descriptor
        .as_ref()
        .map(|descriptor| {
            descriptor
                .landmarks
                .iter()
                .flat_map(|landmark| landmark.types.iter().cloned())
                .collect()
        })
        .unwrap_or_default();

    tags.into_iter().collect()
}
