// src/services/enrichment_service.rs
// DOCUMENTATION: Café enrichment via the generative model
// PURPOSE: Build the analysis prompt, invoke Gemini, parse the JSON reply

use crate::errors::ApiError;
use crate::models::Place;
use crate::services::gemini_client::GeminiClient;
use serde_json::Value;

/// System instruction handed to the model on every call
/// Describes the single-JSON-array output contract, the per-café object
/// format and the closed set of conclusion categories
const INSTRUCTION: &str = r#"
Tugas Anda adalah menganalisis daftar kafe berdasarkan informasi yang tersedia dari Google Maps dan mengembalikan hasilnya dalam satu array JSON tunggal.

PETUNJUK PENTING:
1. Hasilkan satu array JSON (`[]`) yang berisi objek untuk SEMUA kafe yang dianalisis.
2. Jangan di-stream. Seluruh respons harus berupa satu blok JSON yang valid.
3. Pastikan setiap field dalam objek JSON terisi secara lengkap.
4. Gunakan format yang telah ditentukan untuk setiap objek JSON.

CONTOH FORMAT OUTPUT (Keseluruhan Respons):
[
    {
        "cafe_name": "Fore Coffee",
        "rating": 4.5,
        "address": "Jl. Raya Condong Catur...",
        "atmosphere": { "indoor": true, "outdoor": true },
        "photo": {
            "url": "https://example.com/photo.jpg",
            "author_name": "John Doe",
            "author_url": "https://example.com/author"
        },
        "google_maps_url": "https://maps.google.com/?cid=1234567890",
        "price_range": "25.000 - 50.000 IDR",
        "menu": { "coffee": true, "nonCoffee": true, "snack": true, "rice": false },
        "facility": { "wifi": true, "electricity": true, "mushala": false, "kids_friendly": true, "accessible": false },
        "payment": { "cash": true, "non_cash": true },
        "recommended_menu": ["Butterscotch Sea Salt Latte", "Pain au Chocolat"],
        "conclusion": "pilih satu di antara kategori berikut:
        WFC friendly | Hangout with friend | Hangout with family",
        "landmark": { "atm": true, "rumah_sakit": false, "mall": true, "masjid": true, "minimarket": true }
    }
]
"#;

/// Fixed-length fence strip, matching the reply format the instruction
/// asks for: exactly "```json" in front and "```" behind. This is not a
/// general fence parser
const FENCE_PREFIX_LEN: usize = 7;
const FENCE_SUFFIX_LEN: usize = 3;

/// Analyze a batch of normalized places
/// DOCUMENTATION: One model call for the whole batch; the reply is
/// expected to hold one enrichment object per input place, in prompt
/// order, though that cardinality is not mechanically enforced.
/// Failures surface as ApiError::EnrichmentFailed instead of an empty
/// success, so callers can tell "nothing found" from "analysis broke"
pub async fn analyze_cafes(
    gemini: &GeminiClient,
    places: &[Place],
) -> Result<Vec<Value>, ApiError> {
    // Nothing to analyze: skip the model round-trip entirely
    if places.is_empty() {
        return Ok(Vec::new());
    }

    let prompt = build_data_prompt(places)?;
    let reply = gemini.generate(INSTRUCTION, &prompt).await?;

    let enrichments = parse_enrichment_reply(&reply)?;
    log::info!(
        "Gemini returned {} enrichment objects for {} places",
        enrichments.len(),
        places.len()
    );

    Ok(enrichments)
}

/// Build the data prompt embedding the serialized place list
pub fn build_data_prompt(places: &[Place]) -> Result<String, ApiError> {
    let serialized = serde_json::to_string_pretty(places)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize places: {}", e)))?;

    Ok(format!(
        "### DATA KAFE UNTUK DIANALISIS:\n{}\n",
        serialized
    ))
}

/// Parse the model's textual reply into a JSON array
/// Strips the expected fence marker first, then requires valid JSON
/// holding an array
pub fn parse_enrichment_reply(reply: &str) -> Result<Vec<Value>, ApiError> {
    let cleaned = strip_code_fence(reply);

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| ApiError::EnrichmentFailed(format!("reply is not valid JSON: {}", e)))?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(ApiError::EnrichmentFailed(format!(
            "reply JSON is not an array (got {})",
            json_type_name(&other)
        ))),
    }
}

/// Drop the leading "```json" and trailing "```" markers if present
/// Fixed-length strip: a fence of any other length will not round-trip
fn strip_code_fence(text: &str) -> &str {
    let mut cleaned = text.trim();

    if cleaned.starts_with("```") {
        cleaned = cleaned.get(FENCE_PREFIX_LEN..).unwrap_or("").trim();
    }
    if cleaned.ends_with("```") {
        cleaned = cleaned[..cleaned.len() - FENCE_SUFFIX_LEN].trim();
    }

    cleaned
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
