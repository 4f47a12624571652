//! ZIP-code geocoding for address auto-fill.
//!
//! Best-effort only: any failure (network, HTTP status, response shape)
//! degrades to "no suggestion". The caller leaves the city/state fields
//! untouched when `None` comes back.

use serde::Deserialize;

/// City and two-letter state for a ZIP code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipLocation {
    pub city: String,
    pub state: String,
}

/// Response shape of the zippopotam-style `/us/{zip}` endpoint.
#[derive(Debug, Deserialize)]
struct ZipResponse {
    places: Vec<ZipPlace>,
}

#[derive(Debug, Deserialize)]
struct ZipPlace {
    #[serde(rename = "place name")]
    place_name: String,
    #[serde(rename = "state abbreviation")]
    state_abbreviation: String,
}

/// Parses a geocoder response body; `None` for anything malformed or
/// empty. Separated from the HTTP call so it can be tested offline.
pub fn parse_zip_response(body: &str) -> Option<ZipLocation> {
    let response: ZipResponse = serde_json::from_str(body).ok()?;
    let place = response.places.into_iter().next()?;
    Some(ZipLocation {
        city: place.place_name,
        state: place.state_abbreviation,
    })
}

/// Client for the public ZIP geocoding endpoint.
pub struct ZipLookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl ZipLookupClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolves a 5-digit ZIP to a city/state suggestion.
    ///
    /// Never errors: lookup failures are logged at debug and reported
    /// as `None`.
    pub async fn lookup(
        &self,
        zip: &str,
    ) -> Option<ZipLocation> {
        let url = format!("{}/{}", self.base_url, zip);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(zip, %error, "zip lookup request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(zip, status = %response.status(), "zip lookup returned non-success");
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => {
                tracing::debug!(zip, %error, "zip lookup body unreadable");
                return None;
            }
        };
        parse_zip_response(&body)
    }
}

impl Default for ZipLookupClient {
    fn default() -> Self {
        Self::new("https://api.zippopotam.us/us")
    }
}
