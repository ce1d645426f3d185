use std::time::Duration;

use async_trait::async_trait;
use fieldsync_core::models::job::Coordinates;
use serde::Deserialize;
use tracing::{debug, warn};

/// Best-effort decomposition of a free-text US service address. Fields the
/// heuristics cannot identify stay `None`; parsing itself never fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub zip_code: Option<String>,
}

/// Resolves free-text addresses into structured fields and coordinates.
///
/// `geocode` is IO against an external service and may fail or time out;
/// callers must treat `None` as "no coordinates", not as an error.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    fn parse_address(&self, raw: &str) -> ParsedAddress {
        parse_address(raw)
    }

    async fn geocode(&self, raw: &str, zip_code: Option<&str>) -> Option<Coordinates>;
}

/// US state codes and names, used to spot the state segment of an address.
const US_STATES: [(&str, &str); 51] = [
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
];

pub fn state_name_for_code(code: &str) -> Option<&'static str> {
    let code = code.to_ascii_uppercase();
    US_STATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn state_code_for_name(name: &str) -> Option<&'static str> {
    let name = name.trim().to_ascii_lowercase();
    US_STATES
        .iter()
        .find(|(_, n)| n.to_ascii_lowercase() == name)
        .map(|(c, _)| *c)
}

fn is_zip(token: &str) -> bool {
    let digits = token.split('-').next().unwrap_or(token);
    digits.len() == 5 && digits.chars().all(|c| c.is_ascii_digit())
}

/// Heuristic parser for addresses shaped like
/// `"street, city, ST 12345"` (with the state/zip segment optional).
pub fn parse_address(raw: &str) -> ParsedAddress {
    let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    debug!("Parsing address: {}", cleaned);

    let segments: Vec<&str> = cleaned
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut parsed = ParsedAddress::default();
    let Some(street) = segments.first() else {
        return parsed;
    };
    parsed.street = Some(street.to_string());

    match segments.as_slice() {
        // Unreachable: the empty case returns early above
        [] => {}
        [_] => {}
        [_, tail] => {
            // Two segments: the tail is either "ST 12345" or just a city
            let before = parsed.clone();
            scan_tail(tail, &mut parsed);
            if parsed == before {
                parsed.city = Some(tail.to_string());
            }
        }
        [_, city, rest @ ..] => {
            parsed.city = Some(city.to_string());
            scan_tail(&rest.join(" "), &mut parsed);
        }
    }

    parsed
}

fn scan_tail(tail: &str, parsed: &mut ParsedAddress) {
    for token in tail.split_whitespace() {
        if is_zip(token) {
            parsed.zip_code = Some(token.to_string());
        } else if token.len() == 2 {
            if let Some(name) = state_name_for_code(token) {
                parsed.state_code = Some(token.to_ascii_uppercase());
                parsed.state = Some(name.to_string());
            }
        } else if let Some(code) = state_code_for_name(token) {
            parsed.state_code = Some(code.to_string());
            parsed.state = Some(token.to_string());
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Google Maps geocoding client. Requests carry a bounded timeout; any
/// failure (missing key, transport error, non-OK status) resolves to `None`
/// so scheduling can proceed without coordinates.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: Option<String>,
}

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

impl GoogleGeocoder {
    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(GEOCODE_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, api_key }
    }
}

#[async_trait]
impl AddressResolver for GoogleGeocoder {
    async fn geocode(&self, raw: &str, zip_code: Option<&str>) -> Option<Coordinates> {
        let Some(api_key) = &self.api_key else {
            warn!("Geocoding API key not configured - skipping geocoding");
            return None;
        };

        let full_address = match zip_code {
            Some(zip) => format!("{raw}, {zip}, USA"),
            None => format!("{raw}, USA"),
        };
        debug!("Geocoding address: {}", full_address);

        let response = self
            .client
            .get(GEOCODE_URL)
            .query(&[("address", full_address.as_str()), ("key", api_key)])
            .send()
            .await;

        let body: GeocodeResponse = match response {
            Ok(response) => match response.json().await {
                Ok(body) => body,
                Err(err) => {
                    warn!("Geocoding response could not be decoded: {}", err);
                    return None;
                }
            },
            Err(err) => {
                warn!("Geocoding request failed: {}", err);
                return None;
            }
        };

        if body.status != "OK" {
            warn!(
                "Geocoding failed: {} ({})",
                body.status,
                body.error_message.as_deref().unwrap_or("no error message")
            );
            return None;
        }

        body.results.first().map(|result| Coordinates {
            lat: result.geometry.location.lat,
            lng: result.geometry.location.lng,
        })
    }
}
