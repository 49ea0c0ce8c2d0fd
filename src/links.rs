//! Deep links into the Swisstopo web map and mobile app.
//!
//! These builders are consumed by the out-of-scope rendering helpers that
//! embed map links next to the assets the pipeline manages; they carry no
//! dependency on the pipeline itself.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Build a Swisstopo web-map deep link centred on `center` with a GPX track
/// overlay loaded from `track_url`.
pub fn map_url(center: (f64, f64), track_url: &str) -> String {
    format!(
        "https://map.geo.admin.ch/#/map?lang=de&center={},{}&z=6&bgLayer=ch.swisstopo.pixelkarte-farbe&topic=ech&layers=GPX|{}",
        center.0, center.1, track_url
    )
}

/// Build a Swisstopo mobile-app deep link for `track_url`.
///
/// The app expects the track URL base64-encoded in the path segment.
pub fn app_link(track_url: &str) -> String {
    format!("https://swisstopo.app/u/{}", STANDARD.encode(track_url))
}
