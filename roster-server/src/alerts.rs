//! Alert headers: symbolic outcome keys consumed by the UI layer.
//!
//! Names and key shapes are stable per deployment; clients key off them.

use axum::http::{header::InvalidHeaderValue, HeaderMap, HeaderName, HeaderValue};

pub const APPLICATION_NAME: &str = "rosterApp";

pub static ALERT_HEADER: HeaderName = HeaderName::from_static("x-rosterapp-alert");
pub static PARAMS_HEADER: HeaderName = HeaderName::from_static("x-rosterapp-params");

fn alert(key: &str, params: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(&ALERT_HEADER, HeaderValue::from_str(key)?);
    headers.insert(&PARAMS_HEADER, HeaderValue::from_str(params)?);
    Ok(headers)
}

pub fn entity_creation_alert(entity: &str, id: i64) -> Result<HeaderMap, InvalidHeaderValue> {
    alert(
        &format!("{APPLICATION_NAME}.{entity}.created"),
        &id.to_string(),
    )
}

pub fn entity_update_alert(entity: &str, id: i64) -> Result<HeaderMap, InvalidHeaderValue> {
    alert(
        &format!("{APPLICATION_NAME}.{entity}.updated"),
        &id.to_string(),
    )
}

pub fn entity_deletion_alert(entity: &str, id: i64) -> Result<HeaderMap, InvalidHeaderValue> {
    alert(
        &format!("{APPLICATION_NAME}.{entity}.deleted"),
        &id.to_string(),
    )
}

/// Key for a failed operation, e.g. `member.idexists`.
pub fn failure_key(entity: &str, error_key: &str) -> String {
    format!("{entity}.{error_key}")
}
