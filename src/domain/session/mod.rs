pub mod error;
pub mod service;

pub use error::SessionServiceError;
pub use service::{SessionService, SessionServiceApi};

use crate::domain::view::ViewResponse;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use uuid::Uuid;

/// Request for PATCH /api/sessions/{id}
///
/// Fields are applied in declaration order, so a page sent together with a
/// new filter lands on the filtered view.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ViewUpdate {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_page")]
    pub page: Option<usize>,
}

/// Any JSON number is accepted as a page and saturated into `usize`.
/// Negative values become 0 and the session clamps them to page 1.
fn deserialize_page<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.as_ref().map(saturating_page))
}

fn saturating_page(number: &Number) -> usize {
    if let Some(page) = number.as_u64() {
        usize::try_from(page).unwrap_or(usize::MAX)
    } else if number.as_i64().is_some() {
        0
    } else {
        // `as` saturates and maps NaN to 0
        number.as_f64().map(|page| page as usize).unwrap_or(0)
    }
}

/// Response for every session endpoint
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub view: ViewResponse,
}
