//! Wire schema of the artworks collection endpoint.

use serde::Deserialize;
use serde_json::Value;

use crate::api::Page;
use crate::error::ApiError;
use crate::model::Artwork;

/// Body of `GET /artworks`.
#[derive(Debug, Deserialize)]
struct ArtworksResponse {
    data: Vec<RawArtwork>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: u64,
}

/// An artwork as it arrives on the wire, before validation.
#[derive(Debug, Deserialize)]
struct RawArtwork {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    place_of_origin: Option<Value>,
    #[serde(default)]
    artist_display: Option<Value>,
    #[serde(default)]
    inscriptions: Option<Value>,
    #[serde(default)]
    date_start: Option<Value>,
    #[serde(default)]
    date_end: Option<Value>,
}

impl RawArtwork {
    fn validate(self, index: usize) -> Result<Artwork, ApiError> {
        let id = match self.id {
            Some(Value::Number(n)) => n.as_u64(),
            _ => None,
        }
        .ok_or_else(|| ApiError::parse(format!("record {index}: `id` must be a non-negative integer")))?;

        Ok(Artwork {
            id,
            title: text_field(self.title, "title", index)?,
            place_of_origin: text_field(self.place_of_origin, "place_of_origin", index)?,
            artist_display: text_field(self.artist_display, "artist_display", index)?,
            inscriptions: text_field(self.inscriptions, "inscriptions", index)?,
            date_start: text_field(self.date_start, "date_start", index)?,
            date_end: text_field(self.date_end, "date_end", index)?,
        })
    }
}

/// Accepts strings and numbers (dates come back as years), `null` or absent.
fn text_field(value: Option<Value>, name: &str, index: usize) -> Result<Option<String>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(ApiError::parse(format!(
            "record {index}: `{name}` has unexpected type {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses a collection response body into a typed [`Page`].
///
/// `page` and `page_size` are the values the request was made with.
pub fn parse_page(body: &str, page: usize, page_size: usize) -> Result<Page, ApiError> {
    let response: ArtworksResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

    let records = response
        .data
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.validate(index))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| match e {
            ApiError::Parse { message, .. } => ApiError::parse_with_body(message, body),
            other => other,
        })?;

    let total = usize::try_from(response.pagination.total)
        .map_err(|_| ApiError::parse_with_body("`pagination.total` out of range", body))?;

    Ok(Page::new(records, total, page, page_size))
}
