use indexmap::IndexMap;
use mediatype::MediaType;

/// Coarse classification of a request or response media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum ContentCategory {
  #[default]
  Json,
  FormUrlEncoded,
  Multipart,
  Text,
  Binary,
  Xml,
  EventStream,
}

impl ContentCategory {
  #[must_use]
  pub fn from_content_type(content_type: &str) -> Self {
    let Some(media) = MediaType::parse(content_type).ok() else {
      return Self::Json;
    };

    let suffix = media.suffix.as_ref().map(mediatype::Name::as_str);

    match (media.ty.as_str(), media.subty.as_str(), suffix) {
      ("multipart", _, _) => Self::Multipart,
      ("text", "event-stream", _) => Self::EventStream,
      ("text" | "application", "xml", _) | (_, _, Some("xml")) => Self::Xml,
      ("application", "x-www-form-urlencoded", _) => Self::FormUrlEncoded,
      ("application", "json", _) | (_, _, Some("json")) => Self::Json,
      ("image" | "audio" | "video", _, _) | ("application", "pdf" | "octet-stream", _) => Self::Binary,
      ("application" | "text", _, _) => Self::Text,
      _ => Self::Json,
    }
  }
}

const JSON_CONTENT_TYPE: &str = "application/json";

/// Picks the media type a form is built from.
///
/// Prefers `application/json`, then any other JSON-like type (`+json`
/// suffix), then the first declared entry.
pub(crate) fn preferred_media_type<V>(content: &IndexMap<String, V>) -> Option<(&str, &V)> {
  content
    .get_key_value(JSON_CONTENT_TYPE)
    .or_else(|| {
      content
        .iter()
        .find(|(content_type, _)| ContentCategory::from_content_type(content_type) == ContentCategory::Json)
    })
    .or_else(|| content.first())
    .map(|(content_type, value)| (content_type.as_str(), value))
}
