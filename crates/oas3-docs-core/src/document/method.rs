use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// HTTP methods an OpenAPI path item can declare, in canonical iteration order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Patch,
  Delete,
  Head,
  Options,
  Trace,
}

impl HttpMethod {
  /// Every method, in the order operations of one path are visited.
  pub const ALL: [Self; 8] = [
    Self::Get,
    Self::Post,
    Self::Put,
    Self::Patch,
    Self::Delete,
    Self::Head,
    Self::Options,
    Self::Trace,
  ];

  /// Lowercase name as used for path item keys and sidebar request types.
  #[must_use]
  pub fn as_str(self) -> &'static str {
    self.into()
  }

  #[must_use]
  pub fn to_http(self) -> http::Method {
    match self {
      Self::Get => http::Method::GET,
      Self::Post => http::Method::POST,
      Self::Put => http::Method::PUT,
      Self::Patch => http::Method::PATCH,
      Self::Delete => http::Method::DELETE,
      Self::Head => http::Method::HEAD,
      Self::Options => http::Method::OPTIONS,
      Self::Trace => http::Method::TRACE,
    }
  }
}

impl From<HttpMethod> for http::Method {
  fn from(method: HttpMethod) -> Self {
    method.to_http()
  }
}
