//! One-shot status messages carried to the next rendered page in a signed cookie.

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, Key, SameSite, SignedCookieJar};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Cookie holding pending messages.
pub const FLASH_COOKIE: &str = "inventory_flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        FlashMessage {
            level,
            message: message.into(),
        }
    }
}

fn encode(messages: &[FlashMessage]) -> Option<String> {
    serde_json::to_vec(messages).ok().map(|json| URL_SAFE_NO_PAD.encode(json))
}

fn decode(value: &str) -> Option<Vec<FlashMessage>> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn flash_cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Pending flash messages for this request.
///
/// Use [`Flashes::push`] before redirecting and [`Flashes::take`] when
/// rendering a page; both return the jar that must be part of the response.
pub struct Flashes {
    jar: SignedCookieJar,
    pending: Vec<FlashMessage>,
    /// The request carried a flash cookie, verified or not.
    sent: bool,
}

impl Flashes {
    pub fn from_jar(jar: SignedCookieJar) -> Self {
        let sent = jar.get(FLASH_COOKIE).is_some();
        Self::with_sent(jar, sent)
    }

    fn with_sent(jar: SignedCookieJar, sent: bool) -> Self {
        let pending = match jar.get(FLASH_COOKIE) {
            Some(c) => decode(c.value()).unwrap_or_else(|| {
                tracing::debug!("discarding undecodable flash cookie");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Flashes { jar, pending, sent }
    }

    pub fn pending(&self) -> &[FlashMessage] {
        &self.pending
    }

    /// Queue a message for the next rendered page.
    pub fn push(mut self, level: FlashLevel, message: impl Into<String>) -> SignedCookieJar {
        self.pending.push(FlashMessage::new(level, message));
        match encode(&self.pending) {
            Some(value) => self.jar.add(flash_cookie(value)),
            None => self.jar,
        }
    }

    /// Consume every pending message and expire whatever flash cookie the
    /// browser sent, including one whose signature did not verify.
    pub fn take(self) -> (SignedCookieJar, Vec<FlashMessage>) {
        if !self.sent {
            return (self.jar, self.pending);
        }
        let mut expired = flash_cookie(String::new());
        expired.make_removal();
        (self.jar.add(expired), self.pending)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sent = CookieJar::from_headers(&parts.headers).get(FLASH_COOKIE).is_some();
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Flashes::with_sent(jar, sent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Flashes {
        Flashes::from_jar(SignedCookieJar::new(Key::generate()))
    }

    #[test]
    fn messages_round_trip_through_cookie_value() {
        let msgs = vec![
            FlashMessage::new(FlashLevel::Error, "Item name is required."),
            FlashMessage::new(FlashLevel::Info, "Item deleted."),
        ];
        let value = encode(&msgs).unwrap();
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode(&value).unwrap(), msgs);
    }

    #[test]
    fn garbage_is_not_decoded() {
        assert!(decode("%%%").is_none());
        assert!(decode(&URL_SAFE_NO_PAD.encode(b"not json")).is_none());
    }

    #[test]
    fn push_then_read_back() {
        let jar = empty().push(FlashLevel::Success, "Item added successfully!");
        let flashes = Flashes::from_jar(jar);
        assert_eq!(
            flashes.pending(),
            &[FlashMessage::new(FlashLevel::Success, "Item added successfully!")]
        );
        let (jar, taken) = flashes.take();
        assert_eq!(taken.len(), 1);
        let expired = jar.get(FLASH_COOKIE).unwrap();
        assert_eq!(expired.value(), "");
        assert!(expired.to_string().contains("Max-Age=0"));
    }

    #[test]
    fn unverified_cookie_is_still_expired() {
        let (jar, taken) = Flashes::with_sent(SignedCookieJar::new(Key::generate()), true).take();
        assert!(taken.is_empty());
        assert!(jar.get(FLASH_COOKIE).unwrap().to_string().contains("Max-Age=0"));
    }

    #[test]
    fn take_without_cookie_is_empty() {
        let (jar, taken) = empty().take();
        assert!(taken.is_empty());
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn levels_serialize_lowercase() {
        let json = serde_json::to_string(&FlashMessage::new(FlashLevel::Error, "x")).unwrap();
        assert_eq!(json, r#"{"level":"error","message":"x"}"#);
    }
}
