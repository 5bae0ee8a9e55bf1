//! Buffered responses and body decoding

use bytes::Bytes;
use gamestore_common::JsonBody;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{E2eError, E2eResult};

/// A response whose body has been read off the wire exactly once.
///
/// The status stays readable whatever happens to the body. Decoding consumes
/// the response and the type is not `Clone`, so each body is decoded at most
/// once.
#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Drain a live response. The connection is released before this returns.
    pub(crate) async fn read(response: reqwest::Response) -> E2eResult<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Assemble a response from parts, e.g. for replaying recorded bodies
    pub fn from_parts(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, for diagnostics
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fail with an assertion error unless the status matches
    pub fn check_status(&self, expected: StatusCode) -> E2eResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(E2eError::UnexpectedStatus {
                expected,
                actual: self.status,
            })
        }
    }

    /// [`ApiResponse::check_status`], passing the response on for decoding
    pub fn expect_status(self, expected: StatusCode) -> E2eResult<Self> {
        self.check_status(expected)?;
        Ok(self)
    }

    /// Decode the body as an open JSON mapping
    pub fn json(self) -> E2eResult<JsonBody> {
        let status = self.status;
        match JsonBody::from_slice(&self.body) {
            Ok(body) => Ok(body),
            Err(gamestore_common::Error::Serialization(source)) => {
                Err(E2eError::Decode { status, source })
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Decode the body as a typed record. A body that is not JSON fails like
    /// [`ApiResponse::json`]; a JSON body of the wrong shape fails as a field
    /// error against the document root.
    pub fn typed<T: DeserializeOwned>(self) -> E2eResult<T> {
        Ok(self.json()?.decode()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use gamestore_common::Cart;

    #[test]
    fn test_decode_failure_keeps_status() {
        let response = ApiResponse::from_parts(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let err = response.json().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(matches!(err, E2eError::Decode { status, .. } if status == StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_truncated_body_is_decode_error() {
        let response = ApiResponse::from_parts(StatusCode::OK, r#"{"items": [{"item_uuid": "#);
        let err = response.typed::<Cart>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_typed_cart() {
        let response = ApiResponse::from_parts(
            StatusCode::OK,
            r#"{"items":[{"item_uuid":"g-1","quantity":2,"total_price":40}],"total_price":40,"user_uuid":"u-1"}"#,
        );
        let cart: Cart = response.typed().unwrap();
        assert_eq!(cart.total_price, 40);
        assert!(cart.contains("g-1"));
    }

    #[test]
    fn test_expect_status() {
        let response = ApiResponse::from_parts(StatusCode::NOT_FOUND, "{}");
        let err = response.check_status(StatusCode::OK).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Assertion);

        assert!(response.expect_status(StatusCode::NOT_FOUND).is_ok());
    }

    #[test]
    fn test_typed_shape_mismatch_names_root() {
        let response = ApiResponse::from_parts(
            StatusCode::OK,
            r#"{"items":[],"total_price":"free","user_uuid":"u-1"}"#,
        );
        let err = response.typed::<Cart>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.field(), Some(gamestore_common::ROOT_FIELD));
    }
}
