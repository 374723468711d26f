//! Identification of the caller.
//!
//! There is no authentication: the caller names itself in the `X-User-Id`
//! header, which is recorded in the history log and checked against the
//! admin allow-list for history reads.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::domain::types::UserId;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// User on whose behalf a request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser(pub UserId);

impl ActingUser {
    pub fn id(&self) -> &UserId {
        &self.0
    }

    fn from_header(value: Option<&str>) -> Self {
        Self(
            value
                .and_then(|v| UserId::new(v).ok())
                .unwrap_or_else(UserId::system),
        )
    }
}

impl FromRequest for ActingUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        ready(Ok(Self::from_header(header)))
    }
}
