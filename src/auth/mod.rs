//! Authentication module
//!
//! Bearer-token requests with a single refresh-and-retry on an expired
//! access token.
//!
//! The `Requester` owns its `Credentials` and is the only component that
//! rewrites the access token.

mod requester;
mod types;

pub use requester::{Requester, REFRESH_TOKEN_PATH};
pub use types::{
    AccessTokenListener, Credentials, UnauthorizedPolicy, INVALID_ACCESS_TOKEN,
    UNAUTHORIZED_STATUS_LINE,
};
