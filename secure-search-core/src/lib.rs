// Core HTTP plumbing for the secure search application
// Request/response types, routing, the hyper server loop, forms, cookies and logging

pub mod cookie;
pub mod error;
pub mod form;
pub mod http;
pub mod logging;
pub mod routing;
pub mod server;

pub use cookie::{SameSite, SetCookie, parse_cookie_header};
pub use error::*;
pub use form::*;
pub use http::*;
pub use routing::{HandlerFn, HandlerFuture, Route, Router};
pub use server::{MAX_BODY_BYTES, Server, error_response};
