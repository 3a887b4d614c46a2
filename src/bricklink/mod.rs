//! BrickLink store API (v1) client for price guide lookups

mod client;
mod oauth;
mod price_guide;

pub use client::{BricklinkClient, DEFAULT_BASE_URL, DEFAULT_REQUEST_DELAY};
pub use oauth::{authorization_header, generate_nonce, signature_base_string, sign};
pub use price_guide::PriceGuide;
