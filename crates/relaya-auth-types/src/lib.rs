//! Bearer-token types shared across Relaya services.
//!
//! Provides JWT validation and the [`identity::Identity`] extractor, which
//! resolves a bearer credential from query parameter, cookie, or header —
//! in that priority order.

pub mod identity;
pub mod token;
