//! Access-token verification.
//!
//! Identities are issued by the hosted auth provider; this service only
//! verifies their HS256 access tokens ([`jwt`]).

pub mod jwt;
