//! Wire types shared by the roomgate crates.
//!
//! `api` holds the HTTP request/response bodies, `grant` the claims embedded
//! in the access tokens handed to media clients.

pub mod api;
pub mod grant;
