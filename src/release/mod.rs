//! Release resolution for GoReleaser distributions
//!
//! Turns a user-supplied version specifier into a concrete release tag published in the
//! GoReleaser release feed, and checks the tag really exists there.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Resolver   │────▶│  Tag index  │────▶│ FeedClient  │
//! │ (classify)  │     │  (loader)   │     │   (fetch)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       ▲
//!        ▼                                       │
//! ┌─────────────┐                                │
//! │    Range    │        verification ───────────┘
//! │ (match tag) │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`resolver`]: specifier classification, matching and verification
//! - [`tags`]: loads and cleans the tag index of a distribution
//! - [`range`]: npm-style range grammar and `max_satisfying`
//! - [`semver`]: loose version parsing and tag cleaning helpers
//! - [`feed`]: `FeedClient` trait for fetching the release feed
//! - [`feeds`]: concrete feed clients (HTTP)
//! - [`error`]: error types for fetching and resolution
//! - [`types`]: `Release` and `Distribution`

pub mod error;
pub mod feed;
pub mod feeds;
pub mod range;
pub mod resolver;
pub mod semver;
pub mod tags;
pub mod types;
