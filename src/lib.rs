//! Job Dash - Cluster Console Region Subsystem
//!
//! Job Dash is the client-side core of a cluster-management console for a
//! job scheduler. This crate owns the one piece of real state in that
//! console: which cluster region the UI is operating against, and whether
//! that choice must be reflected in the current URL, in persisted storage,
//! and in outgoing API requests.
//!
//! # Core Features
//!
//! - **Region Context Management**: single source of truth for the active
//!   region, with URL-parameter, persisted-storage, and default resolution
//! - **Clean URLs**: the `region` query parameter only appears for
//!   non-default regions, keeping the common case bookmarkable and tidy
//! - **Request Augmentation**: outgoing API requests carry `region=<id>`
//!   unless the endpoint is region-agnostic or the active region is default
//! - **Presentation Contracts**: view-models for the navbar region switcher
//!   and page title, consumed by whatever shell renders the console
//!
//! # Architecture Overview
//!
//! The crate follows a layered architecture with clear separation of concerns:
//!
//! - **State Core** ([`app::region_context`], [`app::regions`]): the region
//!   context manager and the registry it resolves against
//! - **Persistence** ([`app::storage`]): injectable key-value storage, the
//!   localStorage analog of the console
//! - **Integration Layer** ([`app::api_client`], [`app::url_state`]):
//!   request-URL construction and URL query synchronization
//! - **Presentation Contracts** ([`app::navbar`]): data the rendering shell
//!   consumes; no rendering happens here
//!
//! # Getting Started
//!
//! The main entry point is [`app::region_context::RegionContext`], created at
//! console start and passed by reference into the presentation and request
//! layers. See [`app`] for the module map.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub use app::region_context::RegionContext;
