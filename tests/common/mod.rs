//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{page_context, TestServer, BACH_ID};
//! use classical_catalog_admin::pages::CompositionsPage;
//!
//! #[tokio::test]
//! async fn test_bach_compositions() {
//!     let server = TestServer::spawn().await;
//!     let mut page = CompositionsPage::new(page_context(&server.base_url, true));
//!     page.mount().await;
//!     page.filter_by_composer(Some(BACH_ID)).await;
//!     assert_eq!(page.compositions.len(), 2);
//! }
//! ```

#![allow(dead_code)]

mod client;
mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
pub use client::{api_client, image_host_client, page_context, page_context_with_store};
pub use constants::*;
pub use server::TestServer;
