/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Reference resolution and caching.
//!
//! Given the keys a document cites, this crate fills a [`ReferenceStore`]
//! from a local cache, two network sources (a short-form Specref-style
//! source and a long-form Crossref-style DOI source) and the author's local
//! overrides, in that order of increasing precedence.
//!
//! # Example
//!
//! ```rust,no_run
//! use biblio_resolver::{ReferenceRequest, ReferenceStore, ResolveOptions, Resolver, ResolverConfig};
//!
//! # async fn run() -> Result<(), biblio_resolver::ResolverError> {
//! let resolver = Resolver::from_config(&ResolverConfig::default()).await?;
//! let store = ReferenceStore::new();
//! let mut request = ReferenceRequest::new(["RFC2119"], ["HTML", "doi:10.1145/3133956"]);
//! let report = resolver.resolve(&mut request, &store, ResolveOptions::default()).await?;
//! assert!(store.is_ready());
//! println!("unresolved: {:?}", report.unresolved);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod source;
pub mod store;

pub use cache::{CacheBackend, CacheGateway, CacheRecord, FileCache, MemoryCache};
pub use config::{CacheConfig, ResolverConfig, SourcesConfig};
pub use error::ResolverError;
pub use orchestrator::{ReferenceRequest, ResolutionReport, ResolveOptions, Resolver};
pub use source::{CrossrefSource, FetchedBatch, MetadataSource, SpecrefSource};
pub use store::{ReferenceStore, StoreState};
