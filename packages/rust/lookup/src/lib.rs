//! PHP manual lookups for the `docs` chat command.
//!
//! This crate provides:
//! - [`aliases`]: Static answers for operators, keywords and superglobals
//! - [`extractors`]: Page classification and per-shape content extraction
//! - [`fetch`]: The HTTP seam ([`Fetcher`], [`HttpFetcher`]) and URL building
//! - [`resolver`]: The cascade from alias table to remote lookup
//! - [`command`]: The `docs` command wrapper

pub mod aliases;
pub mod command;
pub mod extractors;
pub mod fetch;
pub mod message;
pub mod normalize;
pub mod resolver;
pub mod search;
pub mod shortcut;

pub use aliases::{AliasEntry, AliasTable, candidates};
pub use command::{COMMAND_NAME, Command, DocsCommand};
pub use extractors::{ExtractionResult, Extractor, MissingHeading, PageShape};
pub use fetch::{Fetcher, HttpFetcher, LookupResponse, ManualUrls};
pub use normalize::{normalize_query, normalize_text};
pub use resolver::DocsResolver;
