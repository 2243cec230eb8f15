//! Latest version policy and version bookkeeping for the pub package registry.
//!
//! The heart of this crate is [`should_update_latest`], which decides on every upload
//! whether the newly uploaded version replaces the latest version of its package:
//! releases always win over pre-releases, and otherwise the higher precedence wins.
//!
//! [`Publisher`] runs the whole upload sequence of parsing, duplicate detection,
//! the latest decision and the sort order of all versions inside a single
//! [`VersionRepository::transaction`].
//!
//! ## Examples
//!
//! ```rust
//! use pub_registry::{InMemoryRepository, Publisher};
//!
//! let publisher = Publisher::new(InMemoryRepository::new());
//! for version in &["1.2.3-pre2", "1.2.0", "1.2.3-pre9"] {
//!     publisher.publish("foo", version).unwrap();
//! }
//!
//! let latest = publisher.latest("foo").unwrap().unwrap();
//! assert_eq!(latest.to_string(), "1.2.0");
//! ```
#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    unused,
    while_true
)]

mod error;
mod latest;
mod publisher;
mod repository;

pub use error::{RegistryError, Result};
pub use latest::{select_latest, should_update_latest};
pub use publisher::{PublishOutcome, Publisher};
pub use repository::{InMemoryRepository, PackageState, PackageVersionRecord, VersionRepository};
