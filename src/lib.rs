//! docsplice: rewrite documentation comments in a source tree in place.
//!
//! Two passes share this library:
//!
//! - **params**: turn `* name - description` lines inside a `* Parameters:`
//!   section into `* @param name description` ([`scanner`], [`params`]).
//! - **inject**: replace the doc blocks directly above a class or member
//!   declaration with content from a definition file ([`defs`], [`locate`],
//!   [`inject`], [`escape`]).
//!
//! Neither pass parses the host language; both work line by line on the
//! `/**`, `*/` and `* Parameters:` markers.

pub mod defs;
pub mod error;
pub mod escape;
pub mod inject;
pub mod locate;
pub mod params;
pub mod run;
pub mod scanner;
pub mod tree;
pub mod writer;

pub use error::{Error, Result};
