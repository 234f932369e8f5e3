//! A vendored copy of the `mime-db` media type database.
//!
//! The table is embedded at build time and parsed once, on first access, into
//! an immutable [`MediaTypeRegistry`]. Lookups are exact: callers lowercase and
//! strip parameters from a media type before asking for it, and decide for
//! themselves what to do on a miss.
//!
//! ```
//! let json = mime_db::get("application/json").unwrap();
//! assert_eq!(json.preferred_extension(), Some("json"));
//! assert!(mime_db::get("application/does-not-exist").is_none());
//! ```

mod builtin;
mod defines;
mod error;
mod record;
mod registry;
mod types;
mod util;

pub use builtin::*;
pub use error::*;
pub use record::*;
pub use registry::*;
pub use types::*;
