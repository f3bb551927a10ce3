//! # sovran-mapparams
//!
//! Typed accessors over loosely-typed argument maps.
//!
//! Background jobs usually receive their arguments as a string-keyed map of
//! dynamic values, often straight out of a JSON decoder. `sovran-mapparams`
//! lets a job read those arguments as concrete types without checking an
//! error after every single read: each accessor returns a zero value on
//! failure and records what went wrong, so the caller checks once at the end.
//!
//! ## Key Features
//!
//! - **Deferred errors**: Read a batch of arguments, then check one error
//! - **Numeric coercion**: Integers and floats convert into each other when it is safe
//! - **Read-only**: The wrapped map is never modified
//! - **JSON ready**: Decode argument maps directly with `serde_json`
//!
//! ## Usage Examples
//!
//! ### Batch-then-check
//!
//! ```rust
//! use sovran_mapparams::Params;
//!
//! # #[cfg(feature = "json")]
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let params = Params::from_json_str(
//!         r#"{"recipient": "ops@example.com", "attempt": 2, "urgent": false}"#,
//!     )?;
//!
//!     let mut args = params.accessor();
//!     let recipient = args.string("recipient");
//!     let attempt = args.int64("attempt");
//!     let urgent = args.bool("urgent");
//!     args.finish()?;
//!
//!     println!("sending to {} (attempt {}, urgent: {})", recipient, attempt, urgent);
//!     Ok(())
//! }
//! # #[cfg(not(feature = "json"))]
//! # fn main() {}
//! ```
//!
//! ### Only the last error is kept
//!
//! ```rust
//! use sovran_mapparams::{Params, ParamError};
//!
//! let params: Params = [("name", "nightly")].into_iter().collect();
//! let mut args = params.accessor();
//!
//! args.string("missing1");
//! args.bool("missing2");
//! args.string("name");
//!
//! match args.error() {
//!     Some(ParamError::MissingKey { key, expected }) => {
//!         assert_eq!(key, "missing2");
//!         assert_eq!(*expected, "bool");
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ### Checking each read
//!
//! The `try_*` accessors return the failure directly and leave the recorded
//! error alone.
//!
//! ```rust
//! use sovran_mapparams::{Params, ParamError};
//!
//! let params: Params = [("ratio", 3.5)].into_iter().collect();
//! let args = params.accessor();
//!
//! assert_eq!(args.try_float64("ratio"), Ok(3.5));
//! match args.try_int64("ratio") {
//!     Err(ParamError::TypeMismatch { actual, value, .. }) => {
//!         assert_eq!(actual, "float64");
//!         assert_eq!(value, "3.5");
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! assert!(args.error().is_none());
//! ```

mod error;
mod params;
mod value;


pub use error::ParamError;
pub use params::{MapParams, Params, MAX_SAFE_FLOAT_INT};
pub use value::Value;
