//! Liquid-style tag preprocessing for Markdown documents.
//!
//! Documents may contain `{% name args %}` markers. Before the Markdown
//! renderer runs, each marker whose name is registered is replaced by the
//! output of its [`TagHandler`]. Markers with unknown names, and all other
//! text, are left untouched.
//!
//! # Architecture
//!
//! - [`find_markers`] scans the text for `{% ... %}` spans
//! - [`TagRegistry`] maps tag names to handlers; [`global`] is the
//!   process-wide instance
//! - [`Preprocessor`] runs one document pass against a registry
//! - [`EngineContext`] carries the resolved configuration and the
//!   [`HtmlStash`] for one pass
//!
//! # Example
//!
//! ```
//! use lqt_engine::{EngineContext, Preprocessor, TagError, TagRegistry};
//!
//! fn shout(_ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
//!     Ok(markup.to_uppercase())
//! }
//!
//! let mut registry = TagRegistry::new();
//! registry.register("shout", shout);
//!
//! let mut ctx = EngineContext::default();
//! let output = Preprocessor::new(&registry)
//!     .run("Say {% shout hello %}!", &mut ctx)
//!     .unwrap();
//! assert_eq!(output, "Say HELLO!");
//! ```

mod context;
mod error;
mod marker;
mod preprocessor;
mod registry;
mod stash;

pub use context::EngineContext;
pub use error::{PreprocessError, TagError};
pub use marker::{TagInvocation, TagMarker, find_markers};
pub use preprocessor::{Preprocessor, run};
pub use registry::{TagHandler, TagRegistry, global};
pub use stash::HtmlStash;
