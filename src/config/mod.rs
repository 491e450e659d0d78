//! Layered runtime configuration.
//!
//! The effective configuration is resolved in layers, lowest to highest:
//! 1. **Defaults** - literal values compiled into [`types`]
//! 2. **Environment** - one dedicated variable per leaf, read once at
//!    construction ([`Config::from_env`])
//! 3. **Override file** - JSON at `server.user-config-file` (default
//!    `./iamus.json`; may be an `http://`/`https://` URL), deep-merged
//!    over the tree
//!
//! followed by derived values (version metadata, self-detected network
//! identity, URL normalization) and publication of the client-visible
//! subset. See [`ConfigResolver`] for the pipeline.

mod env;
mod merge;
mod publish;
mod resolver;
mod source;
mod types;

pub use env::apply_env_overrides;
pub use merge::{deep_merge, deep_merge_all};
pub use publish::{publish_subset, StaticSubset};
pub use resolver::ConfigResolver;
pub use source::read_source;
pub use types::*;
