//! HTTP shell for the analytics tools. Thin by design: handlers fetch
//! through the injected [`ProfileSource`], call into the pure analytics
//! crate, and wrap every outcome in the response envelope.

pub mod source;
pub mod tools;

use std::sync::Arc;

use hopsight_analytics::ProfileSource;
use hopsight_common::Config;

pub struct AppState {
    pub source: Arc<dyn ProfileSource>,
    pub config: Config,
}
