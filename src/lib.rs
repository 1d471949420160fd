//! Load-balancing dispatcher for translation backends.
//!
//! Each request is raced across several backends chosen by smooth weighted
//! round-robin; the first usable answer wins and the measured latency of every
//! completed attempt becomes that backend's next weight.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;
pub mod translate;

pub use config::DispatcherConfig;
pub use dispatch::{DispatchError, Dispatcher};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use translate::{
    HttpTransport, SingleBackend, TranslateRequest, TranslateResponse, TranslateService, Transport,
};
