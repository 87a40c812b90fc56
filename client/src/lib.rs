//! Marketplace client
//!
//! Client-side layer of the marketplace app: typed access to the REST backend
//! and the controllers behind the business profile editor, settings, dashboard
//! and demo chat screens.

pub mod config;
pub mod controllers;
pub mod error;
pub mod external;
pub mod session;
pub mod share;
pub mod telemetry;

pub use config::Config;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use external::{HttpApiClient, MarketplaceApi, Resource};
pub use session::Session;
pub use share::ShareLink;
