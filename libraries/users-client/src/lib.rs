//! Users Client
//!
//! Client side of the users service: an HTTP client for the REST API and
//! the view model the web interface is built on.
//!
//! # Features
//!
//! - **API client**: list, get, create, update and delete users; health check
//! - **View state**: one immutable snapshot per screen, changed only through
//!   `ViewState::apply`
//! - **Rendering**: markup produced from a snapshot, with every user-supplied
//!   string escaped
//! - **Polling**: independent health and list refresh timers
//!
//! # Example
//!
//! ```ignore
//! use users_client::{ClientConfig, Controller, UsersClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UsersClient::new(ClientConfig::new("http://localhost:3001"))?;
//!     let mut controller = Controller::new(client);
//!
//!     controller.check_health().await;
//!     controller.refresh().await;
//!     println!("{}", users_client::render::render_users(controller.state()));
//!
//!     Ok(())
//! }
//! ```

mod client;
mod controller;
mod error;
mod form;
pub mod poller;
pub mod render;
mod types;
mod view;

// Re-export main types
pub use client::UsersClient;
pub use controller::Controller;
pub use error::{ClientError, Result};
pub use form::validate_form;
pub use poller::{spawn_polling, PollIntervals, PollingHandle};
pub use types::{ClientConfig, HealthStatus, UserList};
pub use view::{
    Action, Banner, BannerKind, Field, FormValues, Mode, PendingDelete, SubmitFailure, ViewState,
};
