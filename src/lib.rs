//! # Degreed - an authenticated client for the Degreed content API
//!
//! Turns typed operations (create, list, update, delete a course) into
//! JSON:API requests with bearer auth, and turns every response into either a
//! [`Response`] or a classified [`Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use degreed::{Client, NewCourse};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), degreed::Error> {
//!     let client = Client::new("someoauthtoken")?;
//!
//!     let created = client
//!         .courses()
//!         .create(
//!             NewCourse::new()
//!                 .title("New Course")
//!                 .summary("A Summary")
//!                 .external_id("arstaroisen")
//!                 .url("https://dev.lessonly.com")
//!                 .duration(200)
//!                 .duration_type("Seconds"),
//!         )
//!         .await?;
//!     println!("Created: {}", created.body()?["data"]["id"]);
//!
//!     let found = client.courses().all(Some("arstaroisen")).await?;
//!     println!("Found: {}", found.body()?["data"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Status codes are classified the same way for every resource and verb:
//! 400, 401 and 403 get their own variants, other 4xx become
//! [`Error::ClientError`], 5xx become [`Error::ServerError`]. The message is
//! always `HTTP code: <code>, message: <error.message from the body>`.
//!
//! ```no_run
//! use degreed::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("someoauthtoken")?;
//! match client.courses().destroy("foo").await {
//!     Ok(response) => println!("Deleted ({})", response.code()),
//!     Err(Error::Unauthorized(details)) => eprintln!("Re-authenticate: {}", details),
//!     Err(e) if e.is_validation() => eprintln!("Bad input: {}", e),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Nothing is retried. A 5xx is returned immediately; retry policy belongs to
//! the caller.

mod classify;
mod client;
pub mod config;
pub mod content;
mod error;
pub mod jsonapi;
pub mod metadata;
mod request;
mod response;
mod transport;

pub use classify::Classification;
pub use client::{Client, ClientBuilder, TOKEN_ENV};
pub use config::Config;
pub use content::{CourseAttributes, Courses, IntegerParam, NewCourse};
pub use error::{Error, ErrorResponse, Result};
pub use request::Request;
pub use response::Response;
pub use transport::{HttpTransport, HttpTransportBuilder, RawResponse, Transport};
