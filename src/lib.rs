//! Haven SDK for Rust.
//!
//! Client-side models for the Haven chat platform's REST API: user
//! references, profiles, the authenticated account, and the direct-message
//! operations hanging off them.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use haven_sdk::{CreateMessage, HavenClient};
//!
//! #[tokio::main]
//! async fn main() -> haven_sdk::Result<()> {
//!     let client = HavenClient::new("Bot mytoken", None)?;
//!
//!     client
//!         .user(80351110224678912u64)
//!         .send(
//!             CreateMessage::new()
//!                 .content("your build finished")
//!                 .delete_after(Duration::from_secs(600)),
//!         )
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod asset;
pub mod builders;
pub mod channel;
pub mod client;
pub mod color;
pub mod error;
pub mod flags;
pub mod message;
pub mod rest;
pub mod snowflake;
pub mod types;
pub mod user;

pub use asset::{Asset, DefaultAvatar};
pub use builders::{CreateMessage, EmbedBuilder};
pub use channel::DmChannel;
pub use client::HavenClient;
pub use color::Color;
pub use error::{HavenError, Result};
pub use flags::{MessageFlags, UserFlags};
pub use message::Message;
pub use rest::{RestClient, Transport, UploadFile};
pub use snowflake::Snowflake;
pub use types::*;
pub use user::{CurrentUser, EditProfile, Patch, PartialUser, User};
