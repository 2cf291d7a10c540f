//! ENS name, address, and profile resolution over raw `eth_call`.
//!
//! This crate resolves human-readable ENS names to addresses and profile
//! metadata (avatar, url, social handles, arbitrary text records) and
//! reverse-resolves addresses back to their primary name. It talks to the
//! on-chain ENS Registry and resolver contracts through a minimal
//! `call(to, data) -> bytes` capability, so any JSON-RPC endpoint works and
//! tests can inject a mock transport.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ensolve::EnsClient;
//!
//! # async fn example() -> ensolve::Result<()> {
//! let ens = EnsClient::new("https://eth.llamarpc.com")?;
//!
//! // Name or address — the client dispatches on shape.
//! let resolution = ens.resolve("alice.eth", None).await;
//! println!("{:?}", resolution.profile.address);
//!
//! let name = ens.reverse_lookup("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").await?;
//! println!("{name:?}");
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//!
//! Resolution misses (no resolver, no record, transport failures after
//! retries) are modeled as absence, never as errors. Only programming
//! contract violations — an unparseable address, a bad endpoint URL — surface
//! as [`EnsError`].

pub mod abi;
mod client;
pub mod config;
mod error;
pub mod gateway;
mod hydrate;
pub mod name;
mod profile;
mod records;
mod registry;
mod reverse;

pub use client::{EnsClient, Resolution};
pub use config::Config;
pub use error::{EnsError, Result};
pub use gateway::{CallGateway, RetryConfig, http::HttpGateway};
pub use profile::{DEFAULT_RECORDS, Profile, ProfileField};
pub use registry::ResolverBinding;
