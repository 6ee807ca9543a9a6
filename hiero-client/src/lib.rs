mod agents;
pub mod client;
pub mod config;
mod services;
pub mod signer;
pub mod signing;

pub use client::HieroClient;
pub use config::ClientConfig;
pub use signer::{recover_address, WalletSigner};
pub use signing::{canonical_message, sign_request, SignedRequest};

pub use hiero_protocol as protocol;
