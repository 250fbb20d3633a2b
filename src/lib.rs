//! Deploys the GM contract suite (GMContract, ERC20TokenFactory, NFTFactory)
//! to an EVM network, one confirmed contract at a time.

pub mod chain;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod project;
