pub mod gateway;
pub mod relay_service;

pub use gateway::SerenityGateway;
pub use relay_service::{ChatGateway, PeerPingTrigger, RelayChannel, RelayError, RelayTrigger};
