// Backend gateway - wire client for the external chat service
mod client;

pub use client::{BackendGateway, ChatReply, GatewayError};
