pub mod helius;
pub mod rpc;
pub mod source;

#[cfg(test)]
pub(crate) mod scripted;

pub use helius::HeliusClient;
pub use rpc::{JsonRpcRequest, JsonRpcResponse};
pub use source::{ChainDataSource, LAMPORTS_PER_SOL};
