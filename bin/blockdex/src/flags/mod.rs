//! CLI flags.

mod globals;
pub use globals::GlobalArgs;

mod retry;
pub use retry::RetryArgs;

mod rpc;
pub use rpc::RpcArgs;

mod store;
pub use store::StoreArgs;
