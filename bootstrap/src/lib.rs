//! keel-bootstrap - 统一服务启动骨架
//!
//! 所有服务复用的启动逻辑

mod components;
mod infrastructure;
mod lifecycle;
pub mod reflection;
mod runtime;
mod shutdown;
mod starter;

pub use components::*;
pub use infrastructure::*;
pub use lifecycle::*;
pub use runtime::*;
pub use shutdown::*;
pub use starter::*;
