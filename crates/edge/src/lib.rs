//! Edge-side components of the EchoTrace verification loop
//!
//! This crate contains the endpoint logic that answers method invocations:
//! - [`RequestHandler`]: maps an inbound call to an outbound message carrying
//!   the same correlation token, with a 404 fallback for unknown methods
//! - [`ConnectionMonitor`]: state machine over transport connection events
//!   that decides recoverable vs fatal
//! - [`TransportProtocol`]: the configured transport selector

pub mod handler;
pub mod monitor;
pub mod transport;

pub use handler::{ChannelError, OutboundChannel, RequestHandler};
pub use monitor::{
    ConnectionEvent, ConnectionMonitor, ConnectionState, ExitTerminator, ProcessTerminator,
    StatusReason, RETRY_EXPIRED_EXIT_CODE,
};
pub use transport::TransportProtocol;
