//! OpenAPI, webhook, and WebRTC adapters: thin `Tool` implementations that
//! validate only at their own boundary (SSRF, path traversal) and dispatch
//! through a narrow transport trait, rather than reimplementing the full
//! command pipeline.

mod common;
mod openapi;
mod transport;
mod webhook;
mod webrtc;

pub use openapi::{OpenApiCall, OpenApiTool};
pub use transport::{HttpResponse, OpenApiTransport, ReqwestTransport, TransportError, WebhookTransport};
pub use webhook::{WebhookCall, WebhookTool};
pub use webrtc::{PeerConnectionPool, PooledConnection, WebRtcCall, WebRtcTool};
