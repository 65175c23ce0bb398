// ── Auth/session gate ──

mod gate;
mod manager;
mod token;

pub use gate::{GateDecision, RETURN_TARGET_PARAM, RouteGate, RouteTable};
pub use manager::Session;
pub use token::decode_identity;
