pub mod port;
pub mod registry;

pub use port::{port, InputPort, OutputPort, Port, Subscription};
pub use registry::SubscriberId;
