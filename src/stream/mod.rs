pub mod codec;
pub mod driver;
pub mod exchange;
pub mod link;

pub use codec::{bin_frequency, decode_magnitudes, encode_samples, split_le};
pub use driver::{BatchDriver, FrameReport};
pub use exchange::{Consumer, FrameExchange, FrameGuard, Producer, Push};
pub use link::{Monotonic, SerialTx};
