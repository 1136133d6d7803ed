//! Hardware Abstraction Layer.
//!
//! The signal timer depends only on the two capabilities below. ESP-IDF
//! implementations live in the submodules and are only built for the target;
//! tests and the host simulation provide their own.

pub mod gpio;
pub mod timer;

pub use gpio::TriggerOutput;
pub use timer::AlarmTimer;
