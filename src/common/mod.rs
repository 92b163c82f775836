// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod command;
pub mod crc;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod resource;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From address.rs
pub use address::BusAddress;

// From command.rs
pub use command::Command;

// From crc.rs
pub use crc::{calculate_crc8, encode_word, verify_word};

// From error.rs
pub use error::Shtc3Error;

// From frame.rs
pub use frame::{IdentityFrame, MeasurementFrame, IDENTITY_FRAME_LEN, MEASUREMENT_FRAME_LEN};

// From hal_traits.rs
pub use hal_traits::{Shtc3Bus, Shtc3Timer};

// From resource.rs
pub use resource::{Claim, ResourceError, ResourceId, ResourceRegistry};

// From types.rs
pub use types::{Identity, Measurement, PowerMode, RawSample};

// From timing.rs (constants - users can access via common::timing::*)
