//! Types library for the piggy bank custody service
//!
//! Value types shared by the custody core and any host that drives it.
//!
//! # Modules
//! - `ids`: Principal and contract addresses
//! - `asset`: Native currency vs. external token
//! - `numeric`: Amount and time aliases
//! - `fee`: Bounded per-mille deposit fee
//! - `errors`: Error taxonomy

pub mod ids;
pub mod asset;
pub mod numeric;
pub mod fee;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::asset::*;
    pub use crate::numeric::*;
    pub use crate::fee::*;
    pub use crate::errors::*;
}
