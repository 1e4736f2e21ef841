//! Atomic types of the DNP3 application layer.
//!
//! Function codes, the application control octet, the IIN field, qualifier
//! codes, the group/variation registry, and the measurement value types with
//! their per-variation wire encodings. The parser and writer in `dnp3-app`
//! are built on top of these.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

mod control;
mod function;
mod iin;
mod qualifier;

pub mod measurement;
pub mod objects;
pub mod variation;

pub use control::ControlField;
pub use function::FunctionCode;
pub use iin::IinField;
pub use qualifier::QualifierCode;
pub use variation::{
    EventAnalogVariation, EventBinaryVariation, EventCounterVariation, GroupVariation,
    GroupVariationRecord, StaticAnalogVariation, StaticBinaryVariation,
    StaticControlStatusVariation, StaticCounterVariation, StaticSetpointStatusVariation,
};
