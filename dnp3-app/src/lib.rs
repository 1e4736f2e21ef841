//! DNP3 application-layer engine: APDU parsing, APDU composition, and the
//! outstation response context.
//!
//! The crate is organized around the flow of a read interaction. Incoming
//! bytes pass through [`parse`] into typed header callbacks; the outstation
//! side selects data through [`outstation`] and serializes fragments with
//! [`write`]. All of it runs synchronously against borrowed, in-memory
//! buffers.

pub mod error;
pub mod outstation;
pub mod parse;
pub mod write;

pub mod prelude {
    //! Single-import convenience for the common types.

    pub use dnp3_objects::measurement::{
        Analog, AnalogOutput, Binary, CommandStatus, ControlRelayOutputBlock, ControlStatus,
        Counter, DoubleBit, DoubleBitBinary, Flags, IndexedValue, SetpointStatus, Timestamp,
    };
    pub use dnp3_objects::{
        ControlField, FunctionCode, GroupVariation, IinField, QualifierCode,
    };

    pub use crate::error::{ParseError, WriteError};
    pub use crate::outstation::{
        ClassMask, EventBuffer, EventBufferConfig, EventClass, MemoryDatabase, ResponseContext,
        ResponseMode, ResponseTypes, StaticDatabase,
    };
    pub use crate::parse::{
        parse_headers, parse_read_headers, parse_request, parse_response, HeaderHandler,
        Request, Response,
    };
    pub use crate::write::Apdu;
}
