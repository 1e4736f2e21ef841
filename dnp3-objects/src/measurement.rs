//! Measurement value types carried by object payloads.

use dnp3_types::bytes::U48_MAX;

bitflags::bitflags! {
    /// Quality flags of a measurement.
    ///
    /// The low seven bits share their meanings across measurement kinds;
    /// bit 7 doubles as the packed state bit of binary encodings, so the
    /// per-variation codecs strip it on read and reassemble it on write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Flags: u8 {
        /// The point is being actively scanned.
        const ONLINE = 0x01;
        /// The value has not been updated since restart.
        const RESTART = 0x02;
        /// Communication with the originating device is lost.
        const COMM_LOST = 0x04;
        /// The value was forced at a remote station.
        const REMOTE_FORCED = 0x08;
        /// The value was forced at the outstation.
        const LOCAL_FORCED = 0x10;
        /// Rapid state changes were filtered out.
        const CHATTER_FILTER = 0x20;
        /// A counter discontinuity occurred.
        const DISCONTINUITY = 0x40;
        /// The packed state bit of binary encodings.
        const STATE = 0x80;
    }
}

/// A 48-bit millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// Largest representable timestamp.
    pub const MAX: Self = Self(U48_MAX);

    /// Create a timestamp from milliseconds, keeping the low 48 bits.
    pub const fn new(milliseconds: u64) -> Self {
        Self(milliseconds & U48_MAX)
    }

    /// Milliseconds since the DNP3 epoch.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

/// A decoded value paired with its point index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexedValue<T> {
    /// The point index.
    pub index: u32,
    /// The decoded value.
    pub value: T,
}

impl<T> IndexedValue<T> {
    /// Pair a value with its index.
    pub const fn new(index: u32, value: T) -> Self {
        Self { index, value }
    }

    /// Transform the value, keeping the index.
    pub fn map<U>(self, map: impl FnOnce(T) -> U) -> IndexedValue<U> {
        IndexedValue::new(self.index, map(self.value))
    }
}

/// A single-bit input point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary {
    /// The input state.
    pub value: bool,
    /// Quality flags.
    pub flags: Flags,
    /// Time of the transition, when the encoding carries one.
    pub time: Option<Timestamp>,
}

impl Binary {
    /// A binary value with the given flags and no time.
    pub const fn new(value: bool, flags: Flags) -> Self {
        Self {
            value,
            flags,
            time: None,
        }
    }

    /// Attach a transition time.
    pub const fn with_time(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }
}

impl From<bool> for Binary {
    /// The conversion applied to packed single-bit arrays, which carry no
    /// quality of their own.
    fn from(value: bool) -> Self {
        Self::new(value, Flags::ONLINE)
    }
}

/// The four states of a double-bit input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DoubleBit {
    /// The point is between states.
    Intermediate = 0b00,
    /// Determined to be off.
    DeterminedOff = 0b01,
    /// Determined to be on.
    DeterminedOn = 0b10,
    /// The state cannot be determined.
    Indeterminate = 0b11,
}

impl DoubleBit {
    /// Decode from the low two bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Intermediate,
            0b01 => Self::DeterminedOff,
            0b10 => Self::DeterminedOn,
            _ => Self::Indeterminate,
        }
    }

    /// The two-bit encoding.
    pub const fn bits(&self) -> u8 {
        *self as u8
    }
}

/// A double-bit input point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoubleBitBinary {
    /// The input state.
    pub value: DoubleBit,
    /// Quality flags.
    pub flags: Flags,
    /// Time of the transition, when the encoding carries one.
    pub time: Option<Timestamp>,
}

impl DoubleBitBinary {
    /// A double-bit value with the given flags and no time.
    pub const fn new(value: DoubleBit, flags: Flags) -> Self {
        Self {
            value,
            flags,
            time: None,
        }
    }
}

impl From<DoubleBit> for DoubleBitBinary {
    fn from(value: DoubleBit) -> Self {
        Self::new(value, Flags::ONLINE)
    }
}

/// An analog input point. Values are carried as `f64` regardless of the
/// wire encoding; integer encodings saturate on write.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analog {
    /// The measured value.
    pub value: f64,
    /// Quality flags.
    pub flags: Flags,
    /// Time of the measurement, when the encoding carries one.
    pub time: Option<Timestamp>,
}

impl Analog {
    /// An analog value with the given flags and no time.
    pub const fn new(value: f64, flags: Flags) -> Self {
        Self {
            value,
            flags,
            time: None,
        }
    }

    /// Attach a measurement time.
    pub const fn with_time(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }
}

/// A counter point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counter {
    /// The accumulated count.
    pub value: u32,
    /// Quality flags.
    pub flags: Flags,
    /// Time of the count, when the encoding carries one.
    pub time: Option<Timestamp>,
}

impl Counter {
    /// A counter value with the given flags and no time.
    pub const fn new(value: u32, flags: Flags) -> Self {
        Self {
            value,
            flags,
            time: None,
        }
    }

    /// Attach a measurement time.
    pub const fn with_time(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }
}

/// The reported state of a binary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlStatus {
    /// The output state.
    pub value: bool,
    /// Quality flags.
    pub flags: Flags,
}

impl ControlStatus {
    /// A control status with the given flags.
    pub const fn new(value: bool, flags: Flags) -> Self {
        Self { value, flags }
    }
}

impl From<bool> for ControlStatus {
    /// The conversion applied to packed single-bit arrays.
    fn from(value: bool) -> Self {
        Self::new(value, Flags::ONLINE)
    }
}

/// The reported state of an analog output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetpointStatus {
    /// The output value.
    pub value: f64,
    /// Quality flags.
    pub flags: Flags,
}

impl SetpointStatus {
    /// A setpoint status with the given flags.
    pub const fn new(value: f64, flags: Flags) -> Self {
        Self { value, flags }
    }
}

/// Status byte of a command object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CommandStatus {
    /// The command was accepted.
    Success = 0,
    /// The operate arrived after the select timed out.
    Timeout = 1,
    /// No matching select preceded the operate.
    NoSelect = 2,
    /// The request was malformed.
    FormatError = 3,
    /// The control operation is not supported for the point.
    NotSupported = 4,
    /// The point is already active.
    AlreadyActive = 5,
    /// A hardware problem prevented the operation.
    HardwareError = 6,
    /// The point is under local control.
    Local = 7,
    /// Too many operations are in progress.
    TooManyOps = 8,
    /// The requester is not authorized.
    NotAuthorized = 9,
    /// Any status not listed above.
    Unknown = 127,
}

impl From<u8> for CommandStatus {
    fn from(byte: u8) -> Self {
        use CommandStatus::*;
        match byte {
            0 => Success,
            1 => Timeout,
            2 => NoSelect,
            3 => FormatError,
            4 => NotSupported,
            5 => AlreadyActive,
            6 => HardwareError,
            7 => Local,
            8 => TooManyOps,
            9 => NotAuthorized,
            _ => Unknown,
        }
    }
}

/// A control relay output block (group 12 variation 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlRelayOutputBlock {
    /// The control code byte.
    pub code: u8,
    /// Number of times to repeat the operation.
    pub count: u8,
    /// Activation time in milliseconds.
    pub on_time: u32,
    /// Deactivation time in milliseconds.
    pub off_time: u32,
    /// Status reported by the outstation.
    pub status: CommandStatus,
}

/// An analog output block (group 41). Values are carried as `f64`;
/// integer encodings saturate on write.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalogOutput {
    /// The commanded value.
    pub value: f64,
    /// Status reported by the outstation.
    pub status: CommandStatus,
}

impl AnalogOutput {
    /// An output command with the given value and a success status.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            status: CommandStatus::Success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn timestamp_keeps_48_bits() {
        assert_eq!(Timestamp::new(u64::MAX), Timestamp::MAX);
        assert_eq!(Timestamp::new(1234).value(), 1234);
    }

    #[test]
    fn double_bit_two_bit_round_trip() {
        for bits in 0..4u8 {
            assert_eq!(DoubleBit::from_bits(bits).bits(), bits);
        }
        assert_eq!(DoubleBit::from_bits(0b0111), DoubleBit::Indeterminate);
    }

    #[test]
    fn command_status_round_trip() {
        for status in CommandStatus::iter().filter(|s| *s != CommandStatus::Unknown) {
            assert_eq!(CommandStatus::from(status as u8), status);
        }
        assert_eq!(CommandStatus::from(42), CommandStatus::Unknown);
    }

    #[test]
    fn indexed_value_map_keeps_the_index() {
        let indexed = IndexedValue::new(7, true).map(Binary::from);
        assert_eq!(indexed.index, 7);
        assert!(indexed.value.value);
        assert_eq!(indexed.value.flags, Flags::ONLINE);
    }
}
