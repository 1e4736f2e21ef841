use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
/// Application-layer function code.
///
/// Unlisted codes decode to [`FunctionCode::Unknown`]; whether that is an
/// error is decided by the layer handling the fragment, not the decoder.
pub enum FunctionCode {
    /// Confirmation of a received fragment.
    Confirm = 0x00,
    /// Read request.
    Read = 0x01,
    /// Write request.
    Write = 0x02,
    /// Select a control point for a subsequent operate.
    Select = 0x03,
    /// Operate a previously selected control point.
    Operate = 0x04,
    /// Select and operate in one request.
    DirectOperate = 0x05,
    /// Direct operate without an application-layer response.
    DirectOperateNoAck = 0x06,
    /// Copy counters to their frozen counterparts.
    ImmediateFreeze = 0x07,
    /// Immediate freeze without an application-layer response.
    ImmediateFreezeNoAck = 0x08,
    /// Freeze counters and clear the running values.
    FreezeAndClear = 0x09,
    /// Freeze-and-clear without an application-layer response.
    FreezeAndClearNoAck = 0x0A,
    /// Freeze counters at the given time.
    FreezeAtTime = 0x0B,
    /// Freeze-at-time without an application-layer response.
    FreezeAtTimeNoAck = 0x0C,
    /// Full restart of the outstation.
    ColdRestart = 0x0D,
    /// Partial restart of the outstation.
    WarmRestart = 0x0E,
    /// Initialize the outstation database to defaults.
    InitializeData = 0x0F,
    /// Prepare an application for a start request.
    InitializeApplication = 0x10,
    /// Start an application.
    StartApplication = 0x11,
    /// Stop an application.
    StopApplication = 0x12,
    /// Persist the current configuration.
    SaveConfiguration = 0x13,
    /// Enable unsolicited reporting for the named classes.
    EnableUnsolicited = 0x14,
    /// Disable unsolicited reporting for the named classes.
    DisableUnsolicited = 0x15,
    /// Assign points to an event class.
    AssignClass = 0x16,
    /// Measure the round-trip delay to the outstation.
    DelayMeasurement = 0x17,
    /// Record the time of reception of the fragment.
    RecordCurrentTime = 0x18,
    /// Solicited response.
    Response = 0x81,
    /// Unsolicited response.
    UnsolicitedResponse = 0x82,
    /// Any code not listed above.
    Unknown = 0xFF,
}

impl FunctionCode {
    /// The wire byte of this code.
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// `true` for the two response codes.
    pub const fn is_response(&self) -> bool {
        matches!(self, Self::Response | Self::UnsolicitedResponse)
    }
}

impl From<u8> for FunctionCode {
    fn from(byte: u8) -> Self {
        use FunctionCode::*;
        match byte {
            0x00 => Confirm,
            0x01 => Read,
            0x02 => Write,
            0x03 => Select,
            0x04 => Operate,
            0x05 => DirectOperate,
            0x06 => DirectOperateNoAck,
            0x07 => ImmediateFreeze,
            0x08 => ImmediateFreezeNoAck,
            0x09 => FreezeAndClear,
            0x0A => FreezeAndClearNoAck,
            0x0B => FreezeAtTime,
            0x0C => FreezeAtTimeNoAck,
            0x0D => ColdRestart,
            0x0E => WarmRestart,
            0x0F => InitializeData,
            0x10 => InitializeApplication,
            0x11 => StartApplication,
            0x12 => StopApplication,
            0x13 => SaveConfiguration,
            0x14 => EnableUnsolicited,
            0x15 => DisableUnsolicited,
            0x16 => AssignClass,
            0x17 => DelayMeasurement,
            0x18 => RecordCurrentTime,
            0x81 => Response,
            0x82 => UnsolicitedResponse,
            _ => Unknown,
        }
    }
}

impl fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn byte_round_trip_for_every_listed_code() {
        for code in FunctionCode::iter().filter(|c| *c != FunctionCode::Unknown) {
            assert_eq!(FunctionCode::from(code.code()), code);
        }
    }

    #[test]
    fn unlisted_codes_decode_to_unknown() {
        for byte in [0x19, 0x42, 0x80, 0x83, 0xFE] {
            assert_eq!(FunctionCode::from(byte), FunctionCode::Unknown);
        }
    }
}
