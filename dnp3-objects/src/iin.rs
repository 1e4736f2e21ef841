bitflags::bitflags! {
    /// The two-byte Internal Indications field of a response.
    ///
    /// The low byte carries the state indications, the high byte the error
    /// indications. On the wire the low byte is transmitted first.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IinField: u16 {
        /// The request was addressed to all stations.
        const ALL_STATIONS = 0x0001;
        /// Class 1 event data is available.
        const CLASS1_EVENTS = 0x0002;
        /// Class 2 event data is available.
        const CLASS2_EVENTS = 0x0004;
        /// Class 3 event data is available.
        const CLASS3_EVENTS = 0x0008;
        /// The outstation requires time synchronization.
        const NEED_TIME = 0x0010;
        /// Some points are in local (non-remote) control.
        const LOCAL_CONTROL = 0x0020;
        /// An abnormal condition exists at the outstation.
        const DEVICE_TROUBLE = 0x0040;
        /// The outstation restarted since this bit was last cleared.
        const DEVICE_RESTART = 0x0080;
        /// The function code is not supported.
        const FUNC_NOT_SUPPORTED = 0x0100;
        /// A requested object is unknown.
        const OBJECT_UNKNOWN = 0x0200;
        /// A qualifier, range, or parameter was invalid.
        const PARAM_ERROR = 0x0400;
        /// An event buffer overflowed and events were lost.
        const EVENT_BUFFER_OVERFLOW = 0x0800;
        /// A request requiring exclusive execution is already running.
        const ALREADY_EXECUTING = 0x1000;
        /// The stored configuration is corrupt.
        const CONFIG_CORRUPT = 0x2000;
        /// Reserved, always zero.
        const RESERVED_1 = 0x4000;
        /// Reserved, always zero.
        const RESERVED_2 = 0x8000;
    }
}

impl IinField {
    /// Decode from the two wire bytes, low byte first.
    pub const fn from_bytes(lsb: u8, msb: u8) -> Self {
        Self::from_bits_retain(u16::from_le_bytes([lsb, msb]))
    }

    /// The low (state indication) wire byte.
    pub const fn lsb(&self) -> u8 {
        self.bits() as u8
    }

    /// The high (error indication) wire byte.
    pub const fn msb(&self) -> u8 {
        (self.bits() >> 8) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_bytes_split_at_the_byte_boundary() {
        let iin = IinField::CLASS1_EVENTS
            | IinField::CLASS2_EVENTS
            | IinField::NEED_TIME
            | IinField::DEVICE_RESTART;
        assert_eq!(iin.lsb(), 0x96);
        assert_eq!(iin.msb(), 0x00);

        let iin = IinField::FUNC_NOT_SUPPORTED | IinField::EVENT_BUFFER_OVERFLOW;
        assert_eq!(iin.lsb(), 0x00);
        assert_eq!(iin.msb(), 0x09);
    }

    #[test]
    fn byte_round_trip() {
        let iin = IinField::from_bytes(0x96, 0x09);
        assert!(iin.contains(IinField::CLASS1_EVENTS));
        assert!(iin.contains(IinField::FUNC_NOT_SUPPORTED));
        assert_eq!((iin.lsb(), iin.msb()), (0x96, 0x09));
    }

    #[test]
    fn union_accumulates_bits() {
        let mut iin = IinField::default();
        iin |= IinField::OBJECT_UNKNOWN;
        iin |= IinField::PARAM_ERROR;
        assert_eq!(iin, IinField::OBJECT_UNKNOWN | IinField::PARAM_ERROR);
        iin.remove(IinField::OBJECT_UNKNOWN);
        assert_eq!(iin, IinField::PARAM_ERROR);
    }
}
