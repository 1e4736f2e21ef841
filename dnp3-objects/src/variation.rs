//! The group/variation registry: the closed set of object types this
//! library understands.

/// A known (group, variation) pair.
///
/// Variation zero means "the outstation's configured default encoding" and
/// is only meaningful in read requests. The octet-string groups accept any
/// non-zero variation, since there the variation byte is the element length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupVariation {
    /// Binary input, default variation.
    Group1Var0,
    /// Binary input, packed single-bit.
    Group1Var1,
    /// Binary input with flags.
    Group1Var2,
    /// Binary input event, default variation.
    Group2Var0,
    /// Binary input event without time.
    Group2Var1,
    /// Binary input event with absolute time.
    Group2Var2,
    /// Binary input event with relative time.
    Group2Var3,
    /// Double-bit binary input, default variation.
    Group3Var0,
    /// Double-bit binary input, packed two-bit.
    Group3Var1,
    /// Double-bit binary input with flags.
    Group3Var2,
    /// Double-bit binary input event, default variation.
    Group4Var0,
    /// Double-bit binary input event without time.
    Group4Var1,
    /// Binary output status, default variation.
    Group10Var0,
    /// Binary output status, packed single-bit.
    Group10Var1,
    /// Binary output status with flags.
    Group10Var2,
    /// Control relay output block.
    Group12Var1,
    /// Counter, default variation.
    Group20Var0,
    /// 32-bit counter with flags.
    Group20Var1,
    /// 16-bit counter with flags.
    Group20Var2,
    /// 32-bit counter without flags.
    Group20Var5,
    /// 16-bit counter without flags.
    Group20Var6,
    /// Counter event, default variation.
    Group22Var0,
    /// 32-bit counter event with flags.
    Group22Var1,
    /// 16-bit counter event with flags.
    Group22Var2,
    /// 32-bit counter event with flags and time.
    Group22Var5,
    /// 16-bit counter event with flags and time.
    Group22Var6,
    /// Analog input, default variation.
    Group30Var0,
    /// 32-bit analog input with flags.
    Group30Var1,
    /// 16-bit analog input with flags.
    Group30Var2,
    /// 32-bit analog input without flags.
    Group30Var3,
    /// 16-bit analog input without flags.
    Group30Var4,
    /// Single-precision analog input with flags.
    Group30Var5,
    /// Double-precision analog input with flags.
    Group30Var6,
    /// Analog input event, default variation.
    Group32Var0,
    /// 32-bit analog event.
    Group32Var1,
    /// 16-bit analog event.
    Group32Var2,
    /// 32-bit analog event with time.
    Group32Var3,
    /// 16-bit analog event with time.
    Group32Var4,
    /// Single-precision analog event.
    Group32Var5,
    /// Double-precision analog event.
    Group32Var6,
    /// Single-precision analog event with time.
    Group32Var7,
    /// Double-precision analog event with time.
    Group32Var8,
    /// Analog output status, default variation.
    Group40Var0,
    /// 32-bit analog output status.
    Group40Var1,
    /// 16-bit analog output status.
    Group40Var2,
    /// Single-precision analog output status.
    Group40Var3,
    /// Double-precision analog output status.
    Group40Var4,
    /// 32-bit analog output block.
    Group41Var1,
    /// 16-bit analog output block.
    Group41Var2,
    /// Single-precision analog output block.
    Group41Var3,
    /// Double-precision analog output block.
    Group41Var4,
    /// Class 0 (static) poll placeholder.
    Group60Var1,
    /// Class 1 event poll placeholder.
    Group60Var2,
    /// Class 2 event poll placeholder.
    Group60Var3,
    /// Class 3 event poll placeholder.
    Group60Var4,
    /// Internal indications as a packed bit array.
    Group80Var1,
    /// Octet string, any variation (the variation is the length).
    Group110AnyVar,
    /// Octet string event, any variation.
    Group111AnyVar,
    /// Virtual terminal output block, any variation.
    Group112AnyVar,
}

impl GroupVariation {
    /// Resolve a raw (group, variation) pair against the registry.
    ///
    /// Unlisted pairs return `None`; the parser aborts the decode with an
    /// unknown-object error.
    pub const fn lookup(group: u8, variation: u8) -> Option<Self> {
        use GroupVariation::*;
        let gv = match (group, variation) {
            (1, 0) => Group1Var0,
            (1, 1) => Group1Var1,
            (1, 2) => Group1Var2,
            (2, 0) => Group2Var0,
            (2, 1) => Group2Var1,
            (2, 2) => Group2Var2,
            (2, 3) => Group2Var3,
            (3, 0) => Group3Var0,
            (3, 1) => Group3Var1,
            (3, 2) => Group3Var2,
            (4, 0) => Group4Var0,
            (4, 1) => Group4Var1,
            (10, 0) => Group10Var0,
            (10, 1) => Group10Var1,
            (10, 2) => Group10Var2,
            (12, 1) => Group12Var1,
            (20, 0) => Group20Var0,
            (20, 1) => Group20Var1,
            (20, 2) => Group20Var2,
            (20, 5) => Group20Var5,
            (20, 6) => Group20Var6,
            (22, 0) => Group22Var0,
            (22, 1) => Group22Var1,
            (22, 2) => Group22Var2,
            (22, 5) => Group22Var5,
            (22, 6) => Group22Var6,
            (30, 0) => Group30Var0,
            (30, 1) => Group30Var1,
            (30, 2) => Group30Var2,
            (30, 3) => Group30Var3,
            (30, 4) => Group30Var4,
            (30, 5) => Group30Var5,
            (30, 6) => Group30Var6,
            (32, 0) => Group32Var0,
            (32, 1) => Group32Var1,
            (32, 2) => Group32Var2,
            (32, 3) => Group32Var3,
            (32, 4) => Group32Var4,
            (32, 5) => Group32Var5,
            (32, 6) => Group32Var6,
            (32, 7) => Group32Var7,
            (32, 8) => Group32Var8,
            (40, 0) => Group40Var0,
            (40, 1) => Group40Var1,
            (40, 2) => Group40Var2,
            (40, 3) => Group40Var3,
            (40, 4) => Group40Var4,
            (41, 1) => Group41Var1,
            (41, 2) => Group41Var2,
            (41, 3) => Group41Var3,
            (41, 4) => Group41Var4,
            (60, 1) => Group60Var1,
            (60, 2) => Group60Var2,
            (60, 3) => Group60Var3,
            (60, 4) => Group60Var4,
            (80, 1) => Group80Var1,
            (110, 1..=255) => Group110AnyVar,
            (111, 1..=255) => Group111AnyVar,
            (112, 1..=255) => Group112AnyVar,
            _ => return None,
        };
        Some(gv)
    }
}

/// A resolved (group, variation) pair together with its raw wire bytes.
///
/// The raw bytes matter for the octet-string groups, where the variation
/// byte is the element length, and for re-serializing headers verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupVariationRecord {
    /// The registry entry.
    pub gv: GroupVariation,
    /// Raw group byte.
    pub group: u8,
    /// Raw variation byte.
    pub variation: u8,
}

impl GroupVariationRecord {
    /// Resolve raw bytes into a record, or `None` for unlisted pairs.
    pub const fn lookup(group: u8, variation: u8) -> Option<Self> {
        match GroupVariation::lookup(group, variation) {
            Some(gv) => Some(Self { gv, group, variation }),
            None => None,
        }
    }
}

/// Static binary encodings an outstation can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticBinaryVariation {
    /// Packed single-bit.
    Group1Var1,
    /// Flag byte.
    Group1Var2,
}

/// Static binary-output-status encodings an outstation can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticControlStatusVariation {
    /// Packed single-bit.
    Group10Var1,
    /// Flag byte.
    Group10Var2,
}

/// Static counter encodings an outstation can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticCounterVariation {
    /// 32-bit with flags.
    Group20Var1,
    /// 16-bit with flags.
    Group20Var2,
    /// 32-bit without flags.
    Group20Var5,
    /// 16-bit without flags.
    Group20Var6,
}

/// Static analog encodings an outstation can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticAnalogVariation {
    /// 32-bit with flags.
    Group30Var1,
    /// 16-bit with flags.
    Group30Var2,
    /// 32-bit without flags.
    Group30Var3,
    /// 16-bit without flags.
    Group30Var4,
    /// Single precision with flags.
    Group30Var5,
    /// Double precision with flags.
    Group30Var6,
}

/// Static analog-output-status encodings an outstation can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticSetpointStatusVariation {
    /// 32-bit with flags.
    Group40Var1,
    /// 16-bit with flags.
    Group40Var2,
    /// Single precision with flags.
    Group40Var3,
    /// Double precision with flags.
    Group40Var4,
}

/// Binary event encodings an outstation can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventBinaryVariation {
    /// Flag byte only.
    Group2Var1,
    /// Flag byte and absolute time.
    Group2Var2,
    /// Flag byte and relative time.
    Group2Var3,
}

/// Counter event encodings an outstation can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventCounterVariation {
    /// 32-bit with flags.
    Group22Var1,
    /// 16-bit with flags.
    Group22Var2,
    /// 32-bit with flags and time.
    Group22Var5,
    /// 16-bit with flags and time.
    Group22Var6,
}

/// Analog event encodings an outstation can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventAnalogVariation {
    /// 32-bit.
    Group32Var1,
    /// 16-bit.
    Group32Var2,
    /// 32-bit with time.
    Group32Var3,
    /// 16-bit with time.
    Group32Var4,
    /// Single precision.
    Group32Var5,
    /// Double precision.
    Group32Var6,
    /// Single precision with time.
    Group32Var7,
    /// Double precision with time.
    Group32Var8,
}

impl StaticBinaryVariation {
    /// Resolve a concrete variation byte from a read header.
    pub const fn from_variation(variation: u8) -> Option<Self> {
        match variation {
            1 => Some(Self::Group1Var1),
            2 => Some(Self::Group1Var2),
            _ => None,
        }
    }
}

impl StaticControlStatusVariation {
    /// Resolve a concrete variation byte from a read header.
    pub const fn from_variation(variation: u8) -> Option<Self> {
        match variation {
            1 => Some(Self::Group10Var1),
            2 => Some(Self::Group10Var2),
            _ => None,
        }
    }
}

impl StaticCounterVariation {
    /// Resolve a concrete variation byte from a read header.
    pub const fn from_variation(variation: u8) -> Option<Self> {
        match variation {
            1 => Some(Self::Group20Var1),
            2 => Some(Self::Group20Var2),
            5 => Some(Self::Group20Var5),
            6 => Some(Self::Group20Var6),
            _ => None,
        }
    }
}

impl StaticAnalogVariation {
    /// Resolve a concrete variation byte from a read header.
    pub const fn from_variation(variation: u8) -> Option<Self> {
        match variation {
            1 => Some(Self::Group30Var1),
            2 => Some(Self::Group30Var2),
            3 => Some(Self::Group30Var3),
            4 => Some(Self::Group30Var4),
            5 => Some(Self::Group30Var5),
            6 => Some(Self::Group30Var6),
            _ => None,
        }
    }
}

impl StaticSetpointStatusVariation {
    /// Resolve a concrete variation byte from a read header.
    pub const fn from_variation(variation: u8) -> Option<Self> {
        match variation {
            1 => Some(Self::Group40Var1),
            2 => Some(Self::Group40Var2),
            3 => Some(Self::Group40Var3),
            4 => Some(Self::Group40Var4),
            _ => None,
        }
    }
}

impl EventBinaryVariation {
    /// Resolve a concrete variation byte from a read header.
    pub const fn from_variation(variation: u8) -> Option<Self> {
        match variation {
            1 => Some(Self::Group2Var1),
            2 => Some(Self::Group2Var2),
            3 => Some(Self::Group2Var3),
            _ => None,
        }
    }
}

impl EventCounterVariation {
    /// Resolve a concrete variation byte from a read header.
    pub const fn from_variation(variation: u8) -> Option<Self> {
        match variation {
            1 => Some(Self::Group22Var1),
            2 => Some(Self::Group22Var2),
            5 => Some(Self::Group22Var5),
            6 => Some(Self::Group22Var6),
            _ => None,
        }
    }
}

impl EventAnalogVariation {
    /// Resolve a concrete variation byte from a read header.
    pub const fn from_variation(variation: u8) -> Option<Self> {
        match variation {
            1 => Some(Self::Group32Var1),
            2 => Some(Self::Group32Var2),
            3 => Some(Self::Group32Var3),
            4 => Some(Self::Group32Var4),
            5 => Some(Self::Group32Var5),
            6 => Some(Self::Group32Var6),
            7 => Some(Self::Group32Var7),
            8 => Some(Self::Group32Var8),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_pairs_resolve() {
        assert_eq!(
            GroupVariation::lookup(60, 2),
            Some(GroupVariation::Group60Var2)
        );
        assert_eq!(
            GroupVariation::lookup(110, 255),
            Some(GroupVariation::Group110AnyVar)
        );
        assert_eq!(
            GroupVariation::lookup(2, 0),
            Some(GroupVariation::Group2Var0)
        );
    }

    #[test]
    fn unlisted_pairs_do_not_resolve() {
        assert_eq!(GroupVariation::lookup(0, 1), None);
        assert_eq!(GroupVariation::lookup(20, 9), None);
        assert_eq!(GroupVariation::lookup(60, 5), None);
        assert_eq!(GroupVariation::lookup(113, 1), None);
        // a zero octet-string length is meaningless
        assert_eq!(GroupVariation::lookup(110, 0), None);
        assert_eq!(GroupVariation::lookup(112, 0), None);
    }

    #[test]
    fn records_keep_the_raw_bytes() {
        let record = GroupVariationRecord::lookup(111, 16).unwrap();
        assert_eq!(record.gv, GroupVariation::Group111AnyVar);
        assert_eq!((record.group, record.variation), (111, 16));
    }
}
