#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
/// Qualifier code of an object header: how the enclosed objects are
/// enumerated.
pub enum QualifierCode {
    /// 1-byte start and stop indices.
    Uint8StartStop = 0x00,
    /// 2-byte start and stop indices.
    Uint16StartStop = 0x01,
    /// 4-byte start and stop indices.
    Uint32StartStop = 0x02,
    /// All objects of the type, no range or count.
    AllObjects = 0x06,
    /// 1-byte object count.
    Uint8Count = 0x07,
    /// 2-byte object count.
    Uint16Count = 0x08,
    /// 4-byte object count.
    Uint32Count = 0x09,
    /// 1-byte count, 1-byte index prefix per object.
    Uint8CountUint8Index = 0x17,
    /// 2-byte count, 2-byte index prefix per object.
    Uint16CountUint16Index = 0x28,
    /// 4-byte count, 4-byte index prefix per object.
    Uint32CountUint32Index = 0x39,
}

impl QualifierCode {
    /// Map a wire byte to a qualifier code.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Uint8StartStop),
            0x01 => Some(Self::Uint16StartStop),
            0x02 => Some(Self::Uint32StartStop),
            0x06 => Some(Self::AllObjects),
            0x07 => Some(Self::Uint8Count),
            0x08 => Some(Self::Uint16Count),
            0x09 => Some(Self::Uint32Count),
            0x17 => Some(Self::Uint8CountUint8Index),
            0x28 => Some(Self::Uint16CountUint16Index),
            0x39 => Some(Self::Uint32CountUint32Index),
            _ => None,
        }
    }

    /// The wire byte of this code.
    pub const fn byte(&self) -> u8 {
        *self as u8
    }

    /// Width in bytes of the indices or counts this qualifier encodes.
    /// [`QualifierCode::AllObjects`] has no prefix and reports zero.
    pub const fn index_width(&self) -> usize {
        match self {
            Self::AllObjects => 0,
            Self::Uint8StartStop | Self::Uint8Count | Self::Uint8CountUint8Index => 1,
            Self::Uint16StartStop | Self::Uint16Count | Self::Uint16CountUint16Index => 2,
            Self::Uint32StartStop | Self::Uint32Count | Self::Uint32CountUint32Index => 4,
        }
    }

    /// `true` for the start/stop range forms.
    pub const fn is_range(&self) -> bool {
        matches!(
            self,
            Self::Uint8StartStop | Self::Uint16StartStop | Self::Uint32StartStop
        )
    }

    /// `true` for the count-with-index-prefix forms.
    pub const fn is_prefixed(&self) -> bool {
        matches!(
            self,
            Self::Uint8CountUint8Index
                | Self::Uint16CountUint16Index
                | Self::Uint32CountUint32Index
        )
    }

    /// `true` for the count-only forms.
    pub const fn is_count(&self) -> bool {
        matches!(self, Self::Uint8Count | Self::Uint16Count | Self::Uint32Count)
    }

    /// Narrowest range form whose index width can hold `stop`.
    pub const fn range_for(stop: u32) -> Self {
        if stop <= u8::MAX as u32 {
            Self::Uint8StartStop
        } else if stop <= u16::MAX as u32 {
            Self::Uint16StartStop
        } else {
            Self::Uint32StartStop
        }
    }

    /// Narrowest prefixed form whose index width can hold `max_index`.
    pub const fn prefixed_for(max_index: u32) -> Self {
        if max_index <= u8::MAX as u32 {
            Self::Uint8CountUint8Index
        } else if max_index <= u16::MAX as u32 {
            Self::Uint16CountUint16Index
        } else {
            Self::Uint32CountUint32Index
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn byte_round_trip_for_every_code() {
        for code in QualifierCode::iter() {
            assert_eq!(QualifierCode::from_byte(code.byte()), Some(code));
        }
    }

    #[rstest]
    #[case(0x03)]
    #[case(0x04)]
    #[case(0x05)]
    #[case(0x0A)]
    #[case(0x16)]
    #[case(0x27)]
    #[case(0xFF)]
    fn unlisted_bytes_do_not_map(#[case] byte: u8) {
        assert_eq!(QualifierCode::from_byte(byte), None);
    }

    #[test]
    fn narrowest_form_is_selected() {
        assert_eq!(QualifierCode::range_for(0xFF), QualifierCode::Uint8StartStop);
        assert_eq!(QualifierCode::range_for(0x100), QualifierCode::Uint16StartStop);
        assert_eq!(QualifierCode::range_for(0x10000), QualifierCode::Uint32StartStop);
        assert_eq!(
            QualifierCode::prefixed_for(300),
            QualifierCode::Uint16CountUint16Index
        );
    }
}
