//! Per-variation wire encodings.
//!
//! Each known variation is a unit struct implementing [`Variation`] plus,
//! for the fixed-size records, [`FixedSizeVariation`]. The parser and
//! writer dispatch over [`crate::GroupVariation`] with an exhaustive match,
//! so a variation added to the registry without an encoding fails to build.

use dnp3_types::bytes;

use crate::measurement::{
    Analog, AnalogOutput, Binary, CommandStatus, ControlRelayOutputBlock, ControlStatus, Counter,
    DoubleBit, DoubleBitBinary, Flags, SetpointStatus, Timestamp,
};

/// A named object type: its group and variation bytes.
pub trait Variation {
    /// Group byte.
    const GROUP: u8;
    /// Variation byte.
    const VARIATION: u8;
}

/// A fixed-size encoded record.
///
/// `read` takes exactly [`FixedSizeVariation::SIZE`] bytes and `write`
/// fills exactly that many; both panic on shorter slices. The enclosing
/// parser and writer size the slices, so the contract holds by
/// construction.
pub trait FixedSizeVariation: Variation {
    /// The measurement type this record decodes to.
    type Value;
    /// Encoded size in bytes.
    const SIZE: u8;

    /// Decode one record.
    fn read(bytes: &[u8]) -> Self::Value;

    /// Encode one record.
    fn write(value: &Self::Value, bytes: &mut [u8]);
}

/// A packed single-bit array type (groups 1, 10 and 80).
pub trait BitfieldVariation: Variation {}

macro_rules! declare_variation {
    ($(#[$doc:meta])* $name:ident, $group:literal, $variation:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Variation for $name {
            const GROUP: u8 = $group;
            const VARIATION: u8 = $variation;
        }
    };
}

declare_variation!(
    /// Binary input, packed single-bit.
    Group1Var1, 1, 1
);
declare_variation!(
    /// Binary input with flags.
    Group1Var2, 1, 2
);
declare_variation!(
    /// Binary input event without time.
    Group2Var1, 2, 1
);
declare_variation!(
    /// Binary input event with absolute time.
    Group2Var2, 2, 2
);
declare_variation!(
    /// Binary input event with relative time.
    Group2Var3, 2, 3
);
declare_variation!(
    /// Double-bit binary input with flags.
    Group3Var2, 3, 2
);
declare_variation!(
    /// Double-bit binary input event without time.
    Group4Var1, 4, 1
);
declare_variation!(
    /// Binary output status, packed single-bit.
    Group10Var1, 10, 1
);
declare_variation!(
    /// Binary output status with flags.
    Group10Var2, 10, 2
);
declare_variation!(
    /// Control relay output block.
    Group12Var1, 12, 1
);
declare_variation!(
    /// 32-bit counter with flags.
    Group20Var1, 20, 1
);
declare_variation!(
    /// 16-bit counter with flags.
    Group20Var2, 20, 2
);
declare_variation!(
    /// 32-bit counter without flags.
    Group20Var5, 20, 5
);
declare_variation!(
    /// 16-bit counter without flags.
    Group20Var6, 20, 6
);
declare_variation!(
    /// 32-bit counter event with flags.
    Group22Var1, 22, 1
);
declare_variation!(
    /// 16-bit counter event with flags.
    Group22Var2, 22, 2
);
declare_variation!(
    /// 32-bit counter event with flags and time.
    Group22Var5, 22, 5
);
declare_variation!(
    /// 16-bit counter event with flags and time.
    Group22Var6, 22, 6
);
declare_variation!(
    /// 32-bit analog input with flags.
    Group30Var1, 30, 1
);
declare_variation!(
    /// 16-bit analog input with flags.
    Group30Var2, 30, 2
);
declare_variation!(
    /// 32-bit analog input without flags.
    Group30Var3, 30, 3
);
declare_variation!(
    /// 16-bit analog input without flags.
    Group30Var4, 30, 4
);
declare_variation!(
    /// Single-precision analog input with flags.
    Group30Var5, 30, 5
);
declare_variation!(
    /// Double-precision analog input with flags.
    Group30Var6, 30, 6
);
declare_variation!(
    /// 32-bit analog event.
    Group32Var1, 32, 1
);
declare_variation!(
    /// 16-bit analog event.
    Group32Var2, 32, 2
);
declare_variation!(
    /// 32-bit analog event with time.
    Group32Var3, 32, 3
);
declare_variation!(
    /// 16-bit analog event with time.
    Group32Var4, 32, 4
);
declare_variation!(
    /// Single-precision analog event.
    Group32Var5, 32, 5
);
declare_variation!(
    /// Double-precision analog event.
    Group32Var6, 32, 6
);
declare_variation!(
    /// Single-precision analog event with time.
    Group32Var7, 32, 7
);
declare_variation!(
    /// Double-precision analog event with time.
    Group32Var8, 32, 8
);
declare_variation!(
    /// 32-bit analog output status.
    Group40Var1, 40, 1
);
declare_variation!(
    /// 16-bit analog output status.
    Group40Var2, 40, 2
);
declare_variation!(
    /// Single-precision analog output status.
    Group40Var3, 40, 3
);
declare_variation!(
    /// Double-precision analog output status.
    Group40Var4, 40, 4
);
declare_variation!(
    /// 32-bit analog output block.
    Group41Var1, 41, 1
);
declare_variation!(
    /// 16-bit analog output block.
    Group41Var2, 41, 2
);
declare_variation!(
    /// Single-precision analog output block.
    Group41Var3, 41, 3
);
declare_variation!(
    /// Double-precision analog output block.
    Group41Var4, 41, 4
);
declare_variation!(
    /// Class 0 poll placeholder.
    Group60Var1, 60, 1
);
declare_variation!(
    /// Class 1 poll placeholder.
    Group60Var2, 60, 2
);
declare_variation!(
    /// Class 2 poll placeholder.
    Group60Var3, 60, 3
);
declare_variation!(
    /// Class 3 poll placeholder.
    Group60Var4, 60, 4
);
declare_variation!(
    /// Internal indications, packed single-bit.
    Group80Var1, 80, 1
);

impl BitfieldVariation for Group1Var1 {}
impl BitfieldVariation for Group10Var1 {}
impl BitfieldVariation for Group80Var1 {}

// Binary state travels in bit 7 of the flag byte.

fn binary_from_byte(byte: u8) -> Binary {
    Binary::new(
        byte & 0x80 != 0,
        Flags::from_bits_retain(byte & 0x7F),
    )
}

fn binary_to_byte(value: &Binary) -> u8 {
    (value.flags.bits() & 0x7F) | if value.value { 0x80 } else { 0 }
}

// Double-bit state travels in bits 6 and 7 of the flag byte.

fn double_bit_from_byte(byte: u8) -> DoubleBitBinary {
    DoubleBitBinary::new(
        DoubleBit::from_bits(byte >> 6),
        Flags::from_bits_retain(byte & 0x3F),
    )
}

fn double_bit_to_byte(value: &DoubleBitBinary) -> u8 {
    (value.flags.bits() & 0x3F) | (value.value.bits() << 6)
}

fn time_of<T: Copy>(time: &Option<T>) -> T
where
    T: Default,
{
    time.unwrap_or_default()
}

impl FixedSizeVariation for Group1Var2 {
    type Value = Binary;
    const SIZE: u8 = 1;

    fn read(bytes: &[u8]) -> Binary {
        binary_from_byte(bytes[0])
    }

    fn write(value: &Binary, bytes: &mut [u8]) {
        bytes[0] = binary_to_byte(value);
    }
}

impl FixedSizeVariation for Group2Var1 {
    type Value = Binary;
    const SIZE: u8 = 1;

    fn read(bytes: &[u8]) -> Binary {
        binary_from_byte(bytes[0])
    }

    fn write(value: &Binary, bytes: &mut [u8]) {
        bytes[0] = binary_to_byte(value);
    }
}

impl FixedSizeVariation for Group2Var2 {
    type Value = Binary;
    const SIZE: u8 = 7;

    fn read(bytes: &[u8]) -> Binary {
        binary_from_byte(bytes[0]).with_time(Timestamp::new(bytes::read_u48_le(&bytes[1..])))
    }

    fn write(value: &Binary, bytes: &mut [u8]) {
        bytes[0] = binary_to_byte(value);
        bytes::write_u48_le(&mut bytes[1..], time_of(&value.time).value());
    }
}

impl FixedSizeVariation for Group2Var3 {
    type Value = Binary;
    const SIZE: u8 = 3;

    fn read(bytes: &[u8]) -> Binary {
        binary_from_byte(bytes[0])
            .with_time(Timestamp::new(u64::from(bytes::read_u16_le(&bytes[1..]))))
    }

    fn write(value: &Binary, bytes: &mut [u8]) {
        bytes[0] = binary_to_byte(value);
        bytes::write_u16_le(&mut bytes[1..], time_of(&value.time).value() as u16);
    }
}

impl FixedSizeVariation for Group3Var2 {
    type Value = DoubleBitBinary;
    const SIZE: u8 = 1;

    fn read(bytes: &[u8]) -> DoubleBitBinary {
        double_bit_from_byte(bytes[0])
    }

    fn write(value: &DoubleBitBinary, bytes: &mut [u8]) {
        bytes[0] = double_bit_to_byte(value);
    }
}

impl FixedSizeVariation for Group4Var1 {
    type Value = DoubleBitBinary;
    const SIZE: u8 = 1;

    fn read(bytes: &[u8]) -> DoubleBitBinary {
        double_bit_from_byte(bytes[0])
    }

    fn write(value: &DoubleBitBinary, bytes: &mut [u8]) {
        bytes[0] = double_bit_to_byte(value);
    }
}

impl FixedSizeVariation for Group10Var2 {
    type Value = ControlStatus;
    const SIZE: u8 = 1;

    fn read(bytes: &[u8]) -> ControlStatus {
        ControlStatus::new(bytes[0] & 0x80 != 0, Flags::from_bits_retain(bytes[0] & 0x7F))
    }

    fn write(value: &ControlStatus, bytes: &mut [u8]) {
        bytes[0] = (value.flags.bits() & 0x7F) | if value.value { 0x80 } else { 0 };
    }
}

impl FixedSizeVariation for Group12Var1 {
    type Value = ControlRelayOutputBlock;
    const SIZE: u8 = 11;

    fn read(bytes: &[u8]) -> ControlRelayOutputBlock {
        ControlRelayOutputBlock {
            code: bytes[0],
            count: bytes[1],
            on_time: bytes::read_u32_le(&bytes[2..]),
            off_time: bytes::read_u32_le(&bytes[6..]),
            status: CommandStatus::from(bytes[10]),
        }
    }

    fn write(value: &ControlRelayOutputBlock, bytes: &mut [u8]) {
        bytes[0] = value.code;
        bytes[1] = value.count;
        bytes::write_u32_le(&mut bytes[2..], value.on_time);
        bytes::write_u32_le(&mut bytes[6..], value.off_time);
        bytes[10] = value.status as u8;
    }
}

impl FixedSizeVariation for Group20Var1 {
    type Value = Counter;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> Counter {
        Counter::new(
            bytes::read_u32_le(&bytes[1..]),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &Counter, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_u32_le(&mut bytes[1..], value.value);
    }
}

impl FixedSizeVariation for Group20Var2 {
    type Value = Counter;
    const SIZE: u8 = 3;

    fn read(bytes: &[u8]) -> Counter {
        Counter::new(
            u32::from(bytes::read_u16_le(&bytes[1..])),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &Counter, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_u16_le(&mut bytes[1..], value.value as u16);
    }
}

impl FixedSizeVariation for Group20Var5 {
    type Value = Counter;
    const SIZE: u8 = 4;

    fn read(bytes: &[u8]) -> Counter {
        Counter::new(bytes::read_u32_le(bytes), Flags::ONLINE)
    }

    fn write(value: &Counter, bytes: &mut [u8]) {
        bytes::write_u32_le(bytes, value.value);
    }
}

impl FixedSizeVariation for Group20Var6 {
    type Value = Counter;
    const SIZE: u8 = 2;

    fn read(bytes: &[u8]) -> Counter {
        Counter::new(u32::from(bytes::read_u16_le(bytes)), Flags::ONLINE)
    }

    fn write(value: &Counter, bytes: &mut [u8]) {
        bytes::write_u16_le(bytes, value.value as u16);
    }
}

impl FixedSizeVariation for Group22Var1 {
    type Value = Counter;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> Counter {
        Group20Var1::read(bytes)
    }

    fn write(value: &Counter, bytes: &mut [u8]) {
        Group20Var1::write(value, bytes);
    }
}

impl FixedSizeVariation for Group22Var2 {
    type Value = Counter;
    const SIZE: u8 = 3;

    fn read(bytes: &[u8]) -> Counter {
        Group20Var2::read(bytes)
    }

    fn write(value: &Counter, bytes: &mut [u8]) {
        Group20Var2::write(value, bytes);
    }
}

impl FixedSizeVariation for Group22Var5 {
    type Value = Counter;
    const SIZE: u8 = 11;

    fn read(bytes: &[u8]) -> Counter {
        Group20Var1::read(bytes).with_time(Timestamp::new(bytes::read_u48_le(&bytes[5..])))
    }

    fn write(value: &Counter, bytes: &mut [u8]) {
        Group20Var1::write(value, bytes);
        bytes::write_u48_le(&mut bytes[5..], time_of(&value.time).value());
    }
}

impl FixedSizeVariation for Group22Var6 {
    type Value = Counter;
    const SIZE: u8 = 9;

    fn read(bytes: &[u8]) -> Counter {
        Group20Var2::read(bytes).with_time(Timestamp::new(bytes::read_u48_le(&bytes[3..])))
    }

    fn write(value: &Counter, bytes: &mut [u8]) {
        Group20Var2::write(value, bytes);
        bytes::write_u48_le(&mut bytes[3..], time_of(&value.time).value());
    }
}

impl FixedSizeVariation for Group30Var1 {
    type Value = Analog;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> Analog {
        Analog::new(
            f64::from(bytes::read_i32_le(&bytes[1..])),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_i32_le(&mut bytes[1..], value.value as i32);
    }
}

impl FixedSizeVariation for Group30Var2 {
    type Value = Analog;
    const SIZE: u8 = 3;

    fn read(bytes: &[u8]) -> Analog {
        Analog::new(
            f64::from(bytes::read_i16_le(&bytes[1..])),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_i16_le(&mut bytes[1..], value.value as i16);
    }
}

impl FixedSizeVariation for Group30Var3 {
    type Value = Analog;
    const SIZE: u8 = 4;

    fn read(bytes: &[u8]) -> Analog {
        Analog::new(f64::from(bytes::read_i32_le(bytes)), Flags::ONLINE)
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        bytes::write_i32_le(bytes, value.value as i32);
    }
}

impl FixedSizeVariation for Group30Var4 {
    type Value = Analog;
    const SIZE: u8 = 2;

    fn read(bytes: &[u8]) -> Analog {
        Analog::new(f64::from(bytes::read_i16_le(bytes)), Flags::ONLINE)
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        bytes::write_i16_le(bytes, value.value as i16);
    }
}

impl FixedSizeVariation for Group30Var5 {
    type Value = Analog;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> Analog {
        Analog::new(
            f64::from(bytes::read_f32_le(&bytes[1..])),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_f32_le(&mut bytes[1..], value.value as f32);
    }
}

impl FixedSizeVariation for Group30Var6 {
    type Value = Analog;
    const SIZE: u8 = 9;

    fn read(bytes: &[u8]) -> Analog {
        Analog::new(
            bytes::read_f64_le(&bytes[1..]),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_f64_le(&mut bytes[1..], value.value);
    }
}

impl FixedSizeVariation for Group32Var1 {
    type Value = Analog;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> Analog {
        Group30Var1::read(bytes)
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        Group30Var1::write(value, bytes);
    }
}

impl FixedSizeVariation for Group32Var2 {
    type Value = Analog;
    const SIZE: u8 = 3;

    fn read(bytes: &[u8]) -> Analog {
        Group30Var2::read(bytes)
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        Group30Var2::write(value, bytes);
    }
}

impl FixedSizeVariation for Group32Var3 {
    type Value = Analog;
    const SIZE: u8 = 11;

    fn read(bytes: &[u8]) -> Analog {
        Group30Var1::read(bytes).with_time(Timestamp::new(bytes::read_u48_le(&bytes[5..])))
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        Group30Var1::write(value, bytes);
        bytes::write_u48_le(&mut bytes[5..], time_of(&value.time).value());
    }
}

impl FixedSizeVariation for Group32Var4 {
    type Value = Analog;
    const SIZE: u8 = 9;

    fn read(bytes: &[u8]) -> Analog {
        Group30Var2::read(bytes).with_time(Timestamp::new(bytes::read_u48_le(&bytes[3..])))
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        Group30Var2::write(value, bytes);
        bytes::write_u48_le(&mut bytes[3..], time_of(&value.time).value());
    }
}

impl FixedSizeVariation for Group32Var5 {
    type Value = Analog;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> Analog {
        Group30Var5::read(bytes)
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        Group30Var5::write(value, bytes);
    }
}

impl FixedSizeVariation for Group32Var6 {
    type Value = Analog;
    const SIZE: u8 = 9;

    fn read(bytes: &[u8]) -> Analog {
        Group30Var6::read(bytes)
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        Group30Var6::write(value, bytes);
    }
}

impl FixedSizeVariation for Group32Var7 {
    type Value = Analog;
    const SIZE: u8 = 11;

    fn read(bytes: &[u8]) -> Analog {
        Group30Var5::read(bytes).with_time(Timestamp::new(bytes::read_u48_le(&bytes[5..])))
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        Group30Var5::write(value, bytes);
        bytes::write_u48_le(&mut bytes[5..], time_of(&value.time).value());
    }
}

impl FixedSizeVariation for Group32Var8 {
    type Value = Analog;
    const SIZE: u8 = 15;

    fn read(bytes: &[u8]) -> Analog {
        Group30Var6::read(bytes).with_time(Timestamp::new(bytes::read_u48_le(&bytes[9..])))
    }

    fn write(value: &Analog, bytes: &mut [u8]) {
        Group30Var6::write(value, bytes);
        bytes::write_u48_le(&mut bytes[9..], time_of(&value.time).value());
    }
}

impl FixedSizeVariation for Group40Var1 {
    type Value = SetpointStatus;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> SetpointStatus {
        SetpointStatus::new(
            f64::from(bytes::read_i32_le(&bytes[1..])),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &SetpointStatus, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_i32_le(&mut bytes[1..], value.value as i32);
    }
}

impl FixedSizeVariation for Group40Var2 {
    type Value = SetpointStatus;
    const SIZE: u8 = 3;

    fn read(bytes: &[u8]) -> SetpointStatus {
        SetpointStatus::new(
            f64::from(bytes::read_i16_le(&bytes[1..])),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &SetpointStatus, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_i16_le(&mut bytes[1..], value.value as i16);
    }
}

impl FixedSizeVariation for Group40Var3 {
    type Value = SetpointStatus;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> SetpointStatus {
        SetpointStatus::new(
            f64::from(bytes::read_f32_le(&bytes[1..])),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &SetpointStatus, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_f32_le(&mut bytes[1..], value.value as f32);
    }
}

impl FixedSizeVariation for Group40Var4 {
    type Value = SetpointStatus;
    const SIZE: u8 = 9;

    fn read(bytes: &[u8]) -> SetpointStatus {
        SetpointStatus::new(
            bytes::read_f64_le(&bytes[1..]),
            Flags::from_bits_retain(bytes[0]),
        )
    }

    fn write(value: &SetpointStatus, bytes: &mut [u8]) {
        bytes[0] = value.flags.bits();
        bytes::write_f64_le(&mut bytes[1..], value.value);
    }
}

impl FixedSizeVariation for Group41Var1 {
    type Value = AnalogOutput;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> AnalogOutput {
        AnalogOutput {
            value: f64::from(bytes::read_i32_le(bytes)),
            status: CommandStatus::from(bytes[4]),
        }
    }

    fn write(value: &AnalogOutput, bytes: &mut [u8]) {
        bytes::write_i32_le(bytes, value.value as i32);
        bytes[4] = value.status as u8;
    }
}

impl FixedSizeVariation for Group41Var2 {
    type Value = AnalogOutput;
    const SIZE: u8 = 3;

    fn read(bytes: &[u8]) -> AnalogOutput {
        AnalogOutput {
            value: f64::from(bytes::read_i16_le(bytes)),
            status: CommandStatus::from(bytes[2]),
        }
    }

    fn write(value: &AnalogOutput, bytes: &mut [u8]) {
        bytes::write_i16_le(bytes, value.value as i16);
        bytes[2] = value.status as u8;
    }
}

impl FixedSizeVariation for Group41Var3 {
    type Value = AnalogOutput;
    const SIZE: u8 = 5;

    fn read(bytes: &[u8]) -> AnalogOutput {
        AnalogOutput {
            value: f64::from(bytes::read_f32_le(bytes)),
            status: CommandStatus::from(bytes[4]),
        }
    }

    fn write(value: &AnalogOutput, bytes: &mut [u8]) {
        bytes::write_f32_le(bytes, value.value as f32);
        bytes[4] = value.status as u8;
    }
}

impl FixedSizeVariation for Group41Var4 {
    type Value = AnalogOutput;
    const SIZE: u8 = 9;

    fn read(bytes: &[u8]) -> AnalogOutput {
        AnalogOutput {
            value: bytes::read_f64_le(bytes),
            status: CommandStatus::from(bytes[8]),
        }
    }

    fn write(value: &AnalogOutput, bytes: &mut [u8]) {
        bytes::write_f64_le(bytes, value.value);
        bytes[8] = value.status as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<V: FixedSizeVariation>(value: V::Value) -> V::Value {
        let mut bytes = [0u8; 16];
        V::write(&value, &mut bytes[..V::SIZE as usize]);
        V::read(&bytes[..V::SIZE as usize])
    }

    #[test]
    fn binary_state_travels_in_bit_seven() {
        let mut byte = [0u8];
        Group1Var2::write(&Binary::new(true, Flags::ONLINE | Flags::RESTART), &mut byte);
        assert_eq!(byte[0], 0x83);

        let decoded = Group1Var2::read(&[0x81]);
        assert!(decoded.value);
        assert_eq!(decoded.flags, Flags::ONLINE);
    }

    #[test]
    fn binary_event_time_round_trip() {
        let value = Binary::new(true, Flags::ONLINE).with_time(Timestamp::new(0x0102_0304_0506));
        let decoded = round_trip::<Group2Var2>(value);
        assert_eq!(decoded, value);
    }

    #[test]
    fn double_bit_state_travels_in_the_top_bits() {
        let mut byte = [0u8];
        Group3Var2::write(
            &DoubleBitBinary::new(DoubleBit::DeterminedOn, Flags::ONLINE),
            &mut byte,
        );
        assert_eq!(byte[0], 0x81);
        assert_eq!(
            Group3Var2::read(&byte).value,
            DoubleBit::DeterminedOn
        );
    }

    #[test]
    fn counter_widths_round_trip() {
        let value = Counter::new(0xCAFE, Flags::ONLINE);
        assert_eq!(round_trip::<Group20Var1>(value), value);
        assert_eq!(round_trip::<Group20Var2>(value), value);
        assert_eq!(round_trip::<Group20Var6>(value), value);
    }

    #[test]
    fn flagless_reads_assume_online() {
        assert_eq!(Group20Var5::read(&[1, 0, 0, 0]).flags, Flags::ONLINE);
        assert_eq!(Group30Var4::read(&[5, 0]).flags, Flags::ONLINE);
    }

    #[test]
    fn analog_precision_variants_round_trip() {
        let value = Analog::new(-1234.0, Flags::ONLINE);
        assert_eq!(round_trip::<Group30Var1>(value), value);
        assert_eq!(round_trip::<Group30Var5>(value), value);
        assert_eq!(round_trip::<Group30Var6>(value), value);

        let timed = value.with_time(Timestamp::new(99_000));
        assert_eq!(round_trip::<Group32Var8>(timed), timed);
    }

    #[test]
    fn analog_integer_writes_saturate() {
        let mut bytes = [0u8; 3];
        Group30Var2::write(&Analog::new(1e9, Flags::ONLINE), &mut bytes);
        assert_eq!(bytes::read_i16_le(&bytes[1..]), i16::MAX);
    }

    #[test]
    fn crob_round_trip() {
        let value = ControlRelayOutputBlock {
            code: 0x41,
            count: 1,
            on_time: 100,
            off_time: 200,
            status: CommandStatus::Success,
        };
        assert_eq!(round_trip::<Group12Var1>(value), value);
    }

    #[test]
    fn crob_unlisted_status_bytes_decode_to_unknown() {
        let mut bytes = [0u8; 11];
        bytes[10] = 0x89;
        assert_eq!(Group12Var1::read(&bytes).status, CommandStatus::Unknown);
    }

    #[test]
    fn analog_output_status_byte_round_trip() {
        let value = AnalogOutput {
            value: 100.0,
            status: CommandStatus::HardwareError,
        };
        assert_eq!(round_trip::<Group41Var3>(value), value);
        assert_eq!(round_trip::<Group41Var4>(value), value);
    }
}
