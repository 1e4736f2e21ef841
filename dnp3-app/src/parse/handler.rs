use dnp3_objects::measurement::{
    Analog, AnalogOutput, Binary, ControlRelayOutputBlock, ControlStatus, Counter,
    DoubleBitBinary, IndexedValue, SetpointStatus,
};
use dnp3_objects::GroupVariation;

/// Callbacks invoked by [`super::parse_headers`], one per decoded object
/// header, in encoded order.
///
/// Each method receives the zero-copy slice of the complete header (from
/// the group byte through the last object byte) and a lazily-decoded,
/// cloneable sequence of indexed values. Both borrow the parse input and
/// are only valid until the callback returns.
///
/// Every method has an empty default body so a handler implements only the
/// shapes it cares about.
#[allow(unused_variables)]
pub trait HeaderHandler<'a> {
    /// An all-objects header (qualifier `0x06`), e.g. a class poll.
    fn all_objects(&mut self, gv: GroupVariation, header: &'a [u8]) {}

    /// Internal-indication bits from a group 80 range header.
    fn on_iin<I>(&mut self, gv: GroupVariation, header: &'a [u8], bits: I)
    where
        I: Iterator<Item = IndexedValue<bool>> + Clone,
    {
    }

    /// Static binary inputs, packed or flagged.
    fn on_range_binary<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Binary>> + Clone,
    {
    }

    /// Static double-bit binary inputs.
    fn on_range_double_bit<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<DoubleBitBinary>> + Clone,
    {
    }

    /// Static binary output statuses.
    fn on_range_control_status<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<ControlStatus>> + Clone,
    {
    }

    /// Static counters.
    fn on_range_counter<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Counter>> + Clone,
    {
    }

    /// Static analog inputs.
    fn on_range_analog<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Analog>> + Clone,
    {
    }

    /// Static analog output statuses.
    fn on_range_setpoint_status<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<SetpointStatus>> + Clone,
    {
    }

    /// Binary input events (group 2).
    fn on_prefix_binary<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Binary>> + Clone,
    {
    }

    /// Double-bit binary input events (group 4).
    fn on_prefix_double_bit<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<DoubleBitBinary>> + Clone,
    {
    }

    /// Counter events (group 22).
    fn on_prefix_counter<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Counter>> + Clone,
    {
    }

    /// Analog events (group 32).
    fn on_prefix_analog<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Analog>> + Clone,
    {
    }

    /// Control relay output blocks (group 12).
    fn on_prefix_crob<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<ControlRelayOutputBlock>> + Clone,
    {
    }

    /// Analog output blocks (group 41).
    fn on_prefix_analog_output<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<AnalogOutput>> + Clone,
    {
    }

    /// Octet strings addressed by range (group 110).
    fn on_range_of_octets<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<&'a [u8]>> + Clone,
    {
    }

    /// Octet strings addressed by index prefix (groups 111 and 112).
    fn on_prefix_of_octets<I>(&mut self, gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<&'a [u8]>> + Clone,
    {
    }
}
