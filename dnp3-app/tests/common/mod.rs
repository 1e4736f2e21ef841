#![allow(dead_code)]

use dnp3_app::parse::HeaderHandler;
use dnp3_app::prelude::*;
use dnp3_objects::measurement::DoubleBitBinary;

/// Decode a spaced hex string, e.g. `"C3 01 3C 02 06"`.
pub fn from_hex(text: &str) -> Vec<u8> {
    hex::decode(text.replace(' ', "")).unwrap()
}

/// A handler that materializes everything the parser emits.
#[derive(Default)]
pub struct CollectingHandler {
    pub all_objects: Vec<GroupVariation>,
    pub headers: Vec<Vec<u8>>,
    pub iin_bits: Vec<IndexedValue<bool>>,
    pub binaries: Vec<IndexedValue<Binary>>,
    pub double_bits: Vec<IndexedValue<DoubleBitBinary>>,
    pub control_statuses: Vec<IndexedValue<ControlStatus>>,
    pub counters: Vec<IndexedValue<Counter>>,
    pub analogs: Vec<IndexedValue<Analog>>,
    pub setpoint_statuses: Vec<IndexedValue<SetpointStatus>>,
    pub crobs: Vec<IndexedValue<ControlRelayOutputBlock>>,
    pub analog_outputs: Vec<IndexedValue<AnalogOutput>>,
    pub octets: Vec<(u32, Vec<u8>)>,
}

impl<'a> HeaderHandler<'a> for CollectingHandler {
    fn all_objects(&mut self, gv: GroupVariation, header: &'a [u8]) {
        self.all_objects.push(gv);
        self.headers.push(header.to_vec());
    }

    fn on_iin<I>(&mut self, _gv: GroupVariation, header: &'a [u8], bits: I)
    where
        I: Iterator<Item = IndexedValue<bool>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.iin_bits.extend(bits);
    }

    fn on_range_binary<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Binary>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.binaries.extend(values);
    }

    fn on_range_double_bit<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<DoubleBitBinary>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.double_bits.extend(values);
    }

    fn on_range_control_status<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<ControlStatus>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.control_statuses.extend(values);
    }

    fn on_range_counter<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Counter>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.counters.extend(values);
    }

    fn on_range_analog<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Analog>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.analogs.extend(values);
    }

    fn on_range_setpoint_status<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<SetpointStatus>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.setpoint_statuses.extend(values);
    }

    fn on_prefix_binary<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Binary>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.binaries.extend(values);
    }

    fn on_prefix_double_bit<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<DoubleBitBinary>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.double_bits.extend(values);
    }

    fn on_prefix_counter<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Counter>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.counters.extend(values);
    }

    fn on_prefix_analog<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<Analog>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.analogs.extend(values);
    }

    fn on_prefix_crob<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<ControlRelayOutputBlock>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.crobs.extend(values);
    }

    fn on_prefix_analog_output<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<AnalogOutput>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.analog_outputs.extend(values);
    }

    fn on_range_of_octets<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<&'a [u8]>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.octets
            .extend(values.map(|v| (v.index, v.value.to_vec())));
    }

    fn on_prefix_of_octets<I>(&mut self, _gv: GroupVariation, header: &'a [u8], values: I)
    where
        I: Iterator<Item = IndexedValue<&'a [u8]>> + Clone,
    {
        self.headers.push(header.to_vec());
        self.octets
            .extend(values.map(|v| (v.index, v.value.to_vec())));
    }
}

/// A handler that discards everything; used by the robustness tests.
pub struct NullHandler;

impl<'a> HeaderHandler<'a> for NullHandler {}
