use std::collections::VecDeque;

use tracing::{debug, warn};

use dnp3_objects::measurement::{Binary, ControlStatus};
use dnp3_objects::objects::{self, BitfieldVariation, FixedSizeVariation};
use dnp3_objects::variation::{
    EventAnalogVariation, EventBinaryVariation, EventCounterVariation, StaticAnalogVariation,
    StaticBinaryVariation, StaticControlStatusVariation, StaticCounterVariation,
    StaticSetpointStatusVariation,
};
use dnp3_objects::{ControlField, FunctionCode, IinField, QualifierCode};

use super::config::{ClassMask, EventClass, ResponseTypes};
use super::database::{StaticDatabase, StaticPoint};
use super::events::EventBuffer;
use crate::error::ParseError;
use crate::parse::{parse_read_headers, ReadDetails, ReadHeader, Request};
use crate::write::Apdu;

/// What kind of interaction the context is currently serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// No interaction in progress.
    Undefined,
    /// Serving a read request.
    Solicited,
    /// Reporting events on the outstation's initiative.
    Unsolicited,
}

/// A deferred static emission: which table to scan, how to encode it, and
/// how far the scan has progressed. The queue preserves the order in which
/// the request's headers arrived.
#[derive(Debug, Clone, Copy)]
enum StaticWrite {
    Binary(StaticBinaryVariation, usize),
    ControlStatus(StaticControlStatusVariation, usize),
    Counter(StaticCounterVariation, usize),
    Analog(StaticAnalogVariation, usize),
    SetpointStatus(StaticSetpointStatusVariation, usize),
}

/// Composes the response side of one read interaction, across as many
/// fragments as it takes.
///
/// `configure` digests a read request into event selections and a static
/// write queue; each `load_response` call drains as much as fits into one
/// fragment and maintains the FIR/FIN/CON flags. The unsolicited entry
/// points share the event path but never emit static data.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    mode: ResponseMode,
    fir: bool,
    fin: bool,
    loaded_events: bool,
    iin: IinField,
    static_queue: VecDeque<StaticWrite>,
    types: ResponseTypes,
}

impl ResponseContext {
    /// A context serving responses with the given default encodings.
    pub fn new(types: ResponseTypes) -> Self {
        Self {
            mode: ResponseMode::Undefined,
            fir: true,
            fin: false,
            loaded_events: false,
            iin: IinField::empty(),
            static_queue: VecDeque::new(),
            types,
        }
    }

    /// The current interaction mode.
    pub const fn mode(&self) -> ResponseMode {
        self.mode
    }

    /// `true` once the last loaded fragment was final.
    pub const fn is_complete(&self) -> bool {
        self.fin
    }

    /// `true` when nothing remains to serialize.
    pub fn is_empty(&self, events: &EventBuffer) -> bool {
        self.static_queue.is_empty() && events.num_selected() == 0
    }

    /// Abandon the interaction: forget queued static writes, return any
    /// selected-but-unwritten events to the buffer, and clear the flags.
    pub fn reset(&mut self, events: &mut EventBuffer) {
        self.mode = ResponseMode::Undefined;
        self.fir = true;
        self.fin = false;
        self.loaded_events = false;
        self.iin = IinField::empty();
        self.static_queue.clear();
        events.deselect();
    }

    /// Apply a confirmation: drop the events written in the confirmed
    /// fragment and deselect anything still pending.
    pub fn clear_written(&mut self, events: &mut EventBuffer) {
        let written = events.clear_written();
        let deselected = events.deselect();
        debug!("cleared {} written events, deselected {}", written, deselected);
    }

    /// [`ResponseContext::clear_written`] followed by a full reset.
    pub fn clear_and_reset(&mut self, events: &mut EventBuffer) {
        self.clear_written(events);
        self.reset(events);
    }

    /// Digest a read request.
    ///
    /// Every header either queues a static emission, selects events, or is
    /// reported unsupported in the returned IIN. Malformed object headers
    /// abort with a parse error and leave nothing enqueued but the headers
    /// already walked; callers reset on error.
    pub fn configure(
        &mut self,
        request: &Request<'_>,
        events: &mut EventBuffer,
    ) -> Result<IinField, ParseError> {
        self.reset(events);
        self.mode = ResponseMode::Solicited;
        parse_read_headers(request.objects, |header| {
            self.on_read_header(header, events);
        })?;
        Ok(self.iin)
    }

    fn on_read_header(&mut self, header: ReadHeader<'_>, events: &mut EventBuffer) {
        let max = event_count(&header);
        let types = self.types;
        match (header.record.group, header.record.variation) {
            (1, 0) => self.record_static(StaticWrite::Binary(types.static_binary, 0)),
            (1, variation) => self.record_static_binary(variation),
            (10, 0) => {
                self.record_static(StaticWrite::ControlStatus(types.static_control_status, 0))
            }
            (10, variation) => self.record_static_control_status(variation),
            (20, 0) => self.record_static(StaticWrite::Counter(types.static_counter, 0)),
            (20, variation) => self.record_static_counter(variation),
            (30, 0) => self.record_static(StaticWrite::Analog(types.static_analog, 0)),
            (30, variation) => self.record_static_analog(variation),
            (40, 0) => {
                self.record_static(StaticWrite::SetpointStatus(types.static_setpoint_status, 0))
            }
            (40, variation) => self.record_static_setpoint_status(variation),
            (2, 0) => {
                self.note_overflow(events);
                events.select_binary_by_variation(types.event_binary, max);
            }
            (2, variation) => match EventBinaryVariation::from_variation(variation) {
                Some(variation) => {
                    self.note_overflow(events);
                    events.select_binary_by_variation(variation, max);
                }
                None => self.unsupported(header),
            },
            (22, 0) => {
                self.note_overflow(events);
                events.select_counter_by_variation(types.event_counter, max);
            }
            (22, variation) => match EventCounterVariation::from_variation(variation) {
                Some(variation) => {
                    self.note_overflow(events);
                    events.select_counter_by_variation(variation, max);
                }
                None => self.unsupported(header),
            },
            (32, 0) => {
                self.note_overflow(events);
                events.select_analog_by_variation(types.event_analog, max);
            }
            (32, variation) => match EventAnalogVariation::from_variation(variation) {
                Some(variation) => {
                    self.note_overflow(events);
                    events.select_analog_by_variation(variation, max);
                }
                None => self.unsupported(header),
            },
            (60, 1) => {
                self.record_static(StaticWrite::Binary(types.static_binary, 0));
                self.record_static(StaticWrite::Analog(types.static_analog, 0));
                self.record_static(StaticWrite::Counter(types.static_counter, 0));
                self.record_static(StaticWrite::ControlStatus(types.static_control_status, 0));
                self.record_static(StaticWrite::SetpointStatus(
                    types.static_setpoint_status,
                    0,
                ));
            }
            (60, 2) => self.select_class(events, EventClass::Class1, max),
            (60, 3) => self.select_class(events, EventClass::Class2, max),
            (60, 4) => self.select_class(events, EventClass::Class3, max),
            _ => self.unsupported(header),
        }
    }

    fn record_static(&mut self, write: StaticWrite) {
        self.static_queue.push_back(write);
    }

    fn record_static_binary(&mut self, variation: u8) {
        match StaticBinaryVariation::from_variation(variation) {
            Some(variation) => self.record_static(StaticWrite::Binary(variation, 0)),
            None => self.iin |= IinField::FUNC_NOT_SUPPORTED,
        }
    }

    fn record_static_control_status(&mut self, variation: u8) {
        match StaticControlStatusVariation::from_variation(variation) {
            Some(variation) => self.record_static(StaticWrite::ControlStatus(variation, 0)),
            None => self.iin |= IinField::FUNC_NOT_SUPPORTED,
        }
    }

    fn record_static_counter(&mut self, variation: u8) {
        match StaticCounterVariation::from_variation(variation) {
            Some(variation) => self.record_static(StaticWrite::Counter(variation, 0)),
            None => self.iin |= IinField::FUNC_NOT_SUPPORTED,
        }
    }

    fn record_static_analog(&mut self, variation: u8) {
        match StaticAnalogVariation::from_variation(variation) {
            Some(variation) => self.record_static(StaticWrite::Analog(variation, 0)),
            None => self.iin |= IinField::FUNC_NOT_SUPPORTED,
        }
    }

    fn record_static_setpoint_status(&mut self, variation: u8) {
        match StaticSetpointStatusVariation::from_variation(variation) {
            Some(variation) => self.record_static(StaticWrite::SetpointStatus(variation, 0)),
            None => self.iin |= IinField::FUNC_NOT_SUPPORTED,
        }
    }

    fn unsupported(&mut self, header: ReadHeader<'_>) {
        warn!(
            "read for group {} var {} not supported",
            header.record.group, header.record.variation
        );
        self.iin |= IinField::FUNC_NOT_SUPPORTED;
    }

    fn note_overflow(&mut self, events: &EventBuffer) {
        if events.is_overflow() {
            self.iin |= IinField::EVENT_BUFFER_OVERFLOW;
        }
    }

    fn select_class(&mut self, events: &mut EventBuffer, class: EventClass, max: usize) {
        self.note_overflow(events);
        events.select_by_class(class, max, &self.types);
    }

    /// Load one solicited fragment: events first, then static data, then
    /// the FIR/FIN/CON finalization.
    pub fn load_response<D: StaticDatabase>(
        &mut self,
        apdu: &mut Apdu,
        database: &D,
        events: &mut EventBuffer,
    ) {
        apdu.set_function(FunctionCode::Response);
        apdu.set_iin(apdu.iin() | self.iin);
        let mut wrote_all = self.load_events(apdu, events);
        if wrote_all {
            wrote_all = self.load_static(apdu, database);
        }
        self.finalize(apdu, wrote_all);
    }

    /// Select the classes named by `mask` for unsolicited reporting.
    /// Returns `true` if anything is selected.
    pub fn select_unsol(&mut self, events: &mut EventBuffer, mask: ClassMask) -> bool {
        self.mode = ResponseMode::Unsolicited;
        if mask.class1 {
            self.select_class(events, EventClass::Class1, usize::MAX);
        }
        if mask.class2 {
            self.select_class(events, EventClass::Class2, usize::MAX);
        }
        if mask.class3 {
            self.select_class(events, EventClass::Class3, usize::MAX);
        }
        events.num_selected() > 0
    }

    /// `true` if the buffer holds data for any class named by `mask`.
    pub fn has_events(&self, events: &EventBuffer, mask: ClassMask) -> bool {
        (mask.class1 && events.has_class_data(EventClass::Class1))
            || (mask.class2 && events.has_class_data(EventClass::Class2))
            || (mask.class3 && events.has_class_data(EventClass::Class3))
    }

    /// Load one unsolicited fragment: event data only, all flags set.
    pub fn load_unsol(
        &mut self,
        apdu: &mut Apdu,
        iin: IinField,
        events: &mut EventBuffer,
        mask: ClassMask,
    ) {
        self.select_unsol(events, mask);
        apdu.set_function(FunctionCode::UnsolicitedResponse);
        apdu.set_iin(iin | self.iin);
        let seq = apdu.control().seq;
        apdu.set_control(ControlField::new(true, true, true, true, seq));
        self.load_events(apdu, events);
        self.loaded_events = false;
    }

    fn finalize(&mut self, apdu: &mut Apdu, fin: bool) {
        self.fin = fin;
        let con = !fin || self.loaded_events;
        let seq = apdu.control().seq;
        apdu.set_control(ControlField::new(self.fir, fin, con, false, seq));
        self.fir = false;
        self.loaded_events = false;
    }

    fn load_events(&mut self, apdu: &mut Apdu, events: &mut EventBuffer) -> bool {
        // kind order is fixed: binary, analog, counter
        let (binary_written, binary_all) = {
            let mut written = 0;
            let mut all = true;
            for (index, value, variation) in events.selected_binary() {
                let ok = match variation {
                    EventBinaryVariation::Group2Var1 => {
                        write_event::<objects::Group2Var1>(apdu, index, value)
                    }
                    EventBinaryVariation::Group2Var2 => {
                        write_event::<objects::Group2Var2>(apdu, index, value)
                    }
                    EventBinaryVariation::Group2Var3 => {
                        write_event::<objects::Group2Var3>(apdu, index, value)
                    }
                };
                if !ok {
                    all = false;
                    break;
                }
                written += 1;
            }
            (written, all)
        };
        events.mark_binary_written(binary_written);
        self.loaded_events |= binary_written > 0;
        if !binary_all {
            return false;
        }

        let (analog_written, analog_all) = {
            let mut written = 0;
            let mut all = true;
            for (index, value, variation) in events.selected_analog() {
                let ok = match variation {
                    EventAnalogVariation::Group32Var1 => {
                        write_event::<objects::Group32Var1>(apdu, index, value)
                    }
                    EventAnalogVariation::Group32Var2 => {
                        write_event::<objects::Group32Var2>(apdu, index, value)
                    }
                    EventAnalogVariation::Group32Var3 => {
                        write_event::<objects::Group32Var3>(apdu, index, value)
                    }
                    EventAnalogVariation::Group32Var4 => {
                        write_event::<objects::Group32Var4>(apdu, index, value)
                    }
                    EventAnalogVariation::Group32Var5 => {
                        write_event::<objects::Group32Var5>(apdu, index, value)
                    }
                    EventAnalogVariation::Group32Var6 => {
                        write_event::<objects::Group32Var6>(apdu, index, value)
                    }
                    EventAnalogVariation::Group32Var7 => {
                        write_event::<objects::Group32Var7>(apdu, index, value)
                    }
                    EventAnalogVariation::Group32Var8 => {
                        write_event::<objects::Group32Var8>(apdu, index, value)
                    }
                };
                if !ok {
                    all = false;
                    break;
                }
                written += 1;
            }
            (written, all)
        };
        events.mark_analog_written(analog_written);
        self.loaded_events |= analog_written > 0;
        if !analog_all {
            return false;
        }

        let (counter_written, counter_all) = {
            let mut written = 0;
            let mut all = true;
            for (index, value, variation) in events.selected_counter() {
                let ok = match variation {
                    EventCounterVariation::Group22Var1 => {
                        write_event::<objects::Group22Var1>(apdu, index, value)
                    }
                    EventCounterVariation::Group22Var2 => {
                        write_event::<objects::Group22Var2>(apdu, index, value)
                    }
                    EventCounterVariation::Group22Var5 => {
                        write_event::<objects::Group22Var5>(apdu, index, value)
                    }
                    EventCounterVariation::Group22Var6 => {
                        write_event::<objects::Group22Var6>(apdu, index, value)
                    }
                };
                if !ok {
                    all = false;
                    break;
                }
                written += 1;
            }
            (written, all)
        };
        events.mark_counter_written(counter_written);
        self.loaded_events |= counter_written > 0;
        counter_all
    }

    fn load_static<D: StaticDatabase>(&mut self, apdu: &mut Apdu, database: &D) -> bool {
        while let Some(front) = self.static_queue.front_mut() {
            let done = match front {
                StaticWrite::Binary(variation, pos) => match variation {
                    StaticBinaryVariation::Group1Var1 => write_static_bits::<objects::Group1Var1, _>(
                        apdu,
                        database.binaries(),
                        pos,
                        |point: &Binary| point.value,
                    ),
                    StaticBinaryVariation::Group1Var2 => {
                        write_static_points::<objects::Group1Var2>(apdu, database.binaries(), pos)
                    }
                },
                StaticWrite::ControlStatus(variation, pos) => match variation {
                    StaticControlStatusVariation::Group10Var1 => {
                        write_static_bits::<objects::Group10Var1, _>(
                            apdu,
                            database.control_statuses(),
                            pos,
                            |point: &ControlStatus| point.value,
                        )
                    }
                    StaticControlStatusVariation::Group10Var2 => {
                        write_static_points::<objects::Group10Var2>(
                            apdu,
                            database.control_statuses(),
                            pos,
                        )
                    }
                },
                StaticWrite::Counter(variation, pos) => match variation {
                    StaticCounterVariation::Group20Var1 => {
                        write_static_points::<objects::Group20Var1>(apdu, database.counters(), pos)
                    }
                    StaticCounterVariation::Group20Var2 => {
                        write_static_points::<objects::Group20Var2>(apdu, database.counters(), pos)
                    }
                    StaticCounterVariation::Group20Var5 => {
                        write_static_points::<objects::Group20Var5>(apdu, database.counters(), pos)
                    }
                    StaticCounterVariation::Group20Var6 => {
                        write_static_points::<objects::Group20Var6>(apdu, database.counters(), pos)
                    }
                },
                StaticWrite::Analog(variation, pos) => match variation {
                    StaticAnalogVariation::Group30Var1 => {
                        write_static_points::<objects::Group30Var1>(apdu, database.analogs(), pos)
                    }
                    StaticAnalogVariation::Group30Var2 => {
                        write_static_points::<objects::Group30Var2>(apdu, database.analogs(), pos)
                    }
                    StaticAnalogVariation::Group30Var3 => {
                        write_static_points::<objects::Group30Var3>(apdu, database.analogs(), pos)
                    }
                    StaticAnalogVariation::Group30Var4 => {
                        write_static_points::<objects::Group30Var4>(apdu, database.analogs(), pos)
                    }
                    StaticAnalogVariation::Group30Var5 => {
                        write_static_points::<objects::Group30Var5>(apdu, database.analogs(), pos)
                    }
                    StaticAnalogVariation::Group30Var6 => {
                        write_static_points::<objects::Group30Var6>(apdu, database.analogs(), pos)
                    }
                },
                StaticWrite::SetpointStatus(variation, pos) => match variation {
                    StaticSetpointStatusVariation::Group40Var1 => {
                        write_static_points::<objects::Group40Var1>(
                            apdu,
                            database.setpoint_statuses(),
                            pos,
                        )
                    }
                    StaticSetpointStatusVariation::Group40Var2 => {
                        write_static_points::<objects::Group40Var2>(
                            apdu,
                            database.setpoint_statuses(),
                            pos,
                        )
                    }
                    StaticSetpointStatusVariation::Group40Var3 => {
                        write_static_points::<objects::Group40Var3>(
                            apdu,
                            database.setpoint_statuses(),
                            pos,
                        )
                    }
                    StaticSetpointStatusVariation::Group40Var4 => {
                        write_static_points::<objects::Group40Var4>(
                            apdu,
                            database.setpoint_statuses(),
                            pos,
                        )
                    }
                },
            };
            if done {
                self.static_queue.pop_front();
            } else {
                return false;
            }
        }
        true
    }
}

/// What the outstation will serve for a counted event read. Only the one-
/// and two-byte count forms cap the selection; everything else means "all
/// available".
fn event_count(header: &ReadHeader<'_>) -> usize {
    match (header.qualifier, &header.details) {
        (QualifierCode::Uint8Count | QualifierCode::Uint16Count, ReadDetails::Count(n)) => {
            *n as usize
        }
        _ => usize::MAX,
    }
}

/// Write one event as a count-1 indexed header. A header that cannot be
/// completed is removed so the fragment stays well formed.
fn write_event<V: FixedSizeVariation>(apdu: &mut Apdu, index: u16, value: &V::Value) -> bool {
    let mut iter = match apdu.write_indexed::<V>(1, u32::from(index)) {
        Ok(iter) => iter,
        Err(_) => return false,
    };
    let ok = iter.set_index(u32::from(index)) && iter.write(value);
    iter.finish();
    ok
}

/// Emit as many points as fit, in contiguous-index runs, resuming from
/// `*pos`. Returns `true` when the table is exhausted.
fn write_static_points<V: FixedSizeVariation>(
    apdu: &mut Apdu,
    points: &[StaticPoint<V::Value>],
    pos: &mut usize,
) -> bool {
    while *pos < points.len() {
        let run_start = *pos;
        let run_len = contiguous_run(points, run_start);
        let start_index = u32::from(points[run_start].index);

        let header_len = 3 + 2 * QualifierCode::range_for(start_index + run_len as u32 - 1)
            .index_width();
        let space = apdu.remaining();
        let size = V::SIZE as usize;
        if space < header_len + size {
            return false;
        }
        let n = run_len.min((space - header_len) / size);

        let mut iter = match apdu.write_contiguous::<V>(start_index, start_index + n as u32 - 1) {
            Ok(iter) => iter,
            Err(_) => return false,
        };
        for point in &points[run_start..run_start + n] {
            if !iter.write(&point.value) {
                break;
            }
        }
        let written = iter.finish() as usize;
        *pos += written;
        if written < run_len {
            return false;
        }
    }
    true
}

/// Bit-packed counterpart of [`write_static_points`].
fn write_static_bits<V: BitfieldVariation, T>(
    apdu: &mut Apdu,
    points: &[StaticPoint<T>],
    pos: &mut usize,
    to_bit: fn(&T) -> bool,
) -> bool {
    while *pos < points.len() {
        let run_start = *pos;
        let run_len = contiguous_run(points, run_start);
        let start_index = u32::from(points[run_start].index);

        let header_len = 3 + 2 * QualifierCode::range_for(start_index + run_len as u32 - 1)
            .index_width();
        let space = apdu.remaining();
        if space < header_len + 1 {
            return false;
        }
        let n = run_len.min((space - header_len) * 8);

        let mut iter = match apdu.write_bits::<V>(start_index, start_index + n as u32 - 1) {
            Ok(iter) => iter,
            Err(_) => return false,
        };
        for point in &points[run_start..run_start + n] {
            if !iter.write(to_bit(&point.value)) {
                break;
            }
        }
        let written = iter.finish() as usize;
        *pos += written;
        if written < run_len {
            return false;
        }
    }
    true
}

/// Length of the run of consecutive indices starting at `from`.
fn contiguous_run<T>(points: &[StaticPoint<T>], from: usize) -> usize {
    let first = u32::from(points[from].index);
    let mut len = 1;
    while from + len < points.len()
        && u32::from(points[from + len].index) == first + len as u32
    {
        len += 1;
    }
    len
}
