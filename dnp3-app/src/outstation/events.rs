use std::collections::VecDeque;

use dnp3_objects::measurement::{Analog, Binary, Counter};
use dnp3_objects::variation::{
    EventAnalogVariation, EventBinaryVariation, EventCounterVariation,
};

use super::config::{EventBufferConfig, EventClass, ResponseTypes};

/// Selection lifecycle of a buffered event. Selection records the encoding
/// chosen for it, so a selection made under one read header keeps its
/// variation across fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventState<V> {
    Queued,
    Selected(V),
    Written,
}

#[derive(Debug, Clone)]
struct Event<T, V> {
    index: u16,
    value: T,
    class: EventClass,
    state: EventState<V>,
}

/// A bounded, classed store of measurement events.
///
/// Events queue per kind in insertion order. A read interaction selects
/// some of them, the response context writes the selected ones and marks
/// them written, and a confirmation clears the written ones. Inserting
/// into a full kind evicts the oldest event and latches the sticky
/// overflow flag.
#[derive(Debug, Clone)]
pub struct EventBuffer {
    binary: VecDeque<Event<Binary, EventBinaryVariation>>,
    analog: VecDeque<Event<Analog, EventAnalogVariation>>,
    counter: VecDeque<Event<Counter, EventCounterVariation>>,
    config: EventBufferConfig,
    overflow: bool,
}

impl EventBuffer {
    /// An empty buffer with the given capacities.
    pub fn new(config: EventBufferConfig) -> Self {
        Self {
            binary: VecDeque::new(),
            analog: VecDeque::new(),
            counter: VecDeque::new(),
            config,
            overflow: false,
        }
    }

    /// Queue a binary event.
    pub fn update_binary(&mut self, index: u16, value: Binary, class: EventClass) {
        if self.binary.len() == self.config.max_binary {
            self.binary.pop_front();
            self.overflow = true;
        }
        self.binary.push_back(Event {
            index,
            value,
            class,
            state: EventState::Queued,
        });
    }

    /// Queue an analog event.
    pub fn update_analog(&mut self, index: u16, value: Analog, class: EventClass) {
        if self.analog.len() == self.config.max_analog {
            self.analog.pop_front();
            self.overflow = true;
        }
        self.analog.push_back(Event {
            index,
            value,
            class,
            state: EventState::Queued,
        });
    }

    /// Queue a counter event.
    pub fn update_counter(&mut self, index: u16, value: Counter, class: EventClass) {
        if self.counter.len() == self.config.max_counter {
            self.counter.pop_front();
            self.overflow = true;
        }
        self.counter.push_back(Event {
            index,
            value,
            class,
            state: EventState::Queued,
        });
    }

    /// Select up to `max` queued events of `class`, binary first, then
    /// analog, then counter, encoding each kind with its configured
    /// default. Returns the number selected.
    pub fn select_by_class(
        &mut self,
        class: EventClass,
        max: usize,
        defaults: &ResponseTypes,
    ) -> usize {
        let mut remaining = max;
        remaining -= select(
            &mut self.binary,
            defaults.event_binary,
            remaining,
            |e| e.class == class,
        );
        remaining -= select(
            &mut self.analog,
            defaults.event_analog,
            remaining,
            |e| e.class == class,
        );
        remaining -= select(
            &mut self.counter,
            defaults.event_counter,
            remaining,
            |e| e.class == class,
        );
        max - remaining
    }

    /// Select up to `max` queued binary events of any class, encoded with
    /// `variation`.
    pub fn select_binary_by_variation(
        &mut self,
        variation: EventBinaryVariation,
        max: usize,
    ) -> usize {
        select(&mut self.binary, variation, max, |_| true)
    }

    /// Select up to `max` queued analog events of any class, encoded with
    /// `variation`.
    pub fn select_analog_by_variation(
        &mut self,
        variation: EventAnalogVariation,
        max: usize,
    ) -> usize {
        select(&mut self.analog, variation, max, |_| true)
    }

    /// Select up to `max` queued counter events of any class, encoded with
    /// `variation`.
    pub fn select_counter_by_variation(
        &mut self,
        variation: EventCounterVariation,
        max: usize,
    ) -> usize {
        select(&mut self.counter, variation, max, |_| true)
    }

    /// Number of events currently selected.
    pub fn num_selected(&self) -> usize {
        count_selected(&self.binary) + count_selected(&self.analog) + count_selected(&self.counter)
    }

    /// `true` if any unwritten event of `class` is buffered.
    pub fn has_class_data(&self, class: EventClass) -> bool {
        has_class(&self.binary, class)
            || has_class(&self.analog, class)
            || has_class(&self.counter, class)
    }

    /// `true` once an insertion has evicted an event. Sticky until
    /// [`EventBuffer::clear_overflow`].
    pub const fn is_overflow(&self) -> bool {
        self.overflow
    }

    /// Reset the sticky overflow flag.
    pub fn clear_overflow(&mut self) {
        self.overflow = false;
    }

    /// The selected binary events in insertion order, with their chosen
    /// encodings.
    pub fn selected_binary(
        &self,
    ) -> impl Iterator<Item = (u16, &Binary, EventBinaryVariation)> + '_ {
        selected(&self.binary)
    }

    /// The selected analog events in insertion order, with their chosen
    /// encodings.
    pub fn selected_analog(
        &self,
    ) -> impl Iterator<Item = (u16, &Analog, EventAnalogVariation)> + '_ {
        selected(&self.analog)
    }

    /// The selected counter events in insertion order, with their chosen
    /// encodings.
    pub fn selected_counter(
        &self,
    ) -> impl Iterator<Item = (u16, &Counter, EventCounterVariation)> + '_ {
        selected(&self.counter)
    }

    /// Mark the first `n` selected binary events written.
    pub fn mark_binary_written(&mut self, n: usize) {
        mark_written(&mut self.binary, n);
    }

    /// Mark the first `n` selected analog events written.
    pub fn mark_analog_written(&mut self, n: usize) {
        mark_written(&mut self.analog, n);
    }

    /// Mark the first `n` selected counter events written.
    pub fn mark_counter_written(&mut self, n: usize) {
        mark_written(&mut self.counter, n);
    }

    /// Drop every written event. Returns the number dropped.
    pub fn clear_written(&mut self) -> usize {
        clear_written(&mut self.binary)
            + clear_written(&mut self.analog)
            + clear_written(&mut self.counter)
    }

    /// Return every selected event to the queued state. Returns the number
    /// deselected.
    pub fn deselect(&mut self) -> usize {
        deselect(&mut self.binary) + deselect(&mut self.analog) + deselect(&mut self.counter)
    }
}

fn select<T, V: Copy>(
    events: &mut VecDeque<Event<T, V>>,
    variation: V,
    max: usize,
    eligible: impl Fn(&Event<T, V>) -> bool,
) -> usize {
    let mut selected = 0;
    for event in events
        .iter_mut()
        .filter(|e| matches!(e.state, EventState::Queued) && eligible(e))
        .take(max)
    {
        event.state = EventState::Selected(variation);
        selected += 1;
    }
    selected
}

fn count_selected<T, V: Copy>(events: &VecDeque<Event<T, V>>) -> usize {
    events
        .iter()
        .filter(|e| matches!(e.state, EventState::Selected(_)))
        .count()
}

fn has_class<T, V: Copy>(events: &VecDeque<Event<T, V>>, class: EventClass) -> bool {
    events
        .iter()
        .any(|e| e.class == class && !matches!(e.state, EventState::Written))
}

fn selected<T, V: Copy>(
    events: &VecDeque<Event<T, V>>,
) -> impl Iterator<Item = (u16, &T, V)> + '_ {
    events.iter().filter_map(|e| match e.state {
        EventState::Selected(variation) => Some((e.index, &e.value, variation)),
        _ => None,
    })
}

fn mark_written<T, V: Copy>(events: &mut VecDeque<Event<T, V>>, n: usize) {
    for event in events
        .iter_mut()
        .filter(|e| matches!(e.state, EventState::Selected(_)))
        .take(n)
    {
        event.state = EventState::Written;
    }
}

fn clear_written<T, V: Copy>(events: &mut VecDeque<Event<T, V>>) -> usize {
    let before = events.len();
    events.retain(|e| !matches!(e.state, EventState::Written));
    before - events.len()
}

fn deselect<T, V: Copy>(events: &mut VecDeque<Event<T, V>>) -> usize {
    let mut deselected = 0;
    for event in events.iter_mut() {
        if matches!(event.state, EventState::Selected(_)) {
            event.state = EventState::Queued;
            deselected += 1;
        }
    }
    deselected
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnp3_objects::measurement::Flags;

    fn buffer() -> EventBuffer {
        EventBuffer::new(EventBufferConfig::uniform(3))
    }

    fn binary(value: bool) -> Binary {
        Binary::new(value, Flags::ONLINE)
    }

    #[test]
    fn class_selection_is_capped_and_ordered() {
        let mut events = buffer();
        events.update_binary(0, binary(true), EventClass::Class1);
        events.update_binary(1, binary(false), EventClass::Class2);
        events.update_binary(2, binary(true), EventClass::Class1);

        let selected = events.select_by_class(EventClass::Class1, 1, &ResponseTypes::default());
        assert_eq!(selected, 1);
        let picked: Vec<u16> = events.selected_binary().map(|(i, _, _)| i).collect();
        assert_eq!(picked, [0]);
    }

    #[test]
    fn written_events_clear_and_selected_events_deselect() {
        let mut events = buffer();
        events.update_binary(0, binary(true), EventClass::Class1);
        events.update_binary(1, binary(true), EventClass::Class1);
        events.select_by_class(EventClass::Class1, usize::MAX, &ResponseTypes::default());

        events.mark_binary_written(1);
        assert_eq!(events.clear_written(), 1);
        assert_eq!(events.deselect(), 1);
        assert_eq!(events.num_selected(), 0);
        assert!(events.has_class_data(EventClass::Class1));
    }

    #[test]
    fn overflow_evicts_the_oldest_and_latches() {
        let mut events = buffer();
        for index in 0..4 {
            events.update_binary(index, binary(true), EventClass::Class1);
        }
        assert!(events.is_overflow());
        let selected = events.select_by_class(EventClass::Class1, usize::MAX, &ResponseTypes::default());
        assert_eq!(selected, 3);
        let first: Vec<u16> = events.selected_binary().map(|(i, _, _)| i).collect();
        assert_eq!(first, [1, 2, 3]);
    }

    #[test]
    fn variation_selection_overrides_the_default() {
        let mut events = buffer();
        events.update_binary(0, binary(true), EventClass::Class1);
        events.select_binary_by_variation(EventBinaryVariation::Group2Var2, usize::MAX);
        let (_, _, variation) = events.selected_binary().next().unwrap();
        assert_eq!(variation, EventBinaryVariation::Group2Var2);
    }
}
