use dnp3_objects::variation::{
    EventAnalogVariation, EventBinaryVariation, EventCounterVariation, StaticAnalogVariation,
    StaticBinaryVariation, StaticControlStatusVariation, StaticCounterVariation,
    StaticSetpointStatusVariation,
};

/// The priority class of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// Highest priority.
    Class1,
    /// Medium priority.
    Class2,
    /// Lowest priority.
    Class3,
}

/// A set of event classes, e.g. the classes enabled for unsolicited
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassMask {
    /// Class 1 included.
    pub class1: bool,
    /// Class 2 included.
    pub class2: bool,
    /// Class 3 included.
    pub class3: bool,
}

impl ClassMask {
    /// A mask naming the given classes.
    pub const fn new(class1: bool, class2: bool, class3: bool) -> Self {
        Self {
            class1,
            class2,
            class3,
        }
    }

    /// Every class.
    pub const fn all() -> Self {
        Self::new(true, true, true)
    }

    /// `true` if any class is named.
    pub const fn any(&self) -> bool {
        self.class1 || self.class2 || self.class3
    }

    /// `true` if `class` is named.
    pub const fn contains(&self, class: EventClass) -> bool {
        match class {
            EventClass::Class1 => self.class1,
            EventClass::Class2 => self.class2,
            EventClass::Class3 => self.class3,
        }
    }
}

/// Per-kind capacities of the event buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBufferConfig {
    /// Maximum buffered binary events.
    pub max_binary: usize,
    /// Maximum buffered analog events.
    pub max_analog: usize,
    /// Maximum buffered counter events.
    pub max_counter: usize,
}

impl EventBufferConfig {
    /// The same capacity for every kind.
    pub const fn uniform(max: usize) -> Self {
        Self {
            max_binary: max,
            max_analog: max,
            max_counter: max,
        }
    }
}

impl Default for EventBufferConfig {
    fn default() -> Self {
        Self::uniform(100)
    }
}

/// The outstation's configured default encodings, used when a read header
/// asks for variation zero or selects events by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTypes {
    /// Default static binary encoding.
    pub static_binary: StaticBinaryVariation,
    /// Default static binary-output-status encoding.
    pub static_control_status: StaticControlStatusVariation,
    /// Default static counter encoding.
    pub static_counter: StaticCounterVariation,
    /// Default static analog encoding.
    pub static_analog: StaticAnalogVariation,
    /// Default static analog-output-status encoding.
    pub static_setpoint_status: StaticSetpointStatusVariation,
    /// Default binary event encoding.
    pub event_binary: EventBinaryVariation,
    /// Default counter event encoding.
    pub event_counter: EventCounterVariation,
    /// Default analog event encoding.
    pub event_analog: EventAnalogVariation,
}

impl Default for ResponseTypes {
    fn default() -> Self {
        Self {
            static_binary: StaticBinaryVariation::Group1Var2,
            static_control_status: StaticControlStatusVariation::Group10Var2,
            static_counter: StaticCounterVariation::Group20Var1,
            static_analog: StaticAnalogVariation::Group30Var1,
            static_setpoint_status: StaticSetpointStatusVariation::Group40Var1,
            event_binary: EventBinaryVariation::Group2Var1,
            event_counter: EventCounterVariation::Group22Var1,
            event_analog: EventAnalogVariation::Group32Var1,
        }
    }
}
