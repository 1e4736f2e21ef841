use dnp3_objects::measurement::{
    Analog, Binary, ControlStatus, Counter, Flags, SetpointStatus,
};

/// One point of a static measurement table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticPoint<T> {
    /// The point index.
    pub index: u16,
    /// The current value.
    pub value: T,
}

/// Read access to the outstation's current values.
///
/// Each table is exposed as a slice in ascending index order; the response
/// context walks it like a cursor, remembering its position between
/// fragments. The core never writes back.
pub trait StaticDatabase {
    /// Binary input points.
    fn binaries(&self) -> &[StaticPoint<Binary>];
    /// Binary output status points.
    fn control_statuses(&self) -> &[StaticPoint<ControlStatus>];
    /// Counter points.
    fn counters(&self) -> &[StaticPoint<Counter>];
    /// Analog input points.
    fn analogs(&self) -> &[StaticPoint<Analog>];
    /// Analog output status points.
    fn setpoint_statuses(&self) -> &[StaticPoint<SetpointStatus>];
}

/// Table sizes for a [`MemoryDatabase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatabaseConfig {
    /// Number of binary input points.
    pub binaries: u16,
    /// Number of binary output status points.
    pub control_statuses: u16,
    /// Number of counter points.
    pub counters: u16,
    /// Number of analog input points.
    pub analogs: u16,
    /// Number of analog output status points.
    pub setpoint_statuses: u16,
}

/// An in-memory point database with contiguous indices starting at zero.
///
/// Points begin in the restart state until their first update.
#[derive(Debug, Clone)]
pub struct MemoryDatabase {
    binaries: Vec<StaticPoint<Binary>>,
    control_statuses: Vec<StaticPoint<ControlStatus>>,
    counters: Vec<StaticPoint<Counter>>,
    analogs: Vec<StaticPoint<Analog>>,
    setpoint_statuses: Vec<StaticPoint<SetpointStatus>>,
}

fn table<T: Copy>(count: u16, default: T) -> Vec<StaticPoint<T>> {
    (0..count)
        .map(|index| StaticPoint {
            index,
            value: default,
        })
        .collect()
}

impl MemoryDatabase {
    /// Create tables of the configured sizes.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            binaries: table(config.binaries, Binary::new(false, Flags::RESTART)),
            control_statuses: table(
                config.control_statuses,
                ControlStatus::new(false, Flags::RESTART),
            ),
            counters: table(config.counters, Counter::new(0, Flags::RESTART)),
            analogs: table(config.analogs, Analog::new(0.0, Flags::RESTART)),
            setpoint_statuses: table(
                config.setpoint_statuses,
                SetpointStatus::new(0.0, Flags::RESTART),
            ),
        }
    }

    /// Update a binary input. Returns `false` for an unknown index.
    pub fn update_binary(&mut self, index: u16, value: Binary) -> bool {
        update(&mut self.binaries, index, value)
    }

    /// Update a binary output status. Returns `false` for an unknown index.
    pub fn update_control_status(&mut self, index: u16, value: ControlStatus) -> bool {
        update(&mut self.control_statuses, index, value)
    }

    /// Update a counter. Returns `false` for an unknown index.
    pub fn update_counter(&mut self, index: u16, value: Counter) -> bool {
        update(&mut self.counters, index, value)
    }

    /// Update an analog input. Returns `false` for an unknown index.
    pub fn update_analog(&mut self, index: u16, value: Analog) -> bool {
        update(&mut self.analogs, index, value)
    }

    /// Update an analog output status. Returns `false` for an unknown index.
    pub fn update_setpoint_status(&mut self, index: u16, value: SetpointStatus) -> bool {
        update(&mut self.setpoint_statuses, index, value)
    }
}

fn update<T>(points: &mut [StaticPoint<T>], index: u16, value: T) -> bool {
    match points.get_mut(usize::from(index)) {
        Some(point) => {
            point.value = value;
            true
        }
        None => false,
    }
}

impl StaticDatabase for MemoryDatabase {
    fn binaries(&self) -> &[StaticPoint<Binary>] {
        &self.binaries
    }

    fn control_statuses(&self) -> &[StaticPoint<ControlStatus>] {
        &self.control_statuses
    }

    fn counters(&self) -> &[StaticPoint<Counter>] {
        &self.counters
    }

    fn analogs(&self) -> &[StaticPoint<Analog>] {
        &self.analogs
    }

    fn setpoint_statuses(&self) -> &[StaticPoint<SetpointStatus>] {
        &self.setpoint_statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_start_in_the_restart_state() {
        let db = MemoryDatabase::new(DatabaseConfig {
            binaries: 2,
            ..Default::default()
        });
        assert_eq!(db.binaries().len(), 2);
        assert_eq!(db.binaries()[1].index, 1);
        assert_eq!(db.binaries()[1].value.flags, Flags::RESTART);
    }

    #[test]
    fn updates_are_bounded_by_the_table() {
        let mut db = MemoryDatabase::new(DatabaseConfig {
            analogs: 1,
            ..Default::default()
        });
        assert!(db.update_analog(0, Analog::new(12.0, Flags::ONLINE)));
        assert!(!db.update_analog(1, Analog::new(12.0, Flags::ONLINE)));
        assert_eq!(db.analogs()[0].value.value, 12.0);
    }
}
