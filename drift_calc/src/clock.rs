use jiff::{Timestamp, tz::TimeZone};
use serde::Serialize;

/// Time source for the clock readout.
pub(crate) trait Clock {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ClockReadout {
    pub date: String,
    pub zulu: String,
    pub local: String,
}

impl ClockReadout {
    pub fn read(clock: &impl Clock, local_time_zone: &TimeZone) -> Self {
        let now = clock.now();
        let local = now.to_zoned(local_time_zone.clone());
        let zulu = now.to_zoned(TimeZone::UTC);
        Self {
            date: local.strftime("%a %d %b %Y").to_string(),
            zulu: zulu.strftime("%H:%M:%S").to_string(),
            local: local.strftime("%H:%M:%S").to_string(),
        }
    }
}
