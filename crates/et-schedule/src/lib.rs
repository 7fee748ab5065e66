//! `et-schedule`: what happens during one simulated day.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`event`]    | `StepEvent`, `EventType`, `FolkAction`                       |
//! | [`day`]      | `DaySchedule` (user events + the implicit `end_day`)         |
//! | [`mobility`] | `MobilityFn` trait, `LogNormalMobility`, `EnergyExponentialMobility`, `CustomMobility` |
//! | [`loader`]   | `load_schedule_csv`, `load_schedule_reader`                  |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                         |
//!
//! # Day model (summary)
//!
//! A day is the user's step events in order, then `end_day`:
//!
//! ```text
//! [greet_neighbors: DISPERSE] → [chores: DISPERSE] → [end_day: SEND_HOME + sleep]
//! ```
//!
//! The event type decides movement (disperse over the network, or go home);
//! the action decides which model transition runs afterwards.

pub mod day;
pub mod error;
pub mod event;
pub mod loader;
pub mod mobility;


pub use day::DaySchedule;
pub use error::{ScheduleError, ScheduleResult};
pub use event::{EventType, FolkAction, StepEvent, END_DAY, MAX_EVENT_NAME_LEN};
pub use loader::{load_schedule_csv, load_schedule_reader};
pub use mobility::{CustomMobility, EnergyExponentialMobility, LogNormalMobility, MobilityFn};
