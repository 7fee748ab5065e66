//! Step events: one scheduled slot of a simulated day.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use et_core::{ConfigError, ConfigResult, PlaceType};

use crate::MobilityFn;

/// Name of the implicit terminal event appended to every day.
pub const END_DAY: &str = "end_day";

/// Event names are stored in a fixed-width output column.
pub const MAX_EVENT_NAME_LEN: usize = 32;

// ── EventType / FolkAction ────────────────────────────────────────────────────

/// How folks move at the start of an event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventType {
    /// Folks walk out over the network to nearby places.
    Disperse,
    /// Everybody goes straight home.
    SendHome,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Disperse => "DISPERSE",
            EventType::SendHome => "SEND_HOME",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DISPERSE" => Ok(EventType::Disperse),
            "SEND_HOME" => Ok(EventType::SendHome),
            other => Err(format!("unknown event type {other:?}: expected DISPERSE or SEND_HOME")),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which model transition runs once folks are in place.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FolkAction {
    /// Contact-driven transitions, once per energetic folk at each occupied node.
    Interact,
    /// Duration-driven transitions, once per living folk.
    Sleep,
}

impl FolkAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FolkAction::Interact => "interact",
            FolkAction::Sleep => "sleep",
        }
    }
}

impl FromStr for FolkAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interact" => Ok(FolkAction::Interact),
            "sleep" => Ok(FolkAction::Sleep),
            other => Err(format!("unknown action {other:?}: expected interact or sleep")),
        }
    }
}

// ── StepEvent ─────────────────────────────────────────────────────────────────

/// One event of the day schedule.
///
/// Construction validates everything up front; a `StepEvent` that exists is
/// runnable.
#[derive(Clone)]
pub struct StepEvent {
    name:         String,
    event_type:   EventType,
    action:       FolkAction,
    /// Longest single road a folk will take on this event, metres.
    max_distance: f64,
    place_types:  BTreeSet<PlaceType>,
    mobility:     Option<Arc<dyn MobilityFn>>,
}

impl StepEvent {
    /// General constructor.
    ///
    /// Fails if the name does not fit the output column, the distance is
    /// negative or not finite, or a destination probability function is
    /// given for a `SendHome` event.
    pub fn new(
        name: impl Into<String>,
        event_type: EventType,
        action: FolkAction,
        max_distance: f64,
        place_types: impl IntoIterator<Item = PlaceType>,
        mobility: Option<Arc<dyn MobilityFn>>,
    ) -> ConfigResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::invalid("name", "step event name must not be empty"));
        }
        if name.len() > MAX_EVENT_NAME_LEN {
            return Err(ConfigError::EventNameTooLong { name });
        }
        if !max_distance.is_finite() || max_distance < 0.0 {
            return Err(ConfigError::invalid(
                "max_distance",
                format!("must be finite and non-negative, got {max_distance}"),
            ));
        }
        if mobility.is_some() && event_type == EventType::SendHome {
            return Err(ConfigError::MobilityOnSendHome { event: name });
        }
        Ok(Self {
            name,
            event_type,
            action,
            max_distance,
            place_types: place_types.into_iter().collect(),
            mobility,
        })
    }

    /// A dispersal event followed by interactions, with uniform destination
    /// choice.
    pub fn disperse(
        name: impl Into<String>,
        max_distance: f64,
        place_types: impl IntoIterator<Item = PlaceType>,
    ) -> ConfigResult<Self> {
        Self::new(name, EventType::Disperse, FolkAction::Interact, max_distance, place_types, None)
    }

    /// Everybody home, then the sleep transition.
    pub fn send_home(name: impl Into<String>) -> ConfigResult<Self> {
        Self::new(name, EventType::SendHome, FolkAction::Sleep, 0.0, std::iter::empty(), None)
    }

    /// Pick destinations with `f` instead of uniformly.
    pub fn with_mobility(mut self, f: impl MobilityFn + 'static) -> ConfigResult<Self> {
        if self.event_type == EventType::SendHome {
            return Err(ConfigError::MobilityOnSendHome { event: self.name });
        }
        self.mobility = Some(Arc::new(f));
        Ok(self)
    }

    pub fn with_action(mut self, action: FolkAction) -> Self {
        self.action = action;
        self
    }

    /// The terminal event every day ends with.
    pub(crate) fn end_day() -> Self {
        Self {
            name:         END_DAY.to_owned(),
            event_type:   EventType::SendHome,
            action:       FolkAction::Sleep,
            max_distance: 0.0,
            place_types:  BTreeSet::new(),
            mobility:     None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn action(&self) -> FolkAction {
        self.action
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn place_types(&self) -> &BTreeSet<PlaceType> {
        &self.place_types
    }

    /// Whether folks may stop at a node of type `place` on this event.
    #[inline]
    pub fn allows(&self, place: PlaceType) -> bool {
        self.place_types.contains(&place)
    }

    pub fn mobility(&self) -> Option<&dyn MobilityFn> {
        self.mobility.as_deref()
    }

    pub fn mobility_name(&self) -> Option<&str> {
        self.mobility.as_deref().map(|m| m.name())
    }

    pub fn is_end_day(&self) -> bool {
        self.name == END_DAY
    }
}

impl fmt::Debug for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepEvent")
            .field("name", &self.name)
            .field("event_type", &self.event_type)
            .field("action", &self.action)
            .field("max_distance", &self.max_distance)
            .field("place_types", &self.place_types)
            .field("mobility", &self.mobility_name())
            .finish()
    }
}
