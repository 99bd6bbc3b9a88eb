//! Feed, attribute and parameter messages.

use crate::model::{Attribute, Feed, Parameter, ParameterName, Reading};

/// Feed readings, grouped by timestamp on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedValuesMessage {
    pub readings: Vec<Reading>,
}

impl FeedValuesMessage {
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }
}

/// Ask the platform for pending feed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullFeedValuesMessage;

/// Feeds the device declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRegistrationMessage {
    pub feeds: Vec<Feed>,
}

impl FeedRegistrationMessage {
    pub fn new(feeds: Vec<Feed>) -> Self {
        Self { feeds }
    }
}

/// Feeds the device no longer reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRemovalMessage {
    /// Feed references.
    pub references: Vec<String>,
}

impl FeedRemovalMessage {
    pub fn new(references: Vec<String>) -> Self {
        Self { references }
    }
}

/// Attributes the device declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRegistrationMessage {
    pub attributes: Vec<Attribute>,
}

impl AttributeRegistrationMessage {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }
}

/// Parameter values, reported by the device or pushed by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametersUpdateMessage {
    pub parameters: Vec<Parameter>,
}

impl ParametersUpdateMessage {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }

    /// Value of one parameter, if present.
    pub fn get(&self, name: ParameterName) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Ask the platform for the current parameter values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParametersPullMessage;

/// Ask the platform to send a subset of parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynchronizeParametersMessage {
    /// Only these parameters are sent back.
    pub parameters: Vec<ParameterName>,
}

impl SynchronizeParametersMessage {
    pub fn new(parameters: Vec<ParameterName>) -> Self {
        Self { parameters }
    }
}

/// Platform time in milliseconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSyncMessage {
    /// Milliseconds since the epoch.
    pub timestamp: u64,
}

impl TimeSyncMessage {
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

/// Ask which feeds and attributes the platform has for this device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsSynchronizationRequestMessage;

/// Feed and attribute references the platform knows for this device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsSynchronizationResponseMessage {
    /// Feed references.
    pub feeds: Vec<String>,
    /// Attribute names.
    pub attributes: Vec<String>,
}

impl DetailsSynchronizationResponseMessage {
    pub fn new(feeds: Vec<String>, attributes: Vec<String>) -> Self {
        Self { feeds, attributes }
    }
}
