//! Value model shared by every message kind.

pub mod feed;
pub mod file;
pub mod firmware;
pub mod parameter;
pub mod reading;
pub mod registration;
pub mod status;

pub use feed::{Attribute, DataType, Feed, FeedType};
pub use file::{FileInformation, FileTransferError, FileTransferStatus};
pub use firmware::{FirmwareUpdateError, FirmwareUpdateStatus};
pub use parameter::{Parameter, ParameterName};
pub use reading::{Location, Reading, ValueKind, classify};
pub use registration::{DeviceRegistrationData, RegisteredDeviceInformation};
pub use status::ConnectivityStatus;
