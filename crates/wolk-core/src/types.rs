//! Message and device type tags with their wire tokens.

use serde::{Deserialize, Serialize};

/// Every message kind the protocol knows about.
///
/// Several request/response pairs share one wire token, so the mapping from
/// token back to variant is not injective. [`MessageType::from_token`] always
/// returns the variant a device receives from the platform; codecs that sit
/// on the other side of the conversation remap it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    /// Readings for one or more feeds.
    FeedValues,
    /// Device asks for feed values queued while it was offline.
    PullFeedValues,
    /// Device declares new feeds.
    FeedRegistration,
    /// Device removes feeds by reference.
    FeedRemoval,
    /// Device declares attributes.
    AttributeRegistration,
    /// Parameter values pushed to the device.
    ParameterSync,
    /// Device asks for its parameters.
    PullParameters,
    /// Device asks for a subset of parameters.
    SynchronizeParameters,
    /// Platform time in milliseconds.
    TimeSync,
    /// Platform starts a file transfer.
    FileUploadInit,
    /// Device reports file transfer progress.
    FileUploadStatus,
    /// Platform cancels a file transfer.
    FileUploadAbort,
    /// Device asks for one chunk of a file.
    FileBinaryRequest,
    /// One chunk of a file, with hashes.
    FileBinaryResponse,
    /// Platform asks the device to download a file from a URL.
    FileUrlDownloadInit,
    /// Platform cancels a URL download.
    FileUrlDownloadAbort,
    /// Device reports URL download progress.
    FileUrlDownloadStatus,
    /// Platform asks for the stored file list.
    FileListRequest,
    /// Device sends its stored file list.
    FileListResponse,
    /// Platform deletes files by name.
    FileDelete,
    /// Platform deletes every stored file.
    FilePurge,
    /// Platform starts a firmware install.
    FirmwareUpdateInstall,
    /// Device reports firmware update progress.
    FirmwareUpdateStatus,
    /// Platform cancels a firmware update.
    FirmwareUpdateAbort,
    /// Device asks which feeds and attributes are registered.
    DetailsSynchronizationRequest,
    /// Registered feeds and attributes.
    DetailsSynchronizationResponse,
    /// Gateway registers subdevices.
    DeviceRegistration,
    /// Outcome of a subdevice registration.
    DeviceRegistrationResponse,
    /// Gateway removes subdevices.
    DeviceRemoval,
    /// Gateway asks for its registered children.
    ChildrenSynchronizationRequest,
    /// Keys of the gateway's children.
    ChildrenSynchronizationResponse,
    /// Gateway asks for devices registered since a timestamp.
    RegisteredDevicesRequest,
    /// Devices matching a registered devices request.
    RegisteredDevicesResponse,
    /// Whether the gateway is connected to the platform.
    PlatformConnectionStatus,
    /// Free-form error text from the platform.
    Error,
    /// Channel carried no recognized token.
    #[default]
    Unknown,
}

impl MessageType {
    /// All known variants except [`MessageType::Unknown`].
    pub const ALL: [MessageType; 35] = [
        Self::FeedValues,
        Self::PullFeedValues,
        Self::FeedRegistration,
        Self::FeedRemoval,
        Self::AttributeRegistration,
        Self::ParameterSync,
        Self::PullParameters,
        Self::SynchronizeParameters,
        Self::TimeSync,
        Self::FileUploadInit,
        Self::FileUploadStatus,
        Self::FileUploadAbort,
        Self::FileBinaryRequest,
        Self::FileBinaryResponse,
        Self::FileUrlDownloadInit,
        Self::FileUrlDownloadAbort,
        Self::FileUrlDownloadStatus,
        Self::FileListRequest,
        Self::FileListResponse,
        Self::FileDelete,
        Self::FilePurge,
        Self::FirmwareUpdateInstall,
        Self::FirmwareUpdateStatus,
        Self::FirmwareUpdateAbort,
        Self::DetailsSynchronizationRequest,
        Self::DetailsSynchronizationResponse,
        Self::DeviceRegistration,
        Self::DeviceRegistrationResponse,
        Self::DeviceRemoval,
        Self::ChildrenSynchronizationRequest,
        Self::ChildrenSynchronizationResponse,
        Self::RegisteredDevicesRequest,
        Self::RegisteredDevicesResponse,
        Self::PlatformConnectionStatus,
        Self::Error,
    ];

    /// The canonical wire token. Empty for [`MessageType::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FeedValues => "feed_values",
            Self::PullFeedValues => "pull_feed_values",
            Self::FeedRegistration => "feed_registration",
            Self::FeedRemoval => "feed_removal",
            Self::AttributeRegistration => "attribute_registration",
            Self::ParameterSync => "parameters",
            Self::PullParameters => "pull_parameters",
            Self::SynchronizeParameters => "synchronize_parameters",
            Self::TimeSync => "time",
            Self::FileUploadInit => "file_upload_initiate",
            Self::FileUploadStatus => "file_upload_status",
            Self::FileUploadAbort => "file_upload_abort",
            Self::FileBinaryRequest => "file_binary_request",
            Self::FileBinaryResponse => "file_binary_response",
            Self::FileUrlDownloadInit => "file_url_download_initiate",
            Self::FileUrlDownloadAbort => "file_url_download_abort",
            Self::FileUrlDownloadStatus => "file_url_download_status",
            Self::FileListRequest | Self::FileListResponse => "file_list",
            Self::FileDelete => "file_delete",
            Self::FilePurge => "file_purge",
            Self::FirmwareUpdateInstall => "firmware_update_install",
            Self::FirmwareUpdateStatus => "firmware_update_status",
            Self::FirmwareUpdateAbort => "firmware_update_abort",
            Self::DetailsSynchronizationRequest | Self::DetailsSynchronizationResponse => {
                "details_synchronization"
            }
            Self::DeviceRegistration => "device_registration",
            Self::DeviceRegistrationResponse => "device_registration_response",
            Self::DeviceRemoval => "device_removal",
            Self::ChildrenSynchronizationRequest | Self::ChildrenSynchronizationResponse => {
                "children_synchronization"
            }
            Self::RegisteredDevicesRequest | Self::RegisteredDevicesResponse => {
                "registered_devices"
            }
            Self::PlatformConnectionStatus => "connection_status",
            Self::Error => "error",
            Self::Unknown => "",
        }
    }

    /// Decode a wire token. Shared tokens resolve to the platform-to-device
    /// variant; unrecognized tokens yield [`MessageType::Unknown`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "feed_values" => Self::FeedValues,
            "pull_feed_values" => Self::PullFeedValues,
            "feed_registration" => Self::FeedRegistration,
            "feed_removal" => Self::FeedRemoval,
            "attribute_registration" => Self::AttributeRegistration,
            "parameters" => Self::ParameterSync,
            "pull_parameters" => Self::PullParameters,
            "synchronize_parameters" => Self::SynchronizeParameters,
            "time" => Self::TimeSync,
            "file_upload_initiate" => Self::FileUploadInit,
            "file_upload_status" => Self::FileUploadStatus,
            "file_upload_abort" => Self::FileUploadAbort,
            "file_binary_request" => Self::FileBinaryRequest,
            "file_binary_response" => Self::FileBinaryResponse,
            "file_url_download_initiate" => Self::FileUrlDownloadInit,
            "file_url_download_abort" => Self::FileUrlDownloadAbort,
            "file_url_download_status" => Self::FileUrlDownloadStatus,
            "file_list" => Self::FileListRequest,
            "file_delete" => Self::FileDelete,
            "file_purge" => Self::FilePurge,
            "firmware_update_install" => Self::FirmwareUpdateInstall,
            "firmware_update_status" => Self::FirmwareUpdateStatus,
            "firmware_update_abort" => Self::FirmwareUpdateAbort,
            "details_synchronization" => Self::DetailsSynchronizationResponse,
            "device_registration" => Self::DeviceRegistration,
            "device_registration_response" => Self::DeviceRegistrationResponse,
            "device_removal" => Self::DeviceRemoval,
            "children_synchronization" => Self::ChildrenSynchronizationResponse,
            "registered_devices" => Self::RegisteredDevicesResponse,
            "connection_status" => Self::PlatformConnectionStatus,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Kind of endpoint a topic belongs to, derived from its direction prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    /// Direction prefix missing or unrecognized.
    #[default]
    None,
    /// `d2p`/`p2d` topics.
    Standalone,
    /// `g2p`/`p2g` topics.
    Gateway,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Standalone => "STANDALONE",
            Self::Gateway => "GATEWAY",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_token_decodes_to_a_variant_sharing_it() {
        for message_type in MessageType::ALL {
            let decoded = MessageType::from_token(message_type.as_str());
            assert_ne!(decoded, MessageType::Unknown, "{:?}", message_type);
            assert_eq!(decoded.as_str(), message_type.as_str());
        }
    }

    #[test]
    fn test_shared_tokens_decode_canonically() {
        assert_eq!(MessageType::FileListResponse.as_str(), "file_list");
        assert_eq!(MessageType::from_token("file_list"), MessageType::FileListRequest);
        assert_eq!(
            MessageType::from_token("details_synchronization"),
            MessageType::DetailsSynchronizationResponse
        );
        assert_eq!(
            MessageType::from_token("children_synchronization"),
            MessageType::ChildrenSynchronizationResponse
        );
        assert_eq!(
            MessageType::from_token("registered_devices"),
            MessageType::RegisteredDevicesResponse
        );
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(MessageType::from_token("file_upload_not_initiate"), MessageType::Unknown);
        assert_eq!(MessageType::from_token(""), MessageType::Unknown);
        assert_eq!(MessageType::Unknown.as_str(), "");
    }
}
