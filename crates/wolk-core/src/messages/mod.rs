//! Typed protocol messages.
//!
//! One struct per message kind. [`MessageObject`] wraps any of them so that
//! parsed messages can be passed around and dispatched on their type.

mod data;
mod file_management;
mod firmware;
mod platform;
mod registration;

pub use data::{
    AttributeRegistrationMessage, DetailsSynchronizationRequestMessage,
    DetailsSynchronizationResponseMessage, FeedRegistrationMessage, FeedRemovalMessage,
    FeedValuesMessage, ParametersPullMessage, ParametersUpdateMessage, PullFeedValuesMessage,
    SynchronizeParametersMessage, TimeSyncMessage,
};
pub use file_management::{
    FileBinaryRequestMessage, FileBinaryResponseMessage, FileDeleteMessage, FileListRequestMessage,
    FileListResponseMessage, FilePurgeMessage, FileUploadAbortMessage, FileUploadInitiateMessage,
    FileUploadStatusMessage, FileUrlDownloadAbortMessage, FileUrlDownloadInitMessage,
    FileUrlDownloadStatusMessage, HASH_SIZE,
};
pub use firmware::{
    FirmwareUpdateAbortMessage, FirmwareUpdateInstallMessage, FirmwareUpdateStatusMessage,
};
pub use platform::{ErrorMessage, GatewaySubdeviceMessage, PlatformStatusMessage};
pub use registration::{
    ChildrenSynchronizationRequestMessage, ChildrenSynchronizationResponseMessage,
    DeviceRegistrationMessage, DeviceRegistrationResponseMessage, DeviceRemovalMessage,
    RegisteredDevicesRequestMessage, RegisteredDevicesResponseMessage,
};

use crate::types::MessageType;

/// Declares [`MessageObject`] with its `message_type` lookup, a `From` impl
/// for each wrapped struct and a `MESSAGE_TYPE` constant on each struct.
macro_rules! message_objects {
    ($($variant:ident($ty:ty) => $kind:ident),+ $(,)?) => {
        /// Any typed message.
        #[derive(Debug, Clone, PartialEq)]
        pub enum MessageObject {
            $($variant($ty),)+
            GatewaySubdevice(GatewaySubdeviceMessage),
        }

        impl MessageObject {
            pub fn message_type(&self) -> MessageType {
                match self {
                    $(Self::$variant(_) => MessageType::$kind,)+
                    Self::GatewaySubdevice(message) => message.message_type(),
                }
            }
        }

        $(
            impl $ty {
                pub const MESSAGE_TYPE: MessageType = MessageType::$kind;
            }

            impl From<$ty> for MessageObject {
                fn from(message: $ty) -> Self {
                    Self::$variant(message)
                }
            }
        )+
    };
}

impl From<GatewaySubdeviceMessage> for MessageObject {
    fn from(message: GatewaySubdeviceMessage) -> Self {
        Self::GatewaySubdevice(message)
    }
}

message_objects! {
    FeedValues(FeedValuesMessage) => FeedValues,
    PullFeedValues(PullFeedValuesMessage) => PullFeedValues,
    FeedRegistration(FeedRegistrationMessage) => FeedRegistration,
    FeedRemoval(FeedRemovalMessage) => FeedRemoval,
    AttributeRegistration(AttributeRegistrationMessage) => AttributeRegistration,
    ParametersUpdate(ParametersUpdateMessage) => ParameterSync,
    ParametersPull(ParametersPullMessage) => PullParameters,
    SynchronizeParameters(SynchronizeParametersMessage) => SynchronizeParameters,
    TimeSync(TimeSyncMessage) => TimeSync,
    DetailsSynchronizationRequest(DetailsSynchronizationRequestMessage) => DetailsSynchronizationRequest,
    DetailsSynchronizationResponse(DetailsSynchronizationResponseMessage) => DetailsSynchronizationResponse,
    FileUploadInitiate(FileUploadInitiateMessage) => FileUploadInit,
    FileUploadStatus(FileUploadStatusMessage) => FileUploadStatus,
    FileUploadAbort(FileUploadAbortMessage) => FileUploadAbort,
    FileBinaryRequest(FileBinaryRequestMessage) => FileBinaryRequest,
    FileBinaryResponse(FileBinaryResponseMessage) => FileBinaryResponse,
    FileUrlDownloadInit(FileUrlDownloadInitMessage) => FileUrlDownloadInit,
    FileUrlDownloadAbort(FileUrlDownloadAbortMessage) => FileUrlDownloadAbort,
    FileUrlDownloadStatus(FileUrlDownloadStatusMessage) => FileUrlDownloadStatus,
    FileListRequest(FileListRequestMessage) => FileListRequest,
    FileListResponse(FileListResponseMessage) => FileListResponse,
    FileDelete(FileDeleteMessage) => FileDelete,
    FilePurge(FilePurgeMessage) => FilePurge,
    FirmwareUpdateInstall(FirmwareUpdateInstallMessage) => FirmwareUpdateInstall,
    FirmwareUpdateStatus(FirmwareUpdateStatusMessage) => FirmwareUpdateStatus,
    FirmwareUpdateAbort(FirmwareUpdateAbortMessage) => FirmwareUpdateAbort,
    DeviceRegistration(DeviceRegistrationMessage) => DeviceRegistration,
    DeviceRegistrationResponse(DeviceRegistrationResponseMessage) => DeviceRegistrationResponse,
    DeviceRemoval(DeviceRemovalMessage) => DeviceRemoval,
    ChildrenSynchronizationRequest(ChildrenSynchronizationRequestMessage) => ChildrenSynchronizationRequest,
    ChildrenSynchronizationResponse(ChildrenSynchronizationResponseMessage) => ChildrenSynchronizationResponse,
    RegisteredDevicesRequest(RegisteredDevicesRequestMessage) => RegisteredDevicesRequest,
    RegisteredDevicesResponse(RegisteredDevicesResponseMessage) => RegisteredDevicesResponse,
    Error(ErrorMessage) => Error,
    PlatformStatus(PlatformStatusMessage) => PlatformConnectionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConnectivityStatus, FileTransferStatus};

    #[test]
    fn test_message_type_lookup() {
        let object: MessageObject = FileUploadStatusMessage::new("f.bin", FileTransferStatus::FileReady).into();
        assert_eq!(object.message_type(), MessageType::FileUploadStatus);

        let object: MessageObject = PlatformStatusMessage::new(ConnectivityStatus::Connected).into();
        assert_eq!(object.message_type(), MessageType::PlatformConnectionStatus);

        let object: MessageObject = ParametersPullMessage.into();
        assert_eq!(object.message_type(), MessageType::PullParameters);
        assert_eq!(FileListResponseMessage::MESSAGE_TYPE, MessageType::FileListResponse);
    }

    #[test]
    fn test_subdevice_message_takes_inner_type() {
        let inner = crate::Message::new("[]", "d2p/SUB/feed_values");
        let object: MessageObject = GatewaySubdeviceMessage::new(inner).into();
        assert_eq!(object.message_type(), MessageType::FeedValues);
    }
}
