//! Command-line inspector for Wolkabout protocol messages.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use wolk_core::config::env_vars;
use wolk_core::{Message, MessageType};
use wolk_protocol::{
    validate_json_payload, wolkabout, Direction, Protocol, WolkaboutDataProtocol,
    WolkaboutErrorProtocol, WolkaboutFileManagementProtocol, WolkaboutFirmwareUpdateProtocol,
    WolkaboutGatewayRegistrationProtocol, WolkaboutGatewaySubdeviceProtocol,
    WolkaboutPlatformStatusProtocol, WolkaboutRegistrationProtocol,
};

/// Wolkabout protocol inspector for device and gateway messages.
#[derive(Parser, Debug)]
#[command(name = "wolk")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Show how a channel is classified.
    Inspect {
        /// Channel, e.g. `p2d/DEVICE/feed_values`.
        channel: String,
    },
    /// List the channels a device subscribes to.
    Channels {
        /// Device key.
        device_key: String,
        /// List gateway channels instead of standalone device channels.
        #[arg(short, long)]
        gateway: bool,
    },
    /// Check a JSON payload against the schema of its message type.
    Validate {
        channel: String,
        payload: String,
    },
    /// Parse a message into its typed form.
    Decode {
        channel: String,
        payload: String,
    },
    /// Show the channel a request is answered on.
    ResponseChannel {
        /// Request channel, e.g. `d2p/DEVICE/pull_parameters`.
        channel: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Inspect { channel } => inspect(&channel),
        Command::Channels {
            device_key,
            gateway,
        } => list_channels(&device_key, gateway),
        Command::Validate { channel, payload } => validate(Message::new(payload, channel)),
        Command::Decode { channel, payload } => decode(Message::new(payload, channel)),
        Command::ResponseChannel { channel } => response_channel(&channel),
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    if env_vars::log_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

fn inspect(channel: &str) -> Result<()> {
    let message = Message::new(Vec::new(), channel);
    let direction = wolkabout::direction(&message)
        .map(|d| d.as_str())
        .unwrap_or("unknown");

    println!("direction:    {}", direction);
    println!("device type:  {}", wolkabout::device_type(&message));
    println!("device key:   {}", wolkabout::device_key(&message));
    println!("message type: {}", wolkabout::message_type(&message));
    Ok(())
}

fn device_protocols() -> Vec<Box<dyn Protocol>> {
    vec![
        Box::new(WolkaboutDataProtocol::new()),
        Box::new(WolkaboutFileManagementProtocol::new()),
        Box::new(WolkaboutFirmwareUpdateProtocol::new()),
        Box::new(WolkaboutErrorProtocol::new()),
        Box::new(WolkaboutPlatformStatusProtocol::new()),
    ]
}

fn gateway_protocols() -> Vec<Box<dyn Protocol>> {
    vec![
        Box::new(WolkaboutRegistrationProtocol::new()),
        Box::new(WolkaboutGatewaySubdeviceProtocol::new()),
        Box::new(WolkaboutGatewayRegistrationProtocol::new()),
        Box::new(WolkaboutErrorProtocol::new()),
        Box::new(WolkaboutPlatformStatusProtocol::new()),
    ]
}

fn list_channels(device_key: &str, gateway: bool) -> Result<()> {
    let protocols = if gateway {
        gateway_protocols()
    } else {
        device_protocols()
    };

    for protocol in &protocols {
        let channels = protocol
            .inbound_channels()
            .into_iter()
            .chain(protocol.inbound_channels_for_device(device_key));
        for channel in channels {
            println!("{:<18} {}", protocol.name(), channel);
        }
    }
    Ok(())
}

fn validate(message: Message) -> Result<()> {
    validate_json_payload(&message)
        .with_context(|| format!("Payload on '{}' is not valid", message.channel()))?;
    println!("valid");
    Ok(())
}

fn decode(message: Message) -> Result<()> {
    let message_type = wolkabout::message_type(&message);
    if message_type == MessageType::Unknown {
        bail!("Unknown message type on channel '{}'", message.channel());
    }

    match wolkabout::direction(&message) {
        Some(Direction::PlatformToGateway | Direction::GatewayToPlatform) => {
            let messages = WolkaboutGatewaySubdeviceProtocol::new().parse_messages(&message);
            if messages.is_empty() {
                bail!("No subdevice messages could be decoded");
            }
            for subdevice in messages {
                println!("{}", subdevice.message);
            }
            return Ok(());
        }
        Some(Direction::DeviceToPlatform) if is_local_registration(message_type) => {
            let parsed = WolkaboutGatewayRegistrationProtocol::new().parse(&message);
            return print_decoded(parsed);
        }
        _ => {}
    }

    let parsed = match message_type {
        MessageType::FeedValues
        | MessageType::ParameterSync
        | MessageType::TimeSync
        | MessageType::DetailsSynchronizationResponse
        | MessageType::FeedRegistration
        | MessageType::FeedRemoval
        | MessageType::AttributeRegistration
        | MessageType::SynchronizeParameters => WolkaboutDataProtocol::new().parse(&message),
        MessageType::FileUploadInit
        | MessageType::FileUploadAbort
        | MessageType::FileBinaryResponse
        | MessageType::FileUrlDownloadInit
        | MessageType::FileUrlDownloadAbort
        | MessageType::FileListRequest
        | MessageType::FileDelete
        | MessageType::FilePurge => WolkaboutFileManagementProtocol::new().parse(&message),
        MessageType::FirmwareUpdateInstall | MessageType::FirmwareUpdateAbort => {
            WolkaboutFirmwareUpdateProtocol::new().parse(&message)
        }
        MessageType::DeviceRegistrationResponse
        | MessageType::ChildrenSynchronizationResponse
        | MessageType::RegisteredDevicesResponse => {
            WolkaboutRegistrationProtocol::new().parse(&message)
        }
        MessageType::Error => WolkaboutErrorProtocol::new()
            .parse_error(&message)
            .map(Into::into),
        MessageType::PlatformConnectionStatus => WolkaboutPlatformStatusProtocol::new()
            .parse_platform_status(&message)
            .map(Into::into),
        other => bail!("'{}' messages are only ever sent by a device", other),
    };
    print_decoded(parsed)
}

/// Types a local subdevice sends to its gateway on `d2p` channels.
fn is_local_registration(message_type: MessageType) -> bool {
    matches!(
        message_type,
        MessageType::DeviceRegistration
            | MessageType::DeviceRemoval
            | MessageType::ChildrenSynchronizationResponse
            | MessageType::RegisteredDevicesResponse
    )
}

fn print_decoded(parsed: Option<wolk_core::MessageObject>) -> Result<()> {
    match parsed {
        Some(object) => {
            println!("{:#?}", object);
            Ok(())
        }
        None => bail!("Message could not be decoded"),
    }
}

fn response_channel(channel: &str) -> Result<()> {
    let message = Message::new(Vec::new(), channel);
    let message_type = wolkabout::message_type(&message);
    let device_key = wolkabout::device_key(&message);

    let response = device_protocols()
        .into_iter()
        .chain(gateway_protocols())
        .find_map(|protocol| protocol.response_channel_for_message(message_type, &device_key));

    match response {
        Some(response) => {
            println!("{}", response);
            Ok(())
        }
        None => bail!("'{}' requests do not expect a response", message_type),
    }
}
