//! Command parsing for the terminal command line.
//!
//! This module parses command strings into structured [`Command`] values.
//! Field values are kept as raw text; validation happens when an action is
//! triggered, so a half-filled form can be completed in any order.

/// Parsed command from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,

    /// Refresh the connected wallet account.
    Connect,

    /// Set the device name field.
    SetName {
        /// Device name.
        name: String,
    },

    /// Set the price rate field.
    SetPrice {
        /// Price in nanos per millisecond (unvalidated).
        price: String,
    },

    /// Set the target device id field.
    SetDevice {
        /// Device id (unvalidated).
        device_id: String,
    },

    /// Create a device from the owner form.
    Create {
        /// `(name, price)` to fill in first, from `/create <name...> <price>`.
        fields: Option<(String, String)>,
    },

    /// Rent the target device.
    Rent {
        /// Device id to fill in first.
        device_id: Option<String>,
    },

    /// Return the target device.
    Return {
        /// Device id to fill in first.
        device_id: Option<String>,
    },

    /// Quit the application.
    Quit,

    /// Unknown or invalid command.
    Unknown {
        /// The original input.
        input: String,
    },

    /// Command with missing or invalid arguments.
    InvalidArgs {
        /// Command name.
        command: String,
        /// Error message.
        error: String,
    },
}

impl Command {
    /// Create, rent or return: commands that submit a transaction.
    pub fn is_trigger(&self) -> bool {
        matches!(self, Self::Create { .. } | Self::Rent { .. } | Self::Return { .. })
    }
}

/// Parse a user input string into a command.
///
/// Commands start with `/`. Anything else is unknown.
pub fn parse(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Empty;
    }

    let Some(cmd_str) = input.strip_prefix('/') else {
        return Command::Unknown { input: input.to_string() };
    };

    let (command, rest) = match cmd_str.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (cmd_str, ""),
    };
    let parts: Vec<&str> = rest.split_whitespace().collect();

    match command {
        "connect" => Command::Connect,

        "name" => {
            if rest.is_empty() {
                usage("name", "Usage: /name <device name>")
            } else {
                Command::SetName { name: rest.to_string() }
            }
        },

        "price" => match parts.as_slice() {
            [price] => Command::SetPrice { price: (*price).to_string() },
            _ => usage("price", "Usage: /price <nanos per ms>"),
        },

        "device" => match parts.as_slice() {
            [device_id] => Command::SetDevice { device_id: (*device_id).to_string() },
            _ => usage("device", "Usage: /device <0x device id>"),
        },

        "create" => match parts.split_last() {
            None => Command::Create { fields: None },
            Some((_, [])) => usage("create", "Usage: /create [<name> <price>]"),
            Some((price, name)) => {
                Command::Create { fields: Some((name.join(" "), (*price).to_string())) }
            },
        },

        "rent" => match parts.as_slice() {
            [] => Command::Rent { device_id: None },
            [device_id] => Command::Rent { device_id: Some((*device_id).to_string()) },
            _ => usage("rent", "Usage: /rent [<0x device id>]"),
        },

        "return" => match parts.as_slice() {
            [] => Command::Return { device_id: None },
            [device_id] => Command::Return { device_id: Some((*device_id).to_string()) },
            _ => usage("return", "Usage: /return [<0x device id>]"),
        },

        "quit" | "q" => Command::Quit,

        _ => Command::Unknown { input: input.to_string() },
    }
}

fn usage(command: &str, error: &str) -> Command {
    Command::InvalidArgs { command: command.into(), error: error.into() }
}
