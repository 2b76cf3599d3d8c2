//! Input validation and transaction construction.
//!
//! [`prepare`] turns raw form input into a typed [`Operation`], or a
//! [`ValidationError`] that the caller shows without touching the network.
//! [`TransactionBuilder`] then turns an operation into the transaction
//! envelope for one of the three contract entry points.

use std::fmt;

use streamrent_proto::{Address, Argument, ObjectId, Transaction};

use crate::{config::ContractConfig, error::ValidationError};

/// Entry point creating a device.
pub const CREATE_DEVICE: &str = "create_device";
/// Entry point renting a device.
pub const RENT_DEVICE: &str = "rent_device";
/// Entry point returning a device.
pub const RETURN_DEVICE: &str = "return_device";

/// Which of the three workflows an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Register a device.
    Create,
    /// Rent a device.
    Rent,
    /// Return a rented device.
    Return,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Rent => "rent",
            Self::Return => "return",
        })
    }
}

/// Raw form input for a triggered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// Create from the owner form.
    Create {
        /// Device name field.
        name: &'a str,
        /// Price rate field (nanos per millisecond).
        price: &'a str,
    },
    /// Rent from the renter form.
    Rent {
        /// Device id field.
        device_id: &'a str,
    },
    /// Return from the renter form.
    Return {
        /// Device id field.
        device_id: &'a str,
    },
}

/// A device about to be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDraft {
    /// Display name (non-empty).
    pub name: String,
    /// Price in nanos per millisecond of rental.
    pub price_per_ms: u64,
}

impl DeviceDraft {
    /// Validate the owner form fields.
    ///
    /// The name is kept exactly as typed; whitespace only counts when
    /// deciding whether the field is empty.
    pub fn parse(name: &str, price: &str) -> Result<Self, ValidationError> {
        let price = price.trim();
        if name.trim().is_empty() || price.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let price_per_ms = price
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidPrice { input: price.to_string() })?;

        Ok(Self { name: name.to_string(), price_per_ms })
    }
}

/// A validated user intent, ready to be built into a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `create_device(name, price_per_ms)`.
    CreateDevice(DeviceDraft),
    /// `rent_device(device, deposit, clock)`.
    RentDevice {
        /// Device to rent.
        device: ObjectId,
    },
    /// `return_device(device, clock)`.
    ReturnDevice {
        /// Device to return.
        device: ObjectId,
    },
}

impl Operation {
    /// Workflow this operation belongs to.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::CreateDevice(_) => OperationKind::Create,
            Self::RentDevice { .. } => OperationKind::Rent,
            Self::ReturnDevice { .. } => OperationKind::Return,
        }
    }

    /// Banner text while the submission is outstanding.
    pub fn loading_message(&self) -> &'static str {
        match self {
            Self::CreateDevice(_) => "Creating device...",
            Self::RentDevice { .. } => "Processing rental...",
            Self::ReturnDevice { .. } => "Returning device...",
        }
    }
}

/// Validate a request against the connected account.
///
/// The account check comes first: with no wallet, even a complete form is
/// rejected as "not connected".
pub fn prepare(request: Request<'_>, account: Option<&Address>) -> Result<Operation, ValidationError> {
    if account.is_none() {
        return Err(ValidationError::WalletNotConnected);
    }

    match request {
        Request::Create { name, price } => DeviceDraft::parse(name, price).map(Operation::CreateDevice),
        Request::Rent { device_id } => parse_device_id(device_id).map(|device| Operation::RentDevice { device }),
        Request::Return { device_id } => {
            parse_device_id(device_id).map(|device| Operation::ReturnDevice { device })
        },
    }
}

fn parse_device_id(input: &str) -> Result<ObjectId, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::MissingDeviceId);
    }
    input.parse().map_err(ValidationError::InvalidDeviceId)
}

/// Builds transactions against the configured rental contract.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    contract: ContractConfig,
}

impl TransactionBuilder {
    /// Create a builder for `contract`.
    pub fn new(contract: ContractConfig) -> Self {
        Self { contract }
    }

    /// Contract this builder targets.
    pub fn contract(&self) -> &ContractConfig {
        &self.contract
    }

    /// Build the transaction for `operation`.
    pub fn build(&self, operation: &Operation) -> Transaction {
        match operation {
            Operation::CreateDevice(draft) => self.create_device(draft),
            Operation::RentDevice { device } => self.rent_device(device),
            Operation::ReturnDevice { device } => self.return_device(device),
        }
    }

    /// `create_device(name, price_per_ms)`.
    pub fn create_device(&self, draft: &DeviceDraft) -> Transaction {
        let mut tx = Transaction::new();
        let name = tx.pure_string(draft.name.clone());
        let price = tx.pure_u64(draft.price_per_ms);
        self.call(&mut tx, CREATE_DEVICE, vec![name, price]);
        tx
    }

    /// Split the deposit off the gas coin, then `rent_device(device, coin,
    /// clock)`.
    pub fn rent_device(&self, device: &ObjectId) -> Transaction {
        let mut tx = Transaction::new();
        let amount = tx.pure_u64(self.contract.deposit);
        let gas = tx.gas();
        let coins = tx.split_coins(gas, vec![amount]);
        let device = tx.object(device.clone());
        let clock = tx.object(self.contract.clock.clone());
        self.call(&mut tx, RENT_DEVICE, vec![device, coins[0], clock]);
        tx
    }

    /// `return_device(device, clock)`.
    pub fn return_device(&self, device: &ObjectId) -> Transaction {
        let mut tx = Transaction::new();
        let device = tx.object(device.clone());
        let clock = tx.object(self.contract.clock.clone());
        self.call(&mut tx, RETURN_DEVICE, vec![device, clock]);
        tx
    }

    fn call(&self, tx: &mut Transaction, function: &str, arguments: Vec<Argument>) {
        tx.move_call(self.contract.package_id.clone(), self.contract.module.clone(), function, arguments);
    }
}
