//! Form and wallet state held by [`crate::App`].

use streamrent_core::Request;
use streamrent_proto::Address;

/// Raw form fields, exactly as typed.
///
/// Nothing is validated until an action is triggered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceForm {
    /// Owner form: device name.
    pub name: String,
    /// Owner form: price in nanos per millisecond.
    pub price: String,
    /// Renter form: target device id.
    pub device_id: String,
}

impl DeviceForm {
    /// Clear the owner form after a device was registered.
    ///
    /// The renter field is left alone.
    pub fn clear_draft(&mut self) {
        self.name.clear();
        self.price.clear();
    }

    /// Owner form as a create request.
    pub fn create_request(&self) -> Request<'_> {
        Request::Create { name: &self.name, price: &self.price }
    }

    /// Renter form as a rent request.
    pub fn rent_request(&self) -> Request<'_> {
        Request::Rent { device_id: &self.device_id }
    }

    /// Renter form as a return request.
    pub fn return_request(&self) -> Request<'_> {
        Request::Return { device_id: &self.device_id }
    }
}

/// What the wallet last reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WalletState {
    /// No answer yet.
    #[default]
    Checking,
    /// No account available.
    Disconnected,
    /// Active account.
    Connected(Address),
}

impl WalletState {
    /// Connected account, if any.
    pub fn account(&self) -> Option<&Address> {
        match self {
            Self::Connected(address) => Some(address),
            Self::Checking | Self::Disconnected => None,
        }
    }
}

impl From<Option<Address>> for WalletState {
    fn from(account: Option<Address>) -> Self {
        account.map_or(Self::Disconnected, Self::Connected)
    }
}
