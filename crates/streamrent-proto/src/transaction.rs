//! Programmable transaction envelope.
//!
//! A [`Transaction`] is an ordered list of commands over a table of inputs,
//! mirroring the ledger's programmable transaction blocks. Builder methods
//! return [`Argument`] handles that later commands can consume, so a coin
//! split off the gas coin can be passed straight into a Move call:
//!
//! ```
//! use streamrent_proto::{ObjectId, Transaction};
//!
//! let package = ObjectId::from_static("0x2");
//! let mut tx = Transaction::new();
//! let amount = tx.pure_u64(1_000);
//! let gas = tx.gas();
//! let coins = tx.split_coins(gas, vec![amount]);
//! let clock = tx.object(ObjectId::CLOCK);
//! tx.move_call(package, "rental", "pay", vec![coins[0], clock]);
//! assert_eq!(tx.commands().len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::ids::ObjectId;

/// Reference to a value available to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    /// The coin paying for gas.
    GasCoin,
    /// Entry in the transaction's input table.
    Input(u16),
    /// The (single) result of an earlier command.
    Result(u16),
    /// One element of an earlier command's result tuple.
    NestedResult(u16, u16),
}

/// Pure (non-object) value passed as a call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PureValue {
    /// UTF-8 string, `std::string::String` on the Move side.
    String(String),
    /// Unsigned 64-bit integer.
    U64(u64),
}

/// Entry in the input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// Serialized pure value.
    Pure(PureValue),
    /// Object resolved by the signer (owned, shared or immutable).
    Object(ObjectId),
}

/// Call to a public Move function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    /// Package containing the module.
    pub package: ObjectId,
    /// Module name.
    pub module: String,
    /// Function name.
    pub function: String,
    /// Arguments in declaration order.
    pub arguments: Vec<Argument>,
}

impl MoveCall {
    /// Fully qualified `package::module::function` target.
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

/// A single step of a programmable transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Call a Move function.
    MoveCall(MoveCall),
    /// Split `amounts` off `coin`, producing one new coin per amount.
    SplitCoins {
        /// Coin to split from.
        coin: Argument,
        /// Amounts (pure u64 arguments).
        amounts: Vec<Argument>,
    },
}

/// Programmable transaction: inputs plus the commands consuming them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl Transaction {
    /// Create an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// The gas coin handle.
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    /// Add a pure string input.
    pub fn pure_string(&mut self, value: impl Into<String>) -> Argument {
        self.push_input(CallArg::Pure(PureValue::String(value.into())))
    }

    /// Add a pure u64 input.
    pub fn pure_u64(&mut self, value: u64) -> Argument {
        self.push_input(CallArg::Pure(PureValue::U64(value)))
    }

    /// Add an object input.
    pub fn object(&mut self, id: ObjectId) -> Argument {
        self.push_input(CallArg::Object(id))
    }

    /// Split coins off `coin`; returns one handle per amount.
    pub fn split_coins(&mut self, coin: Argument, amounts: Vec<Argument>) -> Vec<Argument> {
        let count = amounts.len() as u16;
        let index = self.push_command(Command::SplitCoins { coin, amounts });
        (0..count).map(|i| Argument::NestedResult(index, i)).collect()
    }

    /// Call `package::module::function` with `arguments`.
    pub fn move_call(
        &mut self,
        package: ObjectId,
        module: impl Into<String>,
        function: impl Into<String>,
        arguments: Vec<Argument>,
    ) -> Argument {
        let index = self.push_command(Command::MoveCall(MoveCall {
            package,
            module: module.into(),
            function: function.into(),
            arguments,
        }));
        Argument::Result(index)
    }

    /// Input table.
    pub fn inputs(&self) -> &[CallArg] {
        &self.inputs
    }

    /// Commands in execution order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Look up the input an [`Argument::Input`] refers to.
    pub fn input(&self, argument: Argument) -> Option<&CallArg> {
        match argument {
            Argument::Input(index) => self.inputs.get(usize::from(index)),
            _ => None,
        }
    }

    /// Move calls in execution order.
    pub fn move_calls(&self) -> impl Iterator<Item = &MoveCall> {
        self.commands.iter().filter_map(|command| match command {
            Command::MoveCall(call) => Some(call),
            Command::SplitCoins { .. } => None,
        })
    }

    fn push_input(&mut self, arg: CallArg) -> Argument {
        self.inputs.push(arg);
        Argument::Input((self.inputs.len() - 1) as u16)
    }

    fn push_command(&mut self, command: Command) -> u16 {
        self.commands.push(command);
        (self.commands.len() - 1) as u16
    }
}
