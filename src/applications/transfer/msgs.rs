//! Message definitions for the token transfer application.

use core::str::FromStr;

use crate::applications::transfer::coin::{validate_coin_set, Coin};
use crate::applications::transfer::error::TokenTransferError;
use crate::core::channel::timeout::TimeoutHeight;
use crate::core::host::identifier::{ChannelId, PortId};
use crate::prelude::*;
use crate::Signer;

/// Initiates a cross-chain transfer: debit the sender here, credit the
/// receiver on the counterparty once the packet is relayed.
///
/// `source` declares whether this chain is the source of the coins; it
/// selects escrow (true) or voucher burn (false) as the local debit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTransfer {
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub amount: Vec<Coin>,
    pub sender: Signer,
    pub receiver: Signer,
    pub source: bool,
    pub timeout_height: TimeoutHeight,
}

impl MsgTransfer {
    /// Builds and validates a transfer message from raw identifier strings.
    /// Every validation rule runs here: identifier length/alphabet, coin
    /// set positivity, and non-empty addresses.
    pub fn try_new(
        port_id: &str,
        channel_id: &str,
        amount: Vec<Coin>,
        sender: Signer,
        receiver: Signer,
        source: bool,
        timeout_height: TimeoutHeight,
    ) -> Result<Self, TokenTransferError> {
        let msg = Self {
            port_id_on_a: PortId::from_str(port_id)?,
            chan_id_on_a: ChannelId::from_str(channel_id)?,
            amount,
            sender,
            receiver,
            source,
            timeout_height,
        };
        msg.validate_basic()?;
        Ok(msg)
    }

    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        validate_coin_set(&self.amount)?;
        if self.sender.is_empty() {
            return Err(TokenTransferError::EmptySender);
        }
        if self.receiver.is_empty() {
            return Err(TokenTransferError::EmptyReceiver);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Height;

    // test vectors shared across the message validation cases
    const INVALID_PORT: &str = "p";
    const INVALID_LONG_PORT: &str = "invalidlongportinvalidlongport";
    const INVALID_SHORT_CHANNEL: &str = "invalidch";
    const INVALID_LONG_CHANNEL: &str = "invalidlongchannelinvalidlongchannel";
    const INVALID_CHANNEL: &str = "invalidchannel*";

    fn coins() -> Vec<Coin> {
        vec!["100atom".parse().expect("valid coin")]
    }

    fn addr(s: &str) -> Signer {
        s.into()
    }

    fn timeout() -> TimeoutHeight {
        TimeoutHeight::At(Height::new(100).expect("non-zero"))
    }

    #[test]
    fn msg_transfer_validation() {
        struct Test {
            name: &'static str,
            result: Result<MsgTransfer, TokenTransferError>,
            want_pass: bool,
        }

        let tests = vec![
            Test {
                name: "valid msg",
                result: MsgTransfer::try_new(
                    "testportid",
                    "testchannel",
                    coins(),
                    addr("testaddrone"),
                    addr("testaddrtwo"),
                    true,
                    timeout(),
                ),
                want_pass: true,
            },
            Test {
                name: "too short port id",
                result: MsgTransfer::try_new(
                    INVALID_PORT,
                    "testchannel",
                    coins(),
                    addr("testaddrone"),
                    addr("testaddrtwo"),
                    true,
                    timeout(),
                ),
                want_pass: false,
            },
            Test {
                name: "too long port id",
                result: MsgTransfer::try_new(
                    INVALID_LONG_PORT,
                    "testchannel",
                    coins(),
                    addr("testaddrone"),
                    addr("testaddrtwo"),
                    true,
                    timeout(),
                ),
                want_pass: false,
            },
            Test {
                name: "too short channel id",
                result: MsgTransfer::try_new(
                    "testportid",
                    INVALID_SHORT_CHANNEL,
                    coins(),
                    addr("testaddrone"),
                    addr("testaddrtwo"),
                    true,
                    timeout(),
                ),
                want_pass: false,
            },
            Test {
                name: "too long channel id",
                result: MsgTransfer::try_new(
                    "testportid",
                    INVALID_LONG_CHANNEL,
                    coins(),
                    addr("testaddrone"),
                    addr("testaddrtwo"),
                    false,
                    timeout(),
                ),
                want_pass: false,
            },
            Test {
                name: "channel id contains invalid character",
                result: MsgTransfer::try_new(
                    "testportid",
                    INVALID_CHANNEL,
                    coins(),
                    addr("testaddrone"),
                    addr("testaddrtwo"),
                    false,
                    timeout(),
                ),
                want_pass: false,
            },
            Test {
                name: "zero amount coin",
                result: MsgTransfer::try_new(
                    "testportid",
                    "testchannel",
                    vec!["0atom".parse().expect("parses")],
                    addr("testaddrone"),
                    addr("testaddrtwo"),
                    false,
                    timeout(),
                ),
                want_pass: false,
            },
            Test {
                name: "empty coin set",
                result: MsgTransfer::try_new(
                    "testportid",
                    "testchannel",
                    vec![],
                    addr("testaddrone"),
                    addr("testaddrtwo"),
                    false,
                    timeout(),
                ),
                want_pass: false,
            },
            Test {
                name: "missing sender address",
                result: MsgTransfer::try_new(
                    "testportid",
                    "testchannel",
                    coins(),
                    addr(""),
                    addr("testaddrtwo"),
                    false,
                    timeout(),
                ),
                want_pass: false,
            },
            Test {
                name: "missing recipient address",
                result: MsgTransfer::try_new(
                    "testportid",
                    "testchannel",
                    coins(),
                    addr("testaddrone"),
                    addr(""),
                    false,
                    timeout(),
                ),
                want_pass: false,
            },
        ];

        for test in tests {
            assert_eq!(
                test.result.is_ok(),
                test.want_pass,
                "case `{}` gave {:?}",
                test.name,
                test.result.as_ref().err()
            );
        }
    }

    #[test]
    fn negative_amounts_never_reach_the_message() {
        // amounts are unsigned by construction; a negative coin is a parse
        // error long before message assembly
        assert!("-100atom".parse::<Coin>().is_err());
    }
}
