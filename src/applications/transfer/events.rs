//! Application events, surfaced through the module event channel.

use crate::applications::transfer::coin::Coin;
use crate::core::routing::module::ModuleEvent;
use crate::prelude::*;
use crate::Signer;

const EVENT_KIND_TRANSFER: &str = "transfer";
const EVENT_KIND_RECV: &str = "fungible_token_packet";
const EVENT_KIND_TIMEOUT: &str = "timeout";

fn coins_attribute(coins: &[Coin]) -> String {
    let rendered: Vec<String> = coins.iter().map(|c| c.to_string()).collect();
    rendered.join(",")
}

/// A transfer was initiated and its packet committed.
pub struct TransferEvent {
    pub sender: Signer,
    pub receiver: Signer,
    pub amount: Vec<Coin>,
}

impl From<TransferEvent> for ModuleEvent {
    fn from(ev: TransferEvent) -> Self {
        ModuleEvent {
            kind: EVENT_KIND_TRANSFER.to_string(),
            attributes: vec![
                ("sender".to_string(), ev.sender.to_string()),
                ("receiver".to_string(), ev.receiver.to_string()),
                ("amount".to_string(), coins_attribute(&ev.amount)),
            ],
        }
    }
}

/// A transfer packet was received and credited (or refused).
pub struct RecvEvent {
    pub receiver: Signer,
    pub amount: Vec<Coin>,
    pub success: bool,
}

impl From<RecvEvent> for ModuleEvent {
    fn from(ev: RecvEvent) -> Self {
        ModuleEvent {
            kind: EVENT_KIND_RECV.to_string(),
            attributes: vec![
                ("receiver".to_string(), ev.receiver.to_string()),
                ("amount".to_string(), coins_attribute(&ev.amount)),
                ("success".to_string(), ev.success.to_string()),
            ],
        }
    }
}

/// A transfer packet timed out and the sender was refunded.
pub struct TimeoutEvent {
    pub refund_receiver: Signer,
    pub refund_amount: Vec<Coin>,
}

impl From<TimeoutEvent> for ModuleEvent {
    fn from(ev: TimeoutEvent) -> Self {
        ModuleEvent {
            kind: EVENT_KIND_TIMEOUT.to_string(),
            attributes: vec![
                ("refund_receiver".to_string(), ev.refund_receiver.to_string()),
                ("refund_amount".to_string(), coins_attribute(&ev.refund_amount)),
            ],
        }
    }
}
