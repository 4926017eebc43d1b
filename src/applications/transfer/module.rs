//! The [`Module`] implementation wiring the transfer application into the
//! channel and packet callbacks.

use core::any::Any;
use core::fmt::Debug;

use crate::applications::transfer::acknowledgement::AckStatus;
use crate::applications::transfer::context::TokenTransferExecutionContext;
use crate::applications::transfer::events::{RecvEvent, TimeoutEvent};
use crate::applications::transfer::handler::{
    process_recv_packet_execute, refund_packet_token, refund_packet_token_validate,
};
use crate::applications::transfer::packet::TransferPacketData;
use crate::applications::transfer::VERSION;
use crate::core::channel::acknowledgement::Acknowledgement;
use crate::core::channel::channel::{Counterparty, Order};
use crate::core::channel::error::{ChannelError, PacketError};
use crate::core::channel::packet::Packet;
use crate::core::channel::version::Version;
use crate::core::host::identifier::{ChannelId, ConnectionId, PortId};
use crate::core::routing::module::{Module, ModuleExtras};
use crate::prelude::*;
use crate::Signer;

/// Binds a host balance ledger to the transfer application's callbacks.
#[derive(Debug)]
pub struct TransferModule<C> {
    pub ctx: C,
}

impl<C> TransferModule<C> {
    pub fn new(ctx: C) -> Self {
        Self { ctx }
    }
}

fn ensure_unordered(order: Order) -> Result<(), ChannelError> {
    if order != Order::Unordered {
        return Err(ChannelError::InvalidOrdering {
            expected: Order::Unordered.to_string(),
            actual: order.to_string(),
        });
    }
    Ok(())
}

fn ensure_version(version: &Version) -> Result<Version, ChannelError> {
    if !version.is_empty() && version.as_str() != VERSION {
        return Err(ChannelError::AppModule {
            description: format!("expected version {VERSION}, got {version}"),
        });
    }
    Ok(Version::from(VERSION))
}

fn app_error(description: impl core::fmt::Display) -> PacketError {
    PacketError::AppModule {
        description: description.to_string(),
    }
}

impl<C> Module for TransferModule<C>
where
    C: TokenTransferExecutionContext + Debug + 'static,
{
    fn on_chan_open_init_validate(
        &self,
        order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<Version, ChannelError> {
        ensure_unordered(order)?;
        ensure_version(version)
    }

    fn on_chan_open_init_execute(
        &mut self,
        order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        ensure_unordered(order)?;
        Ok((ModuleExtras::empty(), ensure_version(version)?))
    }

    fn on_chan_open_try_validate(
        &self,
        order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<Version, ChannelError> {
        ensure_unordered(order)?;
        ensure_version(counterparty_version)
    }

    fn on_chan_open_try_execute(
        &mut self,
        order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        ensure_unordered(order)?;
        Ok((ModuleExtras::empty(), ensure_version(counterparty_version)?))
    }

    fn on_chan_open_ack_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        counterparty_version: &Version,
    ) -> Result<(), ChannelError> {
        ensure_version(counterparty_version).map(|_| ())
    }

    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement) {
        let data = match TransferPacketData::from_bytes(&packet.data) {
            Ok(data) => data,
            Err(e) => {
                return (ModuleExtras::empty(), AckStatus::from_error(e).into());
            }
        };

        let receiver = data.receiver.clone();
        let amount = data.amount.clone();

        match process_recv_packet_execute(&mut self.ctx, packet, data) {
            Ok(extras) => (extras, AckStatus::success().into()),
            Err(e) => {
                // A rejected receive is not a failed message: the error
                // acknowledgement travels back so the sender can refund.
                let extras = ModuleExtras {
                    events: vec![RecvEvent {
                        receiver,
                        amount,
                        success: false,
                    }
                    .into()],
                    log: Vec::new(),
                };
                (extras, AckStatus::from_error(e).into())
            }
        }
    }

    fn on_acknowledgement_packet_validate(
        &self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> Result<(), PacketError> {
        let data = TransferPacketData::from_bytes(&packet.data).map_err(app_error)?;
        let status = AckStatus::from_ack(acknowledgement).map_err(app_error)?;

        if !status.is_successful() {
            refund_packet_token_validate(&self.ctx, packet, &data).map_err(app_error)?;
        }

        Ok(())
    }

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let data = match TransferPacketData::from_bytes(&packet.data) {
            Ok(data) => data,
            Err(e) => return (ModuleExtras::empty(), Err(app_error(e))),
        };
        let status = match AckStatus::from_ack(acknowledgement) {
            Ok(status) => status,
            Err(e) => return (ModuleExtras::empty(), Err(app_error(e))),
        };

        if !status.is_successful() {
            if let Err(e) = refund_packet_token(&mut self.ctx, packet, &data) {
                return (ModuleExtras::empty(), Err(app_error(e)));
            }
        }

        (ModuleExtras::empty(), Ok(()))
    }

    fn on_timeout_packet_validate(
        &self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> Result<(), PacketError> {
        let data = TransferPacketData::from_bytes(&packet.data).map_err(app_error)?;
        refund_packet_token_validate(&self.ctx, packet, &data).map_err(app_error)
    }

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let data = match TransferPacketData::from_bytes(&packet.data) {
            Ok(data) => data,
            Err(e) => return (ModuleExtras::empty(), Err(app_error(e))),
        };

        if let Err(e) = refund_packet_token(&mut self.ctx, packet, &data) {
            return (ModuleExtras::empty(), Err(app_error(e)));
        }

        let extras = ModuleExtras {
            events: vec![TimeoutEvent {
                refund_receiver: data.sender,
                refund_amount: data.amount,
            }
            .into()],
            log: Vec::new(),
        };
        (extras, Ok(()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::applications::transfer::error::TokenTransferError;
    use crate::applications::transfer::handler::send_transfer;
    use crate::applications::transfer::msgs::MsgTransfer;
    use crate::applications::transfer::{MODULE_ID_STR, PORT_ID_STR, VERSION};
    use crate::core::channel::timeout::TimeoutHeight;
    use crate::core::channel::packet::Sequence;
    use crate::core::context::ValidationContext;
    use crate::core::host::path::CommitmentPath;
    use crate::core::routing::module::ModuleId;
    use crate::core::routing::Router;
    use crate::mock::bank::MockBank;
    use crate::mock::link::MockLink;
    use crate::prelude::*;

    const SENDER: &str = "useralphaaa";
    const RECEIVER: &str = "userbetaaaa";

    fn voucher_denom_on_b(link: &MockLink) -> String {
        format!("{}/{}/atom", link.port_id, link.chan_on_b)
    }

    fn bank_of<'r>(router: &'r mut crate::mock::router::MockRouter) -> &'r mut MockBank {
        let module_id = ModuleId::new(MODULE_ID_STR);
        let module = router
            .get_route_mut(&module_id)
            .expect("module registered")
            .as_any_mut()
            .downcast_mut::<TransferModule<MockBank>>()
            .expect("transfer module");
        &mut module.ctx
    }

    fn open_transfer_link(bank_a: MockBank, bank_b: MockBank) -> MockLink {
        let mut link = MockLink::new(Order::Unordered);
        link.bind_transfer_modules(bank_a, bank_b);
        link.open(VERSION).expect("handshakes complete");
        link
    }

    fn transfer_on_a(
        link: &mut MockLink,
        amount: &str,
        source: bool,
        timeout_height: TimeoutHeight,
    ) -> Result<(), TokenTransferError> {
        let msg = MsgTransfer::try_new(
            PORT_ID_STR,
            link.chan_on_a.as_str(),
            vec![amount.parse().expect("valid coin")],
            SENDER.into(),
            RECEIVER.into(),
            source,
            timeout_height,
        )?;
        let bank = {
            let module_id = ModuleId::new(MODULE_ID_STR);
            link.router_a
                .get_route_mut(&module_id)
                .expect("module registered")
                .as_any_mut()
                .downcast_mut::<TransferModule<MockBank>>()
                .expect("transfer module")
        };
        send_transfer(&mut link.a, &mut bank.ctx, msg)
    }

    fn far_timeout(link: &MockLink) -> TimeoutHeight {
        TimeoutHeight::At(link.b.host_height().add(1000))
    }

    #[test]
    fn transfer_round_trip_escrows_then_mints() {
        let bank_a = MockBank::new().with_balance(SENDER, "100atom".parse().expect("valid coin"));
        let mut link = open_transfer_link(bank_a, MockBank::new());

        let timeout = far_timeout(&link);
        transfer_on_a(&mut link, "100atom", true, timeout).expect("transfer accepted");

        // The sender was debited into the channel escrow.
        {
            let bank_a = bank_of(&mut link.router_a);
            assert!(bank_a.balance(SENDER, "atom").is_zero());
            let escrow = format!("escrow/{}/{}", link.port_id, link.chan_on_a);
            assert_eq!(bank_a.balance(&escrow, "atom"), 100u64.into());
        }

        let packet = link.last_sent_packet_on_a().expect("packet committed");
        link.relay_recv(packet.clone()).expect("recv succeeds");

        // The receiver was credited in vouchers tracing the channel.
        {
            let voucher = voucher_denom_on_b(&link);
            let bank_b = bank_of(&mut link.router_b);
            assert_eq!(bank_b.balance(RECEIVER, &voucher), 100u64.into());
        }

        let (acked_packet, ack) = link.last_ack_on_b().expect("ack written");
        let status = AckStatus::from_ack(&ack).expect("parses");
        assert!(status.is_successful());

        link.relay_ack(acked_packet.clone(), ack).expect("ack succeeds");

        // Success acknowledged: the escrow stays, the commitment is gone.
        {
            let bank_a = bank_of(&mut link.router_a);
            let escrow = format!("escrow/{}/{}", link.port_id, link.chan_on_a);
            assert_eq!(bank_a.balance(&escrow, "atom"), 100u64.into());
            assert!(bank_a.balance(SENDER, "atom").is_zero());
        }
        let commitment_path =
            CommitmentPath::new(&link.port_id, &link.chan_on_a, acked_packet.seq_on_a);
        assert!(link.a.get_packet_commitment(&commitment_path).is_err());
    }

    #[test]
    fn transfer_timeout_refunds_the_escrow() {
        let bank_a = MockBank::new().with_balance(SENDER, "100atom".parse().expect("valid coin"));
        let mut link = open_transfer_link(bank_a, MockBank::new());

        let timeout = TimeoutHeight::At(link.b.host_height().add(1));
        transfer_on_a(&mut link, "100atom", true, timeout).expect("transfer accepted");
        let packet = link.last_sent_packet_on_a().expect("packet committed");

        // B reaches the timeout height without receiving.
        link.refresh_client_on_a().expect("client updated");
        link.relay_timeout(packet, Sequence::from(1))
            .expect("timeout succeeds");

        let bank_a = bank_of(&mut link.router_a);
        assert_eq!(bank_a.balance(SENDER, "atom"), 100u64.into());
        let escrow = format!("escrow/{}/{}", link.port_id, link.chan_on_a);
        assert!(bank_a.balance(&escrow, "atom").is_zero());
    }

    #[test]
    fn failed_receive_produces_an_error_ack_and_a_refund() {
        // The sender returns vouchers home (source = false), but the
        // destination chain holds no matching escrow: the receive is
        // refused with an error acknowledgement and the burn is reversed.
        let voucher = format!("{}/{}/atom", PORT_ID_STR, "channelatob");
        let bank_a = MockBank::new().with_balance(
            SENDER,
            format!("50{voucher}").parse().expect("valid coin"),
        );
        let mut link = open_transfer_link(bank_a, MockBank::new());

        let timeout = far_timeout(&link);
        transfer_on_a(&mut link, &format!("50{voucher}"), false, timeout)
            .expect("transfer accepted");

        // The vouchers were burned on send.
        {
            let bank_a = bank_of(&mut link.router_a);
            assert!(bank_a.balance(SENDER, &voucher).is_zero());
        }

        let packet = link.last_sent_packet_on_a().expect("packet committed");
        link.relay_recv(packet).expect("recv message itself succeeds");

        let (acked_packet, ack) = link.last_ack_on_b().expect("error ack written");
        let status = AckStatus::from_ack(&ack).expect("parses");
        assert!(!status.is_successful());

        link.relay_ack(acked_packet, ack).expect("ack succeeds");

        // The refund minted the vouchers back.
        let bank_a = bank_of(&mut link.router_a);
        assert_eq!(bank_a.balance(SENDER, &voucher), 50u64.into());
    }

    #[test]
    fn transfer_module_pins_ordering_and_version() {
        let mut link = MockLink::new(Order::Ordered);
        link.bind_transfer_modules(MockBank::new(), MockBank::new());
        link.create_clients().expect("clients created");
        link.open_connection().expect("connection opens");

        // The transfer module refuses ordered channels during the
        // handshake callbacks.
        let res = link.open_channel(VERSION);
        assert!(res.is_err());
    }

    #[test]
    fn insufficient_funds_abort_the_send() {
        let mut link = open_transfer_link(MockBank::new(), MockBank::new());
        let timeout = far_timeout(&link);
        let res = transfer_on_a(&mut link, "100atom", true, timeout);
        assert!(matches!(
            res,
            Err(TokenTransferError::InsufficientFunds { .. })
        ));
    }
}
