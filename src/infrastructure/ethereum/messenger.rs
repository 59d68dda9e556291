//! Typed handle over a deployed messenger contract.
//!
//! Wraps the generated contract instance together with the descriptor
//! registry: typed invocations for the three calls, filters/queries/
//! subscriptions for the three events, and registry-driven classification
//! of raw logs.

use alloy::providers::Provider;
use alloy::rpc::types::{Filter, Log, TransactionReceipt};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolEvent;
use anyhow::{bail, Context, Result};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::bindings::IL1Messenger::{self, IL1MessengerInstance};
use crate::config::Config;
use crate::domain::abi::InterfaceRegistry;
use crate::domain::log::L2ToL1Log;
use crate::infrastructure::codec::{self, DecodedEvent};

use super::provider::DefaultProvider;

/// A messenger contract bound to a provider.
pub struct L1Messenger {
    instance: IL1MessengerInstance<DefaultProvider>,
    registry: InterfaceRegistry,
}

impl L1Messenger {
    /// Bind the messenger at `address` over an existing provider.
    pub fn new(address: Address, provider: DefaultProvider) -> Self {
        Self {
            instance: IL1MessengerInstance::new(address, provider),
            registry: InterfaceRegistry::new(),
        }
    }

    /// Connect the configured endpoint and bind the configured address.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let provider_config = config
            .provider_config()
            .context("no endpoint configured")?;
        let provider = provider_config.connect().await?;
        Ok(Self::new(config.contract_address()?, provider))
    }

    /// Contract address this handle is bound to
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Descriptor registry for the messenger interface
    pub fn registry(&self) -> &InterfaceRegistry {
        &self.registry
    }

    /// The underlying generated instance
    pub fn instance(&self) -> &IL1MessengerInstance<DefaultProvider> {
        &self.instance
    }

    // --- typed invocations ---

    /// Send an arbitrary-length message to L1, returning the hash the
    /// contract commits to (the keccak digest of the message).
    ///
    /// The declared return value of a state-mutating call is not observable
    /// from a mined transaction, so it is recovered via `eth_call`
    /// simulation immediately before submission.
    pub async fn send_to_l1(&self, message: Bytes) -> Result<B256> {
        debug!(bytes = message.len(), "sendToL1");
        let call = self.instance.sendToL1(message);
        let hash = call.call().await.context("sendToL1 simulation failed")?;
        let receipt = call
            .send()
            .await
            .context("sendToL1 submission failed")?
            .get_receipt()
            .await
            .context("sendToL1 receipt unavailable")?;
        ensure_success(&receipt, "sendToL1")?;
        Ok(hash)
    }

    /// Emit an L2 -> L1 log, returning the log id assigned by the contract.
    ///
    /// The id is recovered via `eth_call` simulation immediately before
    /// submission, like the hash in [`Self::send_to_l1`].
    pub async fn send_l2_to_l1_log(
        &self,
        is_service: bool,
        key: B256,
        value: B256,
    ) -> Result<U256> {
        debug!(%key, %value, is_service, "sendL2ToL1Log");
        let call = self.instance.sendL2ToL1Log(is_service, key, value);
        let log_id = call
            .call()
            .await
            .context("sendL2ToL1Log simulation failed")?;
        let receipt = call
            .send()
            .await
            .context("sendL2ToL1Log submission failed")?
            .get_receipt()
            .await
            .context("sendL2ToL1Log receipt unavailable")?;
        ensure_success(&receipt, "sendL2ToL1Log")?;
        Ok(log_id)
    }

    /// Request that the full bytecode preimage for `bytecode_hash` be
    /// published on L1.
    pub async fn request_bytecode_l1_publication(
        &self,
        bytecode_hash: B256,
    ) -> Result<TransactionReceipt> {
        debug!(%bytecode_hash, "requestBytecodeL1Publication");
        let receipt = self
            .instance
            .requestBytecodeL1Publication(bytecode_hash)
            .send()
            .await
            .context("requestBytecodeL1Publication submission failed")?
            .get_receipt()
            .await
            .context("requestBytecodeL1Publication receipt unavailable")?;
        ensure_success(&receipt, "requestBytecodeL1Publication")?;
        Ok(receipt)
    }

    // --- event filters ---

    /// Returns a log [`Filter`] based on the `BytecodeL1PublicationRequested` event.
    pub fn bytecode_publication_filter(&self) -> Filter {
        self.instance.BytecodeL1PublicationRequested_filter().filter
    }

    /// Returns a log [`Filter`] based on the `L1MessageSent` event.
    pub fn l1_message_sent_filter(&self) -> Filter {
        self.instance.L1MessageSent_filter().filter
    }

    /// Returns a log [`Filter`] based on the `L2ToL1LogSent` event.
    pub fn l2_to_l1_log_sent_filter(&self) -> Filter {
        self.instance.L2ToL1LogSent_filter().filter
    }

    // --- historical queries ---

    /// Fetch `BytecodeL1PublicationRequested` events in a block range.
    pub async fn query_bytecode_publications(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<(B256, Log)>> {
        let events = self
            .instance
            .BytecodeL1PublicationRequested_filter()
            .from_block(from_block)
            .to_block(to_block)
            .query()
            .await
            .context("BytecodeL1PublicationRequested query failed")?;
        trace!(count = events.len(), "bytecode publication logs");
        Ok(events
            .into_iter()
            .map(|(event, log)| (event.bytecodeHash, log))
            .collect())
    }

    /// Fetch `L1MessageSent` events in a block range.
    pub async fn query_l1_messages(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<(IL1Messenger::L1MessageSent, Log)>> {
        let events = self
            .instance
            .L1MessageSent_filter()
            .from_block(from_block)
            .to_block(to_block)
            .query()
            .await
            .context("L1MessageSent query failed")?;
        trace!(count = events.len(), "l1 message logs");
        Ok(events)
    }

    /// Fetch `L2ToL1LogSent` events in a block range, projected into the
    /// canonical record.
    pub async fn query_l2_to_l1_logs(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<(L2ToL1Log, Log)>> {
        let events = self
            .instance
            .L2ToL1LogSent_filter()
            .from_block(from_block)
            .to_block(to_block)
            .query()
            .await
            .context("L2ToL1LogSent query failed")?;
        trace!(count = events.len(), "l2->l1 logs");
        Ok(events
            .into_iter()
            .map(|(event, log)| (L2ToL1Log::from(event.l2log), log))
            .collect())
    }

    // --- subscriptions ---

    /// Subscribe to decoded `BytecodeL1PublicationRequested` events.
    /// Requires a pubsub transport (WebSocket or IPC).
    pub async fn subscribe_bytecode_publications(
        &self,
    ) -> Result<mpsc::Receiver<IL1Messenger::BytecodeL1PublicationRequested>> {
        self.subscribe_event(self.bytecode_publication_filter())
            .await
    }

    /// Subscribe to decoded `L1MessageSent` events.
    /// Requires a pubsub transport (WebSocket or IPC).
    pub async fn subscribe_l1_messages(
        &self,
    ) -> Result<mpsc::Receiver<IL1Messenger::L1MessageSent>> {
        self.subscribe_event(self.l1_message_sent_filter()).await
    }

    /// Subscribe to decoded `L2ToL1LogSent` events.
    /// Requires a pubsub transport (WebSocket or IPC).
    pub async fn subscribe_l2_to_l1_logs(
        &self,
    ) -> Result<mpsc::Receiver<IL1Messenger::L2ToL1LogSent>> {
        self.subscribe_event(self.l2_to_l1_log_sent_filter()).await
    }

    /// Subscribe-by-descriptor: stream logs matching `filter` and decode
    /// them as `E`. Logs that fail to decode are skipped.
    async fn subscribe_event<E>(&self, filter: Filter) -> Result<mpsc::Receiver<E>>
    where
        E: SolEvent + Send + 'static,
    {
        let subscription = self
            .instance
            .provider()
            .subscribe_logs(&filter)
            .await
            .context("log subscription failed (transport may not support pubsub)")?;

        let (tx, rx) = mpsc::channel(100);
        tokio::spawn(async move {
            let mut stream = subscription.into_stream();
            while let Some(log) = stream.next().await {
                match E::decode_log_data(&log.inner.data) {
                    Ok(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => trace!(%err, "skipping undecodable log"),
                }
            }
        });
        Ok(rx)
    }

    // --- registry-driven classification ---

    /// Decode any log into its named-field form via the registry.
    ///
    /// Returns `Ok(None)` when topic0 belongs to none of the declared
    /// events.
    pub fn decode_log(&self, log: &Log) -> Result<Option<DecodedEvent>> {
        let topics = log.inner.topics();
        let Some(topic0) = topics.first() else {
            return Ok(None);
        };
        let Some(event) = self.registry.event_by_topic(*topic0) else {
            return Ok(None);
        };
        let decoded = codec::decode_event(event, topics, &log.inner.data.data)?;
        Ok(Some(decoded))
    }
}

fn ensure_success(receipt: &TransactionReceipt, what: &str) -> Result<()> {
    if !receipt.status() {
        bail!("{what} reverted in transaction {}", receipt.transaction_hash);
    }
    Ok(())
}
