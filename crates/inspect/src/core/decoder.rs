use alloy::primitives::U256;
use tracing::{trace, warn};

use crate::{
    core::metadata::{MetadataResolver, TokenMetadata, TokenMetadataSource},
    error::LogDecodeError,
    interfaces::{ApprovalChange, LogEntry, TokenStandard, TokenTransfer},
    utils::{
        amount::format_amount,
        classify::classify_transfer,
        payload::{decode_payload, DecodedPayload},
        signatures::{EventKind, EventSignatures},
        topics::participants,
    },
};

/// The records decoded from a transaction's logs
#[derive(Debug, Default)]
pub(crate) struct DecodedLogs {
    pub(crate) transfers: Vec<TokenTransfer>,
    pub(crate) approvals: Vec<ApprovalChange>,
    pub(crate) warnings: Vec<String>,
}

enum DecodedEvent {
    Transfer(TokenTransfer),
    Approval(ApprovalChange),
}

/// Decode every recognized log, in receipt order.
///
/// Token metadata is prefetched concurrently for all recognized logs before any record is built,
/// so the output order never depends on lookup timing.
pub(crate) async fn decode_logs<S>(
    signatures: &EventSignatures,
    resolver: &mut MetadataResolver<'_, S>,
    logs: &[LogEntry],
) -> DecodedLogs
where
    S: TokenMetadataSource + ?Sized, {
    let recognized: Vec<(usize, EventKind, &LogEntry)> = logs
        .iter()
        .enumerate()
        .filter_map(|(index, log)| match signatures.match_topics(&log.topics) {
            Some(kind) => Some((index, kind, log)),
            None => {
                trace!("skipping unrecognized log #{} from {}", index, log.address);
                None
            }
        })
        .collect();

    resolver.prefetch(recognized.iter().map(|(_, _, log)| log.address)).await;

    let mut decoded = DecodedLogs::default();
    for (index, kind, log) in recognized {
        let metadata = resolver.resolve(log.address).await;
        trace!("decoding {} log #{} from {}", kind, index, log.address);

        match decode_log(kind, log, &metadata) {
            Ok(DecodedEvent::Transfer(transfer)) => decoded.transfers.push(transfer),
            Ok(DecodedEvent::Approval(approval)) => decoded.approvals.push(approval),
            Err(e) => {
                let warning = format!(
                    "skipped {} log #{} from {}: {}",
                    kind,
                    index,
                    log.address.to_checksum(None),
                    e
                );
                warn!("{}", warning);
                decoded.warnings.push(warning);
            }
        }
    }

    decoded
}

fn decode_log(
    kind: EventKind,
    log: &LogEntry,
    metadata: &TokenMetadata,
) -> Result<DecodedEvent, LogDecodeError> {
    let (from, to) = participants(kind, &log.topics)?;
    let token = log.address.to_checksum(None);
    let symbol = metadata.symbol.clone();

    let event = match decode_payload(kind, &log.topics, &log.data)? {
        DecodedPayload::Transfer(raw) => {
            let classification = classify_transfer(metadata.standard, metadata.decimals, raw);
            DecodedEvent::Transfer(TokenTransfer {
                token,
                symbol,
                standard: classification.standard,
                from,
                to,
                amount: classification.amount,
                raw_amount: raw,
                token_id: classification.token_id,
            })
        }
        DecodedPayload::Approval(raw) => DecodedEvent::Approval(ApprovalChange {
            token,
            symbol,
            owner: from,
            spender: to,
            amount: format_amount(raw, metadata.decimals),
            raw_amount: raw,
        }),
        DecodedPayload::TransferSingle { token_id, amount } => {
            DecodedEvent::Transfer(TokenTransfer {
                token,
                symbol,
                standard: TokenStandard::Erc1155,
                from,
                to,
                amount: amount.to_string(),
                raw_amount: amount,
                token_id: Some(token_id),
            })
        }
        // batches become a single sentinel record without ids or amounts
        DecodedPayload::TransferBatch => DecodedEvent::Transfer(TokenTransfer {
            token,
            symbol,
            standard: TokenStandard::Erc1155,
            from,
            to,
            amount: "BATCH".to_string(),
            raw_amount: U256::ZERO,
            token_id: None,
        }),
    };

    Ok(event)
}
