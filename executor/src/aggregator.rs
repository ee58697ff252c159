use std::sync::Arc;
use std::time::Duration;

use error_stack::Report;
use futures::future::join_all;
use message_primitives::{nonempty, DomainId, Hash, MessageNonce};
use thiserror::Error;
use tokio::time;
use tracing::{debug, warn};

use crate::oracle::{AdapterId, OracleAdapter};

type Result<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("oracle adapters failed to agree on a hash for message {nonce} on domain {domain_id}")]
    NoConsensus {
        domain_id: DomainId,
        nonce: MessageNonce,
        silent: Vec<AdapterId>,
        diverged: Vec<AdapterId>,
    },
}

/// Queries a caller-chosen set of oracle adapters and accepts a hash only if
/// every adapter in the set reports it.
///
/// Unanimity over an explicitly supplied set is the trust policy: which
/// adapters to trust, and how many, is the caller's decision, not the
/// engine's. Callers wanting threshold-of-N semantics compose this primitive
/// with a different adapter-set policy.
pub struct OracleAggregator {
    query_timeout: Duration,
}

impl OracleAggregator {
    pub fn new(query_timeout: Duration) -> Self {
        Self { query_timeout }
    }

    /// Collects each adapter's report for the given message, querying all
    /// adapters concurrently. An adapter that errors or exceeds the query
    /// timeout is recorded as silent (`None`).
    pub async fn adapter_reports(
        &self,
        domain_id: DomainId,
        nonce: MessageNonce,
        adapters: &nonempty::Vec<Arc<dyn OracleAdapter>>,
    ) -> Vec<(AdapterId, Option<Hash>)> {
        join_all(adapters.iter().map(|adapter| async move {
            let id = adapter.id();
            let report =
                match time::timeout(self.query_timeout, adapter.report_hash(domain_id, nonce))
                    .await
                {
                    Ok(Ok(hash)) => {
                        debug!(adapter = %id, hash = ?hash, "adapter reported hash");
                        Some(hash)
                    }
                    Ok(Err(err)) => {
                        warn!(adapter = %id, err = ?err, "adapter failed to report a hash");
                        None
                    }
                    Err(_) => {
                        warn!(
                            adapter = %id,
                            timeout = ?self.query_timeout,
                            "adapter did not report within the query timeout"
                        );
                        None
                    }
                };

            (id, report)
        }))
        .await
    }

    /// Returns the hash unanimously reported by every adapter in the set.
    ///
    /// Nothing is cached: every call re-queries every adapter, so an adapter
    /// can correct an earlier report up until a batch consumes the agreed
    /// hash. If any adapter is silent, or any two reports disagree, the call
    /// fails with [`Error::NoConsensus`] naming the offending adapters
    /// instead of returning a best-effort value. Retrying is the caller's
    /// decision.
    pub async fn consensus_hash(
        &self,
        domain_id: DomainId,
        nonce: MessageNonce,
        adapters: &nonempty::Vec<Arc<dyn OracleAdapter>>,
    ) -> Result<Hash> {
        let reports = self.adapter_reports(domain_id, nonce, adapters).await;

        let silent: Vec<_> = reports
            .iter()
            .filter(|(_, report)| report.is_none())
            .map(|(id, _)| *id)
            .collect();
        let reported: Vec<_> = reports
            .into_iter()
            .filter_map(|(id, report)| report.map(|hash| (id, hash)))
            .collect();

        // with unanimity there is no privileged report, so the first
        // reporting adapter in the caller-ordered set serves as reference
        let reference = reported.first().map(|(_, hash)| *hash);
        let diverged: Vec<_> = reported
            .iter()
            .filter(|(_, hash)| Some(hash) != reference.as_ref())
            .map(|(id, _)| *id)
            .collect();

        match reference {
            Some(hash) if silent.is_empty() && diverged.is_empty() => Ok(hash),
            _ => Err(Report::new(Error::NoConsensus {
                domain_id,
                nonce,
                silent,
                diverged,
            })),
        }
    }
}
