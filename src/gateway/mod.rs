//! The contract-call capability and its retry wrapper.
//!
//! The whole resolver depends on one external capability: send call data to a
//! contract, get the raw return bytes back. [`CallGateway`] is that boundary.
//! [`call_with_retry`] wraps any gateway with bounded, jittered exponential
//! retries so transient transport failures degrade to absence instead of
//! surfacing as errors.

use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use futures_timer::Delay;
use tracing::trace;

pub mod http;

/// A single contract-call round trip.
///
/// Implementations must treat transport errors, empty responses, and the
/// bare `"0x"` no-op response identically as `None` — the caller retries all
/// of them. Implementations must be safe for concurrent use; the resolver
/// holds no locks around calls.
#[async_trait]
pub trait CallGateway: Send + Sync {
    /// Execute `eth_call` against `to` with the given call data, returning
    /// the raw result bytes or `None` when no data came back.
    async fn call(&self, to: Address, data: Bytes) -> Option<Bytes>;
}

/// Configuration for retrying failed contract calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum number of call attempts.
    pub max_attempts: u32,
    /// Initial delay between attempts in milliseconds.
    pub initial_delay_ms: u64,
    /// Exponential backoff multiplier.
    pub backoff_multiplier: f64,
    /// Whether to add random jitter to retry delays.
    ///
    /// Jitter decorrelates retries when many resolutions run concurrently
    /// against the same endpoint.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 50,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// Call through the gateway with bounded retries and jittered backoff.
///
/// Exhausting every attempt yields `None`; callers treat that as "field
/// unknown", not as a fatal error.
pub(crate) async fn call_with_retry(
    gateway: &dyn CallGateway,
    to: Address,
    data: Bytes,
    retry: &RetryConfig,
) -> Option<Bytes> {
    let attempts = retry.max_attempts.max(1);
    let mut delay_ms = retry.initial_delay_ms as f64;

    for attempt in 1..=attempts {
        if let Some(result) = gateway.call(to, data.clone()).await
            && !result.is_empty()
        {
            return Some(result);
        }
        if attempt < attempts {
            let mut wait = delay_ms;
            if retry.jitter {
                wait += fastrand::f64() * delay_ms;
            }
            trace!(attempt, wait_ms = wait, "call returned no data, backing off");
            Delay::new(Duration::from_millis(wait as u64)).await;
            delay_ms *= retry.backoff_multiplier;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use alloy::primitives::address;

    use super::*;

    /// Gateway that fails a fixed number of times before answering.
    struct Flaky {
        failures: AtomicU32,
        response: Vec<u8>,
    }

    #[async_trait]
    impl CallGateway for Flaky {
        async fn call(&self, _to: Address, _data: Bytes) -> Option<Bytes> {
            if self.failures.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n > 0).then(|| n - 1)
            }).is_ok()
            {
                return None;
            }
            Some(self.response.clone().into())
        }
    }

    fn fast_retry(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay_ms: 1,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    #[tokio::test]
    async fn succeeds_within_attempt_limit() {
        let gateway = Flaky {
            failures: AtomicU32::new(2),
            response: vec![0xab; 32],
        };
        let result = call_with_retry(
            &gateway,
            address!("0000000000000000000000000000000000000001"),
            Bytes::new(),
            &fast_retry(3),
        )
        .await;
        assert_eq!(result, Some(vec![0xab; 32].into()));
    }

    #[tokio::test]
    async fn exhaustion_is_absence() {
        let gateway = Flaky {
            failures: AtomicU32::new(5),
            response: vec![0xab; 32],
        };
        let result = call_with_retry(
            &gateway,
            address!("0000000000000000000000000000000000000001"),
            Bytes::new(),
            &fast_retry(3),
        )
        .await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn empty_response_is_retried_as_absence() {
        let gateway = Flaky {
            failures: AtomicU32::new(0),
            response: Vec::new(),
        };
        let result = call_with_retry(
            &gateway,
            address!("0000000000000000000000000000000000000001"),
            Bytes::new(),
            &fast_retry(2),
        )
        .await;
        assert_eq!(result, None);
    }
}
