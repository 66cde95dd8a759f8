//! `LogDecoder`: best-effort matching of raw logs against known interfaces.
//!
//! Decoding is total. A log that no interface accepts is not an error; it is
//! simply left undecoded (and dropped by [`LogDecoder::decode_logs`]).

use alloy_core::dyn_abi::{self, EventExt};
use alloy_json_abi::Event;
use alloy_primitives::B256;
use chaintx_core::event::{DecodedEvent, DecodedLog, EventArg};
use chaintx_core::raw::RawLog;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

use crate::fingerprint;
use crate::interfaces::InterfaceRegistry;
use crate::normalizer;

/// Why a candidate event did not decode a log. Expected, only traced.
#[derive(Debug, Error)]
enum MatchError {
    #[error("expected {expected} topics, log has {actual}")]
    TopicCount { expected: usize, actual: usize },

    #[error("ABI decode failed: {0}")]
    Abi(#[from] dyn_abi::Error),

    #[error("decoded {decoded} values for {declared} inputs")]
    Arity { decoded: usize, declared: usize },
}

#[derive(Debug, Clone)]
pub struct LogDecoder {
    interfaces: Arc<InterfaceRegistry>,
}

impl Default for LogDecoder {
    fn default() -> Self {
        Self::new(Arc::new(InterfaceRegistry::bundled()))
    }
}

impl LogDecoder {
    pub fn new(interfaces: Arc<InterfaceRegistry>) -> Self {
        Self { interfaces }
    }

    pub fn interfaces(&self) -> &InterfaceRegistry {
        &self.interfaces
    }

    /// Decode every log, keeping only the ones some interface accepted.
    /// Receipt order is preserved.
    pub fn decode_logs(&self, logs: &[RawLog]) -> Vec<DecodedLog> {
        logs.iter()
            .map(|log| self.decode_log(log))
            .filter(DecodedLog::is_decoded)
            .collect()
    }

    /// Decode one log. The result has `event: None` when nothing matched.
    pub fn decode_log(&self, log: &RawLog) -> DecodedLog {
        let event = self.match_event(log);
        DecodedLog::new(log.clone(), event)
    }

    fn match_event(&self, log: &RawLog) -> Option<DecodedEvent> {
        let Some(topics) = fingerprint::parse_topics(&log.topics) else {
            trace!(address = %log.address, log_index = log.log_index, "malformed topics");
            return None;
        };
        let selector = topics.first()?;

        for interface in self.interfaces.iter() {
            for event in interface.events_for(selector) {
                match decode_with(interface.name(), event, &topics, &log.data) {
                    Ok(decoded) => return Some(decoded),
                    Err(e) => trace!(
                        interface = interface.name(),
                        event = %event.name,
                        log_index = log.log_index,
                        error = %e,
                        "candidate event did not decode"
                    ),
                }
            }
        }
        None
    }
}

fn decode_with(
    interface: &str,
    event: &Event,
    topics: &[B256],
    data: &[u8],
) -> Result<DecodedEvent, MatchError> {
    let expected = event.inputs.iter().filter(|p| p.indexed).count() + 1;
    if topics.len() != expected {
        return Err(MatchError::TopicCount {
            expected,
            actual: topics.len(),
        });
    }

    let decoded = event.decode_log_parts(topics.iter().copied(), data, true)?;
    let declared = event.inputs.len();
    if decoded.indexed.len() + decoded.body.len() != declared {
        return Err(MatchError::Arity {
            decoded: decoded.indexed.len() + decoded.body.len(),
            declared,
        });
    }

    // interleave indexed and body values back into declaration order
    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();
    let mut args = Vec::with_capacity(declared);
    for (i, param) in event.inputs.iter().enumerate() {
        let value = if param.indexed { indexed.next() } else { body.next() };
        let Some(value) = value else {
            return Err(MatchError::Arity { decoded: i, declared });
        };
        let name = if param.name.is_empty() {
            format!("arg{i}")
        } else {
            param.name.clone()
        };
        args.push(EventArg {
            name,
            indexed: param.indexed,
            value: normalizer::normalize(value),
        });
    }

    Ok(DecodedEvent {
        name: event.name.clone(),
        signature: event.signature(),
        interface: interface.to_string(),
        args,
    })
}
