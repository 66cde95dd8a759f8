//! Event selector computation.
//!
//! An EVM event's selector is the keccak256 hash of its canonical signature,
//! e.g. `keccak256("Transfer(address,address,uint256)")`. Non-anonymous logs
//! carry it as `topics[0]`.

use alloy_primitives::B256;
use tiny_keccak::{Hasher, Keccak};

/// keccak256 of a canonical signature such as `"Name(type1,type2)"`.
pub fn keccak256_signature(signature: &str) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    B256::from(output)
}

/// Parse a single 0x-prefixed 32-byte topic.
pub fn parse_topic(topic: &str) -> Option<B256> {
    let hex = topic.strip_prefix("0x").or_else(|| topic.strip_prefix("0X"))?;
    if hex.len() != 64 {
        return None;
    }
    let bytes = hex::decode(hex).ok()?;
    Some(B256::from_slice(&bytes))
}

/// Parse every topic of a log. Any malformed topic makes the whole log
/// undecodable.
pub fn parse_topics(topics: &[String]) -> Option<Vec<B256>> {
    topics.iter().map(|t| parse_topic(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_selector() {
        let fp = keccak256_signature("Transfer(address,address,uint256)");
        assert_eq!(
            format!("0x{}", hex::encode(fp)),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn uniswap_v2_swap_selector() {
        let fp = keccak256_signature("Swap(address,uint256,uint256,uint256,uint256,address)");
        assert_eq!(
            format!("0x{}", hex::encode(fp)),
            "0xd78ad95fa46c994b6551d0da85fc275fe613ce37657fb8d5e3d130840159d822"
        );
    }

    #[test]
    fn malformed_topics_rejected() {
        assert!(parse_topic("0x1234").is_none());
        assert!(parse_topic(&"z".repeat(66)).is_none());
        assert!(parse_topic(&format!("0x{}", "g".repeat(64))).is_none());
        let ok = format!("0x{}", "ab".repeat(32));
        assert!(parse_topic(&ok).is_some());
        assert!(parse_topics(&[ok, "nope".into()]).is_none());
        assert_eq!(parse_topics(&[]), Some(vec![]));
    }
}
