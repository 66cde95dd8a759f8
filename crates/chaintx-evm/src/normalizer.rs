//! Converts alloy `DynSolValue` into ChainTx [`ArgValue`].

use alloy_core::dyn_abi::DynSolValue;
use chaintx_core::event::ArgValue;

pub fn normalize(val: DynSolValue) -> ArgValue {
    match val {
        DynSolValue::Bool(b) => ArgValue::Bool(b),
        DynSolValue::Int(i, _bits) => ArgValue::Int(i),
        DynSolValue::Uint(u, _bits) => ArgValue::Uint(u),
        DynSolValue::Address(a) => ArgValue::Address(a),

        // bytesN is stored right-padded in a 32-byte word; keep the N bytes.
        // Indexed reference types arrive here too, as their 32-byte hash.
        DynSolValue::FixedBytes(word, size) => ArgValue::Bytes(word[..size.min(32)].to_vec()),
        DynSolValue::Bytes(b) => ArgValue::Bytes(b),
        DynSolValue::Function(f) => ArgValue::Bytes(f.to_vec()),
        DynSolValue::String(s) => ArgValue::Str(s),

        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) | DynSolValue::Tuple(vals) => {
            ArgValue::List(vals.into_iter().map(normalize).collect())
        }
    }
}
