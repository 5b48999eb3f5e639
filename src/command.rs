use anyhow::{Result, anyhow};
use bytes::{Bytes, BytesMut};

pub use redis_protocol::resp2::types::BytesFrame as Resp2Frame;

/// Argument list of a decoded request frame, opcode first.
pub fn parse_multi(frame: &Resp2Frame) -> Result<Vec<Bytes>> {
    let Resp2Frame::Array(items) = frame else {
        return Err(anyhow!("Expected Array frame for Redis request"));
    };

    let mut multi = Vec::with_capacity(items.len());
    for it in items {
        let b = item_to_bytes(it).ok_or_else(|| anyhow!("Invalid argument frame"))?;
        multi.push(b);
    }
    Ok(multi)
}

/// Decode the next complete request from `buf`.
///
/// Returns `Ok(None)` when `buf` does not yet hold a full frame.
pub fn next_multi(buf: &mut BytesMut) -> Result<Option<Vec<Bytes>>> {
    match redis_protocol::resp2::decode::decode_bytes_mut(buf) {
        Ok(Some((frame, _amt, _raw))) => parse_multi(&frame).map(Some),
        Ok(None) => Ok(None),
        Err(e) => Err(anyhow!("RESP2 decode error: {e}")),
    }
}

fn item_to_bytes(frame: &Resp2Frame) -> Option<Bytes> {
    match frame {
        Resp2Frame::BulkString(b) => Some(b.clone()),
        Resp2Frame::SimpleString(b) => Some(b.clone()),
        // Be permissive: some clients might send integers as ints.
        Resp2Frame::Integer(i) => Some(Bytes::copy_from_slice(i.to_string().as_bytes())),
        _ => None,
    }
}
