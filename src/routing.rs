use bytes::Bytes;

const TAG_BEG: u8 = b'{';
const TAG_END: u8 = b'}';

/// Index of the routing key inside a parsed command.
///
/// Commands that put a numeric key count ahead of their keys route on the
/// first key after it.
pub fn key_index(opstr: &str) -> usize {
    match opstr {
        "ZINTERSTORE" | "ZUNIONSTORE" | "EVAL" | "EVALSHA" => 3,
        _ => 1,
    }
}

/// Routing key of `multi`, or `None` when the command is too short to have one.
pub fn routing_key<'a>(multi: &'a [Bytes], opstr: &str) -> Option<&'a [u8]> {
    multi.get(key_index(opstr)).map(|b| &b[..])
}

/// The part of `key` that is hashed: the content of the first `{..}` pair if
/// there is one, the whole key otherwise.
pub fn hash_tag(key: &[u8]) -> &[u8] {
    if let Some(beg) = key.iter().position(|&c| c == TAG_BEG)
        && let Some(end) = key[beg + 1..].iter().position(|&c| c == TAG_END)
    {
        return &key[beg + 1..beg + 1 + end];
    }
    key
}

/// CRC32 (IEEE) of the hash tag of `key`.
pub fn hash(key: &[u8]) -> u32 {
    crc32fast::hash(hash_tag(key))
}

pub fn routing_hash(multi: &[Bytes], opstr: &str) -> Option<u32> {
    routing_key(multi, opstr).map(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi(parts: &[&str]) -> Vec<Bytes> {
        parts
            .iter()
            .map(|p| Bytes::copy_from_slice(p.as_bytes()))
            .collect()
    }

    #[test]
    fn known_checksums() {
        // Standard CRC-32 check value.
        assert_eq!(hash(b"123456789"), 0xCBF4_3926);
        assert_eq!(hash(b""), 0);
    }

    #[test]
    fn hash_tags_colocate() {
        let tagged = hash(b"user1");
        assert_eq!(hash(b"{user1}.foo"), tagged);
        assert_eq!(hash(b"{user1}.bar"), tagged);
        assert_eq!(hash(b"prefix{user1}"), tagged);
        assert_eq!(hash(b"user1.foo"), crc32fast::hash(b"user1.foo"));
        assert_ne!(hash(b"user1.foo"), tagged);
    }

    #[test]
    fn tag_extraction_edges() {
        assert_eq!(hash_tag(b"{a}{b}"), b"a");
        assert_eq!(hash_tag(b"{}x"), b"");
        assert_eq!(hash_tag(b"no{close"), b"no{close");
        assert_eq!(hash_tag(b"}a{b}"), b"b");
        assert_eq!(hash_tag(b"{{a}}"), b"{a");
    }

    #[test]
    fn key_position() {
        let cmd = multi(&["GET", "{t}k"]);
        assert_eq!(routing_key(&cmd, "GET"), Some(&b"{t}k"[..]));
        assert_eq!(routing_hash(&cmd, "GET"), Some(hash(b"t")));

        let cmd = multi(&["ZUNIONSTORE", "dest", "2", "src1", "src2"]);
        assert_eq!(routing_key(&cmd, "ZUNIONSTORE"), Some(&b"src1"[..]));
        assert_eq!(routing_hash(&cmd, "ZUNIONSTORE"), Some(hash(b"src1")));

        let cmd = multi(&["EVAL", "return 1", "1", "k"]);
        assert_eq!(routing_key(&cmd, "EVAL"), Some(&b"k"[..]));
    }

    #[test]
    fn missing_key() {
        assert_eq!(routing_hash(&multi(&["PING"]), "PING"), None);
        assert_eq!(routing_hash(&multi(&["EVAL", "s", "0"]), "EVAL"), None);
    }
}
