/// Longest opcode accepted by the classifier.
pub const MAX_OPCODE_LEN: usize = 64;

/// Byte that survives folding unchanged besides letters (`HOST:` style probes).
const PASSTHROUGH: u8 = b':';

/// Byte-to-byte fold table; 0 marks a byte the table cannot normalize.
static CHARMAP: [u8; 256] = build_charmap();

const fn build_charmap() -> [u8; 256] {
    let mut map = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let c = i as u8;
        map[i] = match c {
            b'A'..=b'Z' => c,
            b'a'..=b'z' => c - b'a' + b'A',
            PASSTHROUGH => PASSTHROUGH,
            _ => 0,
        };
        i += 1;
    }
    map
}

/// Upper-case `op` into `buf` without allocating.
///
/// Returns `None` when `op` is longer than the buffer or contains a byte the
/// table does not cover (digits, `-`, non-ASCII); the caller then has to fall
/// back to a general upper-casing.
pub fn fold_opcode<'b>(op: &[u8], buf: &'b mut [u8; MAX_OPCODE_LEN]) -> Option<&'b str> {
    if op.len() > buf.len() {
        return None;
    }
    for (dst, &b) in buf.iter_mut().zip(op) {
        let c = CHARMAP[b as usize];
        if c == 0 {
            return None;
        }
        *dst = c;
    }
    // Only ASCII letters and ':' can land in the buffer.
    std::str::from_utf8(&buf[..op.len()]).ok()
}
