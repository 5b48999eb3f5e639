use bytes::Bytes;

/// Longest possible `... N elements B bytes.` suffix (both counts at `usize::MAX`).
pub const MAX_SUFFIX_LEN: usize = "... ".len() + 20 + " elements ".len() + 20 + " bytes.".len();

/// Write the space-joined arguments of `multi` into `buf`.
///
/// When the whole command does not fit, the tail of `buf` is overwritten with
/// `... N elements B bytes.` so the scale stays visible. Returns the number of
/// bytes written.
pub fn render_command(multi: &[Bytes], buf: &mut [u8]) -> usize {
    let mut index = 0;
    let mut total = 0;
    let mut truncated = false;

    for (i, arg) in multi.iter().enumerate() {
        total += arg.len();
        if truncated {
            continue;
        }
        let n = copy_into(&mut buf[index..], arg);
        index += n;
        truncated = n < arg.len();
        if i + 1 < multi.len() && !truncated {
            if index < buf.len() {
                buf[index] = b' ';
                index += 1;
            } else {
                truncated = true;
            }
        }
    }

    if !truncated {
        return index;
    }

    let more = format!("... {} elements {} bytes.", multi.len(), total);
    let start = buf.len().saturating_sub(more.len());
    start + copy_into(&mut buf[start..], more.as_bytes())
}

/// [`render_command`] into a fresh buffer of `capacity` bytes, lossily decoded.
pub fn render_command_lossy(multi: &[Bytes], capacity: usize) -> String {
    let mut buf = vec![0u8; capacity];
    let n = render_command(multi, &mut buf);
    String::from_utf8_lossy(&buf[..n]).into_owned()
}

fn copy_into(dst: &mut [u8], src: &[u8]) -> usize {
    let n = dst.len().min(src.len());
    dst[..n].copy_from_slice(&src[..n]);
    n
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
    fn fits() {
        let cmd = multi(&["SET", "key", "value"]);
        let mut buf = [0u8; 64];
        let n = render_command(&cmd, &mut buf);
        assert_eq!(&buf[..n], b"SET key value");

        let mut exact = [0u8; 13];
        let n = render_command(&cmd, &mut exact);
        assert_eq!(&exact[..n], b"SET key value");
    }

    #[test]
    fn truncated_gets_summary() {
        let value = "x".repeat(200);
        let cmd = multi(&["SET", "key", &value]);
        let mut buf = [0u8; 48];
        let n = render_command(&cmd, &mut buf);
        assert_eq!(n, 48);
        let out = std::str::from_utf8(&buf[..n]).unwrap();
        assert!(out.starts_with("SET key xxx"), "{out}");
        assert!(out.ends_with("... 3 elements 206 bytes."), "{out}");
    }

    #[test]
    fn truncated_on_separator() {
        let cmd = multi(&["MGET", "a", "b"]);
        let mut buf = [0u8; 5];
        let n = render_command(&cmd, &mut buf);
        // Suffix longer than the buffer: keep its head.
        assert_eq!(n, 5);
        assert_eq!(&buf[..n], b"... 3");
    }

    #[test]
    fn widest_suffix_fits_its_bound() {
        let more = format!("... {} elements {} bytes.", usize::MAX, usize::MAX);
        assert_eq!(more.len(), MAX_SUFFIX_LEN);
    }

    #[test]
    fn lossy_helper() {
        let mut parts = vec!["DEL"];
        parts.extend(std::iter::repeat_n("key", 100));
        let cmd = multi(&parts);
        let out = render_command_lossy(&cmd, 40);
        assert_eq!(out.len(), 40);
        assert!(out.starts_with("DEL key key"));
        assert!(out.ends_with("... 101 elements 303 bytes."));

        assert_eq!(render_command_lossy(&[], 16), "");
    }
}
