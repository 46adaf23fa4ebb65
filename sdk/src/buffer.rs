use std::os::raw::c_char;

/// Copies `src` into `dst` as NUL-terminated C string.
///
/// At most `dst.len() - 1` bytes of `src` are copied, the rest is dropped.
/// Returns number of bytes copied, terminator excluded.
/// Nothing is written into empty `dst`.
pub fn copy_c_string(src: &str, dst: &mut [c_char]) -> usize {
    let capacity = match dst.len().checked_sub(1) {
        Some(capacity) => capacity,
        None => return 0,
    };

    let bytes = src.as_bytes();
    let len = bytes.len().min(capacity);

    for (d, &s) in dst.iter_mut().zip(&bytes[..len]) {
        *d = s as c_char;
    }
    dst[len] = 0;
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits() {
        let mut buf = [1 as c_char; 8];
        assert_eq!(copy_c_string("abc", &mut buf), 3);
        assert_eq!(&buf[..4], &[b'a' as c_char, b'b' as _, b'c' as _, 0]);

        // Tail is left untouched.
        assert_eq!(buf[4], 1);
    }

    #[test]
    fn truncates_to_capacity() {
        let mut buf = [1 as c_char; 5];
        assert_eq!(copy_c_string("abcdefgh", &mut buf), 4);
        assert_eq!(buf[4], 0);
    }

    #[test]
    fn empty_destination() {
        let mut buf: [c_char; 0] = [];
        assert_eq!(copy_c_string("abc", &mut buf), 0);

        let mut buf = [1 as c_char; 1];
        assert_eq!(copy_c_string("abc", &mut buf), 0);
        assert_eq!(buf[0], 0);
    }
}
