use rand::RngCore;

/// Random lowercase hex identifier of `bytes` random bytes.
pub fn random_hex_id(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

pub fn random_session_id() -> String {
    random_hex_id(16)
}

pub fn random_row_id() -> String {
    format!("row-{}", random_hex_id(8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_have_expected_shape() {
        let sid = random_session_id();
        assert_eq!(sid.len(), 32);
        assert!(sid.chars().all(|c| c.is_ascii_hexdigit()));
        let rid = random_row_id();
        assert!(rid.starts_with("row-"));
        assert_eq!(rid.len(), 20);
        assert_ne!(random_row_id(), random_row_id());
    }
}
