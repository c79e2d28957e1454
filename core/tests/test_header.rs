// Header layout tests: the 34-byte header is the durable contract, so these
// pin exact offsets and byte order.

#[cfg(test)]
mod tests {
    use secret_store::constants::{CURRENT_REVISION, HEADER_LEN, SALT_LEN};
    use secret_store::headers::{decode_header_le, decode_revision_le, encode_header_le, HeaderError, StoreHeader};

    fn sample_salt() -> [u8; SALT_LEN] {
        let mut salt = [0u8; SALT_LEN];
        for (i, b) in salt.iter_mut().enumerate() {
            *b = i as u8;
        }
        salt
    }

    #[test]
    fn new_header_is_current_revision() {
        let h = StoreHeader::new_with_salt(sample_salt());
        assert_eq!(h.revision, CURRENT_REVISION);
        assert!(h.is_current());
        assert_eq!(StoreHeader::LEN, HEADER_LEN);
        assert_eq!(HEADER_LEN, 34);
    }

    #[test]
    fn encode_places_fields_at_fixed_offsets() {
        let h = StoreHeader { revision: 0x0201, salt: sample_salt() };
        let buf = encode_header_le(&h);

        assert_eq!(buf.len(), 34);
        // little-endian revision
        assert_eq!(&buf[0..2], &[0x01, 0x02]);
        assert_eq!(&buf[2..34], &sample_salt()[..]);
    }

    #[test]
    fn current_revision_encodes_as_01_00() {
        let buf = encode_header_le(&StoreHeader::new_with_salt([0xEE; SALT_LEN]));
        assert_eq!(&buf[0..2], &[0x01, 0x00]);
    }

    #[test]
    fn decode_reads_what_encode_wrote() {
        let h = StoreHeader { revision: 7, salt: sample_salt() };
        let decoded = decode_header_le(&encode_header_le(&h)).unwrap();
        assert_eq!(decoded, h);
    }

    #[test]
    fn decode_ignores_trailing_payload() {
        let h = StoreHeader::new_with_salt(sample_salt());
        let mut buf = encode_header_le(&h).to_vec();
        buf.extend_from_slice(b"payload bytes follow the header");
        assert_eq!(decode_header_le(&buf).unwrap(), h);
    }

    #[test]
    fn truncated_revision_is_reported() {
        let err = decode_revision_le(&[0x01]).unwrap_err();
        assert!(matches!(err, HeaderError::Truncated { field: "revision", have: 1, need: 2 }));
    }

    #[test]
    fn truncated_salt_is_reported() {
        let buf = encode_header_le(&StoreHeader::new_with_salt(sample_salt()));
        let err = decode_header_le(&buf[..20]).unwrap_err();
        assert!(matches!(err, HeaderError::Truncated { field: "salt", have: 18, need: 32 }));
    }

    #[test]
    fn debug_does_not_print_full_salt() {
        let h = StoreHeader::new_with_salt([0xAB; SALT_LEN]);
        let rendered = format!("{h:?}");
        assert!(rendered.contains("revision: 1"));
        assert!(!rendered.contains(&"ab".repeat(SALT_LEN)));
    }
}
