//! Minimal protobuf wire-format encoder.
//!
//! Serializing a computation graph needs only the encoding half of the wire
//! format, and only three of its wire types:
//!
//! ```text
//! field key:  varint, (field_number << 3) | wire_type
//! wire types: 0  varint          (int64, enum, bool)
//!             2  length-delimited (string, bytes, nested message)
//!             5  32-bit           (float, little-endian)
//! varint:     7 payload bits per byte, least-significant group first;
//!             high bit set on every byte except the last
//! ```
//!
//! Nested messages are encoded by building the child into its own buffer and
//! writing it as a length-delimited field of the parent.

pub struct WireEncoder {
    buf: Vec<u8>,
}

impl WireEncoder {
    pub fn new() -> WireEncoder {
        WireEncoder { buf: Vec::new() }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn varint(&mut self, mut v: u64) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.push(byte);
                break;
            }
            self.buf.push(byte | 0x80);
        }
    }

    fn key(&mut self, field: u32, wire_type: u8) {
        self.varint(((field as u64) << 3) | wire_type as u64);
    }

    /// Writes an int64 field. Negative values take the full ten-byte
    /// two's-complement varint form, as the wire format requires.
    pub fn int64(&mut self, field: u32, v: i64) {
        self.key(field, 0);
        self.varint(v as u64);
    }

    /// Writes a float field (wire type 5, little-endian).
    pub fn float(&mut self, field: u32, v: f32) {
        self.key(field, 5);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Writes a length-delimited bytes field.
    pub fn bytes(&mut self, field: u32, b: &[u8]) {
        self.key(field, 2);
        self.varint(b.len() as u64);
        self.buf.extend_from_slice(b);
    }

    /// Writes a length-delimited string field.
    pub fn string(&mut self, field: u32, s: &str) {
        self.bytes(field, s.as_bytes());
    }

    /// Writes a nested message field. `build` fills in the child message,
    /// which is then emitted length-delimited.
    pub fn message(&mut self, field: u32, build: impl FnOnce(&mut WireEncoder)) {
        let mut child = WireEncoder::new();
        build(&mut child);
        self.bytes(field, &child.buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_field_matches_reference_encoding() {
        // The protobuf documentation's example: field 1, value 150.
        let mut enc = WireEncoder::new();
        enc.int64(1, 150);
        assert_eq!(enc.into_bytes(), vec![0x08, 0x96, 0x01]);
    }

    #[test]
    fn small_varints_are_single_bytes() {
        let mut enc = WireEncoder::new();
        enc.int64(1, 0);
        enc.int64(1, 1);
        enc.int64(1, 127);
        assert_eq!(enc.into_bytes(), vec![0x08, 0x00, 0x08, 0x01, 0x08, 0x7f]);
    }

    #[test]
    fn negative_int64_takes_ten_bytes() {
        let mut enc = WireEncoder::new();
        enc.int64(1, -1);
        let bytes = enc.into_bytes();
        assert_eq!(bytes.len(), 1 + 10);
        assert_eq!(&bytes[1..10], &[0xff; 9]);
        assert_eq!(bytes[10], 0x01);
    }

    #[test]
    fn string_field_matches_reference_encoding() {
        // The protobuf documentation's example: field 2, value "testing".
        let mut enc = WireEncoder::new();
        enc.string(2, "testing");
        assert_eq!(
            enc.into_bytes(),
            vec![0x12, 0x07, 0x74, 0x65, 0x73, 0x74, 0x69, 0x6e, 0x67]
        );
    }

    #[test]
    fn float_field_is_little_endian() {
        let mut enc = WireEncoder::new();
        enc.float(2, 1.0);
        assert_eq!(enc.into_bytes(), vec![0x15, 0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn nested_message_is_length_prefixed() {
        let mut enc = WireEncoder::new();
        enc.message(3, |child| child.int64(1, 150));
        assert_eq!(enc.into_bytes(), vec![0x1a, 0x03, 0x08, 0x96, 0x01]);
    }

    #[test]
    fn empty_message_encodes_zero_length() {
        let mut enc = WireEncoder::new();
        enc.message(7, |_| {});
        assert_eq!(enc.into_bytes(), vec![0x3a, 0x00]);
    }

    #[test]
    fn high_field_numbers_extend_the_key_varint() {
        let mut enc = WireEncoder::new();
        enc.int64(20, 3); // AttributeProto.type sits at field 20
        assert_eq!(enc.into_bytes(), vec![0xa0, 0x01, 0x03]);
    }
}
