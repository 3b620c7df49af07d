//! Binary primitives for the ZIP central directory
//!
//! Every multi-byte field in a ZIP archive is stored little-endian. The
//! helpers here wrap `byteorder` so the archive reader can pull fields off any
//! `Read` implementation and get this crate's `Result` back.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// ZipBinaryReader provides methods for reading ZIP's binary format primitives
pub trait ZipBinaryReader: Read {
    /// Read a 16-bit unsigned integer (little endian)
    fn read_zip_u16(&mut self) -> Result<u16> {
        Ok(self.read_u16::<LittleEndian>()?)
    }

    /// Read a 32-bit unsigned integer (little endian)
    fn read_zip_u32(&mut self) -> Result<u32> {
        Ok(self.read_u32::<LittleEndian>()?)
    }

    /// Read a record signature and fail unless it matches `expected`
    fn expect_zip_signature(&mut self, expected: u32) -> Result<()> {
        let found = self.read_zip_u32()?;
        if found != expected {
            return Err(Error::InvalidFormat(format!(
                "expected signature {expected:#010x}, found {found:#010x}"
            )));
        }
        Ok(())
    }

    /// Read exactly `length` bytes
    fn read_zip_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; length];
        self.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Consume and discard `length` bytes
    fn skip_zip_bytes(&mut self, length: usize) -> Result<()> {
        self.read_zip_bytes(length).map(|_| ())
    }
}

impl<R: Read> ZipBinaryReader for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_zip_integers() {
        let data: [u8; 6] = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_zip_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_zip_u32().unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_expect_zip_signature() {
        let mut cursor = Cursor::new([0x50u8, 0x4b, 0x01, 0x02]);
        assert!(cursor.expect_zip_signature(0x0201_4b50).is_ok());

        let mut cursor = Cursor::new([0x50u8, 0x4b, 0x03, 0x04]);
        match cursor.expect_zip_signature(0x0201_4b50) {
            Err(Error::InvalidFormat(msg)) => assert!(msg.contains("0x04034b50")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_read_and_skip_bytes() {
        let mut cursor = Cursor::new(b"skipme/dir/".to_vec());
        cursor.skip_zip_bytes(6).unwrap();
        assert_eq!(cursor.read_zip_bytes(5).unwrap(), b"/dir/");
        assert!(cursor.read_zip_bytes(1).is_err());
    }
}
