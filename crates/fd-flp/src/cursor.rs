//! Bounds-checked sequential reader over a borrowed byte buffer.

use crate::error::FlpError;

/// Little-endian reader that never reads past the end of its buffer.
///
/// A failed read leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn ensure(&self, need: usize) -> Result<(), FlpError> {
        let have = self.remaining();
        if need > have {
            return Err(FlpError::UnexpectedEnd { need, have });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, FlpError> {
        self.ensure(1)?;
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, FlpError> {
        self.ensure(2)?;
        let mut value = 0u16;
        for shift in [0, 8] {
            value |= u16::from(self.buf[self.pos]) << shift;
            self.pos += 1;
        }
        Ok(value)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, FlpError> {
        self.ensure(4)?;
        let mut value = 0u32;
        for shift in [0, 8, 16, 24] {
            value |= u32::from(self.buf[self.pos]) << shift;
            self.pos += 1;
        }
        Ok(value)
    }

    /// Borrow the next `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FlpError> {
        self.ensure(n)?;
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), FlpError> {
        self.read_bytes(n).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_u8().unwrap(), 0x01);
        assert_eq!(cur.read_u16_le().unwrap(), 0x1234);
        assert_eq!(cur.read_u32_le().unwrap(), 0x12345678);
        assert_eq!(cur.remaining(), 0);
        assert_eq!(cur.position(), 7);
    }

    #[test]
    fn read_bytes_borrows_slice() {
        let data = b"FLhdrest";
        let mut cur = ByteCursor::new(data);
        assert_eq!(cur.read_bytes(4).unwrap(), b"FLhd");
        assert_eq!(cur.remaining(), 4);
        cur.skip(4).unwrap();
        assert_eq!(cur.read_bytes(0).unwrap(), b"");
    }

    #[test]
    fn short_read_fails_without_advancing() {
        let data = [0xAA, 0xBB, 0xCC];
        let mut cur = ByteCursor::new(&data);
        cur.read_u8().unwrap();

        let err = cur.read_u32_le().unwrap_err();
        assert!(matches!(err, FlpError::UnexpectedEnd { need: 4, have: 2 }));
        assert_eq!(cur.position(), 1);

        assert!(cur.read_bytes(3).is_err());
        assert_eq!(cur.read_u16_le().unwrap(), 0xCCBB);
        assert!(matches!(
            cur.read_u8(),
            Err(FlpError::UnexpectedEnd { need: 1, have: 0 })
        ));
    }

    #[test]
    fn empty_buffer() {
        let mut cur = ByteCursor::new(&[]);
        assert_eq!(cur.remaining(), 0);
        assert!(cur.read_u8().is_err());
        assert!(cur.skip(1).is_err());
    }
}
