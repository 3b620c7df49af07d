//! ZIP archive entries
//! -------------------
//!
//! The filesystem image is an ordinary ZIP file. Only its central directory is
//! read: every entry contributes its stored name and the Unix mode bits that
//! archivers keep in the upper half of the "external file attributes" field.
//!
//! ```ascii
//!     End of central directory record (at the end of the file, before an
//!     optional comment of up to 65535 bytes):
//!
//!     [UInt32:signature]                 /* 0x06054b50 */
//!     [UInt16:disk_number]
//!     [UInt16:central_directory_disk]
//!     [UInt16:entries_on_this_disk]
//!     [UInt16:total_entries]
//!     [UInt32:central_directory_size]
//!     [UInt32:central_directory_offset]
//!     [UInt16:comment_length]
//!
//!     Central directory file header (repeated <total_entries> times):
//!
//!     [UInt32:signature]                 /* 0x02014b50 */
//!     [UInt16:version_made_by]
//!     [UInt16:version_needed]
//!     [UInt16:flags]
//!     [UInt16:compression_method]
//!     [UInt16:modification_time]
//!     [UInt16:modification_date]
//!     [UInt32:crc32]
//!     [UInt32:compressed_size]
//!     [UInt32:uncompressed_size]
//!     [UInt16:file_name_length]
//!     [UInt16:extra_field_length]
//!     [UInt16:file_comment_length]
//!     [UInt16:disk_number_start]
//!     [UInt16:internal_attributes]
//!     [UInt32:external_attributes]      /* st_mode << 16 on Unix */
//!     [UInt32:local_header_offset]
//!     [Bytes:file_name]
//!     [Bytes:extra_field]
//!     [Bytes:file_comment]
//! ```
//!
//! ZIP64 archives are rejected.
pub mod binary;

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use self::binary::ZipBinaryReader;

const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;
const CENTRAL_DIRECTORY_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY_SIZE: u64 = 22;
const MAX_COMMENT_LENGTH: u64 = 65_535;

/// Mode bits kept from an entry's external attributes.
pub const MODE_MASK: u32 = 0o777;

/// One entry of the archive: a slash separated path relative to the archive
/// root, whether it names a directory, and its raw permission bits (zero when
/// the archiver stored none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub path: String,
    pub is_directory: bool,
    pub raw_mode: u32,
}

impl ArchiveRecord {
    pub fn new(path: impl Into<String>, is_directory: bool, raw_mode: u32) -> ArchiveRecord {
        ArchiveRecord {
            path: path.into(),
            is_directory,
            raw_mode,
        }
    }

    /// Path segments with leading, trailing and repeated separators removed.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// Extract the permission bits from a central directory external attribute.
pub fn mode_from_external_attr(external_attr: u32) -> u32 {
    (external_attr >> 16) & MODE_MASK
}

struct EndOfCentralDirectory {
    total_entries: u16,
    central_directory_offset: u32,
}

fn read_end_of_central_directory<R: Read + Seek>(reader: &mut R) -> Result<EndOfCentralDirectory> {
    let length = reader.seek(SeekFrom::End(0))?;
    if length < END_OF_CENTRAL_DIRECTORY_SIZE {
        return Err(Error::InvalidFormat(format!(
            "archive is only {length} bytes long"
        )));
    }

    // The record is followed by a variable length comment, so scan backwards.
    let window = length.min(END_OF_CENTRAL_DIRECTORY_SIZE + MAX_COMMENT_LENGTH);
    reader.seek(SeekFrom::Start(length - window))?;
    let tail = reader.read_zip_bytes(window as usize)?;
    let signature = END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes();
    let last_start = tail.len() - END_OF_CENTRAL_DIRECTORY_SIZE as usize;
    let position = (0..=last_start)
        .rev()
        .find(|&i| tail[i..i + 4] == signature)
        .ok_or_else(|| {
            Error::InvalidFormat("end of central directory record not found".to_string())
        })?;

    let mut record = Cursor::new(&tail[position + 4..]);
    record.skip_zip_bytes(6)?; // disk numbers, entries on this disk
    let total_entries = record.read_zip_u16()?;
    let _central_directory_size = record.read_zip_u32()?;
    let central_directory_offset = record.read_zip_u32()?;

    if total_entries == u16::MAX || central_directory_offset == u32::MAX {
        return Err(Error::Unsupported("ZIP64 archives are not supported".to_string()));
    }

    Ok(EndOfCentralDirectory {
        total_entries,
        central_directory_offset,
    })
}

fn read_central_directory_header<R: Read>(reader: &mut R) -> Result<ArchiveRecord> {
    reader.expect_zip_signature(CENTRAL_DIRECTORY_HEADER_SIGNATURE)?;
    reader.skip_zip_bytes(12)?; // versions, flags, compression, time, date
    reader.skip_zip_bytes(12)?; // crc32, compressed and uncompressed sizes
    let name_length = reader.read_zip_u16()?;
    let extra_length = reader.read_zip_u16()?;
    let comment_length = reader.read_zip_u16()?;
    reader.skip_zip_bytes(4)?; // disk number start, internal attributes
    let external_attr = reader.read_zip_u32()?;
    let _local_header_offset = reader.read_zip_u32()?;

    let name = reader.read_zip_bytes(name_length as usize)?;
    reader.skip_zip_bytes(extra_length as usize + comment_length as usize)?;

    let path = String::from_utf8_lossy(&name).into_owned();
    Ok(ArchiveRecord {
        is_directory: path.ends_with('/'),
        raw_mode: mode_from_external_attr(external_attr),
        path,
    })
}

/// Read every entry of the archive's central directory, in stored order.
pub fn read_records<R: Read + Seek>(reader: &mut R) -> Result<Vec<ArchiveRecord>> {
    let end = read_end_of_central_directory(reader)?;
    reader.seek(SeekFrom::Start(u64::from(end.central_directory_offset)))?;

    let mut records = Vec::with_capacity(end.total_entries as usize);
    for _ in 0..end.total_entries {
        let record = read_central_directory_header(reader)?;
        debug!(
            "archive entry {:?} (directory: {}, mode: {:o})",
            record.path, record.is_directory, record.raw_mode
        );
        records.push(record);
    }
    Ok(records)
}

/// Open the archive at `path` and read its entries.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Vec<ArchiveRecord>> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let records = read_records(&mut reader)?;
    debug!(
        "read {} entries from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}
