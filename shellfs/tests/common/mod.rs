#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const CENTRAL_DIRECTORY_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;
const UNIX_VERSION_MADE_BY: u16 = (3 << 8) | 20;
const UTF8_FLAG: u16 = 1 << 11;
const MSDOS_DIRECTORY_ATTR: u32 = 0x10;

/// Writes stored (uncompressed), empty ZIP entries the way Info-ZIP does on
/// Unix: permission bits in the upper half of the external attributes.
#[derive(Default)]
pub struct ZipBuilder {
    entries: Vec<(String, u32)>,
    comment: Vec<u8>,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, mode: u32) -> Self {
        self.entries.push((name.to_string(), (0o100000 | mode) << 16));
        self
    }

    pub fn dir(mut self, name: &str, mode: u32) -> Self {
        let name = if name.ends_with('/') {
            name.to_string()
        } else {
            format!("{name}/")
        };
        self.entries
            .push((name, ((0o040000 | mode) << 16) | MSDOS_DIRECTORY_ATTR));
        self
    }

    /// An entry written by a non-Unix archiver: no mode bits at all.
    pub fn raw(mut self, name: &str, external_attr: u32) -> Self {
        self.entries.push((name.to_string(), external_attr));
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.as_bytes().to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = Vec::new();
        let mut offsets = Vec::new();

        for (name, _) in &self.entries {
            offsets.push(data.len() as u32);
            data.write_u32::<LittleEndian>(LOCAL_FILE_HEADER_SIGNATURE).unwrap();
            data.write_u16::<LittleEndian>(20).unwrap();
            data.write_u16::<LittleEndian>(UTF8_FLAG).unwrap();
            data.write_u16::<LittleEndian>(0).unwrap(); // stored
            data.write_u16::<LittleEndian>(0).unwrap(); // time
            data.write_u16::<LittleEndian>(0x21).unwrap(); // 1980-01-01
            data.write_u32::<LittleEndian>(0).unwrap(); // crc32
            data.write_u32::<LittleEndian>(0).unwrap();
            data.write_u32::<LittleEndian>(0).unwrap();
            data.write_u16::<LittleEndian>(name.len() as u16).unwrap();
            data.write_u16::<LittleEndian>(0).unwrap();
            data.extend_from_slice(name.as_bytes());
        }

        let central_directory_offset = data.len() as u32;
        for ((name, external_attr), offset) in self.entries.iter().zip(&offsets) {
            data.write_u32::<LittleEndian>(CENTRAL_DIRECTORY_HEADER_SIGNATURE).unwrap();
            data.write_u16::<LittleEndian>(UNIX_VERSION_MADE_BY).unwrap();
            data.write_u16::<LittleEndian>(20).unwrap();
            data.write_u16::<LittleEndian>(UTF8_FLAG).unwrap();
            data.write_u16::<LittleEndian>(0).unwrap();
            data.write_u16::<LittleEndian>(0).unwrap();
            data.write_u16::<LittleEndian>(0x21).unwrap();
            data.write_u32::<LittleEndian>(0).unwrap();
            data.write_u32::<LittleEndian>(0).unwrap();
            data.write_u32::<LittleEndian>(0).unwrap();
            data.write_u16::<LittleEndian>(name.len() as u16).unwrap();
            data.write_u16::<LittleEndian>(4).unwrap(); // extra field
            data.write_u16::<LittleEndian>(3).unwrap(); // file comment
            data.write_u16::<LittleEndian>(0).unwrap();
            data.write_u16::<LittleEndian>(0).unwrap();
            data.write_u32::<LittleEndian>(*external_attr).unwrap();
            data.write_u32::<LittleEndian>(*offset).unwrap();
            data.extend_from_slice(name.as_bytes());
            data.extend_from_slice(&[0xca, 0xfe, 0x00, 0x00]);
            data.extend_from_slice(b"abc");
        }
        let central_directory_size = data.len() as u32 - central_directory_offset;

        data.write_u32::<LittleEndian>(END_OF_CENTRAL_DIRECTORY_SIGNATURE).unwrap();
        data.write_u16::<LittleEndian>(0).unwrap();
        data.write_u16::<LittleEndian>(0).unwrap();
        data.write_u16::<LittleEndian>(self.entries.len() as u16).unwrap();
        data.write_u16::<LittleEndian>(self.entries.len() as u16).unwrap();
        data.write_u32::<LittleEndian>(central_directory_size).unwrap();
        data.write_u32::<LittleEndian>(central_directory_offset).unwrap();
        data.write_u16::<LittleEndian>(self.comment.len() as u16).unwrap();
        data.extend_from_slice(&self.comment);
        data
    }
}

/// The layout used throughout the shell tests.
pub fn sample_archive() -> ZipBuilder {
    ZipBuilder::new()
        .file("file1.txt", 0o644)
        .dir("dir1", 0o755)
        .file("dir1/file2.txt", 0o600)
        .dir("dir1/subdir1", 0o755)
        .file("dir1/subdir1/file3.txt", 0o644)
}
