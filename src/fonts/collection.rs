//! Font collection (`ttcf`) unpacking.
//!
//! A PDF font program must be a single sfnt, so a collection is reduced to
//! one of its faces before embedding. The face's tables are copied into a
//! fresh sfnt with offsets rebased onto the new buffer.

use super::signature::COLLECTION_MAGIC;
use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

const TTC_HEADER_LEN: usize = 12;
const SFNT_HEADER_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;

/// Number of faces in a collection.
pub fn face_count(data: &[u8]) -> Result<u32> {
    if data.len() < TTC_HEADER_LEN || data[..4] != COLLECTION_MAGIC {
        return Err(Error::Font("not a font collection".to_string()));
    }
    Ok(BigEndian::read_u32(&data[8..12]))
}

/// Copy face `index` of a collection into a standalone sfnt.
pub fn extract_face(data: &[u8], index: u32) -> Result<Vec<u8>> {
    let count = face_count(data)?;
    if index >= count {
        return Err(Error::Font(format!(
            "collection has {} faces, face {} requested",
            count, index
        )));
    }

    let dir_pos = TTC_HEADER_LEN + index as usize * 4;
    let face_offset = read_u32(data, dir_pos)? as usize;
    let header = slice(data, face_offset, SFNT_HEADER_LEN)?;
    let num_tables = BigEndian::read_u16(&header[4..6]) as usize;

    let records_len = num_tables * TABLE_RECORD_LEN;
    let records = slice(data, face_offset + SFNT_HEADER_LEN, records_len)?;

    let mut out = Vec::with_capacity(data.len());
    // sfnt version, numTables, searchRange, entrySelector, rangeShift
    out.extend_from_slice(header);

    let mut table_pos = SFNT_HEADER_LEN + records_len;
    let mut bodies: Vec<&[u8]> = Vec::with_capacity(num_tables);
    for record in records.chunks_exact(TABLE_RECORD_LEN) {
        let tag = &record[0..4];
        let checksum = BigEndian::read_u32(&record[4..8]);
        let offset = BigEndian::read_u32(&record[8..12]) as usize;
        let length = BigEndian::read_u32(&record[12..16]) as usize;
        let body = slice(data, offset, length).map_err(|_| {
            Error::Font(format!(
                "table '{}' lies outside the collection",
                String::from_utf8_lossy(tag)
            ))
        })?;

        out.extend_from_slice(tag);
        out.write_u32::<BigEndian>(checksum)?;
        out.write_u32::<BigEndian>(table_pos as u32)?;
        out.write_u32::<BigEndian>(length as u32)?;

        table_pos += padded(length);
        bodies.push(body);
    }

    for body in bodies {
        out.extend_from_slice(body);
        out.resize(padded(out.len()), 0);
    }

    log::debug!(
        "Extracted face {} of {} from font collection ({} tables, {} bytes)",
        index,
        count,
        num_tables,
        out.len()
    );
    Ok(out)
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| Error::Font("truncated font collection".to_string()))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    slice(data, offset, 4).map(BigEndian::read_u32)
}
