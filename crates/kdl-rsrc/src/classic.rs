//! Classic resource fork encoding.
//!
//! ```text
//! 0x000  header: data offset, map offset, data length, map length (u32 each)
//! 0x010  reserved, zero filled up to 0x100
//! 0x100  data: per resource, u32 length + bytes
//!        map:  header copy (16), next map (4), file ref (2), attributes (2),
//!              type list offset (2), name list offset (2),
//!              type list: count-1 (2), per type: code (4), count-1 (2), ref offset (2)
//!              reference lists: id (2), name offset (2), attributes (1),
//!                               data offset (3), handle (4)
//!              name list: Pascal strings
//! ```
//!
//! All integers are big-endian. Reference list offsets are relative to the
//! start of the type list; name offsets to the start of the name list.

use crate::error::{Result, RsrcError};
use crate::file::ResourceFile;
use crate::format::Format;

const HEADER_AREA: usize = 256;
const MAP_HEADER: usize = 28;
const TYPE_ENTRY: usize = 8;
const REF_ENTRY: usize = 12;
const NO_NAME: u16 = 0xFFFF;
const MAX_DATA_OFFSET: usize = 0x00FF_FFFF;

pub(crate) fn encode(file: &ResourceFile) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut type_list = Vec::new();
    let mut ref_lists = Vec::new();
    let mut name_list = Vec::new();

    type_list.extend_from_slice(&count_minus_one(file.type_count(), "type")?.to_be_bytes());
    let mut ref_offset = 2 + TYPE_ENTRY * file.type_count();

    for ty in file.types() {
        let count = ty.resources().len();
        type_list.extend_from_slice(&ty.code().to_u32().to_be_bytes());
        type_list.extend_from_slice(&count_minus_one(count, "resource")?.to_be_bytes());
        type_list.extend_from_slice(&to_u16(ref_offset, "reference list offset")?.to_be_bytes());
        ref_offset += REF_ENTRY * count;

        for res in ty.resources() {
            let id = i16::try_from(res.id).map_err(|_| RsrcError::IdOutOfRange {
                format: Format::Classic,
                code: ty.code(),
                id: res.id,
            })?;

            let name_offset = if res.name.is_empty() {
                NO_NAME
            } else {
                let offset = to_u16(name_list.len(), "name list offset")?;
                if offset == NO_NAME {
                    return Err(too_large("name list offset exceeds 16 bits"));
                }
                push_pascal(&mut name_list, &res.name, ty.code(), res.id)?;
                offset
            };

            let data_offset = data.len();
            if data_offset > MAX_DATA_OFFSET {
                return Err(too_large("data offset exceeds 24 bits"));
            }
            let length = u32::try_from(res.data.len())
                .map_err(|_| too_large("resource payload exceeds 32 bits"))?;
            data.extend_from_slice(&length.to_be_bytes());
            data.extend_from_slice(&res.data);

            ref_lists.extend_from_slice(&id.to_be_bytes());
            ref_lists.extend_from_slice(&name_offset.to_be_bytes());
            ref_lists.push(0);
            ref_lists.extend_from_slice(&(data_offset as u32).to_be_bytes()[1..]);
            ref_lists.extend_from_slice(&0u32.to_be_bytes());
        }
    }

    let name_list_offset = to_u16(MAP_HEADER + type_list.len() + ref_lists.len(), "name list")?;
    let map_length = MAP_HEADER + type_list.len() + ref_lists.len() + name_list.len();
    let map_offset = HEADER_AREA + data.len();

    let mut header = Vec::with_capacity(16);
    for value in [HEADER_AREA, map_offset, data.len(), map_length] {
        let value = u32::try_from(value).map_err(|_| too_large("file exceeds 32-bit offsets"))?;
        header.extend_from_slice(&value.to_be_bytes());
    }

    let mut out = Vec::with_capacity(map_offset + map_length);
    out.extend_from_slice(&header);
    out.resize(HEADER_AREA, 0);
    out.extend_from_slice(&data);

    out.extend_from_slice(&header);
    out.extend_from_slice(&0u32.to_be_bytes()); // next map handle
    out.extend_from_slice(&0u16.to_be_bytes()); // file reference
    out.extend_from_slice(&0u16.to_be_bytes()); // attributes
    out.extend_from_slice(&(MAP_HEADER as u16).to_be_bytes());
    out.extend_from_slice(&name_list_offset.to_be_bytes());
    out.extend_from_slice(&type_list);
    out.extend_from_slice(&ref_lists);
    out.extend_from_slice(&name_list);

    Ok(out)
}

/// Append `name` as a length-prefixed string.
pub(crate) fn push_pascal(
    out: &mut Vec<u8>,
    name: &str,
    code: kdl_core::TypeCode,
    id: i64,
) -> Result<()> {
    let bytes = name.as_bytes();
    let len = u8::try_from(bytes.len()).map_err(|_| RsrcError::NameTooLong {
        code,
        id,
        len: bytes.len(),
    })?;
    out.push(len);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Counts are stored minus one, so an empty list is 0xFFFF.
fn count_minus_one(count: usize, what: &str) -> Result<u16> {
    if count > 0x1_0000 {
        return Err(too_large(&format!("too many {what} entries ({count})")));
    }
    Ok((count as u16).wrapping_sub(1))
}

fn to_u16(value: usize, what: &str) -> Result<u16> {
    u16::try_from(value).map_err(|_| too_large(&format!("{what} exceeds 16 bits")))
}

fn too_large(detail: &str) -> RsrcError {
    RsrcError::TooLarge {
        format: Format::Classic,
        detail: detail.to_string(),
    }
}
