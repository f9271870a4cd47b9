//! Extended resource file encoding.
//!
//! Same overall structure as the classic fork, widened so that ids, counts
//! and offsets are 64-bit:
//!
//! ```text
//! 0x000  version (u64 = 1), data offset, map offset, data length, map length (u64 each)
//! 0x028  reserved, zero filled up to 0x100
//! 0x100  data: per resource, u64 length + bytes
//!        map:  type list offset (8), name list offset (8),
//!              type list: count (8), per type: code (4), count (8), ref offset (8)
//!              reference lists: id (8), name offset (8), attributes (1), data offset (8)
//!              name list: Pascal strings
//! ```
//!
//! Offsets inside the map are relative to the start of the map, except name
//! offsets which are relative to the name list. An absent name is `u64::MAX`.

use crate::classic::push_pascal;
use crate::error::Result;
use crate::file::ResourceFile;

const VERSION: u64 = 1;
const HEADER_AREA: u64 = 256;
const MAP_HEADER: u64 = 16;
const TYPE_ENTRY: u64 = 4 + 8 + 8;
const REF_ENTRY: u64 = 8 + 8 + 1 + 8;
const NO_NAME: u64 = u64::MAX;

pub(crate) fn encode(file: &ResourceFile) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut type_list = Vec::new();
    let mut ref_lists = Vec::new();
    let mut name_list = Vec::new();

    let type_count = file.type_count() as u64;
    type_list.extend_from_slice(&type_count.to_be_bytes());
    let mut ref_offset = MAP_HEADER + 8 + TYPE_ENTRY * type_count;

    for ty in file.types() {
        let count = ty.resources().len() as u64;
        type_list.extend_from_slice(&ty.code().to_u32().to_be_bytes());
        type_list.extend_from_slice(&count.to_be_bytes());
        type_list.extend_from_slice(&ref_offset.to_be_bytes());
        ref_offset += REF_ENTRY * count;

        for res in ty.resources() {
            let name_offset = if res.name.is_empty() {
                NO_NAME
            } else {
                let offset = name_list.len() as u64;
                push_pascal(&mut name_list, &res.name, ty.code(), res.id)?;
                offset
            };

            let data_offset = data.len() as u64;
            data.extend_from_slice(&(res.data.len() as u64).to_be_bytes());
            data.extend_from_slice(&res.data);

            ref_lists.extend_from_slice(&res.id.to_be_bytes());
            ref_lists.extend_from_slice(&name_offset.to_be_bytes());
            ref_lists.push(0);
            ref_lists.extend_from_slice(&data_offset.to_be_bytes());
        }
    }

    let name_list_offset = MAP_HEADER + (type_list.len() + ref_lists.len()) as u64;
    let map_length = name_list_offset + name_list.len() as u64;
    let map_offset = HEADER_AREA + data.len() as u64;

    let mut out = Vec::with_capacity((map_offset + map_length) as usize);
    for value in [VERSION, HEADER_AREA, map_offset, data.len() as u64, map_length] {
        out.extend_from_slice(&value.to_be_bytes());
    }
    out.resize(HEADER_AREA as usize, 0);
    out.extend_from_slice(&data);

    out.extend_from_slice(&MAP_HEADER.to_be_bytes());
    out.extend_from_slice(&name_list_offset.to_be_bytes());
    out.extend_from_slice(&type_list);
    out.extend_from_slice(&ref_lists);
    out.extend_from_slice(&name_list);

    Ok(out)
}
