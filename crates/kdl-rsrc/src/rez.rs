//! Rez archive encoding.
//!
//! ```text
//! 0x00  magic "BRGR"
//! 0x04  version (u32 LE = 1)
//! 0x08  index offset (u32 LE)
//! 0x0C  entry count (u32 LE): one per resource plus the trailing map
//! 0x10  index: per entry, offset (u32 LE) + size (u32 LE)
//!       entry payloads, in index order
//!       map entry (big-endian): type count (4),
//!           per type: code (4), resource count (4),
//!               per resource: id (i32), entry index (4), Pascal name
//! ```

use kdl_core::TypeCode;

use crate::classic::push_pascal;
use crate::error::{Result, RsrcError};
use crate::file::ResourceFile;
use crate::format::Format;

pub(crate) const MAGIC: [u8; 4] = *b"BRGR";
const VERSION: u32 = 1;
const INDEX_OFFSET: u32 = 16;
const INDEX_ENTRY: usize = 8;

pub(crate) fn encode(file: &ResourceFile) -> Result<Vec<u8>> {
    let mut payloads: Vec<&[u8]> = Vec::with_capacity(file.resource_count() + 1);
    let mut map = Vec::new();

    map.extend_from_slice(&to_u32(file.type_count())?.to_be_bytes());
    for ty in file.types() {
        map.extend_from_slice(&ty.code().to_u32().to_be_bytes());
        map.extend_from_slice(&to_u32(ty.resources().len())?.to_be_bytes());
        for res in ty.resources() {
            let id = id_to_i32(ty.code(), res.id)?;
            map.extend_from_slice(&id.to_be_bytes());
            map.extend_from_slice(&to_u32(payloads.len())?.to_be_bytes());
            push_pascal(&mut map, &res.name, ty.code(), res.id)?;
            payloads.push(&res.data);
        }
    }
    payloads.push(&map);

    let entry_count = payloads.len();
    let mut offset = INDEX_OFFSET as usize + INDEX_ENTRY * entry_count;

    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&INDEX_OFFSET.to_le_bytes());
    out.extend_from_slice(&to_u32(entry_count)?.to_le_bytes());

    for payload in &payloads {
        out.extend_from_slice(&to_u32(offset)?.to_le_bytes());
        out.extend_from_slice(&to_u32(payload.len())?.to_le_bytes());
        offset += payload.len();
    }
    to_u32(offset)?;

    for payload in &payloads {
        out.extend_from_slice(payload);
    }
    Ok(out)
}

fn id_to_i32(code: TypeCode, id: i64) -> Result<i32> {
    i32::try_from(id).map_err(|_| RsrcError::IdOutOfRange {
        format: Format::Rez,
        code,
        id,
    })
}

fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| RsrcError::TooLarge {
        format: Format::Rez,
        detail: format!("{value} exceeds 32 bits"),
    })
}
