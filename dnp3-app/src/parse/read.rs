//! Header walking for READ requests.
//!
//! A read request enumerates what it wants — ranges, counts, and index
//! prefixes — but carries no object payloads. This walker decodes exactly
//! that shape; it is what the outstation response context consumes.

use dnp3_objects::{GroupVariationRecord, QualifierCode};
use dnp3_types::{LazyIterable, ReadCursor};

use super::parser::{make_range, read_count, read_index, Range};
use crate::error::ParseError;

/// One decoded read-request header.
#[derive(Debug, Clone, Copy)]
pub struct ReadHeader<'a> {
    /// The resolved object type.
    pub record: GroupVariationRecord,
    /// The qualifier the request used.
    pub qualifier: QualifierCode,
    /// What the header asks for.
    pub details: ReadDetails<'a>,
    /// The exact bytes of this header.
    pub header: &'a [u8],
}

/// The enumeration shape of a read-request header.
#[derive(Debug, Clone, Copy)]
pub enum ReadDetails<'a> {
    /// Every object of the type.
    AllObjects,
    /// Up to `n` objects, outstation's choice of which.
    Count(u32),
    /// The objects in an index range.
    Range(Range),
    /// Specific objects named by index.
    Indices(PrefixedIndices<'a>),
}

/// The decoded index prefixes of a count-with-prefix read header.
#[derive(Debug, Clone, Copy)]
pub struct PrefixedIndices<'a> {
    payload: &'a [u8],
    width: usize,
    count: u32,
}

impl<'a> PrefixedIndices<'a> {
    /// Number of indices.
    pub const fn len(&self) -> u32 {
        self.count
    }

    /// `true` if the header named no indices.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Walk the indices. May be called any number of times.
    pub fn iter(&self) -> impl Iterator<Item = u32> + Clone + 'a {
        let width = self.width;
        LazyIterable::new(ReadCursor::new(self.payload), self.count, move |c, _| {
            read_index(c, width)
        })
        .into_iter()
    }
}

/// Walk every header of a read request, in encoded order.
pub fn parse_read_headers<'a>(
    objects: &'a [u8],
    mut handler: impl FnMut(ReadHeader<'a>),
) -> Result<(), ParseError> {
    let mut cursor = ReadCursor::new(objects);
    while !cursor.is_empty() {
        let start = objects.len() - cursor.len();
        if cursor.len() < 3 {
            return Err(ParseError::NotEnoughDataForHeader);
        }
        let head = cursor.split(3);
        let record =
            GroupVariationRecord::lookup(head[0], head[1]).ok_or(ParseError::UnknownObject)?;
        let qualifier = QualifierCode::from_byte(head[2]).ok_or(ParseError::UnknownQualifier)?;

        let details = match qualifier {
            QualifierCode::AllObjects => ReadDetails::AllObjects,
            QualifierCode::Uint8Count
            | QualifierCode::Uint16Count
            | QualifierCode::Uint32Count => {
                ReadDetails::Count(read_count(&mut cursor, qualifier.index_width())?)
            }
            QualifierCode::Uint8StartStop
            | QualifierCode::Uint16StartStop
            | QualifierCode::Uint32StartStop => {
                let width = qualifier.index_width();
                let first = read_count(&mut cursor, width)?;
                let last = read_count(&mut cursor, width)?;
                ReadDetails::Range(make_range(first, last)?)
            }
            QualifierCode::Uint8CountUint8Index
            | QualifierCode::Uint16CountUint16Index
            | QualifierCode::Uint32CountUint32Index => {
                let width = qualifier.index_width();
                let count = read_count(&mut cursor, width)?;
                let size = u64::from(count) * width as u64;
                if (cursor.len() as u64) < size {
                    return Err(ParseError::NotEnoughDataForObjects);
                }
                ReadDetails::Indices(PrefixedIndices {
                    payload: cursor.split(size as usize),
                    width,
                    count,
                })
            }
        };

        handler(ReadHeader {
            record,
            qualifier,
            details,
            header: &objects[start..objects.len() - cursor.len()],
        });
    }
    Ok(())
}
