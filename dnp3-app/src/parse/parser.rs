use dnp3_objects::measurement::{Binary, ControlStatus, DoubleBit, DoubleBitBinary, IndexedValue};
use dnp3_objects::objects::{self, FixedSizeVariation};
use dnp3_objects::{GroupVariation, GroupVariationRecord, QualifierCode};
use dnp3_types::{bytes, LazyIterable, ReadCursor};

use super::handler::HeaderHandler;
use crate::error::ParseError;

/// A contiguous index range decoded from a start/stop or count qualifier.
///
/// Count qualifiers produce a range starting at zero. The encoded form
/// satisfies `start <= stop`; inverted ranges are rejected during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Index of the first object.
    pub start: u32,
    /// Number of objects.
    pub count: u32,
}

/// Walk every object header in `objects`, dispatching to `handler`.
///
/// Headers are visited in encoded order. On error the remaining bytes are
/// left undecoded and the error is returned; nothing is thrown.
pub fn parse_headers<'a, H>(objects: &'a [u8], handler: &mut H) -> Result<(), ParseError>
where
    H: HeaderHandler<'a>,
{
    let mut cursor = ReadCursor::new(objects);
    while !cursor.is_empty() {
        parse_header(objects, &mut cursor, handler)?;
    }
    Ok(())
}

fn parse_header<'a, H>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    handler: &mut H,
) -> Result<(), ParseError>
where
    H: HeaderHandler<'a>,
{
    let start = objects.len() - cursor.len();
    if cursor.len() < 3 {
        return Err(ParseError::NotEnoughDataForHeader);
    }
    let head = cursor.split(3);
    let record =
        GroupVariationRecord::lookup(head[0], head[1]).ok_or(ParseError::UnknownObject)?;
    let qualifier = QualifierCode::from_byte(head[2]).ok_or(ParseError::UnknownQualifier)?;

    match qualifier {
        QualifierCode::AllObjects => {
            handler.all_objects(record.gv, &objects[start..start + 3]);
            Ok(())
        }
        QualifierCode::Uint8Count
        | QualifierCode::Uint16Count
        | QualifierCode::Uint32Count => {
            let count = read_count(cursor, qualifier.index_width())?;
            dispatch_range(objects, cursor, start, record, Range { start: 0, count }, handler)
        }
        QualifierCode::Uint8StartStop
        | QualifierCode::Uint16StartStop
        | QualifierCode::Uint32StartStop => {
            let width = qualifier.index_width();
            let first = read_count(cursor, width)?;
            let last = read_count(cursor, width)?;
            dispatch_range(objects, cursor, start, record, make_range(first, last)?, handler)
        }
        QualifierCode::Uint8CountUint8Index
        | QualifierCode::Uint16CountUint16Index
        | QualifierCode::Uint32CountUint32Index => {
            let width = qualifier.index_width();
            let count = read_count(cursor, width)?;
            dispatch_prefixed(objects, cursor, start, record, count, width, handler)
        }
    }
}

/// Read a count or range bound of the qualifier's index width. The bytes
/// belong to the header, so truncation here is a header error.
pub(crate) fn read_count(
    cursor: &mut ReadCursor<'_>,
    width: usize,
) -> Result<u32, ParseError> {
    let result = match width {
        1 => cursor.read_u8().map(u32::from),
        2 => cursor.read_u16_le().map(u32::from),
        _ => cursor.read_u32_le(),
    };
    result.map_err(|_| ParseError::NotEnoughDataForHeader)
}

/// An inverted range is malformed; the count is computed wide enough that
/// `[0, u32::MAX]` cannot underflow or wrap.
pub(crate) fn make_range(first: u32, last: u32) -> Result<Range, ParseError> {
    if last < first {
        return Err(ParseError::IllegalObjectQualifier);
    }
    let count = u64::from(last) - u64::from(first) + 1;
    match u32::try_from(count) {
        Ok(count) => Ok(Range { start: first, count }),
        // no fragment can carry 2^32 objects
        Err(_) => Err(ParseError::NotEnoughDataForObjects),
    }
}

pub(crate) fn read_index(cursor: &mut ReadCursor<'_>, width: usize) -> u32 {
    match width {
        1 => u32::from(cursor.split(1)[0]),
        2 => u32::from(bytes::read_u16_le(cursor.split(2))),
        _ => bytes::read_u32_le(cursor.split(4)),
    }
}

fn take_payload<'a>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    size: u64,
) -> Result<(&'a [u8], &'a [u8]), ParseError> {
    if (cursor.len() as u64) < size {
        return Err(ParseError::NotEnoughDataForObjects);
    }
    let payload = cursor.split(size as usize);
    let header = &objects[start..objects.len() - cursor.len()];
    Ok((header, payload))
}

fn ranged<'a, V>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    range: Range,
) -> Result<
    (
        &'a [u8],
        impl Iterator<Item = IndexedValue<V::Value>> + Clone + 'a,
    ),
    ParseError,
>
where
    V: FixedSizeVariation + 'a,
    V::Value: Clone + 'a,
{
    let size = u64::from(range.count) * u64::from(V::SIZE);
    let (header, payload) = take_payload(objects, cursor, start, size)?;
    let items = LazyIterable::new(ReadCursor::new(payload), range.count, move |c, pos| {
        IndexedValue::new(range.start + pos, V::read(c.split(V::SIZE as usize)))
    });
    Ok((header, items.into_iter()))
}

fn ranged_bits<'a>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    range: Range,
) -> Result<
    (
        &'a [u8],
        impl Iterator<Item = IndexedValue<bool>> + Clone + 'a,
    ),
    ParseError,
> {
    let size = (u64::from(range.count) + 7) / 8;
    let (header, payload) = take_payload(objects, cursor, start, size)?;
    let items = LazyIterable::new(ReadCursor::new(payload), range.count, move |c, pos| {
        IndexedValue::new(range.start + pos, bytes::bit(c.as_slice(), pos as usize))
    });
    Ok((header, items.into_iter()))
}

fn ranged_double_bits<'a>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    range: Range,
) -> Result<
    (
        &'a [u8],
        impl Iterator<Item = IndexedValue<DoubleBit>> + Clone + 'a,
    ),
    ParseError,
> {
    let size = (u64::from(range.count) + 3) / 4;
    let (header, payload) = take_payload(objects, cursor, start, size)?;
    let items = LazyIterable::new(ReadCursor::new(payload), range.count, move |c, pos| {
        let byte = c.as_slice()[(pos / 4) as usize];
        let state = DoubleBit::from_bits(byte >> (2 * (pos % 4)));
        IndexedValue::new(range.start + pos, state)
    });
    Ok((header, items.into_iter()))
}

fn ranged_octets<'a>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    range: Range,
    length: u8,
) -> Result<
    (
        &'a [u8],
        impl Iterator<Item = IndexedValue<&'a [u8]>> + Clone + 'a,
    ),
    ParseError,
> {
    let size = u64::from(range.count) * u64::from(length);
    let (header, payload) = take_payload(objects, cursor, start, size)?;
    let items = LazyIterable::new(ReadCursor::new(payload), range.count, move |c, pos| {
        IndexedValue::new(range.start + pos, c.split(length as usize))
    });
    Ok((header, items.into_iter()))
}

fn prefixed<'a, V>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    count: u32,
    width: usize,
) -> Result<
    (
        &'a [u8],
        impl Iterator<Item = IndexedValue<V::Value>> + Clone + 'a,
    ),
    ParseError,
>
where
    V: FixedSizeVariation + 'a,
    V::Value: Clone + 'a,
{
    let size = u64::from(count) * (width as u64 + u64::from(V::SIZE));
    let (header, payload) = take_payload(objects, cursor, start, size)?;
    let items = LazyIterable::new(ReadCursor::new(payload), count, move |c, _| {
        let index = read_index(c, width);
        IndexedValue::new(index, V::read(c.split(V::SIZE as usize)))
    });
    Ok((header, items.into_iter()))
}

fn prefixed_octets<'a>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    count: u32,
    width: usize,
    length: u8,
) -> Result<
    (
        &'a [u8],
        impl Iterator<Item = IndexedValue<&'a [u8]>> + Clone + 'a,
    ),
    ParseError,
> {
    let size = u64::from(count) * (width as u64 + u64::from(length));
    let (header, payload) = take_payload(objects, cursor, start, size)?;
    let items = LazyIterable::new(ReadCursor::new(payload), count, move |c, _| {
        let index = read_index(c, width);
        IndexedValue::new(index, c.split(length as usize))
    });
    Ok((header, items.into_iter()))
}

macro_rules! fixed_range {
    ($variation:ty, $method:ident, $args:expr, $record:expr, $handler:expr) => {{
        let (objects, cursor, start, range) = $args;
        let (header, items) = ranged::<$variation>(objects, cursor, start, range)?;
        $handler.$method($record.gv, header, items);
        Ok(())
    }};
}

fn dispatch_range<'a, H>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    record: GroupVariationRecord,
    range: Range,
    handler: &mut H,
) -> Result<(), ParseError>
where
    H: HeaderHandler<'a>,
{
    use GroupVariation::*;

    let args = (objects, cursor, start, range);
    match record.gv {
        Group1Var1 => {
            let (objects, cursor, start, range) = args;
            let (header, bits) = ranged_bits(objects, cursor, start, range)?;
            handler.on_range_binary(record.gv, header, bits.map(|v| v.map(Binary::from)));
            Ok(())
        }
        Group1Var2 => fixed_range!(objects::Group1Var2, on_range_binary, args, record, handler),
        Group3Var1 => {
            let (objects, cursor, start, range) = args;
            let (header, pairs) = ranged_double_bits(objects, cursor, start, range)?;
            handler.on_range_double_bit(
                record.gv,
                header,
                pairs.map(|v| v.map(DoubleBitBinary::from)),
            );
            Ok(())
        }
        Group3Var2 => {
            fixed_range!(objects::Group3Var2, on_range_double_bit, args, record, handler)
        }
        Group10Var1 => {
            let (objects, cursor, start, range) = args;
            let (header, bits) = ranged_bits(objects, cursor, start, range)?;
            handler.on_range_control_status(
                record.gv,
                header,
                bits.map(|v| v.map(ControlStatus::from)),
            );
            Ok(())
        }
        Group10Var2 => {
            fixed_range!(objects::Group10Var2, on_range_control_status, args, record, handler)
        }
        Group20Var1 => fixed_range!(objects::Group20Var1, on_range_counter, args, record, handler),
        Group20Var2 => fixed_range!(objects::Group20Var2, on_range_counter, args, record, handler),
        Group20Var5 => fixed_range!(objects::Group20Var5, on_range_counter, args, record, handler),
        Group20Var6 => fixed_range!(objects::Group20Var6, on_range_counter, args, record, handler),
        Group30Var1 => fixed_range!(objects::Group30Var1, on_range_analog, args, record, handler),
        Group30Var2 => fixed_range!(objects::Group30Var2, on_range_analog, args, record, handler),
        Group30Var3 => fixed_range!(objects::Group30Var3, on_range_analog, args, record, handler),
        Group30Var4 => fixed_range!(objects::Group30Var4, on_range_analog, args, record, handler),
        Group30Var5 => fixed_range!(objects::Group30Var5, on_range_analog, args, record, handler),
        Group30Var6 => fixed_range!(objects::Group30Var6, on_range_analog, args, record, handler),
        Group40Var1 => {
            fixed_range!(objects::Group40Var1, on_range_setpoint_status, args, record, handler)
        }
        Group40Var2 => {
            fixed_range!(objects::Group40Var2, on_range_setpoint_status, args, record, handler)
        }
        Group40Var3 => {
            fixed_range!(objects::Group40Var3, on_range_setpoint_status, args, record, handler)
        }
        Group40Var4 => {
            fixed_range!(objects::Group40Var4, on_range_setpoint_status, args, record, handler)
        }
        Group80Var1 => {
            let (objects, cursor, start, range) = args;
            let (header, bits) = ranged_bits(objects, cursor, start, range)?;
            handler.on_iin(record.gv, header, bits);
            Ok(())
        }
        Group110AnyVar => {
            let (objects, cursor, start, range) = args;
            let (header, items) =
                ranged_octets(objects, cursor, start, range, record.variation)?;
            handler.on_range_of_octets(record.gv, header, items);
            Ok(())
        }
        _ => Err(ParseError::IllegalObjectQualifier),
    }
}

macro_rules! fixed_prefix {
    ($variation:ty, $method:ident, $args:expr, $record:expr, $handler:expr) => {{
        let (objects, cursor, start, count, width) = $args;
        let (header, items) = prefixed::<$variation>(objects, cursor, start, count, width)?;
        $handler.$method($record.gv, header, items);
        Ok(())
    }};
}

fn dispatch_prefixed<'a, H>(
    objects: &'a [u8],
    cursor: &mut ReadCursor<'a>,
    start: usize,
    record: GroupVariationRecord,
    count: u32,
    width: usize,
    handler: &mut H,
) -> Result<(), ParseError>
where
    H: HeaderHandler<'a>,
{
    use GroupVariation::*;

    let args = (objects, cursor, start, count, width);
    match record.gv {
        Group2Var1 => fixed_prefix!(objects::Group2Var1, on_prefix_binary, args, record, handler),
        Group2Var2 => fixed_prefix!(objects::Group2Var2, on_prefix_binary, args, record, handler),
        Group2Var3 => fixed_prefix!(objects::Group2Var3, on_prefix_binary, args, record, handler),
        Group4Var1 => {
            fixed_prefix!(objects::Group4Var1, on_prefix_double_bit, args, record, handler)
        }
        Group12Var1 => fixed_prefix!(objects::Group12Var1, on_prefix_crob, args, record, handler),
        Group22Var1 => {
            fixed_prefix!(objects::Group22Var1, on_prefix_counter, args, record, handler)
        }
        Group22Var2 => {
            fixed_prefix!(objects::Group22Var2, on_prefix_counter, args, record, handler)
        }
        Group22Var5 => {
            fixed_prefix!(objects::Group22Var5, on_prefix_counter, args, record, handler)
        }
        Group22Var6 => {
            fixed_prefix!(objects::Group22Var6, on_prefix_counter, args, record, handler)
        }
        Group32Var1 => fixed_prefix!(objects::Group32Var1, on_prefix_analog, args, record, handler),
        Group32Var2 => fixed_prefix!(objects::Group32Var2, on_prefix_analog, args, record, handler),
        Group32Var3 => fixed_prefix!(objects::Group32Var3, on_prefix_analog, args, record, handler),
        Group32Var4 => fixed_prefix!(objects::Group32Var4, on_prefix_analog, args, record, handler),
        Group32Var5 => fixed_prefix!(objects::Group32Var5, on_prefix_analog, args, record, handler),
        Group32Var6 => fixed_prefix!(objects::Group32Var6, on_prefix_analog, args, record, handler),
        Group32Var7 => fixed_prefix!(objects::Group32Var7, on_prefix_analog, args, record, handler),
        Group32Var8 => fixed_prefix!(objects::Group32Var8, on_prefix_analog, args, record, handler),
        Group41Var1 => {
            fixed_prefix!(objects::Group41Var1, on_prefix_analog_output, args, record, handler)
        }
        Group41Var2 => {
            fixed_prefix!(objects::Group41Var2, on_prefix_analog_output, args, record, handler)
        }
        Group41Var3 => {
            fixed_prefix!(objects::Group41Var3, on_prefix_analog_output, args, record, handler)
        }
        Group41Var4 => {
            fixed_prefix!(objects::Group41Var4, on_prefix_analog_output, args, record, handler)
        }
        Group111AnyVar | Group112AnyVar => {
            let (objects, cursor, start, count, width) = args;
            let (header, items) =
                prefixed_octets(objects, cursor, start, count, width, record.variation)?;
            handler.on_prefix_of_octets(record.gv, header, items);
            Ok(())
        }
        _ => Err(ParseError::IllegalObjectQualifier),
    }
}
