//! Incremental APDU composition.
//!
//! An [`Apdu`] owns a bounded fragment and hands out write iterators that
//! place one object header and then append elements until either the data
//! runs out or the fragment fills. Running out of space is not an error;
//! the iterators report it and the caller continues in a fresh fragment.

mod iter;

pub use iter::{BitWriteIterator, IndexedWriteIterator, ObjectWriteIterator};

use core::marker::PhantomData;

use dnp3_objects::objects::{BitfieldVariation, FixedSizeVariation, Variation};
use dnp3_objects::{ControlField, FunctionCode, IinField, QualifierCode};

use crate::error::WriteError;

/// Default fragment size, including the application header.
pub const DEFAULT_FRAGMENT_SIZE: usize = 2048;

/// An application-layer fragment under construction.
///
/// The control field, function code, and IIN may be set in any order and
/// at any time; object headers append in call order. [`Apdu::to_vec`]
/// renders the wire bytes.
///
/// READ fragments serialize headers and index prefixes but no object
/// payloads, matching what the protocol expects of a read request.
#[derive(Debug, Clone)]
pub struct Apdu {
    control: ControlField,
    function: FunctionCode,
    iin: IinField,
    objects: Vec<u8>,
    fragment_size: usize,
}

impl Apdu {
    /// A fragment of the default size.
    pub fn new() -> Self {
        Self::with_fragment_size(DEFAULT_FRAGMENT_SIZE)
    }

    /// A fragment bounded to `fragment_size` bytes, application header
    /// included.
    pub fn with_fragment_size(fragment_size: usize) -> Self {
        Self {
            control: ControlField::default(),
            function: FunctionCode::Confirm,
            iin: IinField::empty(),
            objects: Vec::new(),
            fragment_size,
        }
    }

    /// Drop all object data and return the header fields to their
    /// defaults, keeping the buffer.
    pub fn reset(&mut self) {
        self.control = ControlField::default();
        self.function = FunctionCode::Confirm;
        self.iin = IinField::empty();
        self.objects.clear();
    }

    /// Set the function code.
    pub fn set_function(&mut self, function: FunctionCode) {
        self.function = function;
    }

    /// The current function code.
    pub const fn function(&self) -> FunctionCode {
        self.function
    }

    /// Set the control field.
    pub fn set_control(&mut self, control: ControlField) {
        self.control = control;
    }

    /// The current control field.
    pub const fn control(&self) -> ControlField {
        self.control
    }

    /// Set the internal indications. Only rendered for response functions.
    pub fn set_iin(&mut self, iin: IinField) {
        self.iin = iin;
    }

    /// The current internal indications.
    pub const fn iin(&self) -> IinField {
        self.iin
    }

    fn header_len(&self) -> usize {
        if self.function.is_response() {
            4
        } else {
            2
        }
    }

    /// Rendered size in bytes: application header plus object data.
    pub fn len(&self) -> usize {
        self.header_len() + self.objects.len()
    }

    /// `true` while no object data has been written.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Bytes still available in the fragment.
    pub fn remaining(&self) -> usize {
        self.fragment_size.saturating_sub(self.len())
    }

    /// Render the fragment to wire bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut wire = Vec::with_capacity(self.len());
        wire.push(self.control.to_byte());
        wire.push(self.function.code());
        if self.function.is_response() {
            wire.push(self.iin.lsb());
            wire.push(self.iin.msb());
        }
        wire.extend_from_slice(&self.objects);
        wire
    }

    pub(crate) fn is_read(&self) -> bool {
        self.function == FunctionCode::Read
    }

    /// Write an all-objects header, e.g. a class-poll placeholder.
    pub fn placeholder<V: Variation>(&mut self) -> Result<(), WriteError> {
        if self.remaining() < 3 {
            return Err(WriteError::Full);
        }
        self.objects
            .extend_from_slice(&[V::GROUP, V::VARIATION, QualifierCode::AllObjects.byte()]);
        Ok(())
    }

    /// Write a range header for fixed-size records, choosing the narrowest
    /// start/stop qualifier that holds `stop`.
    pub fn write_contiguous<V: FixedSizeVariation>(
        &mut self,
        start: u32,
        stop: u32,
    ) -> Result<ObjectWriteIterator<'_, V>, WriteError> {
        self.write_contiguous_with(start, stop, QualifierCode::range_for(stop))
    }

    /// Write a range header for fixed-size records with an explicit
    /// qualifier.
    pub fn write_contiguous_with<V: FixedSizeVariation>(
        &mut self,
        start: u32,
        stop: u32,
        qualifier: QualifierCode,
    ) -> Result<ObjectWriteIterator<'_, V>, WriteError> {
        let offsets = self.range_header(V::GROUP, V::VARIATION, start, stop, qualifier)?;
        Ok(ObjectWriteIterator {
            write_data: !self.is_read(),
            apdu: self,
            header_start: offsets.header_start,
            stop_offset: offsets.patch_offset,
            width: offsets.width,
            start,
            stop,
            next: start,
            full: false,
            _variation: PhantomData,
        })
    }

    /// Write a range header for a packed single-bit type.
    pub fn write_bits<V: BitfieldVariation>(
        &mut self,
        start: u32,
        stop: u32,
    ) -> Result<BitWriteIterator<'_, V>, WriteError> {
        self.write_bits_with(start, stop, QualifierCode::range_for(stop))
    }

    /// Write a range header for a packed single-bit type with an explicit
    /// qualifier.
    pub fn write_bits_with<V: BitfieldVariation>(
        &mut self,
        start: u32,
        stop: u32,
        qualifier: QualifierCode,
    ) -> Result<BitWriteIterator<'_, V>, WriteError> {
        let offsets = self.range_header(V::GROUP, V::VARIATION, start, stop, qualifier)?;
        Ok(BitWriteIterator {
            write_data: !self.is_read(),
            apdu: self,
            header_start: offsets.header_start,
            stop_offset: offsets.patch_offset,
            width: offsets.width,
            start,
            stop,
            next: start,
            full: false,
            _variation: PhantomData,
        })
    }

    /// Write a count-with-prefix header, choosing the narrowest prefix
    /// width that holds `max_index`.
    pub fn write_indexed<V: FixedSizeVariation>(
        &mut self,
        count: u32,
        max_index: u32,
    ) -> Result<IndexedWriteIterator<'_, V>, WriteError> {
        self.write_indexed_with(count, QualifierCode::prefixed_for(max_index))
    }

    /// Write a count-with-prefix header with an explicit qualifier.
    pub fn write_indexed_with<V: FixedSizeVariation>(
        &mut self,
        count: u32,
        qualifier: QualifierCode,
    ) -> Result<IndexedWriteIterator<'_, V>, WriteError> {
        debug_assert!(qualifier.is_prefixed(), "qualifier must carry index prefixes");
        let width = qualifier.index_width();
        if self.remaining() < 3 + width {
            return Err(WriteError::Full);
        }
        let header_start = self.objects.len();
        self.objects
            .extend_from_slice(&[V::GROUP, V::VARIATION, qualifier.byte()]);
        let count_offset = self.objects.len();
        self.push_index(count, width);
        Ok(IndexedWriteIterator {
            write_data: !self.is_read(),
            apdu: self,
            header_start,
            count_offset,
            width,
            declared: count,
            written: 0,
            awaiting_value: false,
            full: false,
            _variation: PhantomData,
        })
    }

    /// Write one index-prefixed octet string (groups 111 and 112), where
    /// the variation byte is the payload length.
    pub fn write_indexed_octets(
        &mut self,
        group: u8,
        index: u32,
        data: &[u8],
    ) -> Result<(), WriteError> {
        self.write_indexed_octets_with(group, index, data, QualifierCode::prefixed_for(index))
    }

    /// Write one index-prefixed octet string with an explicit qualifier.
    pub fn write_indexed_octets_with(
        &mut self,
        group: u8,
        index: u32,
        data: &[u8],
        qualifier: QualifierCode,
    ) -> Result<(), WriteError> {
        debug_assert!(qualifier.is_prefixed(), "qualifier must carry index prefixes");
        let length = u8::try_from(data.len()).map_err(|_| WriteError::OctetLength)?;
        if length == 0 {
            return Err(WriteError::OctetLength);
        }
        let width = qualifier.index_width();
        let payload = if self.is_read() { 0 } else { data.len() };
        if self.remaining() < 3 + 2 * width + payload {
            return Err(WriteError::Full);
        }
        self.objects
            .extend_from_slice(&[group, length, qualifier.byte()]);
        self.push_index(1, width);
        self.push_index(index, width);
        if payload > 0 {
            self.objects.extend_from_slice(data);
        }
        Ok(())
    }

    fn range_header(
        &mut self,
        group: u8,
        variation: u8,
        start: u32,
        stop: u32,
        qualifier: QualifierCode,
    ) -> Result<RangeHeader, WriteError> {
        debug_assert!(qualifier.is_range(), "qualifier must be a start/stop form");
        debug_assert!(start <= stop, "range must not be inverted");
        let width = qualifier.index_width();
        if self.remaining() < 3 + 2 * width {
            return Err(WriteError::Full);
        }
        let header_start = self.objects.len();
        self.objects
            .extend_from_slice(&[group, variation, qualifier.byte()]);
        self.push_index(start, width);
        let patch_offset = self.objects.len();
        self.push_index(stop, width);
        Ok(RangeHeader {
            header_start,
            patch_offset,
            width,
        })
    }

    pub(crate) fn push_index(&mut self, value: u32, width: usize) {
        match width {
            1 => self.objects.push(value as u8),
            2 => self.objects.extend_from_slice(&(value as u16).to_le_bytes()),
            _ => self.objects.extend_from_slice(&value.to_le_bytes()),
        }
    }

    pub(crate) fn patch_index(&mut self, offset: usize, value: u32, width: usize) {
        match width {
            1 => self.objects[offset] = value as u8,
            2 => self.objects[offset..offset + 2].copy_from_slice(&(value as u16).to_le_bytes()),
            _ => self.objects[offset..offset + 4].copy_from_slice(&value.to_le_bytes()),
        }
    }

}

impl Default for Apdu {
    fn default() -> Self {
        Self::new()
    }
}

struct RangeHeader {
    header_start: usize,
    patch_offset: usize,
    width: usize,
}
