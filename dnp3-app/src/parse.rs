//! APDU decoding: application headers, object headers, and the read-request
//! variant that carries no object payloads.

mod handler;
mod parser;
mod read;

pub use handler::HeaderHandler;
pub use parser::{parse_headers, Range};
pub use read::{parse_read_headers, PrefixedIndices, ReadDetails, ReadHeader};

use dnp3_objects::{ControlField, FunctionCode, IinField};

use crate::error::ParseError;

/// A decoded request header and its borrowed object data.
///
/// The `objects` slice is the unvalidated tail of the fragment; feed it to
/// [`parse_headers`] or [`parse_read_headers`] to walk the object headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    /// The control octet.
    pub control: ControlField,
    /// The requested function.
    pub function: FunctionCode,
    /// Object headers, still encoded.
    pub objects: &'a [u8],
}

/// A decoded response header and its borrowed object data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response<'a> {
    /// The control octet.
    pub control: ControlField,
    /// The response function.
    pub function: FunctionCode,
    /// The internal indications reported by the outstation.
    pub iin: IinField,
    /// Object headers, still encoded.
    pub objects: &'a [u8],
}

/// Split a request fragment into its two-byte header and object tail.
pub fn parse_request(buffer: &[u8]) -> Result<Request<'_>, ParseError> {
    if buffer.len() < 2 {
        return Err(ParseError::NotEnoughDataForAppHeader);
    }
    Ok(Request {
        control: ControlField::from_byte(buffer[0]),
        function: FunctionCode::from(buffer[1]),
        objects: &buffer[2..],
    })
}

/// Split a response fragment into its four-byte header and object tail.
pub fn parse_response(buffer: &[u8]) -> Result<Response<'_>, ParseError> {
    if buffer.len() < 4 {
        return Err(ParseError::NotEnoughDataForAppHeader);
    }
    Ok(Response {
        control: ControlField::from_byte(buffer[0]),
        function: FunctionCode::from(buffer[1]),
        iin: IinField::from_bytes(buffer[2], buffer[3]),
        objects: &buffer[4..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_header_needs_two_bytes() {
        assert_eq!(
            parse_request(&[0xC3]),
            Err(ParseError::NotEnoughDataForAppHeader)
        );
        let request = parse_request(&[0xC3, 0x01]).unwrap();
        assert_eq!(request.function, FunctionCode::Read);
        assert_eq!(request.control.seq, 3);
        assert!(request.objects.is_empty());
    }

    #[test]
    fn response_header_needs_four_bytes() {
        assert_eq!(
            parse_response(&[0xE3, 0x81, 0x96]),
            Err(ParseError::NotEnoughDataForAppHeader)
        );
        let response = parse_response(&[0xE3, 0x81, 0x96, 0x00, 0xAA]).unwrap();
        assert_eq!(response.function, FunctionCode::Response);
        assert_eq!(response.iin, IinField::from_bytes(0x96, 0x00));
        assert_eq!(response.objects, &[0xAA]);
    }
}
