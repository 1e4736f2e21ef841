//! Golden-vector tests for the APDU writer.

mod common;

use common::from_hex;

use dnp3_app::prelude::*;
use dnp3_objects::measurement::Flags;
use dnp3_objects::objects::{
    Group1Var1, Group1Var2, Group2Var1, Group30Var2, Group32Var2, Group41Var3, Group41Var4,
    Group60Var1, Group60Var2, Group60Var3, Group60Var4, Group80Var1,
};

#[test]
fn write_iin_bit() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Write);
    apdu.set_control(ControlField::new(true, true, false, false, 4));

    let mut bits = apdu.write_bits::<Group80Var1>(7, 7).unwrap();
    assert!(bits.write(false));
    assert!(bits.is_end());
    bits.finish();

    assert_eq!(apdu.to_vec(), from_hex("C4 02 50 01 00 07 07 00"));
}

#[test]
fn class_poll_request() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Read);
    apdu.set_control(ControlField::new(true, true, false, false, 3));
    assert_eq!(apdu.len(), 2);

    apdu.placeholder::<Group60Var2>().unwrap();
    assert_eq!(apdu.len(), 5);
    apdu.placeholder::<Group60Var3>().unwrap();
    assert_eq!(apdu.len(), 8);
    apdu.placeholder::<Group60Var4>().unwrap();
    assert_eq!(apdu.len(), 11);
    apdu.placeholder::<Group60Var1>().unwrap();
    assert_eq!(apdu.len(), 14);

    assert_eq!(
        apdu.to_vec(),
        from_hex("C3 01 3C 02 06 3C 03 06 3C 04 06 3C 01 06")
    );
}

#[test]
fn confirm_fragments() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Confirm);
    apdu.set_control(ControlField::new(true, true, false, false, 3));
    assert_eq!(apdu.to_vec(), from_hex("C3 00"));

    apdu.set_control(ControlField::new(true, true, false, false, 15));
    assert_eq!(apdu.to_vec(), from_hex("CF 00"));
}

#[test]
fn index_prefixed_read_carries_no_payload() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Read);
    apdu.set_control(ControlField::new(true, true, false, false, 0));

    let mut iter = apdu.write_indexed::<Group1Var2>(3, 255).unwrap();
    assert!(iter.set_index(1));
    assert!(iter.set_index(3));
    assert!(iter.set_index(5));
    assert!(iter.is_end());
    assert_eq!(iter.finish(), 3);

    assert_eq!(apdu.to_vec(), from_hex("C0 01 01 02 17 03 01 03 05"));
}

#[test]
fn virtual_terminal_write() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Write);
    apdu.set_control(ControlField::new(true, true, false, false, 2));

    apdu.write_indexed_octets(112, 0, b"hello").unwrap();

    assert_eq!(
        apdu.to_vec(),
        from_hex("C2 02 70 05 17 01 00 68 65 6C 6C 6F")
    );
}

#[test]
fn virtual_terminal_write_multiple_indices() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Write);
    apdu.set_control(ControlField::new(true, true, false, false, 2));

    apdu.write_indexed_octets(112, 5, b"hello").unwrap();
    apdu.write_indexed_octets(112, 16, b"world").unwrap();

    assert_eq!(
        apdu.to_vec(),
        from_hex("C2 02 70 05 17 01 05 68 65 6C 6C 6F 70 05 17 01 10 77 6F 72 6C 64")
    );
}

#[test]
fn response_with_events_and_statics() {
    let expected = "E3 81 96 00 \
                    02 01 28 01 00 00 00 01 02 01 28 01 00 01 00 01 \
                    02 01 28 01 00 02 00 01 02 01 28 01 00 03 00 01 \
                    20 02 28 01 00 00 00 01 00 00 20 02 28 01 00 01 00 01 00 00 \
                    01 01 01 00 00 03 00 00 \
                    1E 02 01 00 00 01 00 01 00 00 01 00 00";

    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Response);
    apdu.set_control(ControlField::new(true, true, true, false, 3));
    apdu.set_iin(
        IinField::DEVICE_RESTART
            | IinField::NEED_TIME
            | IinField::CLASS1_EVENTS
            | IinField::CLASS2_EVENTS,
    );

    for index in 0..4 {
        let mut iter = apdu
            .write_indexed_with::<Group2Var1>(1, QualifierCode::Uint16CountUint16Index)
            .unwrap();
        assert!(iter.set_index(index));
        assert!(iter.write(&Binary::new(false, Flags::ONLINE)));
        assert!(iter.is_end());
        iter.finish();
    }
    assert_eq!(apdu.len(), 36);

    for index in 0..2 {
        // a max index of 300 forces the two-octet prefix form
        let mut iter = apdu.write_indexed::<Group32Var2>(1, 300).unwrap();
        assert!(iter.set_index(index));
        assert!(iter.write(&Analog::new(0.0, Flags::ONLINE)));
        iter.finish();
    }
    assert_eq!(apdu.len(), 56);

    let mut bits = apdu
        .write_bits_with::<Group1Var1>(0, 3, QualifierCode::Uint16StartStop)
        .unwrap();
    for _ in 0..4 {
        assert!(bits.write(false));
    }
    assert!(bits.is_end());
    bits.finish();

    let mut statics = apdu
        .write_contiguous_with::<Group30Var2>(0, 1, QualifierCode::Uint16StartStop)
        .unwrap();
    assert!(statics.write(&Analog::new(0.0, Flags::ONLINE)));
    assert!(statics.write(&Analog::new(0.0, Flags::ONLINE)));
    assert!(statics.is_end());
    statics.finish();

    assert_eq!(apdu.to_vec(), from_hex(expected));
}

#[test]
fn packed_bits_fill_lsb_first() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Response);
    apdu.set_control(ControlField::new(true, true, false, false, 0));
    apdu.set_iin(IinField::empty());

    let mut bits = apdu.write_bits::<Group1Var1>(0, 5).unwrap();
    for i in 0..6 {
        assert!(bits.write(i % 2 == 1));
    }
    bits.finish();

    assert_eq!(apdu.to_vec(), from_hex("C0 81 00 00 01 01 00 00 05 2A"));
}

#[test]
fn four_byte_prefix_form() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Response);
    apdu.set_control(ControlField::new(true, true, false, false, 0));

    let mut iter = apdu
        .write_indexed_with::<Group32Var2>(1, QualifierCode::Uint32CountUint32Index)
        .unwrap();
    assert!(iter.set_index(2));
    assert!(iter.write(&Analog::new(3.0, Flags::RESTART)));
    iter.finish();

    assert_eq!(
        apdu.to_vec(),
        from_hex("C0 81 00 00 20 02 39 01 00 00 00 02 00 00 00 02 03 00")
    );
}

#[test]
fn single_precision_setpoint_command() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Response);
    apdu.set_control(ControlField::new(true, true, false, false, 0));

    let mut iter = apdu
        .write_indexed_with::<Group41Var3>(1, QualifierCode::Uint8CountUint8Index)
        .unwrap();
    assert!(iter.set_index(1));
    assert!(iter.write(&AnalogOutput::new(100.0)));
    iter.finish();

    assert_eq!(
        apdu.to_vec(),
        from_hex("C0 81 00 00 29 03 17 01 01 00 00 C8 42 00")
    );
}

#[test]
fn double_precision_setpoint_command() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Response);
    apdu.set_control(ControlField::new(true, true, false, false, 0));

    let mut iter = apdu
        .write_indexed_with::<Group41Var4>(1, QualifierCode::Uint8CountUint8Index)
        .unwrap();
    assert!(iter.set_index(1));
    assert!(iter.write(&AnalogOutput::new(100.0)));
    iter.finish();

    assert_eq!(
        apdu.to_vec(),
        from_hex("C0 81 00 00 29 04 17 01 01 00 00 00 00 00 00 59 40 00")
    );
}

#[test]
fn underfilled_prefix_count_is_patched() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Response);
    apdu.set_control(ControlField::new(true, true, false, false, 0));

    let mut iter = apdu.write_indexed::<Group2Var1>(3, 10).unwrap();
    assert!(iter.set_index(10));
    assert!(iter.write(&Binary::new(true, Flags::ONLINE)));
    assert_eq!(iter.finish(), 1);

    assert_eq!(apdu.to_vec(), from_hex("C0 81 00 00 02 01 17 01 0A 81"));
}

#[test]
fn empty_headers_are_removed() {
    let mut apdu = Apdu::new();
    apdu.set_function(FunctionCode::Response);
    apdu.set_control(ControlField::new(true, true, false, false, 0));

    let iter = apdu.write_indexed::<Group2Var1>(3, 10).unwrap();
    assert_eq!(iter.finish(), 0);
    let iter = apdu.write_contiguous::<Group30Var2>(0, 4).unwrap();
    assert_eq!(iter.finish(), 0);

    assert!(apdu.is_empty());
    assert_eq!(apdu.to_vec(), from_hex("C0 81 00 00"));
}

#[test]
fn full_fragment_truncates_the_declared_range() {
    // room for the 4-byte response header, a 5-byte object header, and
    // exactly two 3-byte records
    let mut apdu = Apdu::with_fragment_size(15);
    apdu.set_function(FunctionCode::Response);
    apdu.set_control(ControlField::new(true, true, false, false, 0));

    let mut iter = apdu.write_contiguous::<Group30Var2>(0, 9).unwrap();
    let value = Analog::new(1.0, Flags::ONLINE);
    let mut written = 0;
    while iter.write(&value) {
        written += 1;
    }
    assert!(iter.is_end());
    assert_eq!(iter.finish(), written);
    assert_eq!(written, 2);

    // the declared stop index shrank to match the two records
    assert_eq!(
        apdu.to_vec(),
        from_hex("C0 81 00 00 1E 02 00 00 01 01 01 00 01 01 00")
    );
    assert_eq!(apdu.remaining(), 0);
}
