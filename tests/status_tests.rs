use qlabel::error::Error;
use qlabel::status::{FRAME_LEN, Status};
use qlabel::values::{self, Value};

const QL800: u16 = 0x3438;
const PTP900: u16 = 0x3071;
const TD4410D: u16 = 0x3537;

fn base_frame(model: u16) -> [u8; FRAME_LEN] {
    let mut raw = [0u8; FRAME_LEN];
    raw[0] = 0x80;
    raw[1] = FRAME_LEN as u8;
    raw[2] = b'B';
    raw[3..5].copy_from_slice(&model.to_be_bytes());
    raw[5] = b'0';
    raw
}

#[test]
fn decode_rejects_wrong_length() {
    for len in [0, 31, 33, 64] {
        let err = Status::from_bytes(&vec![0u8; len]).unwrap_err();
        match err {
            Error::Format { expected, actual } => {
                assert_eq!(expected, FRAME_LEN);
                assert_eq!(actual, len);
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }
}

#[test]
fn decode_is_pure() {
    let mut raw = base_frame(QL800);
    raw[10] = 62;
    raw[11] = 0x0B;

    let a = Status::from_bytes(&raw).unwrap();
    let b = Status::from_bytes(&raw).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fixed_fields_decode_in_place() {
    let mut raw = base_frame(QL800);
    raw[6] = 0x04; // using AC adaptor
    raw[10] = 62;
    raw[11] = 0x0B;
    raw[18] = 0x00;
    raw[26..30].copy_from_slice(&0x0001_0200u32.to_be_bytes());

    let status = Status::from_bytes(&raw).unwrap();
    assert_eq!(status.head_mark(), 0x80);
    assert_eq!(status.frame_size(), 32);
    assert_eq!(status.vendor_code(), b'B');
    assert_eq!(status.country_code(), b'0');
    assert_eq!(status.model().description(), "QL-800");
    assert_eq!(status.battery_level().description(), "Using AC adaptor");
    assert_eq!(status.media_width_mm(), 62);
    assert_eq!(status.media_type().description(), "Die-cut labels");
    assert_eq!(status.status_type().description(), "Reply to status request");
    assert_eq!(status.hardware_settings(), 0x0001_0200);
}

#[test]
fn unknown_codes_decode_as_undefined() {
    let mut raw = base_frame(0x3FFF);
    raw[11] = 0xEE;

    let status = Status::from_bytes(&raw).unwrap();
    assert_eq!(status.model(), Value::Undefined(0x3FFF));
    assert_eq!(status.media_type().code(), 0xEE);
    assert_eq!(status.media_type().name(), "UNDEFINED");
    assert_eq!(status.media_type().description(), "Undefined value");
}

#[test]
fn unknown_lookups_compare_equal() {
    let first = values::media_type::SPACE.get(0xEE);
    let second = values::media_type::SPACE.get(0xEE);
    assert_eq!(first, second);
    assert_ne!(first, values::media_type::SPACE.get(0xEF));
}

#[test]
fn iteration_yields_members_in_declaration_order() {
    let names: Vec<&str> = values::error_information::SPACE
        .iter()
        .map(|v| v.name())
        .collect();
    assert_eq!(names.len(), 16);
    assert_eq!(names[0], "NO_MEDIA");
    assert_eq!(names[2], "CUTTER_JAM");
    assert_eq!(names[15], "SYSTEM_ERROR");

    // Synthesized unknowns are not part of the iteration.
    let before = values::media_type::SPACE.len();
    let _ = values::media_type::SPACE.get(0xEE);
    assert_eq!(values::media_type::SPACE.len(), before);
    assert!(
        values::media_type::SPACE
            .iter()
            .all(|v| v.name() != "UNDEFINED")
    );
}

#[test]
fn clean_frame_reports_no_errors() {
    let status = Status::from_bytes(&base_frame(QL800)).unwrap();
    assert!(status.errors().is_empty());
    assert!(!status.has_errors());
}

#[test]
fn single_error_bit_is_reported() {
    let mut raw = base_frame(QL800);
    raw[8] = 0x10; // bitmask 0x1000
    let status = Status::from_bytes(&raw).unwrap();

    let errors = status.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is(&values::error_information::COVER_OPEN));
    assert_eq!(errors[0].description(), "Cover open");
}

#[test]
fn error_bits_keep_declared_order() {
    let mut raw = base_frame(QL800);
    raw[8] = 0x10; // COVER_OPEN
    raw[9] = 0x05; // NO_MEDIA | CUTTER_JAM
    let status = Status::from_bytes(&raw).unwrap();

    let names: Vec<&str> = status.errors().iter().map(|e| e.name()).collect();
    assert_eq!(names, ["NO_MEDIA", "CUTTER_JAM", "COVER_OPEN"]);
}

#[test]
fn pt_p9_appends_extended_error() {
    let mut raw = base_frame(PTP900);
    raw[7] = 0x1F; // battery error
    raw[9] = 0x01; // no media
    let status = Status::from_bytes(&raw).unwrap();

    let names: Vec<&str> = status.errors().iter().map(|e| e.name()).collect();
    assert_eq!(names, ["NO_MEDIA", "BATTERY"]);
}

#[test]
fn extended_error_ignored_outside_pt_p9() {
    let mut raw = base_frame(QL800);
    raw[7] = 0x1F;
    let status = Status::from_bytes(&raw).unwrap();
    assert!(status.errors().is_empty());
}

#[test]
fn extended_error_none_is_not_an_error() {
    let status = Status::from_bytes(&base_frame(PTP900)).unwrap();
    assert!(status.errors().is_empty());
}

#[test]
fn media_length_spans_two_bytes_on_td_4d() {
    let mut raw = base_frame(TD4410D);
    raw[13] = 0x01;
    raw[17] = 0x2C;
    let status = Status::from_bytes(&raw).unwrap();
    assert_eq!(status.media_length(), 0x012C);
}

#[test]
fn media_length_is_single_byte_elsewhere() {
    let mut raw = base_frame(QL800);
    raw[13] = 0x01; // stale MSB must not leak in
    raw[17] = 0x2C;
    let status = Status::from_bytes(&raw).unwrap();
    assert_eq!(status.media_length(), 0x2C);
}

#[test]
fn phase_number_interpretation_follows_phase_type() {
    let mut raw = base_frame(QL800);
    raw[19] = 0x00;
    raw[20..22].copy_from_slice(&0x0001u16.to_be_bytes());
    let (ty, number) = Status::from_bytes(&raw).unwrap().phase();
    assert!(ty.is(&values::phase_type::READY));
    assert_eq!(number, Some(Value::Known(&values::ready_phase::FEED)));

    raw[19] = 0x01;
    raw[20..22].copy_from_slice(&0x0014u16.to_be_bytes());
    let (ty, number) = Status::from_bytes(&raw).unwrap().phase();
    assert!(ty.is(&values::phase_type::PRINTING));
    assert_eq!(
        number,
        Some(Value::Known(&values::printing_phase::COVER_OPEN))
    );
}

#[test]
fn unrecognized_phase_type_has_no_interpreted_number() {
    let mut raw = base_frame(QL800);
    raw[19] = 0x05;
    raw[20..22].copy_from_slice(&0x0001u16.to_be_bytes());
    let (ty, number) = Status::from_bytes(&raw).unwrap().phase();
    assert_eq!(ty, Value::Undefined(0x05));
    assert_eq!(number, None);
}
