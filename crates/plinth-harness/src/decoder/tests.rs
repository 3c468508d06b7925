//! Unit tests for the plist decoder.

use std::io;

use rstest::rstest;

use super::*;

const XML_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>MyApp</key>
    <dict>
        <key>LastRunDate</key>
        <string>2024-03-01T12:30:00Z</string>
    </dict>
</dict>
</plist>
"#;

fn decode(bytes: &[u8]) -> Result<Option<Document>, HarnessError> {
    let mut handle = FileHandle::from_bytes("fixture.plist", bytes.to_vec());
    PlistDecoder.decode(&mut handle)
}

#[test]
fn zero_bytes_decode_to_nothing() {
    assert!(decode(b"").expect("empty input is not an error").is_none());
}

#[test]
fn xml_documents_decode() {
    let document = decode(XML_DOCUMENT.as_bytes())
        .expect("valid xml")
        .expect("document present");
    let last_run = document
        .as_dictionary()
        .and_then(|top| top.get("MyApp"))
        .and_then(plist::Value::as_dictionary)
        .and_then(|app| app.get("LastRunDate"))
        .and_then(plist::Value::as_string);
    assert_eq!(last_run, Some("2024-03-01T12:30:00Z"));
}

#[test]
fn binary_documents_decode() {
    let mut top = plist::Dictionary::new();
    top.insert("Count".into(), plist::Value::Integer(3_i64.into()));
    let mut bytes = Vec::new();
    plist::Value::Dictionary(top.clone())
        .to_writer_binary(&mut bytes)
        .expect("encode binary plist");

    let document = decode(&bytes).expect("valid binary").expect("document");
    assert_eq!(document, plist::Value::Dictionary(top));
}

#[rstest]
#[case::truncated_xml(&XML_DOCUMENT.as_bytes()[..60])]
#[case::truncated_binary(b"bplist00\x01\x02")]
fn malformed_bytes_fail_to_decode(#[case] bytes: &[u8]) {
    let error = decode(bytes).expect_err("malformed input");
    match error {
        HarnessError::Decode {
            location, source, ..
        } => {
            assert_eq!(location.as_str(), "fixture.plist");
            assert!(source.is_some());
        }
        other => panic!("expected Decode, got {other:?}"),
    }
}

struct FailingReader;

impl io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }
}

#[test]
fn unreadable_handles_fail_resolution() {
    let mut handle = FileHandle::new("locked.plist", FailingReader);
    let error = PlistDecoder
        .decode(&mut handle)
        .expect_err("reader fails");
    assert!(matches!(error, HarnessError::Resolution { source: Some(_), .. }));
}
