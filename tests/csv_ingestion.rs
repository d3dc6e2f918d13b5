use data_sweeper::ingestion::csv::{decode_csv_bytes, decode_csv_from_reader};
use data_sweeper::session::{FileSession, UploadedFile};
use data_sweeper::types::{DataType, Value};
use data_sweeper::SweepError;

#[test]
fn decode_fixture_infers_column_types() {
    let upload = UploadedFile::from_path("tests/fixtures/people.csv").unwrap();
    let session = FileSession::open(upload).unwrap();

    let types: Vec<DataType> = session
        .table
        .schema
        .fields
        .iter()
        .map(|f| f.data_type)
        .collect();
    assert_eq!(
        types,
        vec![
            DataType::Int64,
            DataType::Utf8,
            DataType::Float64,
            DataType::Bool,
        ]
    );

    assert_eq!(session.table.row_count(), 2);
    assert_eq!(
        session.table.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Float64(98.5),
            Value::Bool(true),
        ]
    );
}

#[test]
fn empty_cells_decode_as_null() {
    let table = decode_csv_bytes(b"id,score\n1,\n2,5.5\n").unwrap();

    assert_eq!(table.schema.fields[1].data_type, DataType::Float64);
    assert_eq!(table.rows[0][1], Value::Null);
    assert_eq!(table.rows[1][1], Value::Float64(5.5));
}

#[test]
fn mixed_content_column_decodes_as_text() {
    let table = decode_csv_bytes(b"v\n1\nAda\n").unwrap();

    assert_eq!(table.schema.fields[0].data_type, DataType::Utf8);
    assert_eq!(table.rows[0][0], Value::Utf8("1".to_string()));
}

#[test]
fn reader_entrypoint_matches_bytes_entrypoint() {
    let input = "id,name\n1,Ada\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let from_reader = decode_csv_from_reader(&mut rdr).unwrap();
    let from_bytes = decode_csv_bytes(input.as_bytes()).unwrap();
    assert_eq!(from_reader, from_bytes);
}

#[test]
fn inconsistent_row_widths_are_malformed() {
    let err = decode_csv_bytes(b"id,name\n1,Ada\n2\n").unwrap_err();
    assert!(matches!(err, SweepError::Csv(_)));
    assert!(err.to_string().contains("malformed csv input"));
}

#[test]
fn duplicate_header_names_are_malformed() {
    let err = decode_csv_bytes(b"id,id\n1,2\n").unwrap_err();
    assert!(matches!(err, SweepError::MalformedInput { .. }));
    assert!(err.to_string().contains("duplicate column name 'id'"));
}

#[test]
fn input_without_a_header_row_is_malformed() {
    let err = decode_csv_bytes(b"").unwrap_err();
    assert!(matches!(err, SweepError::MalformedInput { .. }));
}

#[test]
fn header_only_input_is_a_valid_zero_row_table() {
    let table = decode_csv_bytes(b"a,b\n").unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(
        table.schema.field_names().collect::<Vec<_>>(),
        vec!["a", "b"]
    );
}
