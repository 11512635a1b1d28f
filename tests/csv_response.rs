use csv_response::{
    build_csv_headers, Cell, CsvFormatter, CsvPayload, CsvResponseUseCase, CsvSerialize, Dataset, Delimiter,
    FormatOptions, FormatOverrides, HeaderSet, Record, ResponseFactory, Result, Row,
};
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Captured {
    body: Vec<u8>,
    status: u16,
    headers: HeaderSet,
}

#[derive(Default)]
struct CaptureFactory {
    calls: AtomicUsize,
}

impl ResponseFactory for CaptureFactory {
    type Response = Captured;

    fn make(&self, body: Vec<u8>, status: u16, headers: HeaderSet) -> Result<Captured> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Captured {
            body,
            status,
            headers,
        })
    }
}

fn payload_text(payload: CsvPayload) -> String {
    let (text, _, _) = payload.encoding().decode(payload.as_bytes());
    text.into_owned()
}

fn body_text(response: &Captured) -> String {
    String::from_utf8(response.body.clone()).unwrap()
}

#[test]
fn keyed_rows_get_a_header_line() {
    csv_response::init_logging();
    let data = Dataset::try_from(json!([
        {"name": "Alice", "age": 30},
        {"name": "Bob", "age": 25}
    ]))
    .unwrap();

    let use_case = CsvResponseUseCase::new(CaptureFactory::default());
    let response = use_case.execute_default(&data).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(
        body_text(&response),
        "\"name\";\"age\"\r\n\"Alice\";\"30\"\r\n\"Bob\";\"25\""
    );
}

#[test]
fn raw_strings_skip_row_handling() {
    let use_case = CsvResponseUseCase::new(CaptureFactory::default());
    let response = use_case
        .execute_default(&Dataset::from("raw,already,formatted"))
        .unwrap();
    assert_eq!(body_text(&response), "raw,already,formatted");
    assert_eq!(response.headers.len(), 4);
}

#[test]
fn empty_dataset_short_circuits_once() {
    let use_case = CsvResponseUseCase::new(CaptureFactory::default());
    let response = use_case
        .execute(
            &Dataset::try_from(json!([])).unwrap(),
            200,
            &HeaderSet::new().with("Content-Type", "text/plain"),
            &FormatOverrides::new().encoding("bogus"),
        )
        .unwrap();

    assert_eq!(response.status, 204);
    assert_eq!(body_text(&response), "No Content");
    assert!(response.headers.is_empty());
    assert_eq!(use_case.factory().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unquoted_comma_options_from_json() {
    let overrides =
        FormatOverrides::from_json(json!({"quoted": false, "delimiter": ","})).unwrap();
    let data = Dataset::try_from(json!([{"a": 1, "b": 2}])).unwrap();

    let use_case = CsvResponseUseCase::new(CaptureFactory::default());
    let response = use_case
        .execute(&data, 200, &HeaderSet::new(), &overrides)
        .unwrap();
    assert_eq!(body_text(&response), "a,b\r\n1,2");
}

#[test]
fn indexed_rows_never_emit_a_header() {
    let data = Dataset::try_from(json!([[1, 2, 3], [4, 5, 6]])).unwrap();
    let options = FormatOptions::resolve(&FormatOverrides::new().include_header(true));
    let payload = CsvFormatter::new().format(&data, &options).unwrap();
    assert_eq!(payload_text(payload), "\"1\";\"2\";\"3\"\r\n\"4\";\"5\";\"6\"");
}

#[test]
fn embedded_quotes_are_doubled() {
    let data = Dataset::from(vec![Record::indexed(["He said \"hi\""])]);
    let payload = CsvFormatter::new()
        .format(&data, &FormatOptions::default())
        .unwrap();
    assert_eq!(payload_text(payload), "\"He said \"\"hi\"\"\"");
}

#[test]
fn line_count_is_rows_plus_header() {
    let rows: Vec<Record> = (0..25)
        .map(|i| Record::keyed([("id", Cell::from(i)), ("label", Cell::from(format!("row {}", i)))]))
        .collect();
    let data = Dataset::from(rows);

    let with_header = payload_text(
        CsvFormatter::new()
            .format(&data, &FormatOptions::default())
            .unwrap(),
    );
    assert_eq!(with_header.split("\r\n").count(), 26);

    let options = FormatOptions::resolve(&FormatOverrides::new().include_header(false));
    let without_header = payload_text(CsvFormatter::new().format(&data, &options).unwrap());
    assert_eq!(without_header.split("\r\n").count(), 25);
}

#[test]
fn custom_headers_win_over_base_headers() {
    let custom = HeaderSet::new()
        .with("Content-Type", "application/vnd.ms-excel")
        .with("Content-Disposition", "attachment; filename=export.csv");
    let headers = build_csv_headers(&custom, &FormatOptions::default());

    assert_eq!(headers.get("Content-Type"), Some("application/vnd.ms-excel"));
    assert_eq!(headers.get("Content-Encoding"), Some("WINDOWS-1252"));
    assert_eq!(headers.get("Content-Transfer-Encoding"), Some("binary"));
    assert_eq!(headers.get("Content-Description"), Some("File Transfer"));
    assert_eq!(
        headers.get("Content-Disposition"),
        Some("attachment; filename=export.csv")
    );
}

#[derive(Serialize)]
struct Shipment {
    reference: String,
    weight_kg: f64,
    fragile: bool,
}

struct Ledger {
    entries: Vec<(String, i64)>,
    reads: Arc<AtomicUsize>,
}

impl CsvSerialize for Ledger {
    fn csv_record(&self) -> Result<Record> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(Record::keyed(self.entries.iter().cloned()))
    }
}

#[test]
fn serde_and_custom_objects_mix_in_one_dataset() {
    let reads = Arc::new(AtomicUsize::new(0));
    let shipment = Shipment {
        reference: "SH-1".to_string(),
        weight_kg: 12.5,
        fragile: true,
    };
    let data = Dataset::Rows(vec![
        Row::from_serialize(&shipment).unwrap(),
        Row::object(Ledger {
            entries: vec![("debit".to_string(), 10), ("credit".to_string(), 0)],
            reads: reads.clone(),
        }),
    ]);

    let options = FormatOptions::resolve(
        &FormatOverrides::new()
            .quoted(false)
            .delimiter(Delimiter::TAB)
            .encoding("UTF-8"),
    );
    let payload = CsvFormatter::new().format(&data, &options).unwrap();

    assert_eq!(
        payload_text(payload),
        "reference\tweight_kg\tfragile\r\nSH-1\t12.5\t1\r\n10\t0"
    );
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_option_keys_are_rejected() {
    assert!(FormatOverrides::from_json(json!({"include_headers": false})).is_err());
}
