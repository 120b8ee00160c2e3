//! End-to-end conversion tests through the library API
//!
//! Dates are rendered in UTC so the expected rows do not depend on the
//! timezone of the machine running the tests.

use chrono::Utc;
use drivenote_converter::{Converter, ConverterError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TWO_VEHICLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fueldb>
  <vehicles>
    <vehicle>
      <name>My Car</name>
      <refuelings>
        <refueling>
          <tstamp>1672531200000</tstamp>
          <mileage>10250.5</mileage>
          <price>78.90</price>
          <consumption>6.42</consumption>
        </refueling>
        <refueling>
          <tstamp>1678013999000</tstamp>
          <mileage>10700</mileage>
          <price>35.1</price>
          <consumption>7.0</consumption>
          <isPartial>1</isPartial>
        </refueling>
      </refuelings>
    </vehicle>
    <vehicle>
      <name>Old Bike</name>
      <refuelings/>
    </vehicle>
  </vehicles>
</fueldb>
"#;

struct Workspace {
    _temp_dir: TempDir,
    in_file: PathBuf,
    out_directory: PathBuf,
}

impl Workspace {
    fn new(xml: impl AsRef<[u8]>) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let in_file = temp_dir.path().join("tank-datenbank.xml");
        fs::write(&in_file, xml).unwrap();
        let out_directory = temp_dir.path().join("drivenote");
        fs::create_dir(&out_directory).unwrap();
        Self {
            _temp_dir: temp_dir,
            in_file,
            out_directory,
        }
    }

    fn converter(&self) -> Converter<Utc> {
        Converter::with_timezone(self.in_file.clone(), self.out_directory.clone(), Utc)
    }

    fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.out_directory)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.out_directory.join(name)).unwrap()
    }
}

fn vehicle(name: &str, refuelings: &str) -> String {
    format!("<vehicle><name>{name}</name><refuelings>{refuelings}</refuelings></vehicle>")
}

fn document(vehicles: &[String]) -> String {
    format!("<fueldb><vehicles>{}</vehicles></fueldb>", vehicles.concat())
}

const VALID_REFUELING: &str = "<refueling><tstamp>1672531200000</tstamp><mileage>1</mileage>\
                               <price>2</price><consumption>3</consumption></refueling>";

#[test]
fn test_two_vehicles_end_to_end() {
    let workspace = Workspace::new(TWO_VEHICLES);

    let stats = workspace.converter().run().unwrap();

    assert_eq!(stats.vehicles_processed, 2);
    assert_eq!(stats.refuelings_converted, 2);
    assert_eq!(
        workspace.output_files(),
        vec![
            "Drivenote_Refuelings_My_Car.csv",
            "Drivenote_Refuelings_Old_Bike.csv"
        ]
    );
    assert_eq!(
        workspace.read("Drivenote_Refuelings_My_Car.csv"),
        "Date,Mileage,Price,Consumption,Partial\n\
         01.01.2023,10250.5,78.90,6.42,0\n\
         05.03.2023,10700,35.1,7.0,1\n"
    );
    assert_eq!(
        workspace.read("Drivenote_Refuelings_Old_Bike.csv"),
        "Date,Mileage,Price,Consumption,Partial\n"
    );
}

#[test]
fn test_rows_keep_source_order() {
    let later = "<refueling><tstamp>1678013999000</tstamp><mileage>2</mileage>\
                 <price>2</price><consumption>2</consumption></refueling>";
    let workspace = Workspace::new(&document(&[vehicle(
        "Car",
        &format!("{later}{VALID_REFUELING}"),
    )]));

    workspace.converter().run().unwrap();

    let content = workspace.read("Drivenote_Refuelings_Car.csv");
    let dates: Vec<&str> = content
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(dates, vec!["05.03.2023", "01.01.2023"]);
}

#[test]
fn test_conversion_is_idempotent() {
    let workspace = Workspace::new(TWO_VEHICLES);

    workspace.converter().run().unwrap();
    let first = workspace.read("Drivenote_Refuelings_My_Car.csv");
    workspace.converter().run().unwrap();
    let second = workspace.read("Drivenote_Refuelings_My_Car.csv");

    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(workspace.output_files().len(), 2);
}

#[test]
fn test_missing_or_duplicated_field_aborts_run() {
    for field in ["tstamp", "mileage", "price", "consumption"] {
        let complete = [
            ("tstamp", "1672531200000"),
            ("mileage", "1"),
            ("price", "2"),
            ("consumption", "3"),
        ];
        let render = |skip: bool, duplicate: bool| -> String {
            let mut body = String::new();
            for (tag, value) in complete {
                if tag == field && skip {
                    continue;
                }
                body.push_str(&format!("<{tag}>{value}</{tag}>"));
                if tag == field && duplicate {
                    body.push_str(&format!("<{tag}>{value}</{tag}>"));
                }
            }
            format!("<refueling>{body}</refueling>")
        };

        for (skip, duplicate, expected_count) in [(true, false, 0), (false, true, 2)] {
            let workspace = Workspace::new(&document(&[
                vehicle("Broken", &format!("{VALID_REFUELING}{}", render(skip, duplicate))),
                vehicle("Fine", VALID_REFUELING),
            ]));

            let error = workspace.converter().run().unwrap_err();
            match error {
                ConverterError::Vehicle { name, source } => {
                    assert_eq!(name, "Broken");
                    match *source {
                        ConverterError::FieldCount {
                            field: ref reported,
                            count,
                            ..
                        } => {
                            assert_eq!(reported, field);
                            assert_eq!(count, expected_count);
                        }
                        ref other => panic!("Expected FieldCount error, got {other:?}"),
                    }
                }
                other => panic!("Expected Vehicle error, got {other:?}"),
            }
            assert!(
                workspace.output_files().is_empty(),
                "no file may be written once '{field}' fails"
            );
        }
    }
}

#[test]
fn test_earlier_vehicles_keep_their_files() {
    let broken = "<refueling><tstamp>0</tstamp><mileage>abc</mileage>\
                  <price>2</price><consumption>3</consumption></refueling>";
    let workspace = Workspace::new(&document(&[
        vehicle("First", VALID_REFUELING),
        vehicle("Second", broken),
        vehicle("Third", VALID_REFUELING),
    ]));

    let error = workspace.converter().run().unwrap_err();

    assert!(matches!(error, ConverterError::Vehicle { ref name, .. } if name == "Second"));
    assert_eq!(
        workspace.output_files(),
        vec!["Drivenote_Refuelings_First.csv"]
    );
}

#[test]
fn test_vehicle_without_name_aborts_run() {
    let workspace = Workspace::new(
        "<fueldb><vehicles><vehicle><refuelings/></vehicle></vehicles></fueldb>",
    );

    match workspace.converter().run().unwrap_err() {
        ConverterError::FieldCount { field, count, .. } => {
            assert_eq!(field, "name");
            assert_eq!(count, 0);
        }
        other => panic!("Expected FieldCount error, got {other:?}"),
    }
    assert!(workspace.output_files().is_empty());
}

#[test]
fn test_malformed_xml_writes_nothing() {
    let workspace = Workspace::new("<fueldb><vehicles><vehicle>");

    let error = workspace.converter().run().unwrap_err();

    assert!(matches!(error, ConverterError::XmlParse { .. }));
    assert!(workspace.output_files().is_empty());
}

#[test]
fn test_unrelated_elements_are_ignored() {
    let workspace = Workspace::new(&format!(
        "<fueldb><settings><unit>km</unit></settings><vehicles>{}</vehicles>\
         <costs><cost><price>1</price></cost></costs></fueldb>",
        vehicle("Car", VALID_REFUELING)
    ));

    let stats = workspace.converter().run().unwrap();

    assert_eq!(stats.vehicles_processed, 1);
    assert_eq!(
        workspace.read("Drivenote_Refuelings_Car.csv"),
        "Date,Mileage,Price,Consumption,Partial\n01.01.2023,1,2,3,0\n"
    );
}

#[test]
fn test_empty_vehicle_list_writes_nothing() {
    let workspace = Workspace::new("<fueldb><vehicles/></fueldb>");

    let stats = workspace.converter().run().unwrap();

    assert_eq!(stats.vehicles_processed, 0);
    assert!(stats.files_written.is_empty());
    assert!(workspace.output_files().is_empty());
    assert!(Path::new(&workspace.in_file).exists());
}

#[test]
fn test_partial_flag_with_delimiter_stays_one_column() {
    let refueling = "<refueling><tstamp>1672531200000</tstamp><mileage>1</mileage>\
                     <price>2</price><consumption>3</consumption>\
                     <isPartial>1,5</isPartial></refueling>";
    let workspace = Workspace::new(&document(&[vehicle("Car", refueling)]));

    workspace.converter().run().unwrap();

    let content = workspace.read("Drivenote_Refuelings_Car.csv");
    assert_eq!(
        content,
        "Date,Mileage,Price,Consumption,Partial\n01.01.2023,1,2,3,\"1,5\"\n"
    );
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    for record in reader.records() {
        assert_eq!(record.unwrap().len(), 5);
    }
}

#[test]
fn test_latin1_export_is_decoded() {
    let mut xml = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n\
                    <fueldb><vehicles><vehicle><name>K"
        .to_vec();
    xml.push(0xE4);
    xml.extend_from_slice(b"fer</name><refuelings/></vehicle></vehicles></fueldb>\n");
    let workspace = Workspace::new(&xml);

    let stats = workspace.converter().run().unwrap();

    assert_eq!(stats.vehicles_processed, 1);
    assert_eq!(
        workspace.output_files(),
        vec!["Drivenote_Refuelings_K\u{e4}fer.csv"]
    );
}

#[test]
fn test_undeclared_non_utf8_export_is_a_parse_error() {
    let workspace = Workspace::new(b"<fueldb><vehicles><vehicle><name>K\xe4fer</name>\
                                     <refuelings/></vehicle></vehicles></fueldb>");

    let error = workspace.converter().run().unwrap_err();

    assert!(matches!(error, ConverterError::XmlParse { .. }));
    assert!(workspace.output_files().is_empty());
}

#[test]
fn test_vehicle_name_with_separators_stays_in_out_directory() {
    let workspace = Workspace::new(&document(&[vehicle("../escaped", VALID_REFUELING)]));

    workspace.converter().run().unwrap();

    assert_eq!(
        workspace.output_files(),
        vec!["Drivenote_Refuelings_.._escaped.csv"]
    );
}
