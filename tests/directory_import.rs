use daycare_subsidy::config::DaycareSettings;
use daycare_subsidy::directory::{read_entries, DirectoryDaycareAdapter, DirectoryError};
use daycare_subsidy::services::Weekday;
use daycare_subsidy::SubsidyCalculator;
use rust_decimal_macros::dec;

const SETTINGS: &str = r#"
max_income: 75000
max_wealth: 154000
min_income: 20000
min_rate: 15
max_rate: 107
wealth_premium: 10.00
wealth_factor: "0.0016727273"
rebate: 5.00
directory: "Kitas"
services: |
  - titel: "Ganzer Tag inkl. Mittagessen"
    tage: "Montag, Dienstag, Mittwoch, Donnerstag, Freitag"
    prozent: 100.00
"#;

const EXPORT: &str = "\
Name,Webseite,Tagestarif,Öffnungswochen
Pinochio,,98,49
Fantasia,https://fantasia.example,108,51
Kinderhaus,,110,50
Child Care Corner,,125,51
";

#[test]
fn export_rows_resolve_to_daycares() {
    let entries = read_entries(EXPORT.as_bytes()).expect("export reads");
    let adapter = DirectoryDaycareAdapter::infer(&entries).expect("labels map");

    let daycares = adapter.daycares(&entries).expect("all rows resolve");
    assert_eq!(daycares.len(), 4);

    let corner = &daycares[3];
    assert_eq!(corner.id, "child-care-corner");
    assert_eq!(corner.rate, dec!(125));
    assert_eq!(corner.weeks, 51);
}

#[test]
fn an_imported_centre_feeds_the_full_calculation() {
    let settings = DaycareSettings::from_yaml(SETTINGS).expect("settings load");

    let entries = read_entries(EXPORT.as_bytes()).expect("export reads");
    let adapter = DirectoryDaycareAdapter::infer(&entries).expect("labels map");
    let fantasia = adapter
        .daycare_by_title(&entries, "Fantasia")
        .expect("Fantasia listed");

    let mut services = settings.services().expect("services parse");
    for day in [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ] {
        services
            .select("ganzer-tag-inkl-mittagessen", day)
            .expect("service selectable");
    }

    let calculation = SubsidyCalculator::new(settings.policy())
        .calculate(&fantasia, &services, dec!(75000), dec!(150000), true)
        .expect("calculation succeeds");

    assert_eq!(calculation.gross.total(), dec!(107));
    assert_eq!(calculation.monthly.results()[2].amount, dec!(2181.30));
}

#[test]
fn a_garbled_row_surfaces_when_it_is_adapted() {
    let export = "\
Name,Tagestarif,Öffnungswochen
Fantasia,teuer,51
";
    let entries = read_entries(export.as_bytes()).expect("export reads");
    let adapter = DirectoryDaycareAdapter::infer(&entries).expect("labels map");

    let err = adapter.daycare_by_title(&entries, "Fantasia").unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidNumber { ref value, .. } if value == "teuer"));
}
