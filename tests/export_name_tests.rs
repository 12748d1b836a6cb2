use chrono::NaiveDate;
use conversion_chart::api::export_file_name;

#[test]
fn export_file_name_embeds_iso_date() {
    let date = NaiveDate::from_ymd_opt(2024, 7, 3).expect("date");
    assert_eq!(export_file_name(date), "conversion-rates-2024-07-03.png");
}
