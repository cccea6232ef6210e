mod common;

use common::{NULL, num, rec, s};
use delimport::convert::convert_value;
use delimport::{FieldSpec, FieldType, Record, Value, adjust_record_types, infer_column_type};

fn specs(raw: &[&str]) -> Vec<FieldSpec> {
    raw.iter().map(|r| FieldSpec::parse(r)).collect()
}

#[test]
fn convert_numbers_by_default() {
    let mut records = vec![rec(&[
        ("foo", s("0")),
        ("bar", s("4,000,300")),
        ("baz", s("0xcc")),
        ("goo", s("300 E")),
    ])];
    adjust_record_types(&mut records, &specs(&["foo", "bar", "baz", "goo"]));
    assert_eq!(
        records,
        vec![rec(&[
            ("foo", num(0.0)),
            ("bar", num(4_000_300.0)),
            ("baz", num(204.0)),
            ("goo", s("300 E")),
        ])]
    );
}

#[test]
fn protect_string_format_numbers_with_type_hints() {
    let mut records = vec![rec(&[("foo", s("001")), ("bar", s("001"))])];
    adjust_record_types(&mut records, &specs(&["foo:string", "bar"]));
    assert_eq!(records, vec![rec(&[("foo", s("001")), ("bar", num(1.0))])]);
}

#[test]
fn handle_numeric_data_from_non_text_sources() {
    let mut records = vec![rec(&[("a", num(0.0)), ("b", num(23.2)), ("c", num(-12.0))])];
    adjust_record_types(&mut records, &specs(&["a", "b:number", "c"]));
    assert_eq!(
        records,
        vec![rec(&[("a", num(0.0)), ("b", num(23.2)), ("c", num(-12.0))])]
    );
}

#[test]
fn string_hint_passes_numbers_through() {
    let mut records = vec![rec(&[("a", num(7.0))]), rec(&[("a", s("x"))])];
    adjust_record_types(&mut records, &specs(&["a:str"]));
    assert_eq!(records, vec![rec(&[("a", num(7.0))]), rec(&[("a", s("x"))])]);
}

#[test]
fn first_non_empty_value_decides() {
    let column = [s(""), NULL, s(" 12 "), s("abc")];
    assert_eq!(infer_column_type(&column), FieldType::Number);

    let column = [s(""), s("abc"), s("12")];
    assert_eq!(infer_column_type(&column), FieldType::String);

    let column = [NULL, num(3.0)];
    assert_eq!(infer_column_type(&column), FieldType::Number);
}

#[test]
fn whitespace_only_value_is_not_empty() {
    let column = [s(" "), s("3")];
    assert_eq!(infer_column_type(&column), FieldType::String);
}

#[test]
fn empty_column_is_a_string_column() {
    assert_eq!(infer_column_type(&[s(""), s("")]), FieldType::String);
    assert_eq!(infer_column_type(&[] as &[Value]), FieldType::String);

    let mut records = vec![rec(&[("a", s(""))]), rec(&[("a", s(""))])];
    let fields = adjust_record_types(&mut records, &specs(&["a"]));
    assert_eq!(records, vec![rec(&[("a", s(""))]), rec(&[("a", s(""))])]);
    assert_eq!(fields, vec![FieldSpec::new("a", Some(FieldType::String))]);
}

#[test]
fn later_non_numeric_value_becomes_null() {
    let mut records = vec![
        rec(&[("a", s(""))]),
        rec(&[("a", s("2"))]),
        rec(&[("a", s("4a"))]),
    ];
    adjust_record_types(&mut records, &specs(&["a"]));
    assert_eq!(
        records,
        vec![
            rec(&[("a", NULL)]),
            rec(&[("a", num(2.0))]),
            rec(&[("a", NULL)]),
        ]
    );
}

#[test]
fn declared_number_yields_null_for_unparsable_cells() {
    let mut records = vec![rec(&[("a", s("four")), ("b", s(""))])];
    adjust_record_types(&mut records, &specs(&["a:num", "b:number"]));
    assert_eq!(records, vec![rec(&[("a", NULL), ("b", NULL)])]);
}

#[test]
fn repeated_names_share_the_first_declared_type() {
    let mut records = vec![rec(&[("fips", s("001"))])];
    let fields = adjust_record_types(&mut records, &specs(&["fips", "fips:str", "fips:num"]));
    assert_eq!(records, vec![rec(&[("fips", s("001"))])]);
    assert_eq!(fields, vec![FieldSpec::new("fips", Some(FieldType::String))]);
}

#[test]
fn resolved_specs_report_inferred_types() {
    let mut records = vec![rec(&[("id", s("1")), ("name", s("x"))])];
    let fields = adjust_record_types(&mut records, &specs(&["id", "name"]));
    assert_eq!(
        fields,
        vec![
            FieldSpec::new("id", Some(FieldType::Number)),
            FieldSpec::new("name", Some(FieldType::String)),
        ]
    );
}

#[test]
fn missing_fields_are_skipped() {
    let mut records = vec![rec(&[("a", s("1"))]), Record::new()];
    adjust_record_types(&mut records, &specs(&["a", "b"]));
    assert_eq!(records, vec![rec(&[("a", num(1.0))]), Record::new()]);
}

#[test]
fn conversion_is_idempotent() {
    let original = vec![
        rec(&[("a", s("3")), ("b", s("foo")), ("c", s("001")), ("d", s(""))]),
        rec(&[("a", s("x")), ("b", s("7")), ("c", s("2")), ("d", s("5"))]),
    ];
    let fields = specs(&["a", "b", "c:str", "+d"]);

    let mut once = original.clone();
    adjust_record_types(&mut once, &fields);
    let mut twice = once.clone();
    adjust_record_types(&mut twice, &fields);
    assert_eq!(once, twice);
    assert_eq!(once[0].get("a"), Some(&num(3.0)));
    assert_eq!(once[1].get("b"), Some(&s("7")));
    assert_eq!(once[0].get("c"), Some(&s("001")));
    assert_eq!(once[1].get("d"), Some(&num(5.0)));
}

#[test]
fn convert_single_value() {
    let mut v = s(" 1,000 ");
    convert_value(&mut v, FieldType::String);
    assert_eq!(v, s(" 1,000 "));
    convert_value(&mut v, FieldType::Number);
    assert_eq!(v, num(1000.0));
}
