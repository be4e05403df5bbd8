use canpl_terminal::csv::{
    is_year_header, parse_rows, split_multi, to_bool_maybe, to_number_maybe, Sheet,
};

#[test]
fn splits_simple_rows() {
    let rows = parse_rows("a,b,c\n1,2,3\n");
    assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
}

#[test]
fn quoted_fields_keep_commas_and_newlines() {
    let rows = parse_rows("name,notes\n\"Reyes, Callum\",\"line one\nline two\"\n");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "Reyes, Callum");
    assert_eq!(rows[1][1], "line one\nline two");
}

#[test]
fn doubled_quote_is_a_literal_quote() {
    let rows = parse_rows("name\n\"Jo \"\"Hammer\"\" Frey\"\n");
    assert_eq!(rows[1][0], "Jo \"Hammer\" Frey");
}

#[test]
fn handles_crlf_and_bare_cr_endings() {
    let crlf = parse_rows("a,b\r\n1,2\r\n");
    let cr = parse_rows("a,b\r1,2\r");
    let lf = parse_rows("a,b\n1,2\n");
    assert_eq!(crlf, lf);
    assert_eq!(cr, lf);
}

#[test]
fn blank_rows_are_dropped() {
    let rows = parse_rows("a,b\n,\n   ,  \n1,2\n\n");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["1", "2"]);
}

#[test]
fn last_row_without_trailing_newline_survives() {
    let rows = parse_rows("a,b\n1,2");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["1", "2"]);
}

#[test]
fn multibyte_text_passes_through() {
    let rows = parse_rows("club\nAtlético Ottawa\n");
    assert_eq!(rows[1][0], "Atlético Ottawa");
}

#[test]
fn sheet_columns_are_case_insensitive() {
    let sheet = Sheet::parse("ClubSlug,Name\nforge, Bobby \n");
    assert_eq!(sheet.col("clubslug"), Some(0));
    assert_eq!(sheet.col("NAME"), Some(1));
    assert_eq!(sheet.col("missing"), None);
    let row = &sheet.rows[0];
    assert_eq!(sheet.cell(row, sheet.col("name")), "Bobby");
    assert_eq!(sheet.cell(row, sheet.col("missing")), "");
}

#[test]
fn empty_input_gives_empty_sheet() {
    let sheet = Sheet::parse("");
    assert!(sheet.headers.is_empty());
    assert!(sheet.rows.is_empty());
}

#[test]
fn number_cells_tolerate_thousands_separators() {
    assert_eq!(to_number_maybe("23,218"), Some(23218));
    assert_eq!(to_number_maybe(" 4000 "), Some(4000));
    assert_eq!(to_number_maybe(""), None);
    assert_eq!(to_number_maybe("n/a"), None);
}

#[test]
fn checkbox_cells_parse_loosely() {
    assert_eq!(to_bool_maybe("TRUE"), Some(true));
    assert_eq!(to_bool_maybe("no"), Some(false));
    assert_eq!(to_bool_maybe("1"), Some(true));
    assert_eq!(to_bool_maybe(""), None);
    assert_eq!(to_bool_maybe("maybe"), None);
}

#[test]
fn multi_value_cells_split_on_semicolons() {
    assert_eq!(split_multi("RS; CA"), vec!["RS", "CA"]);
    assert_eq!(split_multi(" ; ;"), Vec::<String>::new());
}

#[test]
fn year_headers_are_four_digits() {
    assert!(is_year_header("2026"));
    assert!(!is_year_header("202"));
    assert!(!is_year_header("notes"));
    assert!(!is_year_header("20a6"));
}
