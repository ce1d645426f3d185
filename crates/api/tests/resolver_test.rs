use pretty_assertions::assert_eq;

use fieldsync_api::external::{
    parse_address, state_code_for_name, state_name_for_code, ParsedAddress,
};

#[test]
fn test_parse_full_address_with_state_code_and_zip() {
    let parsed = parse_address("123 Main St, Springfield, IL 62704");

    assert_eq!(parsed.street.as_deref(), Some("123 Main St"));
    assert_eq!(parsed.city.as_deref(), Some("Springfield"));
    assert_eq!(parsed.state.as_deref(), Some("Illinois"));
    assert_eq!(parsed.state_code.as_deref(), Some("IL"));
    assert_eq!(parsed.zip_code.as_deref(), Some("62704"));
}

#[test]
fn test_parse_address_with_full_state_name() {
    let parsed = parse_address("456 Elm Ave, Austin, Texas 73301");

    assert_eq!(parsed.city.as_deref(), Some("Austin"));
    assert_eq!(parsed.state.as_deref(), Some("Texas"));
    assert_eq!(parsed.state_code.as_deref(), Some("TX"));
    assert_eq!(parsed.zip_code.as_deref(), Some("73301"));
}

#[test]
fn test_parse_street_only() {
    let parsed = parse_address("789 Pine Rd");

    assert_eq!(
        parsed,
        ParsedAddress {
            street: Some("789 Pine Rd".to_string()),
            ..ParsedAddress::default()
        }
    );
}

#[test]
fn test_parse_two_segments_as_street_and_city() {
    // The tail carries no state or zip, so it is treated as the city
    let parsed = parse_address("789 Pine Rd, Portland");

    assert_eq!(parsed.street.as_deref(), Some("789 Pine Rd"));
    assert_eq!(parsed.city.as_deref(), Some("Portland"));
    assert_eq!(parsed.state, None);
    assert_eq!(parsed.zip_code, None);
}

#[test]
fn test_parse_two_segments_with_state_and_zip_tail() {
    let parsed = parse_address("789 Pine Rd, OR 97201");

    assert_eq!(parsed.street.as_deref(), Some("789 Pine Rd"));
    assert_eq!(parsed.city, None);
    assert_eq!(parsed.state_code.as_deref(), Some("OR"));
    assert_eq!(parsed.state.as_deref(), Some("Oregon"));
    assert_eq!(parsed.zip_code.as_deref(), Some("97201"));
}

#[test]
fn test_parse_lowercase_state_code() {
    let parsed = parse_address("10 First St, Denver, co 80202");

    assert_eq!(parsed.state_code.as_deref(), Some("CO"));
    assert_eq!(parsed.state.as_deref(), Some("Colorado"));
}

#[test]
fn test_parse_zip_plus_four() {
    let parsed = parse_address("10 First St, Denver, CO 80202-1234");

    assert_eq!(parsed.zip_code.as_deref(), Some("80202-1234"));
}

#[test]
fn test_parse_collapses_extra_whitespace() {
    let parsed = parse_address("  123   Main St ,  Springfield ,  IL   62704 ");

    assert_eq!(parsed.street.as_deref(), Some("123 Main St"));
    assert_eq!(parsed.city.as_deref(), Some("Springfield"));
    assert_eq!(parsed.zip_code.as_deref(), Some("62704"));
}

#[test]
fn test_parse_empty_input() {
    assert_eq!(parse_address(""), ParsedAddress::default());
    assert_eq!(parse_address("  , , "), ParsedAddress::default());
}

#[test]
fn test_non_state_two_letter_token_ignored() {
    // "St" is not a state code; it must not be misread as one
    let parsed = parse_address("123 Main, Springfield, St 62704");

    assert_eq!(parsed.state, None);
    assert_eq!(parsed.state_code, None);
    assert_eq!(parsed.zip_code.as_deref(), Some("62704"));
}

#[test]
fn test_state_lookup_by_code() {
    assert_eq!(state_name_for_code("CA"), Some("California"));
    assert_eq!(state_name_for_code("dc"), Some("District of Columbia"));
    assert_eq!(state_name_for_code("ZZ"), None);
}

#[test]
fn test_state_lookup_by_name() {
    assert_eq!(state_code_for_name("New York"), Some("NY"));
    assert_eq!(state_code_for_name("  new hampshire "), Some("NH"));
    assert_eq!(state_code_for_name("Atlantis"), None);
}
