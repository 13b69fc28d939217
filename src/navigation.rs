use crate::error::{CatalogError, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Query parameter carrying the selected car between pages
pub const CAR_PARAM: &str = "car";

/// Bytes escaped by encodeURIComponent
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `<page>?car=<name>` with the name encoded like encodeURIComponent
pub fn car_page_url(page: &str, car_name: &str) -> String {
    format!("{}?{}={}", page, CAR_PARAM, encode_component(car_name))
}

/// The decoded `car` parameter of a `location.search` string, if present
pub fn car_param(search: &str) -> Result<Option<String>> {
    let search = search.strip_prefix('?').unwrap_or(search);
    for pair in search.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode_form(key)? == CAR_PARAM {
            return decode_form(value).map(Some);
        }
    }
    Ok(None)
}

pub fn encode_component(src: &str) -> String {
    utf8_percent_encode(src, URI_COMPONENT).to_string()
}

/// Percent-decode into UTF-8. Stray `%` without two hex digits is kept as is,
/// the way URLSearchParams reads it.
pub fn decode_component(src: &str) -> Result<String> {
    percent_decode_str(src)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| CatalogError::MalformedUri(src.to_string()))
}

/// URLSearchParams decoding: '+' is a space
fn decode_form(src: &str) -> Result<String> {
    decode_component(&src.replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Model A"), "Model%20A");
        assert_eq!(encode_component("C-Class (W206)"), "C-Class%20(W206)");
        assert_eq!(encode_component("A&B=C/D?"), "A%26B%3DC%2FD%3F");
        assert_eq!(encode_component("Škoda"), "%C5%A0koda");
        assert_eq!(encode_component("it's_a.car!~*"), "it's_a.car!~*");
    }

    #[test]
    fn test_car_page_url() {
        assert_eq!(car_page_url("car.html", "Tata Nexon EV"), "car.html?car=Tata%20Nexon%20EV");
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("Model%20A").unwrap(), "Model A");
        assert_eq!(decode_component("%C5%A0koda").unwrap(), "Škoda");
        assert_eq!(decode_component("100%25").unwrap(), "100%");
        assert_eq!(decode_component("bad%zz").unwrap(), "bad%zz");
        assert!(decode_component("%C5").is_err());
    }

    #[test]
    fn test_car_param() {
        assert_eq!(car_param("?car=Model%20A").unwrap().as_deref(), Some("Model A"));
        assert_eq!(car_param("ref=home&car=Model+A").unwrap().as_deref(), Some("Model A"));
        assert_eq!(car_param("?ref=home").unwrap(), None);
        assert_eq!(car_param("").unwrap(), None);
        assert_eq!(car_param("?car=").unwrap().as_deref(), Some(""));
        assert!(car_param("?car=%E0%A4").is_err());
    }

    #[test]
    fn test_url_round_trip_through_param() {
        let name = "Mercedes-Benz C-Class & AMG 100%";
        let url = car_page_url("car.html", name);
        let search = url.split_once('?').map(|(_, q)| q).unwrap();
        assert_eq!(car_param(search).unwrap().as_deref(), Some(name));
    }
}
