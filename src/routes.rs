// Route path constants - single source of truth for all API paths

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub const HEALTH: &str = "/health";

pub const STRINGS: &str = "/Strings";
pub const STRINGS_ITEM: &str = "/Strings/{key}";
pub const STRINGS_FLUSH: &str = "/Strings/Flush";
pub const STRINGS_OBJECT: &str = "/Strings/Object";
pub const STRINGS_OBJECT_ITEM: &str = "/Strings/Object/{key}";

pub const SET: &str = "/Set";
pub const SET_ITEM: &str = "/Set/{key}";
pub const SET_FLUSH: &str = "/Set/Flush";

pub const GEO_SEED: &str = "/Geo/Seed";
pub const GEO_ITEM: &str = "/Geo/{key}";
pub const GEO_FLUSH: &str = "/Geo/Flush";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Bytes that cannot appear verbatim inside a single path segment
pub const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Encode an opaque key as one path segment
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, PATH_SEGMENT).to_string()
}

/// Location of a cached string value
pub fn strings_item(key: &str) -> String {
    STRINGS_ITEM.replace("{key}", &encode_key(key))
}

/// Location of a cached object value
pub fn strings_object_item(key: &str) -> String {
    STRINGS_OBJECT_ITEM.replace("{key}", &encode_key(key))
}
