pub mod lenient;
pub mod time_format;
pub mod url_validator;

pub use time_format::{format_date, time_ago};
pub use url_validator::{is_valid_url, validate_url};

/// Length of a generated short code
pub const GENERATED_CODE_LENGTH: usize = 6;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 小写字母 + 数字（base36）
    let chars = b"abcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// Short code suggested by the "generate" action of the link form
pub fn generate_short_code() -> String {
    generate_random_code(GENERATED_CODE_LENGTH)
}
