#![no_main]

use gitsieve::{Identity, TrailerFilter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // First line is "name|email", the rest is the commit message
    let (header, message) = text.split_once('\n').unwrap_or((text, ""));
    let (name, email) = header.split_once('|').unwrap_or((header, ""));

    if let Ok(filter) = TrailerFilter::signed_off_by(&Identity::new(name, email)) {
        let expected = format!("Signed-off-by: {name} <{email}>");
        assert_eq!(filter.matches(message), message.lines().any(|l| l.contains(&expected)));
    }
});
