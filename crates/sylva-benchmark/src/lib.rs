//! Shared inputs for the benchmarks.

use std::fmt::Write as _;

/// A document with `records` entries mixing every value kind.
pub fn records(records: usize) -> String {
    let mut text = String::from("// generated\n[\n");
    for index in 0..records {
        let separator = if index + 1 == records { "" } else { "," };
        _ = writeln!(
            text,
            r#"  {{ "id": {index}, "name": "item é {index}", "active": {}, "tags": ["a", "b"], "big": 98765432109876543210{index} }}{separator}"#,
            index % 2 == 0,
        );
    }
    text.push_str("]\n");
    text
}

/// Like [`records`], but with a recoverable error in every entry.
pub fn broken_records(records: usize) -> String {
    let mut text = String::from("[\n");
    for index in 0..records {
        _ = writeln!(text, r#"  {{ "id": {index} "name": , 3: null, "id": [1,, 2 }},"#);
    }
    text.push_str("]\n");
    text
}

/// `depth` nested lists around a single value.
pub fn nested(depth: usize) -> String {
    format!("{}1{}", "[".repeat(depth), "]".repeat(depth))
}
