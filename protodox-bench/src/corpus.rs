//! Synthetic schema text.

use std::fmt::Write;

/// Builds a schema with `messages` messages and as many enums.
///
/// Every message has a leading comment, fields with and without trailing
/// comments, and a nested enum, so every rewrite rule fires.
#[must_use]
pub fn synthetic_schema(messages: usize) -> String {
    let mut out = String::with_capacity(messages * 320);
    out.push_str("syntax = \"proto3\";\n\npackage bench;\n\n");

    for i in 0..messages {
        let _ = writeln!(out, "// Message number {i}.");
        let _ = writeln!(out, "message Message{i} {{");
        let _ = writeln!(out, "  int64 id = 1; // primary key");
        let _ = writeln!(out, "  string name = 2;");
        let _ = writeln!(out, "  repeated double values = 3; // samples");
        let _ = writeln!(out, "  State{i} state = 4;");
        let _ = writeln!(out, "}}");
        let _ = writeln!(out);
        let _ = writeln!(out, "enum State{i} {{");
        let _ = writeln!(out, "  STATE{i}_UNKNOWN = 0;");
        let _ = writeln!(out, "  STATE{i}_ACTIVE = 1; // in use");
        let _ = writeln!(out, "  STATE{i}_RETIRED = 2;");
        let _ = writeln!(out, "}}");
        let _ = writeln!(out);
    }

    out
}

/// Representative single lines, one per rewrite rule.
pub const SAMPLE_LINES: &[&str] = &[
    "  optional int32 plain = 1",
    "// leading comment",
    "message Sample {",
    "  int64 id = 1; // primary key",
    "  ACTIVE = 1;",
    "}",
];
