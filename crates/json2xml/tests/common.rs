#![allow(missing_docs)]
#![allow(dead_code)]

/// A tool-call style response touching every value kind, nested containers
/// on both sides, and text that needs escaping once it becomes XML.
pub const ORIGINAL: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null,
        "score": 0.25
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": 2,
            "debug": false,
            "features": [
                "serde",
                "tokio"
            ]
        }
    },
    "snippets": [
        "fn main() {}",
        "if a < b && c > d {}",
        "println!(\"hi\")"
    ],
    "entities": [
        {
            "type": "function",
            "name": "main",
            "line": 1
        },
        {
            "type": "macro",
            "name": "println",
            "line": -12
        }
    ],
    "matrix": [
        [
            1.5e3,
            -0.0
        ],
        []
    ],
    "mixed": [
        "s",
        {
            "k": "v"
        },
        true,
        [
            null
        ],
        "end"
    ],
    "empty": {}
}"#;

/// Smallest documents for each kind, one per line.
pub const SCALARS: [&str; 8] = [
    "{}",
    "[]",
    "123",
    "123.456",
    "true",
    "false",
    r#""A""#,
    "null",
];
