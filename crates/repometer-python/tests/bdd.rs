//! BDD-style scenario tests for repometer-python.

use repometer_python::{ParseError, parse};

const SERVICE: &str = r#"""Small service module."""
from __future__ import annotations

import os
import json as js
from collections import defaultdict
from .local import helper


class Store:
    def __init__(self, path):
        self.path = path
        self.data = defaultdict(list)

    def load(self):
        if os.path.exists(self.path):
            with open(self.path) as fh:
                self.data.update(js.load(fh))
        return self.data


def main(argv):
    store = Store(argv[0])
    for key in store.load():
        print(key)
    return helper(store) or 0
"#;

#[test]
fn service_module_structure() {
    // Given a module with a class, methods, a function and mixed imports
    let module = parse(SERVICE).unwrap();

    // When we extract its structure
    let s = module.structure();

    // Then definitions are found breadth-first
    assert_eq!(s.function_names, ["main", "__init__", "load"]);
    assert_eq!(s.num_classes, 1);

    // And each import statement counts its top-level package once
    let imports: Vec<&str> = s.imports.keys().map(String::as_str).collect();
    assert_eq!(imports, ["__future__", "os", "json", "collections", "local"]);
    assert!(s.imports.values().all(|count| *count == 1));

    // And dotted call names are kept
    for call in ["Store", "print", "helper", "os.path.exists", "js.load", "self.data.update", "defaultdict", "open"] {
        assert!(s.function_calls.iter().any(|c| c == call), "missing call {call}");
    }
}

#[cfg(feature = "cyclomatic")]
#[test]
fn service_module_complexity() {
    let module = parse(SERVICE).unwrap();

    // main: 1 + for + or = 3; __init__: 1; load: 1 + if + with = 3
    // Store: real = 1 + 0 + 4 = 5; 5 / 2 + 1 = 3
    assert_eq!(module.cyclomatic(), [3, 3, 1, 3]);
}

#[test]
fn branchy_function_with_trailing_blank_lines() {
    // Given a function with an if/else and five trailing blank lines
    let src = "def foo():\n    if x:\n        return 1\n    else:\n        return 2\n\n\n\n\n\n";

    // When we parse it
    let module = parse(src).unwrap();

    // Then exactly one function named foo is found
    let s = module.structure();
    assert_eq!(s.function_names, ["foo"]);
}

#[test]
fn broken_module_is_rejected() {
    // Given a module with an unterminated call
    let src = "import os\n\ndef f(:\n    os.getcwd(\n";

    // When we parse it
    let result = parse(src);

    // Then a syntax error is reported
    assert!(matches!(result, Err(ParseError::Syntax { .. })));
}
