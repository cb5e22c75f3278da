#![allow(dead_code)]
use httpmock::prelude::*;
use std::path::{Path, PathBuf};

pub fn example(name: &str) -> PathBuf {
    Path::new("tests/examples").join(name)
}

/// Serve the flat-text records in tests/examples/records from a mock KEGG server.
/// Requests for any other id are answered with a 404 by the mock server.
pub fn kegg_server() -> MockServer {
    let server = MockServer::start();
    for id in ["R00004", "R00710", "R01786", "R99999"] {
        let body =
            std::fs::read_to_string(example("records").join(format!("{}.txt", id))).unwrap();
        server.mock(|when, then| {
            when.method(GET).path(format!("/get/{}", id));
            then.status(200).body(body);
        });
    }
    server
}
