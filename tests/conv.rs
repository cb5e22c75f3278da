use assert_cmd::prelude::*; // Add methods on commands
use httpmock::prelude::*;
use predicates::prelude::*; // Used for writing assertions
use std::process::Command; // Run programs

#[test]
fn conv_pairs() -> anyhow::Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/conv/eco/ncbi-geneid");
        then.status(200)
            .body("ncbi-geneid:944742\teco:b0001\nncbi-geneid:945803\teco:b0002\n");
    });

    let mut cmd = Command::cargo_bin("keggkit")?;
    cmd.arg("conv")
        .arg("eco")
        .arg("ncbi-geneid")
        .arg("--base-url")
        .arg(server.base_url())
        .arg("--delay-ms")
        .arg("0");

    cmd.assert().success().stdout(concat!(
        "source_id\ttarget_id\n",
        "ncbi-geneid:944742\teco:b0001\n",
        "ncbi-geneid:945803\teco:b0002\n",
    ));
    mock.assert();
    Ok(())
}

#[test]
fn conv_failure() -> anyhow::Result<()> {
    let server = MockServer::start();

    let mut cmd = Command::cargo_bin("keggkit")?;
    cmd.arg("conv")
        .arg("eco")
        .arg("nonsense")
        .arg("--base-url")
        .arg(server.base_url())
        .arg("--delay-ms")
        .arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("status code 404"));
    Ok(())
}
