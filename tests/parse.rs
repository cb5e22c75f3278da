use assert_cmd::prelude::*; // Add methods on commands
use assert_fs::prelude::*; // Add methods on paths
use predicates::prelude::*; // Used for writing assertions
use std::process::Command; // Run programs
mod common;

#[test]
fn file_doesnt_exist() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("keggkit")?;

    cmd.arg("parse").arg("test/file/doesnt/exist");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));
    Ok(())
}

#[test]
fn flat_file_to_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("keggkit")?;

    let output = assert_fs::NamedTempFile::new("out.tsv")?;
    let log = assert_fs::NamedTempFile::new("log.txt")?;

    cmd.arg("parse")
        .arg(common::example("flat").join("in.txt"))
        .arg("-o")
        .arg(output.path())
        .arg("--log")
        .arg(log.path());

    cmd.assert().success().stdout(predicate::str::is_empty());

    let known_good = std::fs::read_to_string(common::example("flat").join("out.tsv"))?;
    output.assert(predicate::str::diff(known_good));
    log.assert(predicate::str::contains(
        "R00004: malformed ORTHOLOGY line skipped: \"see also K15986\"",
    ));
    Ok(())
}

#[test]
fn single_record_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("keggkit")?;

    let record = std::fs::read_to_string(common::example("records").join("R01786.txt"))?;
    cmd.arg("parse").write_stdin(record);
    cmd.assert()
        .success()
        .stdout("entry\tname\tenzyme\torthology\nR01786\t\t\tK00844;K00845\n");
    Ok(())
}

#[test]
fn record_without_entry_line() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("keggkit")?;

    let file = assert_fs::NamedTempFile::new("in.txt")?;
    file.write_str("NAME        Aldehyde dehydrogenase;\nENZYME      1.2.1.3 1.2.1.5\n")?;

    cmd.arg("flat").arg(file.path());
    cmd.assert().success().stdout(predicate::str::ends_with(
        "record1\tAldehyde dehydrogenase\t1.2.1.3;1.2.1.5\t\n",
    ));
    Ok(())
}
