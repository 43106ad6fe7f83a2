use predicates::prelude::*;

#[test]
fn split_prefers_spaces_over_line_breaks() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalogue-import");
    cmd.args(["split", "--ids", "id1 id2\nid3"])
        .assert()
        .success()
        .stdout("\"id1\"\n\"id2\\nid3\"\n");
}

#[test]
fn split_reads_windows_line_breaks_from_file() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let ids_path = temp.path().join("ids.txt");
    std::fs::write(&ids_path, "991\r\n992\r\n993")?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalogue-import");
    cmd.args(["split", "--ids-file", ids_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("\"991\"\n\"992\"\n\"993\"\n");
    Ok(())
}

#[test]
fn split_requires_an_input() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalogue-import");
    cmd.args(["split"]).assert().failure();
}

#[test]
fn debug_log_goes_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalogue-import");
    cmd.env("RUST_LOG", "debug")
        .args(["split", "--ids", "x"])
        .assert()
        .success()
        .stdout("\"x\"\n")
        .stderr(predicate::str::contains("parsed cli"));
}

#[test]
fn title_is_derived_from_a_json_record() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let doc_path = temp.path().join("record.json");
    std::fs::write(
        &doc_path,
        serde_json::json!({
            "logical": {
                "type": "Periodical",
                "metadata": [
                    {"name": "CatalogIDDigital", "value": "X"},
                    {"name": "SourceCatalog", "value": "GBV"}
                ],
                "children": [
                    {
                        "type": "PeriodicalVolume",
                        "metadata": [{"name": "CurrentNoSorting", "value": "5"}]
                    }
                ]
            }
        })
        .to_string(),
    )?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalogue-import");
    cmd.args([
        "title",
        "--document",
        doc_path.to_str().unwrap(),
        "--short-code",
        "abc",
    ])
    .assert()
    .success()
    .stdout("abc_X_GBV_5\n");
    Ok(())
}

#[test]
fn title_of_childless_anchor_falls_back_to_identifier() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let doc_path = temp.path().join("record.json");
    std::fs::write(&doc_path, r#"{"logical":{"type":"MultivolumeWork"}}"#)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalogue-import");
    cmd.args(["title", "--document", doc_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no child volume"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalogue-import");
    cmd.args([
        "title",
        "--document",
        doc_path.to_str().unwrap(),
        "--identifier",
        "991170",
    ])
    .assert()
    .success()
    .stdout("991170\n");
    Ok(())
}
