//! End-to-end runs of the `du2html` binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn du2html(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_du2html"))
        .args(args)
        .output()
        .expect("failed to run du2html")
}

fn tree_data(page: &str) -> serde_json::Value {
    let open = r#"<script id="tree-data" type="application/json">"#;
    let start = page.find(open).expect("tree data block") + open.len();
    let end = start + page[start..].find("</script>").expect("closing tag");
    serde_json::from_str(page[start..end].trim()).expect("valid json")
}

#[test]
fn test_writes_page() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("du.txt");
    let output = dir.path().join("du.html");
    std::fs::write(
        &input,
        "nohup: ignoring input\n100\t/usr/bin/bash\n50\t/usr/bin/sh\n200\t/usr/lib\nno tab here\n4\t/etc\n",
    )
    .unwrap();

    let result = du2html(&[&input, &output]);
    assert!(result.status.success(), "{result:?}");

    let page = std::fs::read_to_string(&output).unwrap();
    assert!(page.contains(r#"<span class="folder fw-bold">usr/</span>"#));
    assert!(page.contains(r#"<span class="file">etc</span>"#));
    assert!(page.find(">etc<").unwrap() < page.find(">usr/<").unwrap());

    let data = tree_data(&page);
    assert_eq!(data["usr"]["size"], serde_json::Value::Null);
    assert_eq!(data["usr"]["children"]["bin"]["children"]["bash"]["size"], "100");
    assert_eq!(data["usr"]["children"]["bin"]["children"]["sh"]["size"], "50");
    assert_eq!(data["usr"]["children"]["lib"]["size"], "200");
    assert_eq!(data["etc"]["size"], "4");
    assert_eq!(data.as_object().unwrap().len(), 2);
}

#[test]
fn test_wrong_argument_count() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("du.txt");
    let output = dir.path().join("du.html");
    let extra = dir.path().join("extra.html");
    std::fs::write(&input, "1\ta\n").unwrap();

    for args in [
        vec![],
        vec![input.as_path()],
        vec![input.as_path(), output.as_path(), extra.as_path()],
    ] {
        let result = du2html(&args);
        assert_eq!(result.status.code(), Some(1));
        let stdout = String::from_utf8_lossy(&result.stdout);
        assert!(stdout.contains("Usage"), "{stdout}");
    }

    // Nothing is written when the arguments are rejected.
    assert!(!output.exists());
    assert!(!extra.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.txt");
    let output = dir.path().join("out.html");

    let result = du2html(&[&input, &output]);
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("du.txt");
    std::fs::write(&input, "1\ta\n").unwrap();
    let output = dir.path().join("no-such-dir").join("out.html");

    let result = du2html(&[&input, &output]);
    assert!(!result.status.success());
}
