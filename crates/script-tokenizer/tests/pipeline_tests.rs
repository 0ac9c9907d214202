/// Integration tests for the tokenizer pipeline

use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use script_tokenizer::{destination_path, substitute_line, RunOptions, TokenTable, Tokenizer, TokenizerError};
use tempfile::TempDir;

/// Helper to write a token file and return its path
fn write_tokens(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("tokens.ini");
    fs::write(&path, format!("[script-tokenizer]\n{}", body)).unwrap();
    path
}

#[test]
fn test_host_scenario() {
    let dir = TempDir::new().unwrap();
    let tokens = write_tokens(dir.path(), "HOST = prod.example.com\n");
    let script = dir.path().join("deploy.sh");
    fs::write(&script, "#!/bin/sh\ncurl HOST/api\n").unwrap();

    let out = dir.path().join("out");
    let summary = Tokenizer::new(RunOptions::new(&tokens, [&script]).output_dir(&out))
        .run()
        .expect("run failed");

    assert_eq!(summary.generated, vec![out.join("deploy.sh.tok")]);
    let text = fs::read_to_string(out.join("deploy.sh.tok")).unwrap();
    assert_eq!(text, "#!/bin/sh\ncurl prod.example.com/api\n");
}

#[test]
fn test_multiple_scripts_in_order() {
    let dir = TempDir::new().unwrap();
    let tokens = write_tokens(dir.path(), "USER = deploy\nROOT = /srv/%(USER)s\n");
    let scripts_dir = dir.path().join("scripts/nested");
    fs::create_dir_all(&scripts_dir).unwrap();

    let first = scripts_dir.join("one.sh");
    let second = dir.path().join("two.sh");
    fs::write(&first, "cd ROOT\n").unwrap();
    fs::write(&second, "sudo -u USER make\n").unwrap();

    let out = dir.path().join("out");
    let summary = Tokenizer::new(RunOptions::new(&tokens, [&first, &second]).output_dir(&out))
        .run()
        .unwrap();

    assert_eq!(summary.generated, vec![out.join("one.sh.tok"), out.join("two.sh.tok")]);
    assert_eq!(fs::read_to_string(out.join("one.sh.tok")).unwrap(), "cd /srv/deploy\n");
    assert_eq!(fs::read_to_string(out.join("two.sh.tok")).unwrap(), "sudo -u deploy make\n");
}

#[test]
fn test_clobber_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let tokens = write_tokens(dir.path(), "NAME = fresh\n");
    let script = dir.path().join("run.sh");
    fs::write(&script, "echo NAME\n").unwrap();
    fs::write(dir.path().join("run.sh.tok"), "echo stale\n").unwrap();

    let options = RunOptions::new(&tokens, [&script]).output_dir(dir.path());
    let err = Tokenizer::new(options.clone()).run().unwrap_err();
    assert!(matches!(err, TokenizerError::OutputExists(_)));
    assert_eq!(fs::read_to_string(dir.path().join("run.sh.tok")).unwrap(), "echo stale\n");

    Tokenizer::new(options.clobber(true)).run().unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("run.sh.tok")).unwrap(), "echo fresh\n");
}

#[test]
fn test_missing_script_aborts() {
    let dir = TempDir::new().unwrap();
    let tokens = write_tokens(dir.path(), "A = b\n");

    let options = RunOptions::new(&tokens, [dir.path().join("absent.sh")]).output_dir(dir.path());
    let err = Tokenizer::new(options).run().unwrap_err();
    assert!(matches!(err, TokenizerError::Io { .. }));
}

#[test]
fn test_unreadable_token_file() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("run.sh");
    fs::write(&script, "echo\n").unwrap();

    let options = RunOptions::new(dir.path().join("nope.ini"), [&script]).output_dir(dir.path());
    let err = Tokenizer::new(options).run().unwrap_err();
    assert!(matches!(err, TokenizerError::TokenFile { .. }));
    assert!(!dir.path().join("run.sh.tok").exists());
}

fn token_table() -> impl Strategy<Value = TokenTable> {
    prop::collection::btree_map("[A-Z]{1,6}", "[a-z0-9./]{1,8}", 0..6)
        .prop_map(|tokens| tokens.into_iter().collect())
}

proptest! {
    // Values are lowercase and non-empty, so no replacement can introduce or
    // assemble an uppercase token name.
    #[test]
    fn prop_no_token_survives(table in token_table(), line in "[A-Za-z0-9 /.]{0,40}") {
        let result = substitute_line(&table, line.as_bytes());
        let result = String::from_utf8(result).unwrap();
        for (name, _) in table.iter() {
            prop_assert!(!result.contains(name), "{} left in {:?}", name, result);
        }
    }

    #[test]
    fn prop_lines_without_tokens_unchanged(table in token_table(), line in "[a-z0-9 \r\n]{0,40}") {
        prop_assert_eq!(substitute_line(&table, line.as_bytes()), line.as_bytes().to_vec());
    }

    #[test]
    fn prop_destination_is_dir_plus_basename(
        dirs in prop::collection::vec("[a-z]{1,5}", 0..4),
        name in "[a-z][a-z0-9_.]{0,8}",
        out in "[a-z]{1,5}",
    ) {
        let mut script = PathBuf::new();
        for d in &dirs {
            script.push(d);
        }
        script.push(&name);

        let dest = destination_path(&script, Path::new(&out)).unwrap();
        prop_assert_eq!(dest, Path::new(&out).join(format!("{}.tok", name)));
    }
}
