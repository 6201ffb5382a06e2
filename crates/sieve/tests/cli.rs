//! CLI integration tests for sieve commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a sieve command.
fn sieve() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("sieve").unwrap()
}

/// Helper to run `sieve` in `dir` with HOME isolated to the same directory.
fn sieve_in(dir: &Path) -> Command {
    let mut cmd = sieve();
    cmd.env("HOME", dir).env_remove("SIEVE_LOG").current_dir(dir);
    cmd
}

/// Runs `sieve` with `args` in `dir` and parses stdout as JSON.
fn json_output(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = sieve_in(dir).args(args).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

mod parse {
    use super::*;

    #[test]
    fn prints_tree() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["parse", "cats incategory:Felines"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Word(\"cats\")"))
            .stdout(predicate::str::contains("Keyword(incategory:Felines)"));
    }

    #[test]
    fn prints_warnings() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["parse", "pageid:12|abc"])
            .assert()
            .success()
            .stdout(predicate::str::contains("feature-pageid-invalid-id"));
    }

    #[test]
    fn json_output_format() {
        let dir = temp_dir();
        let json = json_output(dir.path(), &["parse", "--json", "-java rust"]);

        assert_eq!(json["query"], "-java rust");
        let clauses = json["root"]["clauses"].as_array().unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0]["occur"], "MUST_NOT");
        assert_eq!(clauses[1]["node"]["type"], "word");
    }

    #[test]
    fn leading_negation_is_a_query() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["parse", "-java rust"])
            .assert()
            .success()
            .stdout(predicate::str::contains("MUST_NOT explicit"))
            .stdout(predicate::str::contains("Word(\"java\")"));
    }

    #[test]
    fn empty_query_succeeds() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["parse", "   "])
            .assert()
            .success()
            .stdout(predicate::str::contains("Empty"));
    }

    #[test]
    fn too_long_fails() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["parse", "--max-length", "5", "hello world"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("query-too-long"));
    }

    #[test]
    fn hard_ceiling_applies_without_soft_limit() {
        let dir = temp_dir();
        let query = "a".repeat(2049);

        sieve_in(dir.path())
            .args(["parse", "--max-length", "100000", &query])
            .assert()
            .failure()
            .stderr(predicate::str::contains("query-too-long"));
    }

    #[test]
    fn exempt_keywords_do_not_count() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["parse", "--max-length", "10", "incategory:Felines cats"])
            .assert()
            .success();
    }

    #[test]
    fn configured_limit_applies() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sieve.toml"),
            "[parser]\nmax_query_length = 5\n",
        )
        .unwrap();

        sieve_in(dir.path())
            .args(["parse", "hello world"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("query-too-long"));
    }
}

mod filter {
    use super::*;

    #[test]
    fn prints_query_string_and_filter() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["filter", "cats incategory:Felines"])
            .assert()
            .success()
            .stdout(predicate::str::contains("+cats"))
            .stdout(predicate::str::contains("category.lowercase_keyword"))
            .stdout(predicate::str::contains("Results possible: yes"));
    }

    #[test]
    fn json_output_format() {
        let dir = temp_dir();
        let json = json_output(dir.path(), &["filter", "--json", "cats -pageid:12"]);

        assert_eq!(json["query_string"], "+cats");
        assert_eq!(json["results_possible"], true);
        assert_eq!(json["filter"]["type"], "bool");
        assert_eq!(json["filter"]["must_not"][0]["type"], "ids");
        assert_eq!(json["fallback_methods"][0], "phrase_suggest");
    }

    #[test]
    fn leading_negated_keyword() {
        let dir = temp_dir();
        let json = json_output(dir.path(), &["filter", "--json", "-pageid:12 cats"]);

        assert_eq!(json["query_string"], "+cats");
        assert_eq!(json["filter"]["must_not"][0]["type"], "ids");
        assert_eq!(json["filter"]["must_not"][0]["values"][0], 12);
    }

    #[test]
    fn leading_negated_word_without_flags() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["filter", "-java rust"])
            .assert()
            .success()
            .stdout(predicate::str::contains("MUST_NOT java"));
    }

    #[test]
    fn unusable_directive_makes_results_impossible() {
        let dir = temp_dir();
        let json = json_output(dir.path(), &["filter", "--json", "cats pageid:abc"]);

        assert_eq!(json["results_possible"], false);
        assert_eq!(json["filter"]["type"], "match_none");
    }

    #[test]
    fn strict_matches_exact_field() {
        let dir = temp_dir();
        let json = json_output(
            dir.path(),
            &["filter", "--json", "--strict", "incategory:Felines"],
        );

        assert_eq!(json["filter"]["field"], "category");
        assert_eq!(json["filter"]["values"][0], "Felines");
    }

    #[test]
    fn should_drops_required_prefix() {
        let dir = temp_dir();
        let json = json_output(dir.path(), &["filter", "--json", "--should", "cats dogs"]);

        assert_eq!(json["query_string"], "cats dogs");
    }

    #[test]
    fn keyword_only_query_has_no_fallback() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .args(["filter", "incategory:Felines"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Fallback methods: (none)"));
    }

    #[test]
    fn index_lookup_enabled_by_config() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sieve.toml"),
            "[fallback.index_lookup]\nenabled = true\n",
        )
        .unwrap();
        let json = json_output(dir.path(), &["filter", "--json", "cats"]);

        let methods = json["fallback_methods"].as_array().unwrap();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[1], "index_lookup");
    }
}

mod keywords {
    use super::*;

    #[test]
    fn lists_builtin_features() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .arg("keywords")
            .assert()
            .success()
            .stdout(predicate::str::contains("incategory"))
            .stdout(predicate::str::contains("articletopic"))
            .stdout(predicate::str::contains("builtin"));
    }

    #[test]
    fn json_output_format() {
        let dir = temp_dir();
        let json = json_output(dir.path(), &["keywords", "--json"]);

        let features = json.as_array().unwrap();
        assert_eq!(features.len(), 5);
        assert_eq!(features[0]["keywords"][0], "incategory");
        assert_eq!(features[0]["source"], "builtin");
    }

    #[test]
    fn disabled_keyword_not_listed() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sieve.toml"),
            "[keywords]\ndisabled = \"hasrecommendation\"\n",
        )
        .unwrap();

        sieve_in(dir.path())
            .arg("keywords")
            .assert()
            .success()
            .stdout(predicate::str::contains("incategory"))
            .stdout(predicate::str::contains("hasrecommendation").not());
    }

    #[test]
    fn disabled_keyword_parses_as_text() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sieve.toml"),
            "[keywords]\ndisabled = [\"pageid\"]\n",
        )
        .unwrap();

        sieve_in(dir.path())
            .args(["parse", "pageid:12"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Word(\"pageid:12\")"));
    }
}

mod config {
    use super::*;

    #[test]
    fn succeeds_without_config() {
        let dir = temp_dir();

        sieve_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found"))
            .stdout(predicate::str::contains("max_query_length = 300"));
    }

    #[test]
    fn discovers_parent_config() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sieve.toml"),
            "[parser]\nmax_query_length = 120\n",
        )
        .unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();

        sieve()
            .env("HOME", dir.path())
            .current_dir(&sub)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains(".sieve.toml"))
            .stdout(predicate::str::contains("max_query_length = 120"));
    }

    #[test]
    fn reports_root_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sieve.toml"), "root = true\n").unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();

        sieve()
            .env("HOME", dir.path())
            .current_dir(&sub)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("Search stopped at root config"));
    }

    #[test]
    fn warns_on_limit_above_ceiling() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sieve.toml"),
            "[parser]\nmax_query_length = 5000\n",
        )
        .unwrap();

        sieve_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("above the hard ceiling"));
    }

    #[test]
    fn fails_on_invalid_toml() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sieve.toml"), "[parser\n").unwrap();

        sieve_in(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn fails_on_unknown_field() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sieve.toml"),
            "[parser]\nmax_length = 5\n",
        )
        .unwrap();

        sieve_in(dir.path())
            .arg("config")
            .assert()
            .failure();
    }
}
