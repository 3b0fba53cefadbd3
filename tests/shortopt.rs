use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

struct TestPlan {
    args: Vec<&'static str>,
    expected_out: &'static str,
    expected_err: &'static str,
    expected_exit_code: i32,
}

/// Run the shortopt binary with `args`, with a clean debug configuration plus `env_vars`.
fn run_shortopt(args: &[&str], env_vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_shortopt"));
    command
        .args(args)
        .env_remove("SHORTOPT_DEBUG")
        .env_remove("SHORTOPT_DEBUG_OUTPUT")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in env_vars {
        command.env(key, value);
    }
    command.output().expect("failed to run shortopt")
}

fn run_test(plan: TestPlan) {
    let output = run_shortopt(&plan.args, &[]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, plan.expected_out);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr, plan.expected_err);

    assert_eq!(output.status.code(), Some(plan.expected_exit_code));
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("shortopt_{}_{}", name, std::process::id()))
}

#[test]
fn test_canonical_line() {
    run_test(TestPlan {
        args: vec!["aBn:", "-aBn42", "rest"],
        expected_out: " -a -B -n '42' -- 'rest'\n",
        expected_err: "",
        expected_exit_code: 0,
    });
    run_test(TestPlan {
        args: vec!["aBn:", "-n", "it's", "--", "-B"],
        expected_out: " -n 'it'\\''s' -- '-B'\n",
        expected_err: "",
        expected_exit_code: 0,
    });
}

#[test]
fn test_parse_errors() {
    // The canonical line is still printed, and each error is reported.
    run_test(TestPlan {
        args: vec!["aBn:", "-za", "x"],
        expected_out: " -a -- 'x'\n",
        expected_err: "shortopt: invalid option -- 'z'\n",
        expected_exit_code: 1,
    });
    run_test(TestPlan {
        args: vec!["aBn:", "-a", "-n"],
        expected_out: " -a --\n",
        expected_err: "shortopt: option requires an argument -- 'n'\n",
        expected_exit_code: 1,
    });
}

#[test]
fn test_name_option() {
    run_test(TestPlan {
        args: vec!["-n", "mytool", "aB", "-q"],
        expected_out: " --\n",
        expected_err: "mytool: invalid option -- 'q'\n",
        expected_exit_code: 1,
    });
}

#[test]
fn test_optstring_after_double_dash() {
    // An option string starting with `:` recognizes nothing.
    run_test(TestPlan {
        args: vec!["--", ":a", "-a"],
        expected_out: " --\n",
        expected_err: "shortopt: invalid option -- 'a'\n",
        expected_exit_code: 1,
    });
}

#[test]
fn test_usage_errors() {
    let usage = "Usage: shortopt [-hvL] [-d CATEGORIES] [-o PATH] [-n NAME] [--] OPTSTRING [ARG...]\n";

    let output = run_shortopt(&[], &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        format!("shortopt: missing option string\n{}", usage)
    );

    let output = run_shortopt(&["-x", "ab"], &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        format!("shortopt: invalid option -- 'x'\n{}", usage)
    );

    let output = run_shortopt(&["-h"], &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), usage);
}

#[test]
fn test_version() {
    let output = run_shortopt(&["-v"], &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("shortopt, version {}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_list_debug_categories() {
    let output = run_shortopt(&["-d", "getopt", "-L"], &[]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("getopt "));
    assert!(lines[2].contains("Option scanning outcomes [enabled]"));
    assert!(lines[3].starts_with("canonical-output "));
    assert!(!lines[3].contains("[enabled]"));
}

#[test]
fn test_debug_output_from_env() {
    let log = temp_path("env_log");
    let output = run_shortopt(
        &["ab", "-b"],
        &[
            ("SHORTOPT_DEBUG", "canonical-output"),
            ("SHORTOPT_DEBUG_OUTPUT", log.to_str().unwrap()),
        ],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), " -b --\n");
    assert!(output.stderr.is_empty());

    let contents = std::fs::read_to_string(&log).unwrap();
    assert_eq!(contents, "canonical-output:  -b --\n");
    std::fs::remove_file(&log).unwrap();
}

#[test]
fn test_debug_output_flag_wins_over_env() {
    let env_log = temp_path("ignored_log");
    let flag_log = temp_path("flag_log");
    let _ = std::fs::remove_file(&env_log);

    let output = run_shortopt(
        &[
            "-d",
            "canonical_output",
            "-o",
            flag_log.to_str().unwrap(),
            "ab",
            "-a",
        ],
        &[("SHORTOPT_DEBUG_OUTPUT", env_log.to_str().unwrap())],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), " -a --\n");

    let contents = std::fs::read_to_string(&flag_log).unwrap();
    assert_eq!(contents, "canonical-output:  -a --\n");
    assert!(!env_log.exists());
    std::fs::remove_file(&flag_log).unwrap();
}
