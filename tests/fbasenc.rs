use std::io::Write;
use std::process::{Command, Stdio};

struct Run {
    stdout: Vec<u8>,
    stderr: String,
    code: i32,
}

fn run_fbasenc(input: &[u8], args: &[&str]) -> Run {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fbasenc"));
    cmd.args(args);
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("failed to spawn fbasenc");
    let mut stdin = child.stdin.take().unwrap();
    let input = input.to_vec();
    // Feed stdin from a thread so a large input cannot deadlock against stdout.
    let feeder = std::thread::spawn(move || {
        let _ = stdin.write_all(&input);
    });
    let output = child.wait_with_output().expect("failed to wait");
    feeder.join().unwrap();
    Run {
        stdout: output.stdout,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        code: output.status.code().unwrap_or(1),
    }
}

// ===== ENCODING =====

#[test]
fn test_encode_stdin_base64() {
    let r = run_fbasenc(b"hello\n", &["--base64"]);
    assert_eq!(r.code, 0);
    assert_eq!(r.stdout, b"aGVsbG8K\n");
}

#[test]
fn test_encode_each_scheme() {
    let cases: [(&str, &[u8]); 8] = [
        ("--base64", b"TWFu\n"),
        ("--base64url", b"TWFu\n"),
        ("--base32", b"JVQW4===\n"),
        ("--base32hex", b"9LGMS===\n"),
        ("--base16", b"4D616E\n"),
        ("--base2msbf", b"010011010110000101101110\n"),
        ("--base2lsbf", b"101100101000011001110110\n"),
        ("--z85", b"o<}].\n"),
    ];
    for (flag, expected) in cases {
        let input: &[u8] = if flag == "--z85" { b"Man!" } else { b"Man" };
        let r = run_fbasenc(input, &[flag]);
        assert_eq!(r.code, 0, "{}: {}", flag, r.stderr);
        assert_eq!(r.stdout, expected, "{}", flag);
    }
}

#[test]
fn test_encode_wrap() {
    let r = run_fbasenc(b"foobar", &["--base16", "-w", "5"]);
    assert_eq!(r.code, 0);
    assert_eq!(r.stdout, b"666F6\nF6261\n72\n");
}

#[test]
fn test_encode_no_wrap() {
    let data = vec![0xA5u8; 300];
    let r = run_fbasenc(&data, &["--base64", "--wrap=0"]);
    assert_eq!(r.code, 0);
    assert!(!r.stdout.contains(&b'\n'));
    assert_eq!(r.stdout.len(), 400);
}

#[test]
fn test_encode_default_wrap_76() {
    let data = vec![0u8; 120];
    let r = run_fbasenc(&data, &["--base64"]);
    assert_eq!(r.code, 0);
    let text = String::from_utf8(r.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].len(), 76);
    assert_eq!(lines[1].len(), 76);
    assert_eq!(lines[2].len(), 8);
}

#[test]
fn test_encode_empty() {
    let r = run_fbasenc(b"", &["--base32"]);
    assert_eq!(r.code, 0);
    assert!(r.stdout.is_empty());
}

#[test]
fn test_encode_z85_misaligned() {
    let r = run_fbasenc(b"abc", &["--z85"]);
    assert_eq!(r.code, 1);
    assert!(r.stdout.is_empty());
    assert!(r.stderr.starts_with("basenc: invalid input"), "{}", r.stderr);
}

// ===== DECODING =====

#[test]
fn test_decode_stdin() {
    let r = run_fbasenc(b"aGVsbG8K\n", &["--base64", "-d"]);
    assert_eq!(r.code, 0);
    assert_eq!(r.stdout, b"hello\n");
}

#[test]
fn test_decode_long_flag() {
    let r = run_fbasenc(b"JVQW4===", &["--decode", "--base32"]);
    assert_eq!(r.code, 0);
    assert_eq!(r.stdout, b"Man");
}

#[test]
fn test_decode_invalid_input_keeps_prefix() {
    let r = run_fbasenc(b"Zm9v!", &["--base64", "-d"]);
    assert_eq!(r.code, 1);
    assert_eq!(r.stdout, b"foo");
    assert_eq!(r.stderr, "basenc: invalid input\n");
}

#[test]
fn test_decode_ignore_garbage() {
    let r = run_fbasenc(b"QQ==\n***\tQQ==", &["--base64", "-d", "-i"]);
    assert_eq!(r.code, 0);
    assert_eq!(r.stdout, b"AA");
}

#[test]
fn test_decode_concatenated_files() {
    let r = run_fbasenc(b"Zm9vYg==\nYmFy\n", &["--base64", "-d"]);
    assert_eq!(r.code, 0, "{}", r.stderr);
    assert_eq!(r.stdout, b"foobar");
}

#[test]
fn test_decode_base2_leftover_bits() {
    let r = run_fbasenc(b"0100110", &["--base2msbf", "-d"]);
    assert_eq!(r.code, 1);
    assert!(r.stderr.contains("invalid input"), "{}", r.stderr);
}

#[test]
fn test_decode_z85() {
    let r = run_fbasenc(b"HelloWorld\n", &["--z85", "-d"]);
    assert_eq!(r.code, 0);
    assert_eq!(r.stdout, [0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B]);
}

// ===== FILES =====

#[test]
fn test_file_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    std::fs::write(&path, b"foobar").unwrap();
    let r = run_fbasenc(b"ignored", &["--base32hex", path.to_str().unwrap()]);
    assert_eq!(r.code, 0);
    assert_eq!(r.stdout, b"CPNMUOJ1E8======\n");
}

#[test]
fn test_dash_reads_stdin() {
    let r = run_fbasenc(b"foobar", &["--base16", "-"]);
    assert_eq!(r.code, 0);
    assert_eq!(r.stdout, b"666F6F626172\n");
}

#[test]
fn test_large_file_roundtrip() {
    // Above the mmap threshold.
    let data: Vec<u8> = (0..3 * 1024 * 1024u32).map(|i| (i * 7 + i / 251) as u8).collect();
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw.bin");
    std::fs::write(&raw, &data).unwrap();

    let enc = run_fbasenc(b"", &["--base64", raw.to_str().unwrap()]);
    assert_eq!(enc.code, 0, "{}", enc.stderr);

    let encoded = dir.path().join("raw.b64");
    std::fs::write(&encoded, &enc.stdout).unwrap();
    let dec = run_fbasenc(b"", &["--base64", "-d", encoded.to_str().unwrap()]);
    assert_eq!(dec.code, 0, "{}", dec.stderr);
    assert!(dec.stdout == data);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    let name = path.to_str().unwrap();
    let r = run_fbasenc(b"", &["--base64", name]);
    assert_eq!(r.code, 1);
    assert_eq!(
        r.stderr,
        format!("basenc: {}: No such file or directory\n", name)
    );
}

// ===== COMMAND LINE =====

#[test]
fn test_missing_encoding() {
    let r = run_fbasenc(b"foo", &[]);
    assert_eq!(r.code, 1);
    assert!(r.stdout.is_empty());
    assert!(r.stderr.starts_with("basenc: missing encoding type\n"), "{}", r.stderr);
    assert!(r.stderr.contains("--help"));
}

#[test]
fn test_conflicting_encodings() {
    let r = run_fbasenc(b"foo", &["--base64", "--base32"]);
    assert_eq!(r.code, 2);
    assert!(r.stdout.is_empty());
}

#[test]
fn test_repeated_flags() {
    let r = run_fbasenc(b"Man", &["--base64", "--base64", "-w", "2", "-w", "0"]);
    assert_eq!(r.code, 0, "{}", r.stderr);
    assert_eq!(r.stdout, b"TWFu");

    let r = run_fbasenc(b"TWFu", &["--base64", "-d", "--decode"]);
    assert_eq!(r.code, 0, "{}", r.stderr);
    assert_eq!(r.stdout, b"Man");
}

#[test]
fn test_help() {
    let r = run_fbasenc(b"", &["--help"]);
    assert_eq!(r.code, 0);
    let help = String::from_utf8(r.stdout).unwrap();
    for flag in ["--base64url", "--base2msbf", "--z85", "--ignore-garbage", "--wrap"] {
        assert!(help.contains(flag), "help is missing {}", flag);
    }
}

#[test]
fn test_version() {
    let r = run_fbasenc(b"", &["--version"]);
    assert_eq!(r.code, 0);
    assert!(String::from_utf8(r.stdout).unwrap().starts_with("basenc "));
}
